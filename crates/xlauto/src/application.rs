//! The application: entry point that owns the host connection.

use std::path::Path;

use xlauto_protocol::Command;

use crate::error::Result;
use crate::host::{AutomationHost, HostConfig, StdioHost};
use crate::object::expect_object;
use crate::workbook::Workbook;

/// A running Excel application.
///
/// Workbooks and everything reached from them borrow the application, so it
/// cannot be shut down while any of them is alive. Dropping the application
/// without calling [`shutdown`](Self::shutdown) shuts the host down as well.
pub struct Application {
    host: Box<dyn AutomationHost>,
    running: bool,
}

impl Application {
    /// Launch the host process and start the application.
    pub fn start(config: HostConfig) -> Result<Self> {
        let host = StdioHost::spawn(&config)?;
        Self::with_host_visible(host, config.visible)
    }

    /// Start the application through an existing host.
    pub fn with_host(host: impl AutomationHost + 'static) -> Result<Self> {
        Self::with_host_visible(host, false)
    }

    fn with_host_visible(host: impl AutomationHost + 'static, visible: bool) -> Result<Self> {
        let host: Box<dyn AutomationHost> = Box::new(host);
        host.call(Command::Init { visible })?;
        Ok(Self {
            host,
            running: true,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Show or hide the application window.
    pub fn set_visible(&self, visible: bool) -> Result<()> {
        self.host.call(Command::SetVisible { visible })?;
        Ok(())
    }

    /// Open an existing workbook.
    pub fn open_workbook(&self, path: impl AsRef<Path>) -> Result<Workbook<'_>> {
        let path = self.host.host_path(path.as_ref());
        tracing::debug!("Opening workbook {path}");
        let data = self.host.call(Command::OpenWorkbook { path })?;
        Ok(Workbook::new(expect_object(
            &*self.host,
            data,
            "OpenWorkbook",
        )?))
    }

    /// Create a new workbook and save it at `path`.
    pub fn create_workbook(&self, path: impl AsRef<Path>) -> Result<Workbook<'_>> {
        let path = self.host.host_path(path.as_ref());
        tracing::debug!("Creating workbook {path}");
        let data = self.host.call(Command::CreateWorkbook { path })?;
        Ok(Workbook::new(expect_object(
            &*self.host,
            data,
            "CreateWorkbook",
        )?))
    }

    /// Close all workbooks, quit the application and stop the host.
    pub fn shutdown(mut self) -> Result<()> {
        self.running = false;
        self.host.call(Command::Shutdown)?;
        Ok(())
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        if self.running {
            if let Err(e) = self.host.call(Command::Shutdown) {
                tracing::warn!("Failed to shut down application on drop: {e}");
            }
        }
    }
}
