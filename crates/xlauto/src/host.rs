//! Automation host transport: the trait the object model talks through, and
//! a subprocess implementation speaking JSON lines over stdio.

use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use xlauto_protocol::{Command, Request, Response, ResponseData, ResponseResult};

use crate::error::{AutomationError, Result};

/// Something that executes automation commands against a live application.
///
/// The object model issues every property read, property write and method
/// call through this trait, one command at a time.
pub trait AutomationHost: Send + Sync {
    /// Execute one command and return its payload, if any.
    fn call(&self, command: Command) -> Result<Option<ResponseData>>;

    /// Translate a local path into the form the host's filesystem expects.
    fn host_path(&self, path: &Path) -> String {
        absolute(path).display().to_string()
    }
}

impl<T: AutomationHost + ?Sized> AutomationHost for Arc<T> {
    fn call(&self, command: Command) -> Result<Option<ResponseData>> {
        (**self).call(command)
    }

    fn host_path(&self, path: &Path) -> String {
        (**self).host_path(path)
    }
}

impl<T: AutomationHost + ?Sized> AutomationHost for Box<T> {
    fn call(&self, command: Command) -> Result<Option<ResponseData>> {
        (**self).call(command)
    }

    fn host_path(&self, path: &Path) -> String {
        (**self).host_path(path)
    }
}

/// Configuration for launching the host process.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Path to the host executable.
    /// If None, will search in common locations relative to the current binary.
    pub host_exe_path: Option<PathBuf>,

    /// Program used to run the host, e.g. `wine` on Linux. `None` runs the
    /// executable directly.
    pub launcher: Option<PathBuf>,

    /// Optional WINEPREFIX to use when running under WINE.
    pub wine_prefix: Option<PathBuf>,

    /// Timeout for waiting for host responses.
    pub timeout: Duration,

    /// Whether the application window is shown.
    pub visible: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            host_exe_path: None,
            launcher: if cfg!(windows) {
                None
            } else {
                Some(PathBuf::from("wine"))
            },
            wine_prefix: None,
            timeout: Duration::from_secs(30),
            visible: false,
        }
    }
}

/// A host running as a child process.
///
/// Requests are written to the child's stdin; a reader thread forwards
/// response lines so reads can time out. One lock covers both directions,
/// so concurrent callers each get their own reply.
pub struct StdioHost {
    child: Mutex<Child>,
    channel: Mutex<Channel>,
    next_id: AtomicU64,
    timeout: Duration,
    wine_paths: bool,
}

impl StdioHost {
    /// Spawn the host process.
    pub fn spawn(config: &HostConfig) -> Result<Self> {
        let exe_path = config
            .host_exe_path
            .clone()
            .unwrap_or_else(find_host_exe);

        if !exe_path.exists() {
            return Err(AutomationError::HostExeNotFound(
                exe_path.display().to_string(),
            ));
        }

        let mut cmd = match &config.launcher {
            Some(launcher) => {
                let mut cmd = std::process::Command::new(launcher);
                cmd.arg(&exe_path);
                cmd
            }
            None => std::process::Command::new(&exe_path),
        };

        if let Some(prefix) = &config.wine_prefix {
            cmd.env("WINEPREFIX", prefix);
        }

        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::inherit()); // Host diagnostics go to our stderr

        let mut child = cmd.spawn().map_err(|e| match (&config.launcher, e.kind()) {
            (Some(launcher), std::io::ErrorKind::NotFound) => {
                AutomationError::LauncherNotFound(launcher.display().to_string())
            }
            _ => AutomationError::SpawnFailed(e),
        })?;

        let stdin = child.stdin.take().ok_or(AutomationError::NotRunning)?;
        let stdout = child.stdout.take().ok_or(AutomationError::NotRunning)?;

        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("xlauto-host-reader".into())
            .spawn(move || {
                for line in BufReader::new(stdout).lines() {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })?;

        tracing::info!("Started automation host {}", exe_path.display());

        Ok(Self {
            child: Mutex::new(child),
            channel: Mutex::new(Channel {
                stdin,
                responses: rx,
            }),
            next_id: AtomicU64::new(1),
            timeout: config.timeout,
            wine_paths: config.launcher.is_some(),
        })
    }

    /// Send a request and wait for its response while holding the channel.
    fn round_trip(&self, request: &Request) -> Result<Response> {
        let json = serde_json::to_string(request)?;
        let mut channel = self
            .channel
            .lock()
            .map_err(|_| AutomationError::SendFailed("channel lock poisoned".into()))?;

        tracing::trace!("-> {json}");
        channel.send(&json)?;
        channel.receive(request.id, self.timeout)
    }

    /// Wait for the child to exit after a shutdown request.
    fn reap(&self) {
        if let Ok(mut child) = self.child.lock() {
            match child.wait() {
                Ok(status) => tracing::debug!("Automation host exited with {status}"),
                Err(e) => tracing::warn!("Failed to wait for automation host: {e}"),
            }
        }
    }
}

/// The child's stdin paired with the reader thread's output.
struct Channel {
    stdin: ChildStdin,
    responses: Receiver<std::io::Result<String>>,
}

impl Channel {
    fn send(&mut self, json: &str) -> Result<()> {
        writeln!(self.stdin, "{json}").map_err(|e| AutomationError::SendFailed(e.to_string()))?;
        self.stdin
            .flush()
            .map_err(|e| AutomationError::SendFailed(e.to_string()))
    }

    fn receive(&self, id: u64, timeout: Duration) -> Result<Response> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let line = match self.responses.recv_timeout(remaining) {
                Ok(line) => line.map_err(|e| AutomationError::ReadFailed(e.to_string()))?,
                Err(RecvTimeoutError::Timeout) => return Err(AutomationError::Timeout(timeout)),
                Err(RecvTimeoutError::Disconnected) => return Err(AutomationError::NotRunning),
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            tracing::trace!("<- {line}");

            let response: Response = serde_json::from_str(line)?;
            if response.id == id {
                return Ok(response);
            }
            // A response to an earlier request that timed out
            tracing::warn!("Discarding stale response {} while waiting for {id}", response.id);
        }
    }
}

impl AutomationHost for StdioHost {
    fn call(&self, command: Command) -> Result<Option<ResponseData>> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let shutdown = matches!(command, Command::Shutdown);
        let request = Request { id, command };

        tracing::debug!(id, command = ?request.command, "host call");
        let response = self.round_trip(&request)?;

        if shutdown {
            self.reap();
        }

        match response.result {
            ResponseResult::Ok { data } => Ok(data),
            ResponseResult::Error { message } => Err(AutomationError::Host(message)),
        }
    }

    fn host_path(&self, path: &Path) -> String {
        if self.wine_paths {
            linux_to_wine_path(path)
        } else {
            absolute(path).display().to_string()
        }
    }
}

impl Drop for StdioHost {
    fn drop(&mut self) {
        if let Ok(mut child) = self.child.lock() {
            if let Ok(None) = child.try_wait() {
                tracing::warn!("Automation host still running on drop; killing it");
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

/// Convert a Linux filesystem path to a WINE (Windows) path.
///
/// WINE maps `/` to `Z:\`, so `/home/user/file.xlsx` becomes `Z:\home\user\file.xlsx`.
pub fn linux_to_wine_path(linux_path: &Path) -> String {
    format!("Z:{}", absolute(linux_path).display()).replace('/', "\\")
}

/// Attempt to locate the host exe relative to the current executable or in common paths.
fn find_host_exe() -> PathBuf {
    const EXE: &str = "xlauto-host.exe";

    if let Ok(mut exe) = std::env::current_exe() {
        exe.pop();
        let candidate = exe.join(EXE);
        if candidate.exists() {
            return candidate;
        }
    }

    for profile in ["release", "debug"] {
        let candidate = PathBuf::from(format!("target/x86_64-pc-windows-gnu/{profile}/{EXE}"));
        if candidate.exists() {
            return candidate;
        }
    }

    PathBuf::from(EXE)
}
