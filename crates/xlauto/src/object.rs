//! Owned reference to an object living in the host.

use xlauto_protocol::{CellValue, Command, ObjectId, ResponseData};

use crate::error::{AutomationError, Result};
use crate::host::AutomationHost;

/// Owns one host object and releases it when dropped.
///
/// Every handle type (workbook, worksheet, range, font) wraps exactly one of
/// these, so the host-side reference lives as long as the Rust value.
pub(crate) struct HostObject<'a> {
    host: &'a dyn AutomationHost,
    id: ObjectId,
    owned: bool,
}

impl<'a> HostObject<'a> {
    pub(crate) fn new(host: &'a dyn AutomationHost, id: ObjectId) -> Self {
        Self {
            host,
            id,
            owned: true,
        }
    }

    pub(crate) fn id(&self) -> ObjectId {
        self.id
    }

    pub(crate) fn host(&self) -> &'a dyn AutomationHost {
        self.host
    }

    pub(crate) fn call(&self, command: Command) -> Result<Option<ResponseData>> {
        self.host.call(command)
    }

    /// Issue a command whose success releases the object on the host side.
    ///
    /// If the command fails the object is still live, and dropping `self`
    /// releases it.
    pub(crate) fn consume(mut self, command: Command) -> Result<()> {
        self.host.call(command)?;
        self.owned = false;
        Ok(())
    }
}

impl Drop for HostObject<'_> {
    fn drop(&mut self) {
        if !self.owned {
            return;
        }
        if let Err(e) = self.host.call(Command::Release { object: self.id }) {
            tracing::warn!("Failed to release host object {}: {e}", self.id);
        }
    }
}

/// Look up a new host object from a response.
pub(crate) fn expect_object<'a>(
    host: &'a dyn AutomationHost,
    data: Option<ResponseData>,
    what: &'static str,
) -> Result<HostObject<'a>> {
    match data {
        Some(ResponseData::Object { object }) => Ok(HostObject::new(host, object)),
        _ => Err(AutomationError::UnexpectedResponse(what)),
    }
}

pub(crate) fn expect_text(data: Option<ResponseData>, what: &'static str) -> Result<String> {
    match data {
        Some(ResponseData::Text { text }) => Ok(text),
        _ => Err(AutomationError::UnexpectedResponse(what)),
    }
}

pub(crate) fn expect_value(data: Option<ResponseData>, what: &'static str) -> Result<CellValue> {
    match data {
        Some(ResponseData::Value { value }) => Ok(value),
        _ => Err(AutomationError::UnexpectedResponse(what)),
    }
}

pub(crate) fn expect_count(data: Option<ResponseData>, what: &'static str) -> Result<u32> {
    match data {
        Some(ResponseData::Count { count }) => Ok(count),
        _ => Err(AutomationError::UnexpectedResponse(what)),
    }
}
