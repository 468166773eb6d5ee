//! Workbook handle and its worksheet collection.

use std::path::Path;

use xlauto_protocol::Command;

use crate::constants::FileFormat;
use crate::error::Result;
use crate::object::{expect_count, expect_object, HostObject};
use crate::worksheet::Worksheet;

/// A handle to an open workbook.
pub struct Workbook<'a> {
    object: HostObject<'a>,
}

impl<'a> Workbook<'a> {
    pub(crate) fn new(object: HostObject<'a>) -> Self {
        Self { object }
    }

    /// The worksheet currently active in this workbook.
    pub fn active_worksheet(&self) -> Result<Worksheet<'a>> {
        let data = self.object.call(Command::ActiveWorksheet {
            workbook: self.object.id(),
        })?;
        Ok(Worksheet::new(expect_object(
            self.object.host(),
            data,
            "ActiveWorksheet",
        )?))
    }

    /// All worksheets of this workbook.
    pub fn worksheets(&self) -> Worksheets<'_, 'a> {
        Worksheets { workbook: self }
    }

    /// Save in place.
    pub fn save(&self) -> Result<()> {
        self.object.call(Command::SaveWorkbook {
            workbook: self.object.id(),
        })?;
        Ok(())
    }

    /// Save under a new name, choosing the file format from the extension.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.save_as_format(path, FileFormat::guess_from_path(path))
    }

    /// Save under a new name with an explicit file format.
    pub fn save_as_format(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let path = self.object.host().host_path(path.as_ref());
        self.object.call(Command::SaveWorkbookAs {
            workbook: self.object.id(),
            path,
            format: format.excel_constant(),
        })?;
        Ok(())
    }

    /// Close without saving.
    pub fn close(self) -> Result<()> {
        let workbook = self.object.id();
        self.object.consume(Command::CloseWorkbook { workbook })
    }
}

/// The worksheets of a workbook (Excel's `Worksheets` collection).
pub struct Worksheets<'w, 'a> {
    workbook: &'w Workbook<'a>,
}

impl<'a> Worksheets<'_, 'a> {
    pub fn count(&self) -> Result<u32> {
        let data = self.workbook.object.call(Command::WorksheetCount {
            workbook: self.workbook.object.id(),
        })?;
        expect_count(data, "WorksheetCount")
    }

    /// Worksheet by position. `index` starts from 1.
    pub fn get(&self, index: u32) -> Result<Worksheet<'a>> {
        let object = &self.workbook.object;
        let data = object.call(Command::Worksheet {
            workbook: object.id(),
            index,
        })?;
        Ok(Worksheet::new(expect_object(object.host(), data, "Worksheet")?))
    }
}
