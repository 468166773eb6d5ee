//! Worksheet handle.

use xlauto_protocol::{Command, ResponseData};

use crate::address::{CellRef, RangeRef};
use crate::error::Result;
use crate::object::{expect_object, expect_text, HostObject};
use crate::range::{Cell, Range};

/// A handle to one worksheet.
pub struct Worksheet<'a> {
    object: HostObject<'a>,
}

impl<'a> Worksheet<'a> {
    pub(crate) fn new(object: HostObject<'a>) -> Self {
        Self { object }
    }

    pub fn name(&self) -> Result<String> {
        let data = self.object.call(Command::GetSheetName {
            sheet: self.object.id(),
        })?;
        expect_text(data, "GetSheetName")
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        self.object.call(Command::SetSheetName {
            sheet: self.object.id(),
            name: name.to_string(),
        })?;
        Ok(())
    }

    /// A range by A1 reference, e.g. `"F16:J17"`.
    pub fn range(&self, reference: &str) -> Result<Range<'a>> {
        self.range_ref(RangeRef::parse(reference)?)
    }

    /// A range by 1-based column and row bounds.
    pub fn range_at(
        &self,
        col_from: u16,
        col_to: u16,
        row_from: u32,
        row_to: u32,
    ) -> Result<Range<'a>> {
        self.range_ref(RangeRef::new(
            CellRef::from_one_based(col_from, row_from)?,
            CellRef::from_one_based(col_to, row_to)?,
        ))
    }

    pub fn range_ref(&self, reference: RangeRef) -> Result<Range<'a>> {
        let data = self.get_range(reference)?;
        Ok(Range::new(
            expect_object(self.object.host(), data, "GetRange")?,
            reference,
        ))
    }

    /// A single cell by A1 reference, e.g. `"D4"`.
    pub fn cell(&self, reference: &str) -> Result<Cell<'a>> {
        self.cell_ref(CellRef::parse(reference)?)
    }

    /// A single cell by 1-based column and row.
    pub fn cell_at(&self, col: u16, row: u32) -> Result<Cell<'a>> {
        self.cell_ref(CellRef::from_one_based(col, row)?)
    }

    pub fn cell_ref(&self, cell: CellRef) -> Result<Cell<'a>> {
        let data = self.get_range(RangeRef::single(cell))?;
        Ok(Cell::new(
            expect_object(self.object.host(), data, "GetRange")?,
            cell,
        ))
    }

    /// Merge a range into one cell, or each of its rows into one cell when
    /// `across` is set.
    pub fn merge(&self, reference: &str, across: bool) -> Result<()> {
        let range = RangeRef::parse(reference)?;
        self.object.call(Command::MergeRange {
            sheet: self.object.id(),
            range: range.to_string(),
            across,
        })?;
        Ok(())
    }

    /// Copy this worksheet, placing the copy after it (or before it).
    ///
    /// The copy becomes the workbook's active worksheet; fetch it with
    /// [`Workbook::active_worksheet`](crate::Workbook::active_worksheet).
    pub fn copy(&self, after: bool) -> Result<()> {
        self.object.call(Command::CopySheet {
            sheet: self.object.id(),
            after,
        })?;
        Ok(())
    }

    fn get_range(&self, reference: RangeRef) -> Result<Option<ResponseData>> {
        self.object.call(Command::GetRange {
            sheet: self.object.id(),
            range: reference.to_string(),
        })
    }
}
