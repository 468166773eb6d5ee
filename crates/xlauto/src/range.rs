//! Range and cell handles, including bulk transfer through the grid codec.

use xlauto_codec::{decode, encode, Grid};
use xlauto_protocol::{CellValue, Command};

use crate::address::{CellRef, RangeRef};
use crate::constants::{HorizontalAlignment, VerticalAlignment};
use crate::error::{AutomationError, Result};
use crate::font::Font;
use crate::object::{expect_object, expect_text, expect_value, HostObject};

/// A rectangular block of cells.
///
/// [`read_grid`](Self::read_grid) and [`write_grid`](Self::write_grid) move
/// the whole block in a single host call.
pub struct Range<'a> {
    object: HostObject<'a>,
    reference: RangeRef,
}

impl<'a> Range<'a> {
    pub(crate) fn new(object: HostObject<'a>, reference: RangeRef) -> Self {
        Self { object, reference }
    }

    pub fn reference(&self) -> RangeRef {
        self.reference
    }

    pub fn rows(&self) -> usize {
        self.reference.rows()
    }

    pub fn columns(&self) -> usize {
        self.reference.columns()
    }

    /// Contents as an encoded string, values converted to text by the host.
    pub fn read_data(&self) -> Result<String> {
        let data = self.object.call(Command::ReadRange {
            range: self.object.id(),
        })?;
        expect_text(data, "ReadRange")
    }

    /// Contents as a grid.
    pub fn read_grid(&self) -> Result<Grid> {
        let grid = decode(&self.read_data()?)?;
        tracing::debug!(
            "Read {}x{} grid from {}",
            grid.rows(),
            grid.columns(),
            self.reference
        );
        Ok(grid)
    }

    /// Replace the contents from an encoded string.
    ///
    /// The string is decoded first; malformed data or a size that differs
    /// from the range is rejected without contacting the host.
    pub fn write_data(&self, data: &str) -> Result<()> {
        let grid = decode(data)?;
        self.check_shape(&grid)?;
        self.send(data.to_string())
    }

    /// Replace the contents from a grid of the same size as the range.
    pub fn write_grid(&self, grid: &Grid) -> Result<()> {
        self.check_shape(grid)?;
        self.send(encode(grid))
    }

    /// Set every cell in the range to one value.
    pub fn set_value(&self, value: impl Into<CellValue>) -> Result<()> {
        set_value(&self.object, value.into())
    }

    pub fn font(&self) -> Result<Font<'a>> {
        font(&self.object)
    }

    pub fn set_horizontal_alignment(&self, align: HorizontalAlignment) -> Result<()> {
        set_alignment(&self.object, Some(align.excel_constant()), None)
    }

    pub fn set_vertical_alignment(&self, align: VerticalAlignment) -> Result<()> {
        set_alignment(&self.object, None, Some(align.excel_constant()))
    }

    fn check_shape(&self, grid: &Grid) -> Result<()> {
        if grid.dimensions() == (self.rows(), self.columns()) {
            return Ok(());
        }
        Err(AutomationError::ShapeMismatch {
            range: self.reference.to_string(),
            expected_rows: self.rows(),
            expected_columns: self.columns(),
            rows: grid.rows(),
            columns: grid.columns(),
        })
    }

    fn send(&self, data: String) -> Result<()> {
        tracing::debug!("Writing {} bytes to {}", data.len(), self.reference);
        self.object.call(Command::WriteRange {
            range: self.object.id(),
            data,
        })?;
        Ok(())
    }
}

/// One cell. Excel has no separate cell object; this is a one-cell range
/// with value accessors.
pub struct Cell<'a> {
    object: HostObject<'a>,
    address: CellRef,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(object: HostObject<'a>, address: CellRef) -> Self {
        Self { object, address }
    }

    pub fn address(&self) -> CellRef {
        self.address
    }

    /// The value converted to text.
    pub fn value(&self) -> Result<String> {
        Ok(self.raw_value()?.to_text())
    }

    /// The value as the host reports it.
    pub fn raw_value(&self) -> Result<CellValue> {
        let data = self.object.call(Command::GetValue {
            range: self.object.id(),
        })?;
        expect_value(data, "GetValue")
    }

    /// Set the value.
    ///
    /// Accepts anything that converts to CellValue:
    /// - `&str` / `String` -> String value
    /// - `f64`, `i32`, etc. -> Number value
    /// - `bool` -> Boolean value
    pub fn set_value(&self, value: impl Into<CellValue>) -> Result<()> {
        set_value(&self.object, value.into())
    }

    pub fn font(&self) -> Result<Font<'a>> {
        font(&self.object)
    }

    pub fn set_horizontal_alignment(&self, align: HorizontalAlignment) -> Result<()> {
        set_alignment(&self.object, Some(align.excel_constant()), None)
    }

    pub fn set_vertical_alignment(&self, align: VerticalAlignment) -> Result<()> {
        set_alignment(&self.object, None, Some(align.excel_constant()))
    }
}

fn set_value(object: &HostObject<'_>, value: CellValue) -> Result<()> {
    object.call(Command::SetValue {
        range: object.id(),
        value,
    })?;
    Ok(())
}

fn font<'a>(object: &HostObject<'a>) -> Result<Font<'a>> {
    let data = object.call(Command::GetFont { range: object.id() })?;
    Ok(Font::new(expect_object(object.host(), data, "GetFont")?))
}

fn set_alignment(
    object: &HostObject<'_>,
    horizontal: Option<i32>,
    vertical: Option<i32>,
) -> Result<()> {
    object.call(Command::SetAlignment {
        range: object.id(),
        horizontal,
        vertical,
    })?;
    Ok(())
}
