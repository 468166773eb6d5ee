//! Excel enumeration constants and small value types sent to the host.

use std::path::Path;

/// Horizontal cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    /// `XlHAlign` value
    pub fn excel_constant(self) -> i32 {
        match self {
            HorizontalAlignment::Left => -4131,
            HorizontalAlignment::Center => -4108,
            HorizontalAlignment::Right => -4152,
        }
    }
}

/// Vertical cell alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// `XlVAlign` value
    pub fn excel_constant(self) -> i32 {
        match self {
            VerticalAlignment::Top => -4160,
            VerticalAlignment::Center => -4108,
            VerticalAlignment::Bottom => -4107,
        }
    }
}

/// Workbook file formats understood by `SaveAs` (`XlFileFormat`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Excel 97-2003 (.xls)
    Excel8,
    /// Open XML workbook (.xlsx)
    OpenXmlWorkbook,
    /// Macro-enabled Open XML workbook (.xlsm)
    OpenXmlWorkbookMacroEnabled,
    /// Binary workbook (.xlsb)
    Excel12,
    /// Comma-separated values (.csv)
    Csv,
    /// Tab-delimited text (.txt)
    UnicodeText,
}

impl FileFormat {
    pub fn excel_constant(self) -> i32 {
        match self {
            FileFormat::Excel8 => 56,
            FileFormat::OpenXmlWorkbook => 51,
            FileFormat::OpenXmlWorkbookMacroEnabled => 52,
            FileFormat::Excel12 => 50,
            FileFormat::Csv => 6,
            FileFormat::UnicodeText => 42,
        }
    }

    /// Pick a format from the file extension, defaulting to `.xlsx`.
    pub fn guess_from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("xls") => FileFormat::Excel8,
            Some("xlsm") => FileFormat::OpenXmlWorkbookMacroEnabled,
            Some("xlsb") => FileFormat::Excel12,
            Some("csv") => FileFormat::Csv,
            Some("txt") => FileFormat::UnicodeText,
            _ => FileFormat::OpenXmlWorkbook,
        }
    }
}

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Excel packs colors as `0x00BBGGRR`
    pub fn to_excel(self) -> u32 {
        u32::from(self.r) | (u32::from(self.g) << 8) | (u32::from(self.b) << 16)
    }

    pub fn from_excel(value: u32) -> Self {
        Self {
            r: (value & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: ((value >> 16) & 0xFF) as u8,
        }
    }
}
