//! Shared protocol types for communication between the xlauto client and
//! the automation host process that drives Excel.
//!
//! The protocol is JSON-over-stdio: one JSON object per line in each direction.
//! Objects living inside the host (workbooks, worksheets, ranges, fonts) are
//! referred to by an opaque [`ObjectId`] and stay alive until released.
//!
//! Bulk range contents travel as a single string in the `xlauto-codec`
//! format rather than as one request per cell. Cell lengths in that string
//! count Unicode scalar values, not UTF-16 code units: a host working with
//! wide strings must count a surrogate pair as one character.

use serde::{Deserialize, Serialize};

/// Handle to an object owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A command sent from the client to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Monotonically increasing request ID for correlating responses.
    pub id: u64,
    /// The command to execute.
    #[serde(flatten)]
    pub command: Command,
}

/// Commands the client can send to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum Command {
    /// Start the application.
    Init { visible: bool },

    /// Show or hide the application window.
    SetVisible { visible: bool },

    /// Open an existing workbook (host path). Returns an object.
    OpenWorkbook { path: String },

    /// Add a workbook and immediately save it under `path`. Returns an object.
    CreateWorkbook { path: String },

    /// The workbook's active worksheet. Returns an object.
    ActiveWorksheet { workbook: ObjectId },

    /// Number of worksheets in the workbook. Returns a count.
    WorksheetCount { workbook: ObjectId },

    /// Worksheet by 1-based index. Returns an object.
    Worksheet { workbook: ObjectId, index: u32 },

    /// Save the workbook in place.
    SaveWorkbook { workbook: ObjectId },

    /// Save the workbook under a new path using an Excel file format constant.
    SaveWorkbookAs {
        workbook: ObjectId,
        path: String,
        format: i32,
    },

    /// Close the workbook without saving. Releases the workbook object.
    CloseWorkbook { workbook: ObjectId },

    /// Worksheet name. Returns text.
    GetSheetName { sheet: ObjectId },

    /// Rename a worksheet.
    SetSheetName { sheet: ObjectId, name: String },

    /// Copy a worksheet next to itself; the copy becomes active.
    CopySheet { sheet: ObjectId, after: bool },

    /// Merge a range into one cell, or each of its rows when `across` is set.
    MergeRange {
        sheet: ObjectId,
        range: String,
        across: bool,
    },

    /// Range by A1 reference (e.g. "F16:J17"). Returns an object.
    GetRange { sheet: ObjectId, range: String },

    /// Whole range contents as an encoded grid. Returns text. Cell lengths
    /// count Unicode scalar values.
    ReadRange { range: ObjectId },

    /// Replace range contents from an encoded grid. Cell lengths count
    /// Unicode scalar values.
    WriteRange { range: ObjectId, data: String },

    /// Value of the range's top-left cell. Returns a value.
    GetValue { range: ObjectId },

    /// Set the value of every cell in the range.
    SetValue { range: ObjectId, value: CellValue },

    /// Font of a range. Returns an object.
    GetFont { range: ObjectId },

    /// Read a font property. Returns a value.
    GetFontProperty { font: ObjectId, property: FontProperty },

    /// Write a font property.
    SetFontProperty {
        font: ObjectId,
        property: FontProperty,
        value: CellValue,
    },

    /// Set alignment constants on a range. `None` leaves an axis unchanged.
    SetAlignment {
        range: ObjectId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        horizontal: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vertical: Option<i32>,
    },

    /// Drop the host's reference to an object.
    Release { object: ObjectId },

    /// Close all workbooks, quit the application and exit the host.
    Shutdown,
}

/// Font attributes reachable through [`Command::GetFontProperty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontProperty {
    Name,
    Size,
    Bold,
    Italic,
    /// Excel's BGR-packed color integer
    Color,
}

/// A cell value that can be sent to/from the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Error(CellError),
}

/// Excel error values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellError {
    pub code: String,
}

/// A response sent from the host back to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// The request ID this response corresponds to.
    pub id: u64,
    /// The result of the command.
    #[serde(flatten)]
    pub result: ResponseResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum ResponseResult {
    #[serde(rename = "ok")]
    Ok {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<ResponseData>,
    },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Data returned in successful responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    /// Handle to an object created or looked up by the host.
    Object { object: ObjectId },
    /// A cell or property value.
    Value { value: CellValue },
    /// Text, such as a sheet name or an encoded range.
    Text { text: String },
    /// A count, such as the number of worksheets.
    Count { count: u32 },
}

impl Response {
    pub fn ok(id: u64, data: Option<ResponseData>) -> Self {
        Self {
            id,
            result: ResponseResult::Ok { data },
        }
    }

    pub fn error(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            result: ResponseResult::Error {
                message: message.into(),
            },
        }
    }
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text form used when a value has to travel as a string, matching how
    /// the host coerces values for display: integral numbers print without
    /// a fractional part, empty cells as "".
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
            CellValue::Number(n) => n.to_string(),
            CellValue::String(s) => s.clone(),
            CellValue::Error(e) => e.code.clone(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => write!(f, "<empty>"),
            other => f.write_str(&other.to_text()),
        }
    }
}
