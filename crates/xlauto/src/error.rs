//! Error types for the automation client.

use std::time::Duration;

use thiserror::Error;
use xlauto_codec::DecodeError;

#[derive(Debug, Error)]
pub enum AutomationError {
    #[error("Failed to spawn automation host: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Launcher '{0}' not found. Install it and ensure it is in PATH.")]
    LauncherNotFound(String),

    #[error("Host executable not found at: {0}")]
    HostExeNotFound(String),

    #[error("Host process not running")]
    NotRunning,

    #[error("Failed to send command to host: {0}")]
    SendFailed(String),

    #[error("Failed to read response from host: {0}")]
    ReadFailed(String),

    #[error("No response from host within {0:?}")]
    Timeout(Duration),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Host returned error: {0}")]
    Host(String),

    #[error("Unexpected response data for {0}")]
    UnexpectedResponse(&'static str),

    #[error("Malformed range data: {0}")]
    Codec(#[from] DecodeError),

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    #[error("Range {range} is {expected_rows}x{expected_columns} but data is {rows}x{columns}")]
    ShapeMismatch {
        range: String,
        expected_rows: usize,
        expected_columns: usize,
        rows: usize,
        columns: usize,
    },
}

pub type Result<T> = std::result::Result<T, AutomationError>;
