//! Error types for xlauto-codec

use thiserror::Error;

/// Result type for decoding
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Malformed encoded input.
///
/// Every variant means the same thing to a caller: the string does not
/// describe a grid. Offsets are character positions into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Row or column count is zero or negative ("no data or dirty data").
    ///
    /// The declared counts are intentionally not recorded, so `"0#5#"` and
    /// `"-1#2#"` produce equal errors.
    #[error("no data: row and column counts must both be positive")]
    NoData,

    /// Input ended where an integer or delimiter was expected
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    /// A count or length is not a base-10 integer
    #[error("invalid number at offset {offset}")]
    InvalidNumber { offset: usize },

    /// An integer was not followed by `#`
    #[error("expected '#' at offset {offset}")]
    MissingDelimiter { offset: usize },

    /// A cell declared a negative length
    #[error("negative cell length at offset {offset}")]
    NegativeLength { offset: usize },

    /// A cell declared more characters than remain in the input
    #[error("cell at offset {offset} declares {expected} characters but only {available} remain")]
    Truncated {
        offset: usize,
        expected: usize,
        available: usize,
    },

    /// Characters remain after the last declared cell
    #[error("trailing data at offset {offset}")]
    TrailingData { offset: usize },
}

impl DecodeError {
    /// True for the non-positive count case, which callers commonly treat
    /// as "range holds nothing" rather than as corruption.
    pub fn is_no_data(&self) -> bool {
        matches!(self, DecodeError::NoData)
    }
}

/// Errors raised when building a [`Grid`](crate::Grid)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A row's length differs from the first row's
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Cell position outside the grid
    #[error("cell ({row}, {column}) out of bounds for {rows}x{columns} grid")]
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}
