//! A1-style cell and range references

use std::fmt;
use std::str::FromStr;

use crate::error::{AutomationError, Result};

/// Number of rows in a worksheet
pub const MAX_ROWS: u32 = 1_048_576;

/// Number of columns in a worksheet
pub const MAX_COLS: u16 = 16_384;

/// A single cell position (e.g. "B7").
///
/// Indices are 0-based; A1 notation is 1-based. `$` markers are accepted
/// when parsing and dropped, since the host resolves references as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u16,
}

impl CellRef {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Build from 1-based column and row numbers, as Excel counts them.
    pub fn from_one_based(col: u16, row: u32) -> Result<Self> {
        if col == 0 || col > MAX_COLS || row == 0 || row > MAX_ROWS {
            return Err(AutomationError::InvalidReference(format!(
                "column {col}, row {row} is outside the sheet"
            )));
        }
        Ok(Self::new(row - 1, col - 1))
    }

    /// Parse a cell reference from A1 notation
    ///
    /// # Examples
    /// ```
    /// use xlauto::CellRef;
    ///
    /// let cell = CellRef::parse("f16").unwrap();
    /// assert_eq!((cell.row, cell.col), (15, 5));
    /// assert_eq!(cell.to_string(), "F16");
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = |why: &str| AutomationError::InvalidReference(format!("{why} in '{s}'"));

        let body = s.strip_prefix('$').unwrap_or(s);
        let letters = body.bytes().take_while(u8::is_ascii_alphabetic).count();
        if letters == 0 {
            return Err(invalid("no column letters"));
        }
        let col = Self::letters_to_column(&body[..letters])?;

        let digits = &body[letters..];
        let digits = digits.strip_prefix('$').unwrap_or(digits);
        if digits.is_empty() {
            return Err(invalid("no row number"));
        }

        let row: u32 = digits.parse().map_err(|_| invalid("invalid row number"))?;
        if row == 0 || row > MAX_ROWS {
            return Err(invalid("row out of bounds"));
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::new();
        let mut n = u32::from(col) + 1;

        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }

        letters.iter().rev().map(|&b| char::from(b)).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(AutomationError::InvalidReference(
                "empty column letters".into(),
            ));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(AutomationError::InvalidReference(format!(
                    "invalid column letter '{c}'"
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > u32::from(MAX_COLS) {
                return Err(AutomationError::InvalidReference(format!(
                    "column '{letters}' out of bounds"
                )));
            }
        }

        Ok((col - 1) as u16)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A rectangular block of cells, normalized so `start` is top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRef {
    pub start: CellRef,
    pub end: CellRef,
}

impl RangeRef {
    pub fn new(a: CellRef, b: CellRef) -> Self {
        Self {
            start: CellRef::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellRef::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn single(cell: CellRef) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// Parse "A1:B10" or a single cell "C3"
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => Ok(Self::new(CellRef::parse(a)?, CellRef::parse(b)?)),
            None => Ok(Self::single(CellRef::parse(s)?)),
        }
    }

    pub fn rows(&self) -> usize {
        (self.end.row - self.start.row) as usize + 1
    }

    pub fn columns(&self) -> usize {
        usize::from(self.end.col - self.start.col) + 1
    }

    pub fn is_single_cell(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_cell() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl FromStr for RangeRef {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<CellRef> for RangeRef {
    fn from(cell: CellRef) -> Self {
        Self::single(cell)
    }
}
