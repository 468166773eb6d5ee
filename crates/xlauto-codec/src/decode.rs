//! Encoded string to grid

use crate::error::{DecodeError, DecodeResult};
use crate::grid::Grid;
use crate::DELIMITER;

/// Decode an encoded string into a grid.
///
/// Decoding is all-or-nothing: on any grammar violation an error is
/// returned and nothing of the partially read grid escapes.
///
/// `"0#"` decodes to the empty grid. Any other header with a zero or
/// negative count fails with [`DecodeError::NoData`].
///
/// # Examples
/// ```
/// use xlauto_codec::{decode, DecodeError};
///
/// let grid = decode("1#2#2#ab1##").unwrap();
/// assert_eq!(grid.get(0, 1), Some("#"));
///
/// assert_eq!(decode("0#5#"), Err(DecodeError::NoData));
/// ```
pub fn decode(input: &str) -> DecodeResult<Grid> {
    Decoder::new(input).grid().map_err(|e| {
        log::debug!("rejected encoded grid ({} bytes): {e}", input.len());
        e
    })
}

/// Read only the `(rows, columns)` header of an encoded string.
///
/// Cell data is not validated. `"0#"` yields `(0, 0)`.
pub fn encoded_dimensions(input: &str) -> DecodeResult<(usize, usize)> {
    let mut decoder = Decoder::new(input);
    match decoder.header()? {
        Header::Empty => Ok((0, 0)),
        Header::Sized { rows, columns } => Ok((rows, columns)),
    }
}

enum Header {
    Empty,
    Sized { rows: usize, columns: usize },
}

/// Cursor over the input tracking both byte position and character offset
struct Decoder<'a> {
    input: &'a str,
    pos: usize,
    offset: usize,
}

impl<'a> Decoder<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            offset: 0,
        }
    }

    fn grid(mut self) -> DecodeResult<Grid> {
        let (rows, columns) = match self.header()? {
            Header::Empty => return self.finish(Grid::new()),
            Header::Sized { rows, columns } => (rows, columns),
        };

        // Every cell takes at least two bytes ("0#"), which bounds both the
        // allocation and, when rows * columns overflows, the number of cells
        // worth attempting before the input must run out.
        let budget = (self.input.len() - self.pos) / 2;
        let total = rows.checked_mul(columns);
        let capacity = total.map_or(budget, |n| n.min(budget));
        let count = total.unwrap_or(budget + 1);

        let mut cells = Vec::with_capacity(capacity);
        for _ in 0..count {
            cells.push(self.cell()?);
        }

        self.finish(Grid::from_parts(rows, columns, cells))
    }

    fn header(&mut self) -> DecodeResult<Header> {
        let rows = self.integer()?;
        self.delimiter()?;

        if rows == 0 && self.at_end() {
            return Ok(Header::Empty);
        }

        let columns = self.integer()?;
        self.delimiter()?;

        if rows <= 0 || columns <= 0 {
            return Err(DecodeError::NoData);
        }

        let rows = usize::try_from(rows).map_err(|_| DecodeError::InvalidNumber { offset: 0 })?;
        let columns =
            usize::try_from(columns).map_err(|_| DecodeError::InvalidNumber { offset: 0 })?;

        Ok(Header::Sized { rows, columns })
    }

    fn cell(&mut self) -> DecodeResult<String> {
        let offset = self.offset;
        let len = self.integer()?;
        self.delimiter()?;

        if len < 0 {
            return Err(DecodeError::NegativeLength { offset });
        }
        let len = usize::try_from(len).map_err(|_| DecodeError::InvalidNumber { offset })?;

        let start = self.pos;
        let mut end = start;
        let mut taken = 0;
        let mut chars = self.rest().chars();
        while taken < len {
            match chars.next() {
                Some(c) => {
                    end += c.len_utf8();
                    taken += 1;
                }
                None => {
                    return Err(DecodeError::Truncated {
                        offset: self.offset,
                        expected: len,
                        available: taken,
                    });
                }
            }
        }

        self.pos = end;
        self.offset += taken;
        Ok(self.input[start..end].to_string())
    }

    /// Optional `-` followed by ASCII digits
    fn integer(&mut self) -> DecodeResult<i64> {
        let start_offset = self.offset;
        let rest = self.rest();
        let bytes = rest.as_bytes();

        if bytes.is_empty() {
            return Err(DecodeError::UnexpectedEnd {
                offset: start_offset,
            });
        }

        let sign = usize::from(bytes[0] == b'-');
        let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();

        if digits == 0 {
            return Err(if sign + digits == bytes.len() {
                DecodeError::UnexpectedEnd {
                    offset: start_offset + sign,
                }
            } else {
                DecodeError::InvalidNumber {
                    offset: start_offset,
                }
            });
        }

        let text = &rest[..sign + digits];
        let value = text.parse::<i64>().map_err(|_| DecodeError::InvalidNumber {
            offset: start_offset,
        })?;

        // Sign and digits are ASCII, so bytes and characters advance together
        self.pos += text.len();
        self.offset += text.len();
        Ok(value)
    }

    fn delimiter(&mut self) -> DecodeResult<()> {
        match self.rest().chars().next() {
            Some(DELIMITER) => {
                self.pos += DELIMITER.len_utf8();
                self.offset += 1;
                Ok(())
            }
            Some(_) => Err(DecodeError::MissingDelimiter {
                offset: self.offset,
            }),
            None => Err(DecodeError::UnexpectedEnd {
                offset: self.offset,
            }),
        }
    }

    fn finish(self, grid: Grid) -> DecodeResult<Grid> {
        if self.at_end() {
            Ok(grid)
        } else {
            Err(DecodeError::TrailingData {
                offset: self.offset,
            })
        }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}
