//! # xlauto-codec
//!
//! Text codec for moving a rectangular block of spreadsheet values in a
//! single automation call.
//!
//! # Format
//!
//! ```text
//! EncodedString := RowCount "#" ColumnCount "#" Values
//! Values        := Row{RowCount}
//! Row           := Cell{ColumnCount}
//! Cell          := Length "#" Characters(Length)
//! ```
//!
//! `Length` counts characters, and the characters are taken verbatim, so
//! cell values may contain `#`. A grid with no rows encodes as `"0#"`.
//!
//! For example the 2x5 grid
//!
//! ```text
//! abc  de    fghi  3     5235
//! 23   5353        3253  32
//! ```
//!
//! encodes as `2#5#3#abc2#de4#fghi1#34#52352#234#53530#4#32532#32`.
//!
//! # Example
//!
//! ```rust
//! use xlauto_codec::{decode, encode, Grid};
//!
//! let grid = Grid::from_rows(vec![vec!["Product", "Q1"], vec!["Widget", "1500"]]).unwrap();
//! let encoded = encode(&grid);
//! assert_eq!(encoded, "2#2#7#Product2#Q16#Widget4#1500");
//! assert_eq!(decode(&encoded).unwrap(), grid);
//! ```

mod decode;
mod encode;
mod error;
mod grid;

pub use decode::{decode, encoded_dimensions};
pub use encode::{encode, encode_into, EMPTY_ENCODING};
pub use error::{DecodeError, DecodeResult, GridError};
pub use grid::Grid;

/// Separator between counts and cell text
pub const DELIMITER: char = '#';
