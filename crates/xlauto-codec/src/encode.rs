//! Grid to encoded string

use crate::grid::Grid;
use crate::DELIMITER;

/// The encoded form of a grid with no rows.
pub const EMPTY_ENCODING: &str = "0#";

/// Encode a grid into its canonical string form.
///
/// # Examples
/// ```
/// use xlauto_codec::{encode, Grid};
///
/// let grid = Grid::from_rows(vec![vec!["ab", "#"]]).unwrap();
/// assert_eq!(encode(&grid), "1#2#2#ab1##");
/// assert_eq!(encode(&Grid::new()), "0#");
/// ```
pub fn encode(grid: &Grid) -> String {
    let mut out = String::with_capacity(encoded_len_hint(grid));
    encode_into(grid, &mut out);
    out
}

/// Append the encoded form of `grid` to `out`.
pub fn encode_into(grid: &Grid, out: &mut String) {
    if grid.is_empty() {
        out.push_str(EMPTY_ENCODING);
        return;
    }

    push_count(out, grid.rows());
    push_count(out, grid.columns());

    for cell in grid.cells() {
        push_count(out, cell.chars().count());
        out.push_str(cell);
    }
}

fn push_count(out: &mut String, n: usize) {
    out.push_str(&n.to_string());
    out.push(DELIMITER);
}

fn encoded_len_hint(grid: &Grid) -> usize {
    // Two header counts plus, per cell, a short length prefix and its text
    8 + grid.cells().map(|c| c.len() + 3).sum::<usize>()
}
