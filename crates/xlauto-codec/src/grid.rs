//! Rectangular grid of text cells

use std::fmt;

use crate::error::GridError;

/// A rectangular, row-major block of text values.
///
/// Every row has the same number of cells. A grid with no columns holds no
/// cells and is treated as empty, so `rows()` is 0 whenever `columns()` is 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<String>>", into = "Vec<Vec<String>>")
)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<String>,
}

impl Grid {
    /// Create an empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid with every cell set to `value`
    pub fn filled(rows: usize, columns: usize, value: impl Into<String>) -> Self {
        if rows == 0 || columns == 0 {
            return Self::new();
        }
        Self {
            rows,
            columns,
            cells: vec![value.into(); rows * columns],
        }
    }

    /// Build a grid from rows of cells.
    ///
    /// Fails if any row's length differs from the first row's.
    ///
    /// # Examples
    /// ```
    /// use xlauto_codec::Grid;
    ///
    /// let grid = Grid::from_rows(vec![vec!["a", "b"], vec!["c", "d"]]).unwrap();
    /// assert_eq!(grid.rows(), 2);
    /// assert_eq!(grid.get(1, 0), Some("c"));
    ///
    /// assert!(Grid::from_rows(vec![vec!["a", "b"], vec!["c"]]).is_err());
    /// ```
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Result<Self, GridError>
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cells = Vec::new();
        let mut columns = None;
        let mut row_count = 0;

        for (index, row) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(row.into_iter().map(Into::into));
            let found = cells.len() - before;

            match columns {
                None => columns = Some(found),
                Some(expected) if expected != found => {
                    return Err(GridError::RaggedRow {
                        row: index,
                        expected,
                        found,
                    });
                }
                Some(_) => {}
            }
            row_count += 1;
        }

        let columns = columns.unwrap_or(0);
        if columns == 0 {
            return Ok(Self::new());
        }

        Ok(Self {
            rows: row_count,
            columns,
            cells,
        })
    }

    /// Assemble from already-validated parts
    pub(crate) fn from_parts(rows: usize, columns: usize, cells: Vec<String>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// `(rows, columns)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Get a cell (0-based)
    pub fn get(&self, row: usize, column: usize) -> Option<&str> {
        self.index(row, column).map(|i| self.cells[i].as_str())
    }

    /// Replace a cell (0-based)
    pub fn set(&mut self, row: usize, column: usize, value: impl Into<String>) -> Result<(), GridError> {
        let i = self.index(row, column).ok_or(GridError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        })?;
        self.cells[i] = value.into();
        Ok(())
    }

    /// Cells of one row
    pub fn row(&self, row: usize) -> Option<&[String]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// Iterate rows in order
    pub fn iter_rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        // chunks_exact panics on 0; an empty grid has no cells anyway
        self.cells.chunks_exact(self.columns.max(1))
    }

    /// Iterate all cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &str> + '_ {
        self.cells.iter().map(String::as_str)
    }

    /// Consume into nested rows
    pub fn into_rows(self) -> Vec<Vec<String>> {
        if self.columns == 0 {
            return Vec::new();
        }
        let columns = self.columns;
        let mut rows = Vec::with_capacity(self.rows);
        let mut iter = self.cells.into_iter();
        for _ in 0..self.rows {
            rows.push(iter.by_ref().take(columns).collect());
        }
        rows
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        (row < self.rows && column < self.columns).then(|| row * self.columns + column)
    }
}

impl TryFrom<Vec<Vec<String>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<String>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<String>> {
    fn from(grid: Grid) -> Self {
        grid.into_rows()
    }
}

impl fmt::Display for Grid {
    /// Tab-separated, one line per row
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str("\t")?;
                }
                f.write_str(cell)?;
            }
        }
        Ok(())
    }
}
