//! CSV <-> grid conversion

use std::io::{Read, Write};

use anyhow::{Context, Result};
use xlauto::{decode, CellRef, DecodeError, Grid};

/// Options for reading and writing CSV
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    pub delimiter: u8,
    /// Skip the first record when reading; write a row of column letters
    /// when writing
    pub has_header: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_header: false,
        }
    }
}

/// Read CSV records into a grid. Every record must have the same number of
/// fields.
pub fn csv_to_grid<R: Read>(reader: R, options: &CsvOptions) -> Result<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_header)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to read CSV record {}", index + 1))?;
        rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let grid = Grid::from_rows(rows).context("CSV records have different lengths")?;
    tracing::debug!("Read {}x{} grid from CSV", grid.rows(), grid.columns());
    Ok(grid)
}

/// Write a grid as CSV.
pub fn grid_to_csv<W: Write>(grid: &Grid, writer: W, options: &CsvOptions) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    if options.has_header && !grid.is_empty() {
        csv_writer.write_record((0..grid.columns()).map(column_name))?;
    }
    for row in grid.iter_rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush().context("Failed to write CSV")?;
    Ok(())
}

/// Decode range data, tolerating one trailing line ending left by tools
/// that terminate their output with a newline.
pub fn decode_lenient(input: &str) -> std::result::Result<Grid, DecodeError> {
    decode(input).or_else(|err| {
        let trimmed = match input.strip_suffix('\n') {
            Some(rest) => rest.strip_suffix('\r').unwrap_or(rest),
            None => return Err(err),
        };
        decode(trimmed).map_err(|_| err)
    })
}

/// Dimensions, size and a preview of the first `preview_rows` rows.
pub fn describe(grid: &Grid, encoded_len: usize, preview_rows: usize) -> String {
    let mut out = format!(
        "Rows: {}\nColumns: {}\nCells: {}\nEncoded length: {} bytes\n",
        grid.rows(),
        grid.columns(),
        grid.rows() * grid.columns(),
        encoded_len
    );

    if grid.is_empty() {
        out.push_str("(empty)\n");
        return out;
    }

    out.push('\n');
    for row in grid.iter_rows().take(preview_rows) {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    if grid.rows() > preview_rows {
        out.push_str(&format!("... {} more rows\n", grid.rows() - preview_rows));
    }
    out
}

fn column_name(index: usize) -> String {
    match u16::try_from(index) {
        Ok(col) => CellRef::column_to_letters(col),
        Err(_) => index.to_string(),
    }
}
