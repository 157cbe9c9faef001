//! File ingestion — uploaded bytes to a [`Table`].
//!
//! The normalization core never touches file formats; everything an
//! endpoint hands it has already been through here. CSV is the supported
//! wire format. Cells are typed on the way in: empty fields become null,
//! fields that parse as `f64` become numbers, everything else stays text.

pub mod format;

use thiserror::Error;

use crate::pipeline::table::{Cell, Table};

pub use format::{detect, FileKind};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type '{0}'. Please upload a CSV file.")]
    UnsupportedFileType(String),
    #[error("Spreadsheet uploads are not supported. Please export '{0}' as CSV.")]
    SpreadsheetNotSupported(String),
    #[error("Could not parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Parse an upload into a table, dispatching on the filename extension.
pub fn read_table(filename: &str, bytes: &[u8]) -> Result<Table, IngestError> {
    match format::detect(filename) {
        FileKind::Csv => read_csv(bytes),
        FileKind::Spreadsheet => Err(IngestError::SpreadsheetNotSupported(filename.to_string())),
        FileKind::Unsupported => Err(IngestError::UnsupportedFileType(filename.to_string())),
    }
}

/// Parse CSV bytes. The first record is the header row. Short records are
/// padded with nulls, long records truncated to the header width.
pub fn read_csv(bytes: &[u8]) -> Result<Table, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let width = headers.len();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); width];
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record?;
        for (i, column) in columns.iter_mut().enumerate() {
            column.push(record.get(i).map_or(Cell::Null, typed_cell));
        }
        rows += 1;
    }

    let mut table = Table::with_rows(rows);
    for (name, cells) in headers.into_iter().zip(columns) {
        table.push_column(name, cells);
    }
    Ok(table)
}

fn typed_cell(field: &str) -> Cell {
    if field.is_empty() {
        Cell::Null
    } else if let Ok(v) = field.parse::<f64>() {
        Cell::Number(v)
    } else {
        Cell::Text(field.to_string())
    }
}
