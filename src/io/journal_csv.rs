//! Journal entry CSV reader
//!
//! Loads `JournalEntries.csv` into a [`JournalTable`] of raw string cells.
//! Interpretation of the cells (dates, amounts, posting types) belongs to the
//! entry builder; this module only deals with the CSV format.
//!
//! The reader is configured to:
//! - Trim whitespace from headers and fields
//! - Allow flexible field counts (short rows are padded with empty cells;
//!   rows wider than the header are rejected)

use crate::types::{JournalTable, UploadError};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a journal CSV file
///
/// # Arguments
///
/// * `path` - Path to the CSV file
///
/// # Errors
///
/// `Io` when the file cannot be opened, `Csv` when a record is malformed.
pub fn read_journal_table(path: &Path) -> Result<JournalTable, UploadError> {
    let file = File::open(path)?;
    read_journal_table_from(file)
}

/// Read a journal CSV from any reader
pub fn read_journal_table_from<R: Read>(input: R) -> Result<JournalTable, UploadError> {
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(input);
    collect_table(reader)
}

fn collect_table<R: Read>(mut reader: csv::Reader<R>) -> Result<JournalTable, UploadError> {
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > columns.len() {
            return Err(UploadError::invalid_row(
                i + 1,
                format!(
                    "expected {} fields, found {}",
                    columns.len(),
                    record.len()
                ),
            ));
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(columns.len(), String::new());
        rows.push(row);
    }

    log::debug!("Read {} journal rows with {} columns", rows.len(), columns.len());
    Ok(JournalTable::new(columns, rows))
}
