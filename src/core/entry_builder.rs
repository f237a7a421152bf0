//! Journal entry builder
//!
//! Turns a raw journal table into `ManualJournals` entries:
//!
//! 1. Validate that every required column is present (`SchemaError` otherwise)
//! 2. Interpret each row: normalize the date, parse posting type and amount
//! 3. Group rows by entry identifier, keeping first-seen group order and input
//!    row order within a group
//! 4. Build each line: sign the amount, resolve the account, attach tracking
//! 5. Fail the whole batch if any entry could not be fully resolved
//!
//! # Resolution Rules
//!
//! Account resolution is mandatory: a line whose account cannot be resolved
//! fails its entry, and any failed entry fails the batch. Every line of every
//! entry is still processed so that all problems are reported in one run.
//!
//! Tracking resolution is advisory: an unknown class only logs a warning, and
//! unknown department/location/customer values are skipped silently.

use crate::core::reference_index::ReferenceIndex;
use crate::types::{
    Dimension, DimensionColumns, Entry, EntryStatus, JournalTable, LineItem, PostingType,
    RawLineRow, TrackingRef, UploadError,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

pub const COL_ENTRY_ID: &str = "Journal Entry Id";
pub const COL_DATE: &str = "Transaction Date";
pub const COL_CLASS: &str = "Class";
pub const COL_ACCOUNT_NUMBER: &str = "Account Number";
pub const COL_ACCOUNT_NAME: &str = "Account Name";
pub const COL_POSTING_TYPE: &str = "Posting Type";
pub const COL_DESCRIPTION: &str = "Description";
pub const COL_AMOUNT: &str = "Amount";

/// Columns every journal table must carry
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_DATE,
    COL_ENTRY_ID,
    COL_CLASS,
    COL_ACCOUNT_NUMBER,
    COL_ACCOUNT_NAME,
    COL_POSTING_TYPE,
    COL_DESCRIPTION,
    COL_AMOUNT,
];

// US forms before `%Y/%m/%d`: `%Y` accepts a single digit, so "01/05/24"
// would otherwise parse as year 1.
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
];

/// Normalize a date cell
///
/// Accepts ISO dates, slash-separated dates (year first or US order, two or
/// four digit years), `05-Jan-2024`, naive date-times and RFC 3339 timestamps.
/// The time part is dropped.
pub fn normalize_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(value, format)
                    .ok()
                    .map(|timestamp| timestamp.date())
            })
        })
}

/// A cell counts as present when it is non-blank after trimming
fn present(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Rows sharing one entry identifier
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub entry_id: String,
    /// Date of the last row added to the group
    pub date: NaiveDate,
    pub rows: Vec<RawLineRow>,
}

/// Group rows by entry identifier
///
/// Groups appear in order of first occurrence; rows keep input order.
pub fn group_rows(rows: Vec<RawLineRow>) -> Vec<RowGroup> {
    let mut positions: HashMap<String, usize> = HashMap::new();

    rows.into_iter().fold(Vec::new(), |mut groups, row| {
        match positions.get(&row.entry_id) {
            Some(&position) => {
                let group: &mut RowGroup = &mut groups[position];
                group.date = row.date;
                group.rows.push(row);
            }
            None => {
                positions.insert(row.entry_id.clone(), groups.len());
                groups.push(RowGroup {
                    entry_id: row.entry_id.clone(),
                    date: row.date,
                    rows: vec![row],
                });
            }
        }
        groups
    })
}

/// Column positions resolved against a table header
#[derive(Debug, Clone)]
struct ColumnLayout {
    entry_id: usize,
    date: usize,
    class: usize,
    account_number: usize,
    account_name: usize,
    posting_type: usize,
    description: usize,
    amount: usize,
    /// Optional dimensions that are both configured and present
    dimensions: Vec<(Dimension, usize)>,
}

impl ColumnLayout {
    fn resolve(table: &JournalTable, config: &DimensionColumns) -> Result<Self, UploadError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| table.column_index(column).is_none())
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(UploadError::schema(table.columns(), missing));
        }

        let index = |column: &str| table.column_index(column).unwrap_or_default();

        let configured = [
            (Dimension::Department, &config.department),
            (Dimension::Location, &config.location),
            (Dimension::CustomerId, &config.customer_id),
            (Dimension::CustomerName, &config.customer_name),
        ];
        let dimensions = configured
            .into_iter()
            .filter_map(|(dimension, column)| {
                let position = table.column_index(column.as_deref()?)?;
                Some((dimension, position))
            })
            .collect();

        Ok(ColumnLayout {
            entry_id: index(COL_ENTRY_ID),
            date: index(COL_DATE),
            class: index(COL_CLASS),
            account_number: index(COL_ACCOUNT_NUMBER),
            account_name: index(COL_ACCOUNT_NAME),
            posting_type: index(COL_POSTING_TYPE),
            description: index(COL_DESCRIPTION),
            amount: index(COL_AMOUNT),
            dimensions,
        })
    }

    /// Interpret one record
    ///
    /// `line` is the 1-based data line number, used in error messages.
    fn parse_row(&self, line: usize, record: &[String]) -> Result<RawLineRow, UploadError> {
        let cell = |position: usize| record.get(position).map(|s| s.trim()).unwrap_or_default();

        let entry_id = present(cell(self.entry_id))
            .ok_or_else(|| UploadError::invalid_row(line, "missing Journal Entry Id"))?
            .to_string();

        let date = normalize_date(cell(self.date))
            .ok_or_else(|| UploadError::invalid_date(&entry_id, cell(self.date)))?;

        let posting_type = PostingType::parse(cell(self.posting_type)).ok_or_else(|| {
            UploadError::invalid_row(
                line,
                format!(
                    "Invalid posting type '{}' for Journal Entry {}",
                    cell(self.posting_type),
                    entry_id
                ),
            )
        })?;

        let amount = Decimal::from_str(cell(self.amount)).map_err(|_| {
            UploadError::invalid_row(
                line,
                format!("Invalid amount '{}' for Journal Entry {}", cell(self.amount), entry_id),
            )
        })?;

        let mut dimensions = Vec::new();
        if let Some(class) = present(cell(self.class)) {
            dimensions.push((Dimension::Class, class.to_string()));
        }
        for &(dimension, position) in &self.dimensions {
            if let Some(value) = present(cell(position)) {
                dimensions.push((dimension, value.to_string()));
            }
        }

        Ok(RawLineRow {
            entry_id,
            date,
            posting_type,
            amount: amount.abs(),
            account_number: cell(self.account_number).to_string(),
            account_name: cell(self.account_name).to_string(),
            description: cell(self.description).to_string(),
            dimensions,
        })
    }
}

/// Builds journal entries against a reference index
#[derive(Debug, Clone, Copy)]
pub struct EntryBuilder<'a> {
    index: &'a ReferenceIndex,
    dimensions: &'a DimensionColumns,
}

impl<'a> EntryBuilder<'a> {
    pub fn new(index: &'a ReferenceIndex, dimensions: &'a DimensionColumns) -> Self {
        EntryBuilder { index, dimensions }
    }

    /// Convert a raw table into entries
    ///
    /// # Errors
    ///
    /// - `Schema` if a required column is missing (nothing is converted)
    /// - `InvalidDate` / `InvalidRow` if a cell cannot be interpreted
    /// - `Conversion` if any entry has an unresolvable account; no entries are
    ///   returned in that case
    pub fn build(&self, table: &JournalTable) -> Result<Vec<Entry>, UploadError> {
        let rows = self.read_rows(table)?;
        let groups = group_rows(rows);

        let mut entries = Vec::with_capacity(groups.len());
        let mut failed = Vec::new();

        for group in groups {
            log::info!("Converting {}...", group.entry_id);
            match self.build_entry(&group) {
                Ok(entry) => entries.push(entry),
                Err(errors) => {
                    for error in &errors {
                        log::error!("{}", error);
                    }
                    failed.push(group.entry_id);
                }
            }
        }

        if !failed.is_empty() {
            return Err(UploadError::Conversion { entries: failed });
        }

        log::info!("Loaded {} journal entries to post", entries.len());
        Ok(entries)
    }

    /// Validate the schema and interpret every row
    pub fn read_rows(&self, table: &JournalTable) -> Result<Vec<RawLineRow>, UploadError> {
        let layout = ColumnLayout::resolve(table, self.dimensions)?;

        table
            .rows()
            .iter()
            .enumerate()
            .map(|(i, record)| layout.parse_row(i + 1, record))
            .collect()
    }

    /// Build one entry, or every line error that prevented it
    fn build_entry(&self, group: &RowGroup) -> Result<Entry, Vec<UploadError>> {
        let mut lines = Vec::with_capacity(group.rows.len());
        let mut errors = Vec::new();

        for row in &group.rows {
            match self.build_line(row) {
                Ok(line) => lines.push(line),
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Entry {
            date: group.date,
            status: EntryStatus::Posted,
            narration: group.entry_id.clone(),
            journal_lines: lines,
        })
    }

    fn build_line(&self, row: &RawLineRow) -> Result<LineItem, UploadError> {
        let number = present(&row.account_number);
        let name = present(&row.account_name);

        if number.is_none() && name.is_none() {
            return Err(UploadError::missing_account_reference(&row.entry_id));
        }

        let account = self.index.resolve_account(number, name).ok_or_else(|| {
            UploadError::account_resolution(&row.entry_id, &row.account_name, &row.account_number)
        })?;

        Ok(LineItem {
            description: row.description.clone(),
            line_amount: row.posting_type.signed(row.amount),
            account_code: account.code.clone(),
            tracking: self.tracking_for(row),
        })
    }

    /// Tracking references in dimension order
    fn tracking_for(&self, row: &RawLineRow) -> Vec<TrackingRef> {
        let mut tracking = Vec::new();

        let class = row.dimension(Dimension::Class);
        match class.and_then(|class| self.index.tracking(class)) {
            Some(found) => tracking.push(found.clone()),
            None => log::warn!(
                "Class '{}' not found in Xero for Journal Entry {}!",
                class.unwrap_or_default(),
                row.entry_id
            ),
        }

        let optional = [
            Dimension::Department,
            Dimension::Location,
            Dimension::CustomerId,
            Dimension::CustomerName,
        ];
        tracking.extend(
            optional
                .into_iter()
                .filter_map(|dimension| row.dimension(dimension))
                .filter_map(|value| self.index.tracking(value))
                .cloned(),
        );

        tracking
    }
}
