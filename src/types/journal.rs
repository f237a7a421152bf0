//! Journal entry types
//!
//! This module defines the raw tabular input (`JournalTable`), the typed view
//! of one input row (`RawLineRow`), and the built output records (`Entry`,
//! `LineItem`) in the shape the `ManualJournals` endpoint expects.

use super::reference::TrackingRef;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

/// Raw journal table as read from `JournalEntries.csv`
///
/// Cells are kept as strings; interpretation happens in the entry builder so
/// that schema validation can run before any conversion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JournalTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl JournalTable {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        JournalTable { columns, rows }
    }

    /// Column names in header order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in input order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

/// Debit or credit
///
/// Parsed case-insensitively. Credits negate the line amount, debits keep it
/// positive; the remote format relies on this sign convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingType {
    Debit,
    Credit,
}

impl PostingType {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "debit" => Some(PostingType::Debit),
            "credit" => Some(PostingType::Credit),
            _ => None,
        }
    }

    /// Apply the sign rule to an amount magnitude
    ///
    /// The sign of `amount` itself is discarded.
    pub fn signed(self, amount: Decimal) -> Decimal {
        match self {
            PostingType::Debit => amount.abs(),
            PostingType::Credit => -amount.abs(),
        }
    }
}

/// Business dimensions a line can be tagged with
///
/// Declaration order is the order tracking references are attached in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Class,
    Department,
    Location,
    CustomerId,
    CustomerName,
}

/// One input row, typed
#[derive(Debug, Clone, PartialEq)]
pub struct RawLineRow {
    pub entry_id: String,
    pub date: NaiveDate,
    pub posting_type: PostingType,
    /// Amount magnitude
    pub amount: Decimal,
    pub account_number: String,
    pub account_name: String,
    pub description: String,
    /// Dimension values present on the row, class first
    pub dimensions: Vec<(Dimension, String)>,
}

impl RawLineRow {
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        self.dimensions
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, value)| value.as_str())
    }
}

/// One signed journal line
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineItem {
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub line_amount: Decimal,
    pub account_code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tracking: Vec<TrackingRef>,
}

/// Status marker sent with every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    Posted,
}

/// One grouped journal posting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entry {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub status: EntryStatus,
    /// The entry identifier
    pub narration: String,
    pub journal_lines: Vec<LineItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[rstest]
    #[case::debit("debit", Some(PostingType::Debit))]
    #[case::credit("credit", Some(PostingType::Credit))]
    #[case::mixed_case("Credit", Some(PostingType::Credit))]
    #[case::upper_case("DEBIT", Some(PostingType::Debit))]
    #[case::padded("  debit ", Some(PostingType::Debit))]
    #[case::unknown("transfer", None)]
    #[case::empty("", None)]
    fn test_posting_type_parse(#[case] input: &str, #[case] expected: Option<PostingType>) {
        assert_eq!(PostingType::parse(input), expected);
    }

    #[rstest]
    #[case::debit_positive(PostingType::Debit, dec!(50), dec!(50))]
    #[case::debit_negative_input(PostingType::Debit, dec!(-50), dec!(50))]
    #[case::credit_positive(PostingType::Credit, dec!(50), dec!(-50))]
    #[case::credit_negative_input(PostingType::Credit, dec!(-12.34), dec!(-12.34))]
    #[case::zero(PostingType::Credit, dec!(0), dec!(0))]
    fn test_posting_type_signed(
        #[case] posting_type: PostingType,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(posting_type.signed(amount), expected);
    }

    #[test]
    fn test_entry_wire_shape() {
        let entry = Entry {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            status: EntryStatus::Posted,
            narration: "JE1".to_string(),
            journal_lines: vec![
                LineItem {
                    description: "x".to_string(),
                    line_amount: dec!(50),
                    account_code: "100".to_string(),
                    tracking: vec![TrackingRef::new("Dept", "Sales")],
                },
                LineItem {
                    description: "y".to_string(),
                    line_amount: dec!(-50),
                    account_code: "200".to_string(),
                    tracking: vec![],
                },
            ],
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["Date"], json!("2024-01-05"));
        assert_eq!(value["Status"], json!("POSTED"));
        assert_eq!(value["Narration"], json!("JE1"));
        assert_eq!(value["JournalLines"][0]["LineAmount"].as_f64(), Some(50.0));
        assert_eq!(value["JournalLines"][0]["AccountCode"], json!("100"));
        assert_eq!(
            value["JournalLines"][0]["Tracking"],
            json!([{"Name": "Dept", "Option": "Sales"}])
        );
        assert_eq!(value["JournalLines"][1]["LineAmount"].as_f64(), Some(-50.0));
        assert!(value["JournalLines"][1].get("Tracking").is_none());
    }

    #[test]
    fn test_journal_table_column_index() {
        let table = JournalTable::new(
            vec!["Journal Entry Id".to_string(), "Amount".to_string()],
            vec![],
        );
        assert_eq!(table.column_index("Amount"), Some(1));
        assert_eq!(table.column_index("amount"), None);
    }
}
