//! Error types for the Xero uploader
//!
//! This module defines all error types that can occur while converting and
//! posting records. Errors are designed to be descriptive and user-friendly for
//! CLI output.
//!
//! # Error Categories
//!
//! - **Input Errors**: File I/O, CSV and JSON parsing, missing columns, bad cells
//! - **Conversion Errors**: Unresolvable account references in journal entries
//! - **Remote Errors**: HTTP transport, authentication, rejected postings
//!
//! Tracking-category misses are not errors; they are logged as warnings.

use thiserror::Error;

/// Main error type for the uploader
///
/// Every variant carries enough context to identify the offending record.
/// Source errors from `std::io`, `csv`, `serde_json` and `reqwest` are
/// flattened into messages so the enum stays `Clone + PartialEq`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// JSON (de)serialization error
    #[error("JSON error: {message}")]
    Json {
        /// Description of the JSON error
        message: String,
    },

    /// Configuration file could not be loaded or saved
    #[error("Invalid config '{path}': {message}")]
    Config {
        /// Path of the config file
        path: String,
        /// What went wrong
        message: String,
    },

    /// HTTP transport failure talking to the remote service
    #[error("HTTP error: {message}")]
    Http {
        /// Description of the transport error
        message: String,
    },

    /// Token refresh failed or the service rejected our credentials
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the failure
        message: String,
    },

    /// Required input columns are absent
    ///
    /// Fatal: nothing is converted when the schema is incomplete.
    #[error("CSV is missing required columns. Found={found:?}, Missing={missing:?}")]
    Schema {
        /// Columns present in the input
        found: Vec<String>,
        /// Required columns that were not found
        missing: Vec<String>,
    },

    /// A transaction date could not be normalized
    #[error("Invalid transaction date '{value}' for Journal Entry {entry_id}")]
    InvalidDate {
        /// Entry the row belongs to
        entry_id: String,
        /// The raw date cell
        value: String,
    },

    /// A row carries a cell that cannot be interpreted (amount, posting type)
    #[error("Invalid row at line {line}: {message}")]
    InvalidRow {
        /// Data line number (1-based, header excluded)
        line: usize,
        /// Description of the problem
        message: String,
    },

    /// A line has neither an account number nor an account name
    #[error("Account Number and Account Name are missing. Please check the details for Journal Entry {entry_id}.")]
    MissingAccountReference {
        /// Entry the line belongs to
        entry_id: String,
    },

    /// A line references an account that is not in the reference index
    #[error("Account Name='{account_name}' No={account_number} not found in Xero. Verify the details for Journal Entry {entry_id} or ensure the account exists for the specified tenant_id in the config file.")]
    AccountResolution {
        /// Entry the line belongs to
        entry_id: String,
        /// Account name from the row
        account_name: String,
        /// Account number from the row
        account_number: String,
    },

    /// One or more entries failed account resolution
    ///
    /// None of the entries of the batch are returned.
    #[error("Building Xero journal entries failed for {} entries: {}", entries.len(), entries.join(", "))]
    Conversion {
        /// Identifiers of the failed entries, in input order
        entries: Vec<String>,
    },

    /// The remote service rejected a record; compensation has already run
    #[error("Posting Xero {entity} failed at '{record}': {message} ({compensated} posted records reversed)")]
    Posting {
        /// Entity type being posted
        entity: String,
        /// Identifier of the record that failed (narration or reference)
        record: String,
        /// Reason reported by the service or the transport
        message: String,
        /// Number of previously posted records that compensation was issued for
        compensated: usize,
    },
}

impl From<std::io::Error> for UploadError {
    fn from(error: std::io::Error) -> Self {
        UploadError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for UploadError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        UploadError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for UploadError {
    fn from(error: serde_json::Error) -> Self {
        UploadError::Json {
            message: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(error: reqwest::Error) -> Self {
        UploadError::Http {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl UploadError {
    /// Create a Schema error
    pub fn schema(found: &[String], missing: Vec<String>) -> Self {
        UploadError::Schema {
            found: found.to_vec(),
            missing,
        }
    }

    /// Create an InvalidDate error
    pub fn invalid_date(entry_id: &str, value: &str) -> Self {
        UploadError::InvalidDate {
            entry_id: entry_id.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an InvalidRow error
    pub fn invalid_row(line: usize, message: impl Into<String>) -> Self {
        UploadError::InvalidRow {
            line,
            message: message.into(),
        }
    }

    /// Create a MissingAccountReference error
    pub fn missing_account_reference(entry_id: &str) -> Self {
        UploadError::MissingAccountReference {
            entry_id: entry_id.to_string(),
        }
    }

    /// Create an AccountResolution error
    pub fn account_resolution(entry_id: &str, account_name: &str, account_number: &str) -> Self {
        UploadError::AccountResolution {
            entry_id: entry_id.to_string(),
            account_name: account_name.to_string(),
            account_number: account_number.to_string(),
        }
    }

    /// Create a Posting error
    pub fn posting(entity: &str, record: &str, message: impl Into<String>, compensated: usize) -> Self {
        UploadError::Posting {
            entity: entity.to_string(),
            record: record.to_string(),
            message: message.into(),
            compensated,
        }
    }

    /// Create an Authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        UploadError::Authentication {
            message: message.into(),
        }
    }
}
