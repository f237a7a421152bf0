//! Run configuration
//!
//! Loaded from the JSON file passed with `--config`. The same file carries the
//! OAuth credentials and is rewritten after a token refresh, so unknown keys
//! are preserved in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// File name of the staged journal entries inside `input_path`
pub const JOURNAL_ENTRIES_FILE: &str = "JournalEntries.csv";

/// File name of the staged bank transactions inside `input_path`
pub const TRANSACTIONS_FILE: &str = "Transactions.json";

fn default_log_file() -> PathBuf {
    PathBuf::from("error_log.json")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Directory holding `JournalEntries.csv` and/or `Transactions.json`
    pub input_path: PathBuf,

    /// Diagnostic sink for rejected payloads and authentication failures
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Optional dimension column names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn journal_entries_path(&self) -> PathBuf {
        self.input_path.join(JOURNAL_ENTRIES_FILE)
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.input_path.join(TRANSACTIONS_FILE)
    }

    pub fn dimension_columns(&self) -> DimensionColumns {
        DimensionColumns {
            department: self.department.clone(),
            location: self.location.clone(),
            customer_id: self.customer_id.clone(),
            customer_name: self.customer_name.clone(),
        }
    }
}

/// Column names of the optional tracking dimensions
///
/// A `None` dimension is not looked up at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionColumns {
    pub department: Option<String>,
    pub location: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
}
