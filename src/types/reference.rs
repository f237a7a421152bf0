//! Reference data types
//!
//! Records fetched from the remote service (accounts, tracking categories,
//! contacts) and the resolved references attached to outgoing records.
//!
//! Fetched records are deserialized leniently: every field is optional, and a
//! record that fails to deserialize at all is skipped by [`parse_records`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Account as returned by the `Accounts` endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRecord {
    #[serde(rename = "AccountID")]
    pub account_id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    /// Account type, e.g. `BANK`, `REVENUE`
    #[serde(rename = "Type")]
    pub account_type: Option<String>,
}

/// One option of a tracking category
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingOptionRecord {
    pub name: Option<String>,
}

/// Tracking category as returned by the `TrackingCategories` endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingCategoryRecord {
    pub name: Option<String>,
    #[serde(default)]
    pub options: Vec<TrackingOptionRecord>,
}

/// Contact as returned by the `Contacts` endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ContactRecord {
    #[serde(rename = "ContactID")]
    pub contact_id: Option<String>,
    pub name: Option<String>,
}

/// Resolved account reference
///
/// The same value is indexed under both its code and its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountRef {
    pub name: String,
    pub code: String,
}

/// Resolved tracking reference: category name plus option name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrackingRef {
    /// Owning category name
    pub name: String,
    pub option: String,
}

impl TrackingRef {
    pub fn new(name: &str, option: &str) -> Self {
        TrackingRef {
            name: name.to_string(),
            option: option.to_string(),
        }
    }
}

/// Deserialize raw remote records into typed records
///
/// Records that do not match the expected shape are dropped with a debug log;
/// reference data is advisory and a malformed record simply cannot be
/// referenced.
pub fn parse_records<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                log::debug!("Skipping malformed reference record: {}", e);
                None
            }
        })
        .collect()
}
