//! Bank transaction types
//!
//! Bank transactions arrive pre-built in `Transactions.json`. Only the fields
//! that need reference resolution are typed; everything else (`Type`, `Date`,
//! `Reference`, line amounts, ...) is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bank transaction as staged on disk
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankTransaction {
    /// Name of the bank account the transaction belongs to
    #[serde(default)]
    pub bank: Option<String>,
    /// Name of the counterparty contact
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub line_items: Vec<TransactionLine>,
    /// Pass-through fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// One line of a staged bank transaction
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionLine {
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankAccountRef {
    #[serde(rename = "AccountID")]
    pub account_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRef {
    #[serde(rename = "ContactID")]
    pub contact_id: String,
}

/// Bank transaction with its references resolved, ready to submit
///
/// Unresolved references are left out of the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BankTransactionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<BankAccountRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactRef>,
    pub line_items: Vec<TransactionLinePayload>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionLinePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_code: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
