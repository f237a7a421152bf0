//! Staged bank transaction reader

use crate::types::{BankTransaction, UploadError};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read `Transactions.json`: a JSON array of bank transactions
///
/// # Errors
///
/// `Io` when the file cannot be opened, `Json` when it is not an array of
/// transaction objects.
pub fn read_transactions(path: &Path) -> Result<Vec<BankTransaction>, UploadError> {
    let file = File::open(path)?;
    let transactions: Vec<BankTransaction> = serde_json::from_reader(BufReader::new(file))?;

    log::debug!("Read {} bank transactions from {}", transactions.len(), path.display());
    Ok(transactions)
}
