//! Upload pipeline
//!
//! Drives one run end to end against any [`RemoteService`]:
//!
//! 1. `JournalEntries.csv` (if present): fetch accounts and tracking
//!    categories, build the reference index, convert the rows into entries and
//!    post them all-or-nothing.
//! 2. `Transactions.json` (if present): fetch accounts and contacts, resolve
//!    each transaction and post them fail-fast.
//!
//! A journal failure aborts the run before any transaction is read. A rolled
//! back transaction upload is reported in the summary, not as an error.

use crate::core::{
    BatchPoster, EntryBuilder, ReferenceIndex, RemoteService, TransactionDirectory,
    TransactionOutcome, TransactionUploader,
};
use crate::io::{read_journal_table, read_transactions};
use crate::types::{Config, UploadError};

/// What a run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Identifiers of the manual journals posted
    pub journals: Vec<String>,
    /// Outcome of the transaction upload; `None` when there was no input
    pub transactions: Option<TransactionOutcome>,
}

impl UploadSummary {
    pub fn journals_posted(&self) -> usize {
        self.journals.len()
    }

    pub fn transactions_posted(&self) -> usize {
        match &self.transactions {
            Some(TransactionOutcome::Completed { posted }) => posted.len(),
            _ => 0,
        }
    }

    pub fn rolled_back(&self) -> bool {
        matches!(self.transactions, Some(TransactionOutcome::RolledBack { .. }))
    }
}

/// Run every upload whose input file exists under `config.input_path`
///
/// # Errors
///
/// Any error from reading input, fetching references, converting journal
/// rows, or a journal posting failure (after compensation).
pub fn upload<S: RemoteService + ?Sized>(
    config: &Config,
    service: &mut S,
) -> Result<UploadSummary, UploadError> {
    let mut summary = UploadSummary::default();

    let journal_path = config.journal_entries_path();
    if journal_path.exists() {
        summary.journals = upload_journals(config, service)?;
    } else {
        log::info!("No journal entries at {}", journal_path.display());
    }

    let transactions_path = config.transactions_path();
    if transactions_path.exists() {
        summary.transactions = Some(upload_transactions(config, service)?);
    } else {
        log::info!("No bank transactions at {}", transactions_path.display());
    }

    log::info!("Posting process has completed!");
    Ok(summary)
}

/// Convert and post `JournalEntries.csv`
pub fn upload_journals<S: RemoteService + ?Sized>(
    config: &Config,
    service: &mut S,
) -> Result<Vec<String>, UploadError> {
    let index = ReferenceIndex::fetch(service)?;
    let table = read_journal_table(&config.journal_entries_path())?;

    let dimensions = config.dimension_columns();
    let entries = EntryBuilder::new(&index, &dimensions).build(&table)?;

    if log::log_enabled!(log::Level::Debug) {
        log::debug!("Journal entries payload: {}", serde_json::to_string(&entries)?);
    }

    let posted = BatchPoster::new(service).post(&entries)?;
    log::info!("Posted {} journal entries", posted.len());
    Ok(posted)
}

/// Resolve and post `Transactions.json`
pub fn upload_transactions<S: RemoteService + ?Sized>(
    config: &Config,
    service: &mut S,
) -> Result<TransactionOutcome, UploadError> {
    let directory = TransactionDirectory::fetch(service)?;
    let transactions = read_transactions(&config.transactions_path())?;
    log::info!("Loaded {} bank transactions to post", transactions.len());

    let outcome =
        TransactionUploader::new(service, &directory, &config.log_file).upload(transactions)?;

    if let TransactionOutcome::RolledBack { failed_at, deleted } = &outcome {
        log::error!(
            "Bank transaction #{} was rejected; {} posted transactions deleted. See {}",
            failed_at + 1,
            deleted,
            config.log_file.display()
        );
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mock::MockService;
    use crate::types::{EntityType, PushResponse};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    const JOURNAL_CSV: &str = "\
Transaction Date,Journal Entry Id,Class,Account Number,Account Name,Posting Type,Description,Amount
2024-01-05,JE1,,100,Cash,Debit,Sale,50.00
2024-01-05,JE1,,200,Sales,Credit,Sale,50.00
";

    fn config(dir: &TempDir) -> Config {
        serde_json::from_value(json!({
            "client_id": "cid",
            "client_secret": "csec",
            "refresh_token": "rt",
            "tenant_id": "tenant",
            "input_path": dir.path(),
            "log_file": dir.path().join("error_log.json")
        }))
        .unwrap()
    }

    fn service() -> MockService {
        MockService::new()
            .with_records(
                EntityType::Accounts,
                vec![
                    json!({"AccountID": "a-1", "Code": "100", "Name": "Cash", "Type": "BANK"}),
                    json!({"AccountID": "a-2", "Code": "200", "Name": "Sales", "Type": "REVENUE"}),
                ],
            )
            .with_records(
                EntityType::Contacts,
                vec![json!({"ContactID": "c-1", "Name": "ACME"})],
            )
    }

    fn write_transactions(dir: &TempDir, transactions: Value) {
        fs::write(
            dir.path().join("Transactions.json"),
            transactions.to_string(),
        )
        .unwrap();
    }

    #[test]
    fn test_no_inputs_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let mut service = service();

        let summary = upload(&config(&dir), &mut service).unwrap();

        assert_eq!(summary, UploadSummary::default());
        assert!(service.pushes.is_empty());
    }

    #[test]
    fn test_journals_then_transactions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("JournalEntries.csv"), JOURNAL_CSV).unwrap();
        write_transactions(
            &dir,
            json!([{"Reference": "R1", "Bank": "Cash", "Contact": "ACME", "LineItems": [{"AccountName": "Sales"}]}]),
        );
        let mut service = service();

        let summary = upload(&config(&dir), &mut service).unwrap();

        assert_eq!(summary.journals_posted(), 1);
        assert_eq!(summary.transactions_posted(), 1);
        assert!(!summary.rolled_back());
        let order: Vec<EntityType> = service.pushes.iter().map(|(entity, _)| *entity).collect();
        assert_eq!(
            order,
            vec![EntityType::ManualJournals, EntityType::BankTransactions]
        );
    }

    #[test]
    fn test_journal_failure_skips_transactions() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("JournalEntries.csv"),
            JOURNAL_CSV.replace("200,Sales", "999,Unknown"),
        )
        .unwrap();
        write_transactions(&dir, json!([{"Reference": "R1"}]));
        let mut service = service();

        let result = upload(&config(&dir), &mut service);

        assert_eq!(
            result,
            Err(UploadError::Conversion {
                entries: vec!["JE1".to_string()]
            })
        );
        assert!(service.pushes.is_empty());
    }

    #[test]
    fn test_rolled_back_transactions_are_not_an_error() {
        let dir = TempDir::new().unwrap();
        write_transactions(
            &dir,
            json!([{"Reference": "R1", "Bank": "Cash"}, {"Reference": "R2", "Bank": "Cash"}]),
        );
        let mut service = service().respond_with(|entity, record, n| {
            if record.get("Reference") == Some(&json!("R2")) {
                Ok(PushResponse::new(400, json!({"Message": "rejected"})))
            } else {
                Ok(MockService::created(entity, n))
            }
        });
        let config = config(&dir);

        let summary = upload(&config, &mut service).unwrap();

        assert!(summary.rolled_back());
        assert_eq!(summary.transactions_posted(), 0);
        assert!(config.log_file.exists());
    }
}
