//! Fail-fast upload of pre-built bank transactions
//!
//! Each transaction has its bank account, line account codes and contact
//! resolved by exact name against the fetched reference lists. Misses are
//! warnings: the field is left out and the service gets to decide.
//!
//! Transactions are submitted in order. The first rejected submission writes
//! the response body to the diagnostic file, deletes everything posted so far
//! and stops the run. That is reported as [`TransactionOutcome::RolledBack`],
//! not as an error.

use crate::core::posted_batch::PostedBatch;
use crate::core::reference_index::TransactionDirectory;
use crate::core::traits::RemoteService;
use crate::io::diagnostics::write_json_file;
use crate::types::{
    BankAccountRef, BankTransaction, BankTransactionPayload, ContactRef, EntityType,
    TransactionLinePayload, UploadError,
};
use serde_json::Value;
use std::path::Path;

const ENTITY: EntityType = EntityType::BankTransactions;

/// How a transaction upload ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Every transaction was accepted
    Completed {
        /// Identifiers assigned by the service, in submission order
        posted: Vec<String>,
    },
    /// A transaction was rejected and earlier ones were deleted
    RolledBack {
        /// Zero-based position of the rejected transaction
        failed_at: usize,
        /// Number of deletions issued
        deleted: usize,
    },
}

/// Resolves and posts bank transactions
pub struct TransactionUploader<'a, S: RemoteService + ?Sized> {
    service: &'a mut S,
    directory: &'a TransactionDirectory,
    diagnostic_path: &'a Path,
}

impl<'a, S: RemoteService + ?Sized> TransactionUploader<'a, S> {
    pub fn new(
        service: &'a mut S,
        directory: &'a TransactionDirectory,
        diagnostic_path: &'a Path,
    ) -> Self {
        TransactionUploader {
            service,
            directory,
            diagnostic_path,
        }
    }

    /// Resolve references for one transaction
    ///
    /// A resolved reference replaces any `BankAccount` or `AccountCode` value
    /// already present in the input; an unresolved one leaves the input as is.
    pub fn resolve(&self, mut transaction: BankTransaction) -> BankTransactionPayload {
        let bank = transaction.bank.as_deref().unwrap_or_default();
        let bank_account = match self.directory.bank_account_id(bank) {
            Some(account_id) => {
                transaction.fields.remove("BankAccount");
                Some(BankAccountRef {
                    account_id: account_id.to_string(),
                })
            }
            None => {
                log::warn!("Invalid Bank: {}", bank);
                None
            }
        };

        let line_items = transaction
            .line_items
            .into_iter()
            .map(|mut line| {
                let name = line.account_name.as_deref().unwrap_or_default();
                let account_code = self.directory.account_code(name).map(str::to_string);
                match account_code {
                    Some(_) => {
                        line.fields.remove("AccountCode");
                    }
                    None => log::warn!("Invalid AccountName: {}", name),
                }
                TransactionLinePayload {
                    account_name: line.account_name,
                    account_code,
                    fields: line.fields,
                }
            })
            .collect();

        let contact_name = transaction.contact.as_deref().unwrap_or_default();
        let contact = match self.directory.contact_id(contact_name) {
            Some(contact_id) => Some(ContactRef {
                contact_id: contact_id.to_string(),
            }),
            None => {
                log::warn!("Invalid Contact: {}", contact_name);
                None
            }
        };

        BankTransactionPayload {
            bank_account,
            contact,
            line_items,
            fields: transaction.fields,
        }
    }

    /// Resolve and submit every transaction, stopping at the first rejection
    ///
    /// # Errors
    ///
    /// `Posting` when a submission gets no response at all; already-posted
    /// transactions are deleted first. A rejection with a response is not an
    /// error, see [`TransactionOutcome::RolledBack`].
    pub fn upload(
        &mut self,
        transactions: Vec<BankTransaction>,
    ) -> Result<TransactionOutcome, UploadError> {
        let mut posted = PostedBatch::new(ENTITY);

        for (position, transaction) in transactions.into_iter().enumerate() {
            let payload = serde_json::to_value(self.resolve(transaction))?;

            let response = match self.service.push(ENTITY, &payload) {
                Ok(response) => response,
                Err(e) => {
                    log::error!("Failure creating bank transaction error=[{}] payload=[{}]", e, payload);
                    let compensated = posted.compensate(&mut *self.service);
                    return Err(UploadError::posting(
                        ENTITY.endpoint(),
                        &record_label(&payload, position),
                        e.to_string(),
                        compensated,
                    ));
                }
            };

            if !response.is_success() {
                if let Err(e) = write_json_file(self.diagnostic_path, &response.body) {
                    log::error!(
                        "Could not write diagnostics to {}: {}",
                        self.diagnostic_path.display(),
                        e
                    );
                }
                log::error!("Invalid Payload: {}", payload);
                log::info!("Deleting posted transactions");
                let deleted = posted.compensate(&mut *self.service);
                return Ok(TransactionOutcome::RolledBack {
                    failed_at: position,
                    deleted,
                });
            }

            let ids = response.posted_ids(ENTITY);
            if ids.is_empty() {
                log::warn!(
                    "No BankTransactionID in response for {}",
                    record_label(&payload, position)
                );
            }
            for id in ids {
                posted.record(id);
            }
        }

        let posted = posted.into_ids();
        log::info!("Posted {} bank transactions", posted.len());
        Ok(TransactionOutcome::Completed { posted })
    }
}

/// Human-readable label: the `Reference` field when present, else the position
fn record_label(payload: &Value, position: usize) -> String {
    payload
        .get("Reference")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", position + 1))
}
