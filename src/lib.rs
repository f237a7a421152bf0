//! Xero Uploader Library
//! # Overview
//!
//! Posts staged accounting data to Xero: journal rows from a CSV file become
//! balanced manual journals, and pre-built bank transactions from a JSON file
//! are posted after their references are resolved.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (rows, entries, references, config, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::reference_index`] - Lookups over live accounts, tracking options and contacts
//!   - [`core::entry_builder`] - Grouping and conversion of journal rows
//!   - [`core::batch_poster`] - All-or-nothing journal posting with voiding
//!   - [`core::transaction_uploader`] - Fail-fast transaction posting with deletion
//! - [`io`] - Input files, config file and diagnostic sink
//! - [`client`] - Blocking Xero API client and token refresh
//! - [`pipeline`] - One run end to end
//!
//! # Posting Guarantees
//!
//! - **Journals**: either every entry of the file is posted, or the entries
//!   posted before the failure are voided and the run fails.
//! - **Transactions**: the first rejection deletes the transactions posted so
//!   far and stops; the rejection body goes to the diagnostic file.
//!
//! Compensation is best effort: failures while voiding or deleting are logged
//! and never retried.

// Module declarations
pub mod cli;
pub mod client;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use client::XeroClient;
pub use core::{
    BatchPoster, EntryBuilder, ReferenceIndex, RemoteService, TransactionDirectory,
    TransactionOutcome, TransactionUploader,
};
pub use pipeline::{upload, UploadSummary};
pub use types::{Config, Entry, EntityType, LineItem, PushResponse, UploadError};
