//! Core business logic module
//!
//! This module contains the conversion and posting components:
//! - `traits` - The remote service seam
//! - `reference_index` - Lookups over live accounts, tracking categories and contacts
//! - `entry_builder` - Journal rows to balanced manual journal entries
//! - `posted_batch` - Per-run record of accepted identifiers and their reversal
//! - `batch_poster` - All-or-nothing posting of journal entries
//! - `transaction_uploader` - Fail-fast posting of bank transactions

pub mod batch_poster;
pub mod entry_builder;
pub mod posted_batch;
pub mod reference_index;
pub mod traits;
pub mod transaction_uploader;

#[cfg(test)]
pub(crate) mod mock;

pub use batch_poster::BatchPoster;
pub use entry_builder::{group_rows, normalize_date, EntryBuilder, RowGroup, REQUIRED_COLUMNS};
pub use posted_batch::PostedBatch;
pub use reference_index::{ReferenceIndex, TransactionDirectory};
pub use traits::RemoteService;
pub use transaction_uploader::{TransactionOutcome, TransactionUploader};
