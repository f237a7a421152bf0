//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `config`: Run configuration and dimension column names
//! - `error`: Error types for the uploader
//! - `journal`: Raw journal rows and built entries
//! - `reference`: Remote reference records and resolved references
//! - `remote`: Entity types and push responses at the service boundary
//! - `transaction`: Staged bank transactions and their payloads

pub mod config;
pub mod error;
pub mod journal;
pub mod reference;
pub mod remote;
pub mod transaction;

pub use config::{Config, DimensionColumns};
pub use error::UploadError;
pub use journal::{Dimension, Entry, EntryStatus, JournalTable, LineItem, PostingType, RawLineRow};
pub use reference::{
    AccountRecord, AccountRef, ContactRecord, TrackingCategoryRecord, TrackingOptionRecord,
    TrackingRef,
};
pub use remote::{EntityType, PushResponse};
pub use transaction::{
    BankAccountRef, BankTransaction, BankTransactionPayload, ContactRef, TransactionLine,
    TransactionLinePayload,
};
