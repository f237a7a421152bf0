//! I/O module
//!
//! Handles every file the uploader touches.
//!
//! # Components
//!
//! - `journal_csv` - `JournalEntries.csv` into a raw string table
//! - `transactions_json` - `Transactions.json` into staged bank transactions
//! - `config_file` - JSON config loading and rewriting
//! - `diagnostics` - Pretty JSON diagnostic sink

pub mod config_file;
pub mod diagnostics;
pub mod journal_csv;
pub mod transactions_json;

pub use config_file::{load_config, save_config};
pub use diagnostics::{write_authentication_error, write_json_file};
pub use journal_csv::{read_journal_table, read_journal_table_from};
pub use transactions_json::read_transactions;
