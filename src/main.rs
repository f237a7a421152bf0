//! Xero Uploader CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --config config.json
//! RUST_LOG=debug cargo run -- -c config.json
//! ```
//!
//! Reads `JournalEntries.csv` and/or `Transactions.json` from the config's
//! `input_path`, refreshes the Xero access token (rewriting the config file
//! with the rotated refresh token) and posts the records.
//!
//! # Exit Codes
//!
//! - 0: Success, including a rolled back transaction upload
//! - 1: Error (bad config, authentication failure, schema or conversion
//!   errors, journal posting failure)

use std::process;
use xero_uploader::types::UploadError;
use xero_uploader::{cli, client, io, pipeline};

fn run(args: &cli::CliArgs) -> Result<(), UploadError> {
    let mut config = io::load_config(&args.config)?;
    let mut xero = client::connect(&mut config, &args.config)?;

    let summary = pipeline::upload(&config, &mut xero)?;
    log::info!(
        "Journals posted: {}, bank transactions posted: {}",
        summary.journals_posted(),
        summary.transactions_posted()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
