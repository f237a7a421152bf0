use clap::Parser;
use std::path::PathBuf;

/// Post staged journal entries and bank transactions to Xero
#[derive(Parser, Debug)]
#[command(name = "xero-uploader")]
#[command(about = "Post staged journal entries and bank transactions to Xero", long_about = None)]
pub struct CliArgs {
    /// JSON config file with credentials, tenant and input directory
    #[arg(
        short = 'c',
        long = "config",
        value_name = "CONFIG",
        help = "Path to the JSON config file (rewritten when the refresh token rotates)"
    )]
    pub config: PathBuf,
}
