//! Xero client module
//!
//! - `auth` - Refresh-token grant against the identity service
//! - `xero` - [`RemoteService`](crate::core::RemoteService) over the accounting API

pub mod auth;
pub mod xero;

pub use auth::{refresh_access_token, TokenGrant, XERO_TOKEN_URL};
pub use xero::{XeroClient, PAGE_SIZE, XERO_API_BASE};

use crate::io::{save_config, write_authentication_error};
use crate::types::{Config, UploadError};
use std::path::Path;

/// Build a client for `config` and refresh its credentials
///
/// See [`connect_with`].
pub fn connect(config: &mut Config, config_path: &Path) -> Result<XeroClient, UploadError> {
    connect_with(config, config_path, XeroClient::new)
}

/// Build a client with `build`, refresh its access token and persist the
/// rotated tokens
///
/// When either step fails an `AuthenticationError` record is written to the
/// config's `log_file` before the error is returned.
///
/// # Errors
///
/// Whatever `build` or the token refresh returned, or `Config` when the
/// updated config file cannot be written.
pub fn connect_with<F>(
    config: &mut Config,
    config_path: &Path,
    build: F,
) -> Result<XeroClient, UploadError>
where
    F: FnOnce(&Config) -> Result<XeroClient, UploadError>,
{
    let connected = build(config).and_then(|mut client| {
        client.refresh_credentials(config)?;
        Ok(client)
    });

    let client = match connected {
        Ok(client) => client,
        Err(e) => {
            record_authentication_failure(&config.log_file, &e);
            return Err(e);
        }
    };

    save_config(config_path, config)?;
    log::info!("Refreshed Xero access token");
    Ok(client)
}

fn record_authentication_failure(log_file: &Path, error: &UploadError) {
    log::error!("{}", error);
    let message = match error {
        UploadError::Authentication { message } => message.clone(),
        other => other.to_string(),
    };
    if let Err(write_error) = write_authentication_error(log_file, &message) {
        log::error!(
            "Could not write diagnostics to {}: {}",
            log_file.display(),
            write_error
        );
    }
}
