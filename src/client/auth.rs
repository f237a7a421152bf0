//! OAuth2 refresh-token grant against the Xero identity service

use crate::types::{Config, UploadError};
use serde::Deserialize;
use serde_json::Value;

/// Token endpoint of the Xero identity service
pub const XERO_TOKEN_URL: &str = "https://identity.xero.com/connect/token";

/// Tokens issued by a successful refresh
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    /// Rotated refresh token; the old one stops working once this is issued
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// Exchange the configured refresh token for a new access token
///
/// # Errors
///
/// `Authentication` when the request cannot be sent, the identity service
/// answers with a non-200 status, or the response carries no access token.
pub fn refresh_access_token(
    http: &reqwest::blocking::Client,
    token_url: &str,
    config: &Config,
) -> Result<TokenGrant, UploadError> {
    let response = http
        .post(token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .header("Accept", "application/json")
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", config.refresh_token.as_str()),
        ])
        .send()
        .map_err(|e| UploadError::authentication(format!("token refresh request failed: {}", e)))?;

    let status = response.status().as_u16();
    if status != 200 {
        let body: Value = response.json().unwrap_or(Value::Null);
        let reason = body["error_description"]
            .as_str()
            .or_else(|| body["error"].as_str())
            .unwrap_or("unknown error");
        return Err(UploadError::authentication(format!(
            "token refresh failed ({}): {}",
            status, reason
        )));
    }

    let grant: TokenGrant = response
        .json()
        .map_err(|e| UploadError::authentication(format!("token refresh response invalid: {}", e)))?;

    if let Some(seconds) = grant.expires_in {
        log::debug!("Access token valid for {} seconds", seconds);
    }
    Ok(grant)
}
