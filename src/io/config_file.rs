//! Config file loading and rewriting

use crate::types::{Config, UploadError};
use std::fs;
use std::path::Path;

fn config_error(path: &Path, message: impl ToString) -> UploadError {
    UploadError::Config {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

/// Load the JSON config file
///
/// # Errors
///
/// `Config` when the file cannot be read or is missing a required key.
pub fn load_config(path: &Path) -> Result<Config, UploadError> {
    let text = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
    serde_json::from_str(&text).map_err(|e| config_error(path, e))
}

/// Rewrite the config file, e.g. after the refresh token rotated
pub fn save_config(path: &Path, config: &Config) -> Result<(), UploadError> {
    let text = serde_json::to_string_pretty(config).map_err(|e| config_error(path, e))?;
    fs::write(path, text + "\n").map_err(|e| config_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_and_save_preserves_unknown_keys() {
        let file = create_temp_config(
            r#"{
                "client_id": "cid",
                "client_secret": "secret",
                "refresh_token": "rt-1",
                "tenant_id": "tenant",
                "input_path": "/data",
                "log_file": "/tmp/errors.json",
                "start_date": "2024-01-01"
            }"#,
        );

        let mut config = load_config(file.path()).unwrap();
        assert_eq!(config.log_file, PathBuf::from("/tmp/errors.json"));

        config.refresh_token = "rt-2".to_string();
        config.access_token = Some("at".to_string());
        save_config(file.path(), &config).unwrap();

        let written: Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(written["refresh_token"], json!("rt-2"));
        assert_eq!(written["access_token"], json!("at"));
        assert_eq!(written["start_date"], json!("2024-01-01"));
    }

    #[test]
    fn test_missing_required_key() {
        let file = create_temp_config(r#"{"client_id": "cid"}"#);

        match load_config(file.path()) {
            Err(UploadError::Config { message, .. }) => {
                assert!(message.contains("missing field"));
            }
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = load_config(Path::new("/nonexistent/config.json"));

        assert!(matches!(result, Err(UploadError::Config { .. })));
    }
}
