//! Diagnostic sink
//!
//! Rejected payload responses and authentication failures are written to the
//! configured `log_file` as pretty-printed JSON, replacing any previous
//! content.

use crate::types::UploadError;
use serde_json::{json, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write `content` to `path` as pretty JSON
pub fn write_json_file(path: &Path, content: &Value) -> Result<(), UploadError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, content)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Record an authentication failure in the diagnostic file
pub fn write_authentication_error(path: &Path, message: &str) -> Result<(), UploadError> {
    write_json_file(
        path,
        &json!({"Type": "AuthenticationError", "Message": message}),
    )
}
