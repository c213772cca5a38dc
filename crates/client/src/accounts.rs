//! Loading account notifications from JSON.

use std::path::Path;

use profilesync_core::identity::RawAccount;
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Parse one notification: a single account object, an array of accounts,
/// or `null` (signed out).
pub fn parse_accounts(json: &str) -> Result<Vec<RawAccount>> {
    let value: Value = serde_json::from_str(json)?;
    if value.is_null() {
        Ok(Vec::new())
    } else if value.is_array() {
        Ok(serde_json::from_value(value)?)
    } else if value.is_object() {
        Ok(vec![serde_json::from_value(value)?])
    } else {
        Err(ClientError::InvalidInput(format!(
            "expected an account object or array, got {value}"
        )))
    }
}

/// Read and parse a notification file.
pub fn load_accounts(path: &Path) -> Result<Vec<RawAccount>> {
    let contents = std::fs::read_to_string(path)?;
    parse_accounts(&contents)
}
