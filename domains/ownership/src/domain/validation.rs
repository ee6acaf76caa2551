//! Validation helpers for owner and role names

use catalog_common::{Error, Result};

/// Longest accepted owner or role name, in characters
pub const MAX_NAME_LENGTH: usize = 255;

/// Trim a name and reject blank or oversized input
pub fn normalize_name(kind: &str, raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(Error::Validation(format!("{} name must not be blank", kind)));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "{} name must be at most {} characters",
            kind, MAX_NAME_LENGTH
        )));
    }
    Ok(name.to_string())
}
