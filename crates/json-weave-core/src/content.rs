//! Content-file loading.
//!
//! A content file is a JSON document shaped `{ ...metadata, data: <value> }`.
//! Any read failure, parse failure, or missing `data` member aborts
//! initialization with [`BindError::LoadFailure`]; the error is the sole
//! observable signal and nothing is rendered.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::BindError;
use crate::snapshot::Snapshot;

/// Parse content from an in-memory string.
///
/// # Example
///
/// ```
/// use json_weave_core::content;
///
/// let snapshot = content::from_str(
///     "page.json",
///     r#"{"version": 3, "data": {"title": "t"}}"#,
/// ).unwrap();
/// assert_eq!(snapshot.source_id, "page.json");
/// assert_eq!(snapshot.data["title"], "t");
/// ```
pub fn from_str(source_id: &str, raw: &str) -> Result<Snapshot, BindError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| BindError::LoadFailure {
        source_id: source_id.to_string(),
        reason: e.to_string(),
    })?;
    let data = value.get("data").ok_or_else(|| BindError::LoadFailure {
        source_id: source_id.to_string(),
        reason: "missing `data` member".to_string(),
    })?;
    Ok(Snapshot {
        source_id: source_id.to_string(),
        data: data.clone(),
    })
}

/// Read and parse a content file from disk.
pub fn from_path(path: &Path) -> Result<Snapshot, BindError> {
    let source_id = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|e| BindError::LoadFailure {
        source_id: source_id.clone(),
        reason: e.to_string(),
    })?;
    from_str(&source_id, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_data_member_and_ignores_metadata() {
        let snapshot = from_str("s", r#"{"updated": "2024-01-01", "data": {"a": 1}}"#).unwrap();
        assert_eq!(snapshot.data, json!({"a": 1}));
    }

    #[test]
    fn parse_failure_is_load_failure() {
        let err = from_str("s", "{not json").unwrap_err();
        assert!(matches!(err, BindError::LoadFailure { .. }));
    }

    #[test]
    fn missing_data_member_is_load_failure() {
        let err = from_str("s", r#"{"metadata": true}"#).unwrap_err();
        let BindError::LoadFailure { source_id, reason } = err else {
            panic!("expected LoadFailure");
        };
        assert_eq!(source_id, "s");
        assert!(reason.contains("data"));
    }

    #[test]
    fn missing_file_is_load_failure() {
        let err = from_path(Path::new("/nonexistent/weave-content.json")).unwrap_err();
        assert!(matches!(err, BindError::LoadFailure { .. }));
    }

    #[test]
    fn null_data_member_still_loads() {
        // `data: null` is present, just null; that is the content's choice.
        let snapshot = from_str("s", r#"{"data": null}"#).unwrap();
        assert_eq!(snapshot.data, json!(null));
    }
}
