//! Structural diff between the pristine and working snapshots.
//!
//! The walk is depth-first over the *working* value's own keys only: keys
//! present only in the original are never reported. This asymmetry matches
//! the change-reporting contract and is intentional — the changelist
//! answers "what did the editor write", not "what differs in both
//! directions".

use serde::{Deserialize, Serialize};
use serde_json::Value;

use json_weave_path::join;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A scalar (or null) replacement.
    Value,
    /// A whole-sequence replacement; element-level edits are not split out.
    Array,
}

/// One detected difference between original and working data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub path: String,
    /// Absent when the working key does not exist in the original.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    pub new_value: Value,
    pub kind: ChangeKind,
}

/// Compare `working` against `original` and return the ordered changelist.
///
/// Record order follows the working object's key insertion order at each
/// level (`serde_json` is built with `preserve_order`), so repeated runs
/// over the same data yield the same sequence.
///
/// # Example
///
/// ```
/// use json_weave_core::diff::{diff, ChangeKind};
/// use serde_json::json;
///
/// let original = json!({"title": "a", "tags": [1, 2, 3]});
/// let working = json!({"title": "b", "tags": [1, 2]});
/// let records = diff(&original, &working);
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].path, "title");
/// assert_eq!(records[0].kind, ChangeKind::Value);
/// assert_eq!(records[1].path, "tags");
/// assert_eq!(records[1].kind, ChangeKind::Array);
/// ```
pub fn diff(original: &Value, working: &Value) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    diff_value(&mut records, "", Some(original), working);
    records
}

fn diff_value(records: &mut Vec<ChangeRecord>, path: &str, original: Option<&Value>, working: &Value) {
    match working {
        Value::Array(_) => {
            if original != Some(working) {
                records.push(ChangeRecord {
                    path: path.to_string(),
                    old_value: original.cloned(),
                    new_value: working.clone(),
                    kind: ChangeKind::Array,
                });
            }
        }
        Value::Object(map) => {
            let original_map = original.and_then(Value::as_object);
            for (key, working_child) in map {
                let child_path = join(path, key);
                let original_child = original_map.and_then(|m| m.get(key));
                diff_value(records, &child_path, original_child, working_child);
            }
        }
        _ => {
            if original != Some(working) {
                records.push(ChangeRecord {
                    path: path.to_string(),
                    old_value: original.cloned(),
                    new_value: working.clone(),
                    kind: ChangeKind::Value,
                });
            }
        }
    }
}
