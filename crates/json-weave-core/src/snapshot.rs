//! Snapshot pair and its controlled mutation entry points.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use json_weave_path::{assign, resolve, PathError};

use crate::diff::{diff, ChangeRecord};
use crate::error::BindError;

/// A JSON value plus its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub source_id: String,
    pub data: Value,
}

/// The bundle a host receives when it asks for changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub data_file: String,
    pub changes: Vec<ChangeRecord>,
    pub updated_data: Snapshot,
}

/// Holds the pristine and working snapshots.
///
/// `original` is immutable after construction. `working` starts as a
/// structural deep copy and is only written through the entry points
/// below; the two are never aliased.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    original: Snapshot,
    working: Snapshot,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        let working = snapshot.clone();
        SnapshotStore {
            original: snapshot,
            working,
        }
    }

    pub fn original(&self) -> &Snapshot {
        &self.original
    }

    pub fn working(&self) -> &Snapshot {
        &self.working
    }

    pub fn working_data(&self) -> &Value {
        &self.working.data
    }

    pub fn source_id(&self) -> &str {
        &self.working.source_id
    }

    /// Assign a pre-typed value into the working data.
    pub fn update_value(&mut self, path: &str, value: Value) -> Result<(), PathError> {
        assign(&mut self.working.data, path, value)
    }

    /// Store edited text at a path. Everything that comes in through the
    /// editable-text path is stored as a string.
    pub fn commit_text(&mut self, path: &str, text: &str) -> Result<(), PathError> {
        self.update_value(path, Value::String(text.to_string()))
    }

    /// Replace the whole sequence at a path.
    pub fn replace_array(&mut self, path: &str, items: Vec<Value>) -> Result<(), PathError> {
        self.update_value(path, Value::Array(items))
    }

    /// Prepend an item to the sequence at a path.
    ///
    /// Unlike rendering, this raises [`BindError::NotAnArray`] when the
    /// path does not resolve to a sequence.
    pub fn insert_item(&mut self, path: &str, item: Value) -> Result<(), BindError> {
        let existing = match resolve(&self.working.data, path) {
            Some(Value::Array(items)) => items.clone(),
            _ => {
                return Err(BindError::NotAnArray {
                    path: path.to_string(),
                })
            }
        };
        let mut items = Vec::with_capacity(existing.len() + 1);
        items.push(item);
        items.extend(existing);
        self.update_value(path, Value::Array(items))?;
        Ok(())
    }

    /// Recompute the changelist from scratch.
    pub fn changes(&self) -> Vec<ChangeRecord> {
        diff(&self.original.data, &self.working.data)
    }

    pub fn change_set(&self) -> ChangeSet {
        ChangeSet {
            data_file: self.working.source_id.clone(),
            changes: self.changes(),
            updated_data: self.working.clone(),
        }
    }
}
