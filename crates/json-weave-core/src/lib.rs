//! Core binding engine for json-weave.
//!
//! Renders JSON content into a document tree through declarative binding
//! attributes, toggles inline editing, tracks edits against the pristine
//! content in a working snapshot, and reports an ordered changelist.
//!
//! # Example
//!
//! ```
//! use json_weave_core::{Binder, Snapshot};
//! use json_weave_dom::Document;
//! use serde_json::json;
//!
//! let doc = Document::from_jsonml(&json!(
//!     ["body", ["h1", {"data-bind": "title"}, ""]]
//! )).unwrap();
//! let snapshot = Snapshot {
//!     source_id: "content.json".to_string(),
//!     data: json!({"title": "Hello"}),
//! };
//!
//! let mut binder = Binder::with_stamp(doc, snapshot, 0);
//! let heading = binder.document().find_all("data-path")[0];
//! assert_eq!(binder.document().text(heading), "Hello");
//!
//! binder.update_value("title", json!("Changed")).unwrap();
//! let changes = binder.get_changes();
//! assert_eq!(changes.changes.len(), 1);
//! assert_eq!(changes.changes[0].path, "title");
//! ```

pub mod component;
pub mod content;
pub mod diff;
pub mod edit;
pub mod error;
pub mod protocol;
pub mod render;
pub mod snapshot;

pub use component::Binder;
pub use diff::{diff, ChangeKind, ChangeRecord};
pub use error::BindError;
pub use protocol::{handle_request, handle_request_value, Request, Response};
pub use snapshot::{ChangeSet, Snapshot, SnapshotStore};
