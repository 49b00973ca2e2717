//! json-weave — JSON content binding, inline-edit tracking, and diff
//! reporting for HTML documents.
//!
//! A page template (JsonML) declares bindings through `data-bind`-family
//! attributes; a content file supplies the data. The [`Binder`] renders
//! the page, toggles inline editing for a host, records edits in a working
//! snapshot, and reports an ordered changelist on demand.
//!
//! # Example
//!
//! ```
//! use json_weave::{Binder, Document, Snapshot};
//! use serde_json::json;
//!
//! let doc = Document::from_jsonml(&json!(
//!     ["body", ["h1", {"data-bind": "title"}, ""]]
//! )).unwrap();
//! let snapshot = Snapshot { source_id: "s".into(), data: json!({"title": "Hi"}) };
//! let binder = Binder::with_stamp(doc, snapshot, 0);
//! assert!(json_weave::to_html(binder.document()).contains(">Hi</h1>"));
//! ```

pub mod cli;

pub use json_weave_core::{
    content, diff, handle_request, handle_request_value, BindError, Binder, ChangeKind,
    ChangeRecord, ChangeSet, Request, Response, Snapshot, SnapshotStore,
};
pub use json_weave_dom::{to_html, Document, DomError, NodeId};
pub use json_weave_path as path;
