//! In-memory document tree for json-weave.
//!
//! The tree exposes the small capability set the template renderer needs
//! (attribute queries in document order, text content, template cloning,
//! insertion and removal), so rendering and edit tracking run headlessly.
//! Documents are built from JsonML — nested JSON arrays of the form
//! `[tag, attrs?, ...children]` — and serialize back to HTML.
//!
//! # Example
//!
//! ```
//! use json_weave_dom::Document;
//! use serde_json::json;
//!
//! let mut doc = Document::from_jsonml(&json!(
//!     ["body", ["h1", {"data-bind": "title"}, "placeholder"]]
//! )).unwrap();
//!
//! let heading = doc.find_all("data-bind")[0];
//! doc.set_text(heading, "Hello");
//! assert_eq!(doc.text(heading), "Hello");
//! assert!(doc.to_html().contains("<h1 data-bind=\"title\">Hello</h1>"));
//! ```

use thiserror::Error;

mod document;
mod html;
mod jsonml;

pub use document::{Document, NodeId, NodeKind};
pub use html::to_html;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("jsonml node must be an array or string, got {found}")]
    InvalidNode { found: String },
    #[error("jsonml element is missing its tag string")]
    MissingTag,
    #[error("jsonml attrs must map strings to scalar values")]
    InvalidAttrs,
    #[error("jsonml document root must be an element")]
    InvalidRoot,
}
