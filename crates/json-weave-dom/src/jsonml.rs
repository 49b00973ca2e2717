//! JsonML document construction.
//!
//! A JsonML node is either a string (a text leaf) or an array
//! `[tag, attrs?, ...children]` where `attrs` is an optional object of
//! scalar values. Page templates ship as JsonML documents.

use serde_json::Value;

use crate::document::{Document, NodeId};
use crate::DomError;

impl Document {
    /// Build a document from a JsonML value. The root must be an element.
    ///
    /// # Example
    ///
    /// ```
    /// use json_weave_dom::Document;
    /// use serde_json::json;
    ///
    /// let doc = Document::from_jsonml(&json!(
    ///     ["article", {"class": "card"}, ["h2", "Title"], ["p", "Body"]]
    /// )).unwrap();
    /// assert_eq!(doc.tag(doc.root()), Some("article"));
    /// assert_eq!(doc.children(doc.root()).len(), 2);
    /// ```
    pub fn from_jsonml(value: &Value) -> Result<Self, DomError> {
        if !value.is_array() {
            return Err(DomError::InvalidRoot);
        }
        // The arena needs a node before the real root is known; build over
        // a placeholder root, then adopt the real one.
        let mut doc = Document::new("");
        let root = build_node(&mut doc, value)?;
        doc.adopt_root(root);
        Ok(doc)
    }
}

fn scalar_attr(value: &Value) -> Result<String, DomError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(DomError::InvalidAttrs),
    }
}

fn build_node(doc: &mut Document, value: &Value) -> Result<NodeId, DomError> {
    match value {
        Value::String(s) => Ok(doc.create_text(s)),
        Value::Array(items) => {
            let tag = items
                .first()
                .and_then(Value::as_str)
                .ok_or(DomError::MissingTag)?;
            let node = doc.create_element(tag);

            let mut children = &items[1..];
            if let Some(Value::Object(map)) = children.first() {
                for (name, raw) in map {
                    doc.set_attr(node, name, &scalar_attr(raw)?);
                }
                children = &children[1..];
            }
            for child in children {
                let child_node = build_node(doc, child)?;
                doc.append_child(node, child_node);
            }
            Ok(node)
        }
        other => Err(DomError::InvalidNode {
            found: type_name(other).to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
