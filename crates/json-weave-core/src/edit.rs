//! Inline-edit tracking.
//!
//! The renderer leaves `data-editable` markers on bound nodes; this module
//! toggles `contenteditable` on marked nodes and commits blurred edits back
//! into the working snapshot through the path resolver. Both toggles
//! re-query the document at call time: array re-renders may have added or
//! replaced marked nodes since the mode last changed.

use tracing::warn;

use json_weave_dom::{Document, NodeId};

use crate::error::BindError;
use crate::render::{ATTR_EDITABLE, ATTR_PATH};
use crate::snapshot::SnapshotStore;

pub const ATTR_CONTENT_EDITABLE: &str = "contenteditable";

/// Make every currently marked node content-editable.
pub fn enable(doc: &mut Document) {
    for node in doc.find_all(ATTR_EDITABLE) {
        doc.set_attr(node, ATTR_CONTENT_EDITABLE, "true");
    }
}

/// Make marked nodes within one subtree content-editable.
///
/// Used after a container re-render while editing is active; nodes outside
/// the subtree are left untouched.
pub fn enable_within(doc: &mut Document, root: NodeId) {
    for node in doc.find_all_within(root, ATTR_EDITABLE) {
        doc.set_attr(node, ATTR_CONTENT_EDITABLE, "true");
    }
}

/// Revoke content-editability from every currently marked node.
pub fn disable(doc: &mut Document) {
    for node in doc.find_all(ATTR_EDITABLE) {
        doc.remove_attr(node, ATTR_CONTENT_EDITABLE);
    }
}

/// The blur hook: capture a node's trimmed text at its tagged path.
///
/// A node without a tagged path is ignored with a warning; the edited text
/// is stored as a string with no type validation.
pub fn commit(doc: &Document, store: &mut SnapshotStore, node: NodeId) -> Result<(), BindError> {
    let Some(path) = doc.attr(node, ATTR_PATH).map(str::to_string) else {
        warn!(node, "blur on a node with no tagged path");
        return Ok(());
    };
    let text = doc.text(node);
    store.commit_text(&path, text.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Renderer;
    use crate::snapshot::Snapshot;
    use serde_json::json;

    fn setup() -> (Document, SnapshotStore) {
        let mut doc = Document::from_jsonml(&json!([
            "body", ["h1", {"data-bind": "title"}, ""]
        ]))
        .unwrap();
        let store = SnapshotStore::new(Snapshot {
            source_id: "s".to_string(),
            data: json!({"title": "before"}),
        });
        Renderer::new(&mut doc, 0).render(store.working_data());
        (doc, store)
    }

    #[test]
    fn enable_and_disable_toggle_contenteditable() {
        let (mut doc, _) = setup();
        let h1 = doc.find_all(ATTR_EDITABLE)[0];
        enable(&mut doc);
        assert_eq!(doc.attr(h1, ATTR_CONTENT_EDITABLE), Some("true"));
        disable(&mut doc);
        assert_eq!(doc.attr(h1, ATTR_CONTENT_EDITABLE), None);
    }

    #[test]
    fn commit_stores_trimmed_text() {
        let (mut doc, mut store) = setup();
        let h1 = doc.find_all(ATTR_EDITABLE)[0];
        doc.set_text(h1, "  Hello  ");
        commit(&doc, &mut store, h1).unwrap();
        assert_eq!(store.working_data()["title"], json!("Hello"));
    }

    #[test]
    fn commit_without_path_is_ignored() {
        let (mut doc, mut store) = setup();
        let stray = doc.create_element("p");
        doc.append_child(doc.root(), stray);
        doc.set_text(stray, "noise");
        commit(&doc, &mut store, stray).unwrap();
        assert_eq!(store.working_data(), &json!({"title": "before"}));
    }

    #[test]
    fn commit_through_broken_path_propagates() {
        let (mut doc, mut store) = setup();
        let h1 = doc.find_all(ATTR_EDITABLE)[0];
        doc.set_attr(h1, ATTR_PATH, "missing.deep");
        let err = commit(&doc, &mut store, h1).unwrap_err();
        assert!(matches!(err, BindError::Path(_)));
    }
}
