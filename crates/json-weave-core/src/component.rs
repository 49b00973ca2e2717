//! The binding component: one document, one snapshot pair, one editing
//! flag. Instances are independent; a failed sibling never affects
//! another.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::warn;

use json_weave_dom::{Document, NodeId};

use crate::content;
use crate::edit;
use crate::error::BindError;
use crate::render::{Renderer, ATTR_REPEAT};
use crate::snapshot::{ChangeSet, Snapshot, SnapshotStore};

/// Binds a document to a content snapshot and tracks edits against it.
pub struct Binder {
    doc: Document,
    store: SnapshotStore,
    editing: bool,
    stamp: u64,
}

fn wall_clock_stamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl Binder {
    /// Create a component and run the first render pass.
    ///
    /// The cache-defeating stamp is taken from the wall clock; tests use
    /// [`Binder::with_stamp`] for reproducible output.
    pub fn initialize(doc: Document, snapshot: Snapshot) -> Self {
        Self::with_stamp(doc, snapshot, wall_clock_stamp())
    }

    /// Create a component with an explicit cache-defeating stamp.
    pub fn with_stamp(doc: Document, snapshot: Snapshot, stamp: u64) -> Self {
        let mut binder = Binder {
            doc,
            store: SnapshotStore::new(snapshot),
            editing: false,
            stamp,
        };
        binder.render();
        binder
    }

    /// Load a content file and initialize. A load failure aborts before
    /// anything is rendered.
    pub fn from_content_file(doc: Document, path: &Path) -> Result<Self, BindError> {
        let snapshot = content::from_path(path)?;
        Ok(Self::initialize(doc, snapshot))
    }

    /// Full render pass from the current working snapshot.
    pub fn render(&mut self) {
        Renderer::new(&mut self.doc, self.stamp).render(self.store.working_data());
        if self.editing {
            edit::enable(&mut self.doc);
        }
    }

    pub fn enable_editing(&mut self) {
        self.editing = true;
        edit::enable(&mut self.doc);
    }

    pub fn disable_editing(&mut self) {
        self.editing = false;
        edit::disable(&mut self.doc);
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The blur hook: capture an editable node's text into the working
    /// snapshot.
    pub fn commit_edit(&mut self, node: NodeId) -> Result<(), BindError> {
        edit::commit(&self.doc, &mut self.store, node)
    }

    /// Assign a pre-typed value, then repaint every dependent binding with
    /// a full render pass.
    pub fn update_value(&mut self, path: &str, value: Value) -> Result<(), BindError> {
        self.store.update_value(path, value)?;
        self.render();
        Ok(())
    }

    /// Replace the sequence at `path` and re-render its container.
    pub fn replace_array(&mut self, path: &str, items: Vec<Value>) -> Result<(), BindError> {
        self.store.replace_array(path, items)?;
        self.rerender_containers(path);
        Ok(())
    }

    /// Prepend an item to the sequence at `path` and re-render its
    /// container. Raises [`BindError::NotAnArray`] when the path does not
    /// hold a sequence.
    pub fn insert_array_item(&mut self, path: &str, item: Value) -> Result<(), BindError> {
        self.store.insert_item(path, item)?;
        self.rerender_containers(path);
        Ok(())
    }

    /// Re-render every container bound to `path`, re-marking the fresh
    /// nodes editable when editing is active. Nodes outside the container
    /// are never touched.
    fn rerender_containers(&mut self, path: &str) {
        let containers: Vec<NodeId> = self
            .doc
            .find_all(ATTR_REPEAT)
            .into_iter()
            .filter(|c| self.doc.attr(*c, ATTR_REPEAT) == Some(path))
            .collect();
        for container in containers {
            let result =
                Renderer::new(&mut self.doc, self.stamp).render_container(container, self.store.working_data());
            match result {
                Ok(()) => {
                    if self.editing {
                        edit::enable_within(&mut self.doc, container);
                    }
                }
                Err(err) => warn!(error = %err, path, "container re-render failed"),
            }
        }
    }

    /// Recompute the changelist plus the full working snapshot.
    pub fn get_changes(&self) -> ChangeSet {
        self.store.change_set()
    }

    /// The current working snapshot.
    pub fn snapshot(&self) -> &Snapshot {
        self.store.working()
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }
}
