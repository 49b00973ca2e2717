use tracing::warn;

/// Handle to a node inside a [`Document`] arena.
///
/// Ids are only meaningful for the document that issued them.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Element {
        tag: String,
        /// Attributes in insertion order; serialization preserves it.
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-backed document tree.
///
/// Removal unlinks a subtree from the tree without reclaiming arena slots;
/// detached nodes are simply unreachable from the root. Full-subtree
/// regeneration on re-render keeps the arena strategy this simple.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    /// Create a document with a single empty root element.
    pub fn new(root_tag: &str) -> Self {
        let root = Node {
            kind: NodeKind::Element {
                tag: root_tag.to_string(),
                attrs: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Document {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn adopt_root(&mut self, root: NodeId) {
        self.root = root;
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node {
            kind: NodeKind::Element {
                tag: tag.to_string(),
                attrs: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node {
            kind: NodeKind::Text(text.to_string()),
            parent: None,
            children: Vec::new(),
        })
    }

    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Element { .. })
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes[id].children.clone()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        match &mut self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => {
                if let Some(slot) = attrs.iter_mut().find(|(k, _)| k == name) {
                    slot.1 = value.to_string();
                } else {
                    attrs.push((name.to_string(), value.to_string()));
                }
            }
            NodeKind::Text(_) => warn!(name, "set_attr on a text node ignored"),
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let NodeKind::Element { attrs, .. } = &mut self.nodes[id].kind {
            attrs.retain(|(k, _)| k != name);
        }
    }

    /// Replace a node's content with a single text leaf.
    ///
    /// Mirrors the `textContent` setter: existing children are detached.
    /// Called on a text node, it rewrites the node's own content.
    pub fn set_text(&mut self, id: NodeId, text: &str) {
        if let NodeKind::Text(content) = &mut self.nodes[id].kind {
            *content = text.to_string();
            return;
        }
        for child in self.children(id) {
            self.nodes[child].parent = None;
        }
        self.nodes[id].children.clear();
        let leaf = self.create_text(text);
        self.nodes[leaf].parent = Some(id);
        self.nodes[id].children.push(leaf);
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(content) => out.push_str(content),
            NodeKind::Element { .. } => {
                for child in &self.nodes[id].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|c| *c != id);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Insert `child` into `parent` immediately before `reference`.
    ///
    /// Falls back to appending when the reference is not a child of
    /// `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        match self.nodes[parent].children.iter().position(|c| *c == reference) {
            Some(pos) => self.nodes[parent].children.insert(pos, child),
            None => {
                warn!(parent, reference, "insert_before reference not found, appending");
                self.nodes[parent].children.push(child);
            }
        }
    }

    /// Unlink a subtree from the tree.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    pub fn is_descendant(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.nodes[id].parent;
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.nodes[p].parent;
        }
        false
    }

    /// All elements carrying `attr`, in document (pre-)order.
    pub fn find_all(&self, attr: &str) -> Vec<NodeId> {
        self.find_all_within(self.root, attr)
    }

    /// All elements within `root`'s subtree (root included) carrying
    /// `attr`, in document order.
    pub fn find_all_within(&self, root: NodeId, attr: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.walk_collect(root, attr, &mut out);
        out
    }

    fn walk_collect(&self, id: NodeId, attr: &str, out: &mut Vec<NodeId>) {
        if self.attr(id, attr).is_some() {
            out.push(id);
        }
        for child in &self.nodes[id].children {
            self.walk_collect(*child, attr, out);
        }
    }

    /// Deep-copy a subtree; the copy is detached.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id].kind.clone();
        let children = self.nodes[id].children.clone();
        let copy = self.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.nodes[child_copy].parent = Some(copy);
            self.nodes[copy].children.push(child_copy);
        }
        copy
    }
}
