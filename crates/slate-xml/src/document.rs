//! Arena-backed element tree.
//!
//! Every node lives in a single `Vec` owned by the [`Document`]; parents hold the
//! ids of their children in order and each node records its parent. Nodes that are
//! detached by a mutation stay in the arena but are no longer reachable from the
//! root, so ids handed out earlier never dangle.
//!
//! Tag-name queries go through a lazily built index that is dropped whenever the
//! element structure changes.

use std::cell::OnceCell;
use std::collections::HashMap;

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An element's tag name and attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    /// Raw comment body, without the `<!--` / `-->` markers.
    Comment(String),
    /// Raw processing instruction body, without `<?` / `?>`.
    ProcessingInstruction(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Tag name to elements, in document order.
type TagIndex = HashMap<String, Vec<NodeId>>;

/// A parsed XML document rooted at a single element.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    index: OnceCell<TagIndex>,
}

impl Document {
    /// Create a document holding only `root`.
    pub fn with_root(root: Element) -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Element(root),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
            index: OnceCell::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element(_))
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    pub fn has_tag(&self, id: NodeId, name: &str) -> bool {
        self.tag_name(id) == Some(name)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Direct element children, in order.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
    }

    /// First direct child element named `name`.
    pub fn child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id).find(|child| self.has_tag(*child, name))
    }

    /// Descendants of `id` (excluding `id` itself) in document order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// First descendant element named `name`, in document order.
    pub fn find_descendant(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.descendants(id).find(|node| self.has_tag(*node, name))
    }

    /// All descendant elements named `name`, in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|node| self.has_tag(*node, name))
            .collect()
    }

    /// Every element in the document named `name`, in document order.
    ///
    /// The returned slice is a snapshot of the index; clone it before mutating.
    pub fn elements_by_tag_name(&self, name: &str) -> &[NodeId] {
        self.index()
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn index(&self) -> &TagIndex {
        self.index.get_or_init(|| {
            let mut index = TagIndex::new();
            let root = self.root;
            for node in std::iter::once(root).chain(self.descendants(root)) {
                if let Some(name) = self.tag_name(node) {
                    index.entry(name.to_string()).or_default().push(node);
                }
            }
            tracing::trace!(tags = index.len(), "rebuilt tag index");
            index
        })
    }

    fn invalidate_index(&mut self) {
        self.index.take();
    }

    /// Concatenated text and CDATA of `id` and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) | NodeKind::CData(text) => return text.clone(),
            NodeKind::Comment(_) | NodeKind::ProcessingInstruction(_) => return String::new(),
            NodeKind::Element(_) => {}
        }
        let mut out = String::new();
        for node in self.descendants(id) {
            if let NodeKind::Text(text) | NodeKind::CData(text) = &self.nodes[node.0].kind {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace every child of `id` with a single text node (none when `text` is empty).
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        let old = std::mem::take(&mut self.nodes[id.0].children);
        let dropped_elements = old.iter().any(|child| self.is_element(*child));
        for child in old {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let node = self.push(NodeKind::Text(text.to_string()));
            self.attach(id, node);
        }
        if dropped_elements {
            self.invalidate_index();
        }
    }

    /// Create a detached node. Attach it with [`Document::append_child`].
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        self.push(kind)
    }

    /// Append a detached node (and its subtree) as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(previous) = self.nodes[child.0].parent {
            self.nodes[previous.0].children.retain(|node| *node != child);
        }
        self.attach(parent, child);
        self.invalidate_index();
    }

    /// Append character data to `parent`, merging with a trailing text node.
    pub(crate) fn append_text(&mut self, parent: NodeId, text: &str) {
        if let Some(last) = self.nodes[parent.0].children.last().copied()
            && let NodeKind::Text(existing) = &mut self.nodes[last.0].kind
        {
            existing.push_str(text);
            return;
        }
        let node = self.push(NodeKind::Text(text.to_string()));
        self.attach(parent, node);
    }

    /// Deep-copy the subtree at `id` into a new detached subtree.
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let kind = self.nodes[id.0].kind.clone();
        let copy = self.push(kind);
        let children = self.nodes[id.0].children.clone();
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.attach(copy, child_copy);
        }
        copy
    }

    /// Replace the children of `target` with deep copies of the children of `source`.
    pub fn replace_children_with_copies(&mut self, target: NodeId, source: NodeId) {
        if target == source {
            return;
        }
        let old = std::mem::take(&mut self.nodes[target.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
        let children = self.nodes[source.0].children.clone();
        for child in children {
            let copy = self.clone_subtree(child);
            self.attach(target, copy);
        }
        self.invalidate_index();
    }

    pub(crate) fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }
}

/// Pre-order walk below a node.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(node).iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::with_root(Element::new("xmeml"));
        let root = doc.root();
        let clip = doc.create_node(NodeKind::Element(Element {
            name: "clip".to_string(),
            attributes: vec![("id".to_string(), "c1".to_string())],
        }));
        doc.append_child(root, clip);
        let name = doc.create_node(NodeKind::Element(Element::new("name")));
        doc.append_child(clip, name);
        doc.append_text(name, "A001");
        (doc, clip, name)
    }

    #[test]
    fn index_tracks_appended_elements() {
        let (mut doc, clip, _) = sample();
        assert_eq!(doc.elements_by_tag_name("name").len(), 1);
        let copy = doc.clone_subtree(clip);
        let root = doc.root();
        doc.append_child(root, copy);
        assert_eq!(doc.elements_by_tag_name("name").len(), 2);
        assert_eq!(doc.elements_by_tag_name("clip"), &[clip, copy]);
    }

    #[test]
    fn set_text_replaces_children() {
        let (mut doc, clip, name) = sample();
        doc.set_text_content(clip, "flat");
        assert_eq!(doc.text_content(clip), "flat");
        assert!(doc.elements_by_tag_name("name").is_empty());
        assert_eq!(doc.parent(name), None);
    }

    #[test]
    fn append_text_merges_adjacent_runs() {
        let (mut doc, _, name) = sample();
        doc.append_text(name, " & more");
        assert_eq!(doc.children(name).len(), 1);
        assert_eq!(doc.text_content(name), "A001 & more");
    }
}
