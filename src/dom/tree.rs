use std::fmt;

use crate::dom::node::{DomNode, LabelSource, NodeKind};

/// Elements whose text never renders.
const HIDDEN_TEXT_TAGS: [&str; 3] = ["SCRIPT", "STYLE", "TEMPLATE"];

/// Index of a node inside a `DomTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    tag: String,
    text: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind, tag: &str, text: &str) -> Self {
        Self {
            kind,
            tag: tag.to_string(),
            text: text.to_string(),
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

// ============================================================================
// Arena tree
// ============================================================================

/// An owned snapshot of a document tree.
///
/// Nodes are appended through the builder methods and never removed, so a
/// `NodeId` handed out by a tree stays valid for the tree's lifetime. Tag
/// names are stored exactly as given; callers pass the browser's `tagName`
/// form (upper-case for HTML).
#[derive(Debug, Clone, Default)]
pub struct DomTree {
    nodes: Vec<NodeData>,
    document_root: Option<NodeId>,
}

impl DomTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tree holding a single element that is also the designated root.
    pub fn with_root(tag: &str) -> (Self, NodeId) {
        let mut tree = Self::new();
        let root = tree.create_element(tag);
        tree.set_document_root(root);
        (tree, root)
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(data);
        id
    }

    /// Create a parentless element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::new(NodeKind::Element, tag, ""))
    }

    /// Create a parentless document node.
    pub fn create_document(&mut self) -> NodeId {
        self.push(NodeData::new(NodeKind::Document, "", ""))
    }

    fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.push(data);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.append(parent, NodeData::new(NodeKind::Element, tag, ""))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeData::new(NodeKind::Text, "", text))
    }

    pub fn append_comment(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeData::new(NodeKind::Comment, "", text))
    }

    pub fn append_other(&mut self, parent: NodeId) -> NodeId {
        self.append(parent, NodeData::new(NodeKind::Other, "", ""))
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let attributes = &mut self.nodes[node.0].attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn set_document_root(&mut self, node: NodeId) {
        self.document_root = Some(node);
    }

    pub fn document_root(&self) -> Option<NodeRef<'_>> {
        self.document_root.map(|id| self.node(id))
    }

    /// Handle for a node of this tree.
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "node id {} out of range", id.0);
        NodeRef { tree: self, id }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then(|| NodeRef { tree: self, id })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All element nodes in creation order.
    pub fn elements(&self) -> impl Iterator<Item = NodeRef<'_>> + '_ {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.nodes[id.0].kind == NodeKind::Element)
            .map(|id| NodeRef { tree: self, id })
    }
}

// ============================================================================
// Borrowed node handle
// ============================================================================

/// A node of a `DomTree`, borrowed for the duration of a read.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a DomTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Character data of a text or comment node; empty for elements.
    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.children() {
            match child.kind() {
                NodeKind::Text => {
                    out.push_str(child.text());
                    out.push(' ');
                }
                NodeKind::Element => {
                    let hidden = HIDDEN_TEXT_TAGS
                        .iter()
                        .any(|t| t.eq_ignore_ascii_case(child.tag_name()));
                    if !hidden {
                        child.collect_text(out);
                    }
                }
                _ => {}
            }
        }
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        match data.kind {
            NodeKind::Element => write!(f, "<{}>#{}", data.tag, self.id.0),
            kind => write!(f, "{:?}#{}", kind, self.id.0),
        }
    }
}

impl DomNode for NodeRef<'_> {
    fn kind(&self) -> NodeKind {
        self.data().kind
    }

    fn tag_name(&self) -> &str {
        &self.data().tag
    }

    fn identifier(&self) -> &str {
        self.attribute("id").unwrap_or("")
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|id| NodeRef { tree: self.tree, id })
    }

    fn children(&self) -> Vec<Self> {
        self.data()
            .children
            .iter()
            .map(|&id| NodeRef { tree: self.tree, id })
            .collect()
    }

    fn is_document_root(&self) -> bool {
        self.tree.document_root == Some(self.id)
    }
}

impl LabelSource for NodeRef<'_> {
    fn value(&self) -> String {
        self.attribute("value").unwrap_or("").to_string()
    }

    fn visible_text(&self) -> String {
        let mut raw = String::new();
        self.collect_text(&mut raw);
        raw.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn alt(&self) -> String {
        self.attribute("alt").unwrap_or("").to_string()
    }

    fn class_name(&self) -> String {
        self.attribute("class").unwrap_or("").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_links_parents_and_children() {
        let (mut tree, body) = DomTree::with_root("BODY");
        let div = tree.append_element(body, "DIV");
        let text = tree.append_text(div, "hello");

        let div_ref = tree.node(div);
        assert_eq!(div_ref.parent(), Some(tree.node(body)));
        assert_eq!(div_ref.children(), vec![tree.node(text)]);
        assert!(tree.node(body).is_document_root());
        assert!(!div_ref.is_document_root());
    }

    #[test]
    fn set_attribute_replaces_existing_value() {
        let (mut tree, body) = DomTree::with_root("BODY");
        tree.set_attribute(body, "class", "a");
        tree.set_attribute(body, "class", "b");
        assert_eq!(tree.node(body).attribute("class"), Some("b"));
    }

    #[test]
    fn visible_text_skips_scripts_and_collapses_whitespace() {
        let (mut tree, body) = DomTree::with_root("BODY");
        let button = tree.append_element(body, "BUTTON");
        tree.append_text(button, "  Send\n   ");
        let span = tree.append_element(button, "SPAN");
        tree.append_text(span, "now ");
        let script = tree.append_element(button, "SCRIPT");
        tree.append_text(script, "var x = 1;");

        assert_eq!(tree.node(button).visible_text(), "Send now");
    }

    #[test]
    fn handles_from_different_trees_are_not_equal() {
        let (a, root_a) = DomTree::with_root("BODY");
        let (b, root_b) = DomTree::with_root("BODY");
        assert_ne!(a.node(root_a), b.node(root_b));
    }
}
