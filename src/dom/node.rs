// ============================================================================
// Host DOM capabilities
// ============================================================================

/// What kind of tree entry a node is. Only `Element` nodes take part in
/// positional indexing; everything else is skipped by the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Comment,
    Document,
    Other,
}

impl NodeKind {
    /// Map a W3C `nodeType` number as reported by the browser.
    pub fn from_node_type(node_type: u16) -> Self {
        match node_type {
            1 => NodeKind::Element,
            3 => NodeKind::Text,
            8 => NodeKind::Comment,
            9 => NodeKind::Document,
            _ => NodeKind::Other,
        }
    }
}

/// Read-only view of a node in a host document tree.
///
/// Handles are cheap to clone and compare by identity: two handles are equal
/// only if they point at the same node of the same tree.
pub trait DomNode: Clone + PartialEq {
    fn kind(&self) -> NodeKind;

    /// Tag name as the browser reports it (upper-case for HTML elements).
    /// Empty for non-element nodes.
    fn tag_name(&self) -> &str;

    /// The `id` attribute, or an empty string.
    fn identifier(&self) -> &str;

    fn parent(&self) -> Option<Self>;

    /// Child nodes in document order, including text and comments.
    fn children(&self) -> Vec<Self>;

    /// Whether this is the designated body-equivalent where paths start.
    fn is_document_root(&self) -> bool;

    fn is_element(&self) -> bool {
        self.kind() == NodeKind::Element
    }
}

/// The element properties a click report shows next to the path.
pub trait LabelSource {
    /// Current `value` (form controls), or empty.
    fn value(&self) -> String;

    /// Rendered text of the element and its descendants.
    fn visible_text(&self) -> String;

    /// The `alt` attribute, or empty.
    fn alt(&self) -> String;

    /// The `class` attribute, or empty.
    fn class_name(&self) -> String;
}
