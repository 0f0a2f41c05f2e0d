use std::collections::HashMap;
use std::path::Path;

use scraper::{Html, Node, Selector};
use tracing::debug;

use crate::dom::tree::{DomTree, NodeId, NodeRef};
use crate::error::HtmlError;

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// A parsed HTML page mirrored into a `DomTree`, with `<body>` designated as
/// the document root.
///
/// The document node itself is kept as a parentless `Document` node, so
/// anything outside the body (e.g. `<head>` content) has no path.
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
    tree: DomTree,
    body: NodeId,
    index: HashMap<ego_tree::NodeId, NodeId>,
}

impl HtmlDocument {
    pub fn parse(source: &str) -> Result<Self, HtmlError> {
        let html = Html::parse_document(source);
        let mut tree = DomTree::new();
        let mut index = HashMap::new();
        let mut body = None;

        let document = tree.create_document();
        index.insert(html.tree.root().id(), document);

        // Pre-order walk; children pushed in reverse so they are appended
        // in document order.
        let mut stack: Vec<_> = html
            .tree
            .root()
            .children()
            .rev()
            .map(|child| (child, document))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            let id = match node.value() {
                Node::Element(element) => {
                    let tag = if &*element.name.ns == XHTML_NAMESPACE {
                        element.name().to_ascii_uppercase()
                    } else {
                        element.name().to_string()
                    };
                    let id = tree.append_element(parent, &tag);
                    for (name, value) in element.attrs() {
                        tree.set_attribute(id, name, value);
                    }
                    if body.is_none() && tag == "BODY" {
                        body = Some(id);
                    }
                    id
                }
                Node::Text(text) => tree.append_text(parent, &**text),
                Node::Comment(comment) => tree.append_comment(parent, &**comment),
                _ => tree.append_other(parent),
            };
            index.insert(node.id(), id);

            for child in node.children().rev() {
                stack.push((child, id));
            }
        }

        let body = body.ok_or(HtmlError::MissingBody)?;
        tree.set_document_root(body);
        debug!(nodes = tree.len(), "parsed HTML document");

        Ok(Self {
            html,
            tree,
            body,
            index,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, HtmlError> {
        let source = std::fs::read_to_string(path).map_err(|e| HtmlError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&source)
    }

    /// Download a page and parse it. No scripts run, so the tree is the
    /// server-rendered markup only.
    pub fn fetch(url: &str) -> Result<Self, HtmlError> {
        let fetch_err = |e: reqwest::Error| HtmlError::Fetch {
            url: url.to_string(),
            source: e,
        };
        let body = reqwest::blocking::get(url)
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(fetch_err)?;
        Self::parse(&body)
    }

    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    pub fn body(&self) -> NodeRef<'_> {
        self.tree.node(self.body)
    }

    /// Elements matching a CSS selector, in document order.
    pub fn select(&self, css: &str) -> Result<Vec<NodeRef<'_>>, HtmlError> {
        let selector = Selector::parse(css).map_err(|e| HtmlError::Selector {
            selector: css.to_string(),
            reason: format!("{:?}", e),
        })?;

        Ok(self
            .html
            .select(&selector)
            .filter_map(|element| self.index.get(&element.id()))
            .map(|&id| self.tree.node(id))
            .collect())
    }
}
