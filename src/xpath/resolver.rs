use crate::dom::node::DomNode;
use crate::error::ResolveError;
use crate::xpath::locator::{Anchor, LocatorPath, ParsedLocator, Step};

/// Longest ancestor chain the resolver will follow.
pub const MAX_DEPTH: usize = 4096;

/// Compute the locator of `node`.
///
/// Walks from the node towards the root. The walk stops at the first node
/// carrying a non-empty `id` (anchored as `id("...")`) or at the designated
/// document root (anchored as its bare tag). Every node passed on the way
/// contributes a `TAG[n]` segment, `n` being its one-based position among
/// same-tag element siblings. Text and comment siblings never count.
pub fn resolve<N: DomNode>(node: &N) -> Result<LocatorPath, ResolveError> {
    let mut steps = Vec::new();
    let mut current = node.clone();

    let anchor = loop {
        if steps.len() >= MAX_DEPTH {
            return Err(ResolveError::DepthExceeded { limit: MAX_DEPTH });
        }

        let id = current.identifier();
        if !id.is_empty() {
            break Anchor::Id(id.to_string());
        }
        if current.is_document_root() {
            break Anchor::Root(current.tag_name().to_string());
        }

        let parent = current.parent().ok_or_else(|| ResolveError::DetachedNode {
            tag: current.tag_name().to_string(),
        })?;
        steps.push(Step {
            tag: current.tag_name().to_string(),
            position: sibling_position(&parent, &current)?,
        });
        current = parent;
    };

    steps.reverse();
    Ok(ParsedLocator { anchor, steps }.to_path())
}

fn sibling_position<N: DomNode>(parent: &N, node: &N) -> Result<usize, ResolveError> {
    let mut ix = 0;
    for sibling in parent.children() {
        if sibling == *node {
            return Ok(ix + 1);
        }
        if sibling.is_element() && sibling.tag_name() == node.tag_name() {
            ix += 1;
        }
    }
    Err(ResolveError::NotAChildOfParent {
        tag: node.tag_name().to_string(),
        parent: parent.tag_name().to_string(),
    })
}
