use crate::dom::node::DomNode;
use crate::error::LocateError;
use crate::xpath::locator::{Anchor, LocatorPath};

/// Follow a locator from the document root back to the node it names.
///
/// `id("...")` anchors match the first element in document order (the root
/// included) whose identifier equals the id. Each `TAG[n]` step then picks
/// the n-th element child with that tag.
pub fn locate<N: DomNode>(root: &N, path: &LocatorPath) -> Result<N, LocateError> {
    let parsed = path.parse()?;

    let mut current = match &parsed.anchor {
        Anchor::Id(id) => find_by_id(root, id).ok_or_else(|| LocateError::UnknownId(id.clone()))?,
        Anchor::Root(tag) => {
            if root.tag_name() != tag {
                return Err(LocateError::RootMismatch {
                    expected: tag.clone(),
                    actual: root.tag_name().to_string(),
                });
            }
            root.clone()
        }
    };

    for (i, step) in parsed.steps.iter().enumerate() {
        current = current
            .children()
            .into_iter()
            .filter(|child| child.is_element() && child.tag_name() == step.tag)
            .nth(step.position - 1)
            .ok_or_else(|| LocateError::NoMatch {
                step: i + 1,
                segment: format!("{}[{}]", step.tag, step.position),
            })?;
    }

    Ok(current)
}

fn find_by_id<N: DomNode>(root: &N, id: &str) -> Option<N> {
    let mut stack = vec![root.clone()];
    while let Some(node) = stack.pop() {
        if node.is_element() && node.identifier() == id {
            return Some(node);
        }
        stack.extend(node.children().into_iter().rev());
    }
    None
}
