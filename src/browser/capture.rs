use serde::{Deserialize, Serialize};

use crate::dom::node::NodeKind;
use crate::dom::tree::{DomTree, NodeId};
use crate::error::CaptureError;

/// Properties of the clicked element itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedTarget {
    pub tag: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub alt: String,
}

/// One entry of a parent's `childNodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedSibling {
    pub node_type: u16,
    #[serde(default)]
    pub tag: String,
}

/// One element on the way from the target up to the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapturedLevel {
    pub tag: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_root: bool,
    /// The parent's child list; empty for the topmost level.
    #[serde(default)]
    pub siblings: Vec<CapturedSibling>,
    /// Index of this element inside `siblings`.
    #[serde(default)]
    pub position: Option<usize>,
}

/// A click as serialised by the page script: the target plus its ancestry,
/// target first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedClick {
    #[serde(default)]
    pub url: String,
    pub target: CapturedTarget,
    pub ancestry: Vec<CapturedLevel>,
}

impl CapturedClick {
    /// Rebuild the part of the page the resolver needs.
    ///
    /// Chain elements keep their tag and id. Their siblings become
    /// placeholders of the recorded kind and tag, which is all positional
    /// indexing looks at. The target also gets its value, alt, class and
    /// text so labels come out as on the page.
    pub fn to_tree(&self) -> Result<(DomTree, NodeId), CaptureError> {
        let (top_index, top) = self
            .ancestry
            .iter()
            .enumerate()
            .last()
            .ok_or(CaptureError::EmptyChain)?;

        if self.target.tag != self.ancestry[0].tag {
            return Err(CaptureError::Inconsistent {
                level: 0,
                tag: self.ancestry[0].tag.clone(),
                reason: format!("target is <{}>", self.target.tag),
            });
        }

        let mut tree = DomTree::new();
        let mut current = tree.create_element(&top.tag);
        apply_level(&mut tree, current, top);

        for (i, level) in self.ancestry[..top_index].iter().enumerate().rev() {
            let inconsistent = |reason: String| CaptureError::Inconsistent {
                level: i,
                tag: level.tag.clone(),
                reason,
            };

            let position = level
                .position
                .ok_or_else(|| inconsistent("missing position".into()))?;
            let own = level.siblings.get(position).ok_or_else(|| {
                inconsistent(format!(
                    "position {} outside {} siblings",
                    position,
                    level.siblings.len()
                ))
            })?;
            if NodeKind::from_node_type(own.node_type) != NodeKind::Element || own.tag != level.tag {
                return Err(inconsistent(format!(
                    "sibling at position {} is <{}> (nodeType {})",
                    position, own.tag, own.node_type
                )));
            }

            let parent = current;
            for (j, sibling) in level.siblings.iter().enumerate() {
                if j == position {
                    current = tree.append_element(parent, &level.tag);
                    apply_level(&mut tree, current, level);
                    continue;
                }
                match NodeKind::from_node_type(sibling.node_type) {
                    NodeKind::Element => tree.append_element(parent, &sibling.tag),
                    NodeKind::Text => tree.append_text(parent, ""),
                    NodeKind::Comment => tree.append_comment(parent, ""),
                    _ => tree.append_other(parent),
                };
            }
        }

        let target = current;
        for (name, value) in [
            ("class", &self.target.class_name),
            ("value", &self.target.value),
            ("alt", &self.target.alt),
        ] {
            if !value.is_empty() {
                tree.set_attribute(target, name, value);
            }
        }
        if !self.target.text.is_empty() {
            tree.append_text(target, &self.target.text);
        }

        Ok((tree, target))
    }
}

fn apply_level(tree: &mut DomTree, node: NodeId, level: &CapturedLevel) {
    if !level.id.is_empty() {
        tree.set_attribute(node, "id", &level.id);
    }
    if level.is_root {
        tree.set_document_root(node);
    }
}
