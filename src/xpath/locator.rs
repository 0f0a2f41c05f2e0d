use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LocateError;

/// Where a locator starts: an element id or the document root's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Id(String),
    Root(String),
}

/// One `TAG[n]` segment; `position` is one-based among same-tag element
/// siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub tag: String,
    pub position: usize,
}

/// Structured form of a `LocatorPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocator {
    pub anchor: Anchor,
    pub steps: Vec<Step>,
}

impl ParsedLocator {
    pub fn to_path(&self) -> LocatorPath {
        let mut out = match &self.anchor {
            Anchor::Id(id) => format!("id(\"{}\")", id),
            Anchor::Root(tag) => tag.clone(),
        };
        for step in &self.steps {
            out.push_str(&format!("/{}[{}]", step.tag, step.position));
        }
        LocatorPath(out)
    }
}

/// An XPath-like locator such as `BODY/DIV[2]/A[1]` or `id("nav")/LI[3]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocatorPath(String);

impl LocatorPath {
    /// Wrap a locator string without validating it.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn parse(&self) -> Result<ParsedLocator, LocateError> {
        let malformed = |reason: &str| LocateError::Malformed {
            path: self.0.clone(),
            reason: reason.to_string(),
        };

        let (anchor, rest) = match self.0.strip_prefix("id(\"") {
            Some(after) => {
                // Ids are emitted unescaped, so the anchor ends at the first
                // `")` that is followed by a segment or the end of the string.
                let end = after
                    .match_indices("\")")
                    .map(|(i, _)| i)
                    .find(|&i| {
                        let tail = &after[i + 2..];
                        tail.is_empty() || tail.starts_with('/')
                    })
                    .ok_or_else(|| malformed("unterminated id(\"...\")"))?;
                let id = &after[..end];
                if id.is_empty() {
                    return Err(malformed("empty id"));
                }
                (Anchor::Id(id.to_string()), &after[end + 2..])
            }
            None => {
                let end = self.0.find('/').unwrap_or(self.0.len());
                let tag = &self.0[..end];
                if tag.is_empty() {
                    return Err(malformed("missing root tag"));
                }
                (Anchor::Root(tag.to_string()), &self.0[end..])
            }
        };

        let mut steps = Vec::new();
        if !rest.is_empty() {
            let rest = rest
                .strip_prefix('/')
                .ok_or_else(|| malformed("expected '/' after anchor"))?;
            for segment in rest.split('/') {
                steps.push(parse_step(segment).ok_or_else(|| {
                    malformed(&format!("bad segment '{}'", segment))
                })?);
            }
        }

        Ok(ParsedLocator { anchor, steps })
    }
}

fn parse_step(segment: &str) -> Option<Step> {
    let open = segment.rfind('[')?;
    let inner = segment[open + 1..].strip_suffix(']')?;
    let position: usize = inner.parse().ok()?;
    let tag = &segment[..open];
    if tag.is_empty() || position == 0 {
        return None;
    }
    Some(Step {
        tag: tag.to_string(),
        position,
    })
}

impl fmt::Display for LocatorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocatorPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
