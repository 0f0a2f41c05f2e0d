use std::fmt;

use serde::Serialize;

use crate::click::label::element_label;
use crate::dom::node::{DomNode, LabelSource};
use crate::xpath::locator::LocatorPath;

/// Prefix that marks a report line in the machine-readable log stream.
pub const LOG_MARKER: &str = "TAG: ";

/// Everything the report line says about one clicked element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickRecord {
    pub tag: String,
    pub label: String,
    pub id: String,
    pub class_name: String,
    pub xpath: LocatorPath,
}

impl ClickRecord {
    pub fn from_target<N: DomNode + LabelSource>(target: &N, xpath: LocatorPath) -> Self {
        Self {
            tag: target.tag_name().to_string(),
            label: element_label(target),
            id: target.identifier().to_string(),
            class_name: target.class_name(),
            xpath,
        }
    }

    /// The line as shown in a dialog.
    pub fn line(&self) -> String {
        self.to_string()
    }

    /// The line as written to the log stream.
    pub fn marked_line(&self) -> String {
        format!("{}{}", LOG_MARKER, self)
    }
}

impl fmt::Display for ClickRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "クリック: {} [{}]｜ID:{}｜Class:{}｜XPath:{}",
            self.tag, self.label, self.id, self.class_name, self.xpath
        )
    }
}

/// Pull the report line out of a console message carrying the marker.
///
/// Console transports may wrap the payload in quotes, so one trailing `"` is
/// dropped. Returns `None` for unmarked messages.
pub fn extract_marked(message: &str) -> Option<String> {
    let marker = LOG_MARKER.trim_end();
    let (_, payload) = message.rsplit_once(marker)?;
    let payload = payload.trim();
    let payload = payload.strip_suffix('"').unwrap_or(payload);
    Some(payload.to_string())
}
