//! Selector discovery by clicking: every click on a page is turned into an
//! XPath-like locator and a report line.
//!
//! The path computation lives in [`xpath::resolver`] and works on any host
//! tree implementing [`dom::node::DomNode`].

pub mod browser;
pub mod cli;
pub mod click;
pub mod dom;
pub mod error;
pub mod log;
pub mod trace;
pub mod xpath;

pub use click::config::{ProbeConfig, ProbeMode};
pub use xpath::locator::LocatorPath;
pub use xpath::resolver::resolve;
