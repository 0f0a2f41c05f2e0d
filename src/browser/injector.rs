use crate::click::config::ProbeConfig;

/// Body of the page-side click listener. Expects `PREVENT_NAVIGATION` in
/// scope and `return`s whether the listener is installed.
pub const CAPTURE_SCRIPT: &str = include_str!("../../assets/capture.js");

/// Helper-side binding the page script reports each click snapshot to.
pub const REPORT_BINDING: &str = "__selectorProbeReport";

/// Attribute marking the in-page report dialog; clicks inside it are ignored.
pub const DIALOG_ATTRIBUTE: &str = "data-selector-probe-dialog";

/// Function expression that renders a non-blocking report dialog.
const DIALOG_SCRIPT: &str = include_str!("../../assets/dialog.js");

/// Script that installs the click listener with the given toggles.
///
/// Wrapped in a function so that evaluating it again on the same document
/// does not redeclare anything. Evaluates to `false` while the page has no
/// body yet.
pub fn build_script(config: &ProbeConfig) -> String {
    format!(
        "(function () {{\nconst PREVENT_NAVIGATION = {};\n{}\n}})()",
        config.prevent_navigation, CAPTURE_SCRIPT
    )
}

/// Expression that shows `text` in an in-page dialog with an OK button.
///
/// The dialog is plain DOM, so unlike `window.alert` it never blocks later
/// evaluations while it stays open.
pub fn dialog_script(text: &str) -> String {
    let literal = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
    format!("({})({})", DIALOG_SCRIPT.trim_end(), literal)
}
