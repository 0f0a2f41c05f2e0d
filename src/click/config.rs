use serde::{Deserialize, Serialize};

/// Where report lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// Marked lines on the machine-readable log stream.
    Log,
    /// A blocking dialog per click.
    #[default]
    #[serde(alias = "popup")]
    #[value(alias = "popup")]
    Interactive,
}

impl ProbeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ProbeMode::Log => "log",
            ProbeMode::Interactive => "interactive",
        }
    }
}

/// Toggles handed to the click handler when it is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeConfig {
    #[serde(default)]
    pub mode: ProbeMode,

    /// Cancel the click's default action (link navigation, form submit) and
    /// stop it from reaching the page's own handlers.
    #[serde(default = "default_true")]
    pub prevent_navigation: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            mode: ProbeMode::Interactive,
            prevent_navigation: true,
        }
    }
}

fn default_true() -> bool { true }
