use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::click::config::{ProbeConfig, ProbeMode};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "selector-probe",
    version,
    about = "Click on page elements to discover their XPath locators"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: selector-probe.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a browser and report every element clicked in it
    Watch {
        /// Page to open first
        #[arg(long)]
        url: Option<String>,

        /// log: marked lines on stdout and in the session log; interactive: a dialog per click
        #[arg(long, value_enum)]
        mode: Option<ProbeMode>,

        /// Block link navigation and button actions while probing
        #[arg(long, action = clap::ArgAction::Set)]
        prevent_navigation: Option<bool>,

        /// Stop after this many polls (default: until the browser is closed)
        #[arg(long)]
        max_polls: Option<u64>,
    },

    /// Simulate a click on an element of a static page
    Probe {
        #[command(flatten)]
        source: SourceArgs,

        /// CSS selector of the element to click
        #[arg(long)]
        target: String,

        /// Which match to click when the selector matches several (1-based)
        #[arg(long, default_value_t = 1)]
        nth: usize,

        #[arg(long, value_enum)]
        mode: Option<ProbeMode>,

        #[arg(long, action = clap::ArgAction::Set)]
        prevent_navigation: Option<bool>,
    },

    /// Follow an XPath locator back to its element
    Locate {
        #[command(flatten)]
        source: SourceArgs,

        /// Locator as printed by watch/probe, e.g. BODY/DIV[2]/A[1]
        #[arg(long)]
        xpath: String,
    },
}

/// Where a static page comes from.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Local HTML file
    #[arg(long)]
    pub html: Option<String>,

    /// Page URL (fetched without running scripts)
    #[arg(long)]
    pub url: Option<String>,
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `selector-probe.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_url")]
    pub url: String,

    /// Node.js Playwright helper
    #[serde(default = "default_server_script")]
    pub server_script: String,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            server_script: default_server_script(),
            poll_interval_ms: default_poll_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,

    #[serde(default = "default_log_file")]
    pub file: String,

    /// JSONL trace of every handled click
    pub trace_file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            file: default_log_file(),
            trace_file: None,
        }
    }
}

impl LogConfig {
    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.file)
    }
}

// Serde default helpers
fn default_url() -> String { "about:blank".to_string() }
fn default_server_script() -> String { "node/probe_server.js".to_string() }
fn default_poll_interval() -> u64 { 1000 }
fn default_log_dir() -> String { "logs".to_string() }
fn default_log_file() -> String { "selector_log.txt".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("selector-probe.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, error = %e, "ignoring malformed config file");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// CLI flags win over the config file.
pub fn build_probe_config(
    config: &AppConfig,
    mode: Option<ProbeMode>,
    prevent_navigation: Option<bool>,
) -> ProbeConfig {
    ProbeConfig {
        mode: mode.unwrap_or(config.probe.mode),
        prevent_navigation: prevent_navigation.unwrap_or(config.probe.prevent_navigation),
    }
}
