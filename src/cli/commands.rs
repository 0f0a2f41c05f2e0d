use std::path::Path;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::monitor::{Monitor, MonitorSettings, MonitorSummary};
use crate::browser::session::BrowserSession;
use crate::cli::config::{AppConfig, SourceArgs};
use crate::click::config::{ProbeConfig, ProbeMode};
use crate::click::event::ClickEvent;
use crate::click::handler::ClickHandler;
use crate::click::report::ClickRecord;
use crate::click::sink::{TraceHighlight, WriterSink};
use crate::dom::html::HtmlDocument;
use crate::error::HtmlError;
use crate::log::selector_log::SelectorLog;
use crate::trace::logger::TraceLogger;
use crate::xpath::locator::LocatorPath;
use crate::xpath::navigate::locate;
use crate::xpath::resolver::resolve;

// ============================================================================
// watch subcommand
// ============================================================================

pub fn cmd_watch(
    config: &AppConfig,
    url: Option<&str>,
    probe: ProbeConfig,
    max_polls: Option<u64>,
) -> Result<MonitorSummary, Box<dyn std::error::Error>> {
    let settings = MonitorSettings {
        initial_url: url.unwrap_or(config.session.url.as_str()).to_string(),
        poll_interval: Duration::from_millis(config.session.poll_interval_ms),
        max_polls,
    };

    // The transcript only records log-mode sessions
    let log = match probe.mode {
        ProbeMode::Log => SelectorLog::open(config.log.log_path()),
        ProbeMode::Interactive => SelectorLog::disabled(),
    };
    if log.is_enabled() {
        info!(path = %log.path().display(), "writing session log");
    }
    let trace = match &config.log.trace_file {
        Some(path) => TraceLogger::new(Path::new(path)),
        None => TraceLogger::disabled(),
    };

    let mut session = BrowserSession::launch(Path::new(&config.session.server_script))?;
    eprintln!("Close the browser or press Ctrl+C to stop.");

    let summary =
        Monitor::new(&mut session, probe, settings, &log, &trace, std::io::stdout()).run_and_close()?;

    eprintln!(
        "Session ended: {} pages, {} clicks reported, {} failed",
        summary.pages_seen, summary.clicks_reported, summary.clicks_failed
    );
    Ok(summary)
}

// ============================================================================
// probe subcommand
// ============================================================================

/// Click the `nth` match of `target` in a static page and print its line.
pub fn cmd_probe(
    source: &SourceArgs,
    target: &str,
    nth: usize,
    probe: ProbeConfig,
) -> Result<ClickRecord, Box<dyn std::error::Error>> {
    let document = load_document(source)?;
    let matches = document.select(target)?;
    let node = nth
        .checked_sub(1)
        .and_then(|i| matches.get(i))
        .ok_or_else(|| {
            format!(
                "selector '{}' has {} match(es), cannot click #{}",
                target,
                matches.len(),
                nth
            )
        })?;

    let mut event = ClickEvent::new(*node);
    let mut handler = ClickHandler::new(probe, WriterSink::stdout(), TraceHighlight);
    let record = handler.handle(&mut event)?;

    debug!(
        default_prevented = event.is_default_prevented(),
        propagation_stopped = event.is_propagation_stopped(),
        "click handled"
    );
    Ok(record)
}

// ============================================================================
// locate subcommand
// ============================================================================

/// Navigate `xpath` in a static page and print the element it names.
pub fn cmd_locate(
    source: &SourceArgs,
    xpath: &str,
) -> Result<ClickRecord, Box<dyn std::error::Error>> {
    let document = load_document(source)?;
    let path = LocatorPath::new(xpath);
    let node = locate(&document.body(), &path)?;

    // Re-resolving shows the canonical form, e.g. when an ancestor has an id
    let canonical = resolve(&node)?;
    if canonical != path {
        warn!(given = %path, canonical = %canonical, "locator is not in canonical form");
    }

    let record = ClickRecord::from_target(&node, canonical);
    println!("{}", record);
    Ok(record)
}

// ============================================================================
// Helpers
// ============================================================================

pub fn load_document(source: &SourceArgs) -> Result<HtmlDocument, HtmlError> {
    match (&source.html, &source.url) {
        (Some(path), _) => HtmlDocument::from_file(Path::new(path)),
        (None, Some(url)) => HtmlDocument::fetch(url),
        (None, None) => Err(HtmlError::Read {
            path: "<none>".into(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "either --html or --url is required",
            ),
        }),
    }
}
