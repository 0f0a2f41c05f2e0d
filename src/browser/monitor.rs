use std::io::Write;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::browser::capture::CapturedClick;
use crate::browser::session::ProbePage;
use crate::click::config::{ProbeConfig, ProbeMode};
use crate::click::event::ClickEvent;
use crate::click::handler::ClickHandler;
use crate::click::report::{ClickRecord, LOG_MARKER};
use crate::click::sink::{NoHighlight, ReportSink};
use crate::error::{ClickError, SessionError, SinkError};
use crate::log::selector_log::SelectorLog;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::ClickTraceEvent;

#[derive(Debug, Clone)]
pub struct MonitorSettings {
    pub initial_url: String,
    pub poll_interval: Duration,
    /// Stop after this many polls; `None` runs until the browser closes.
    pub max_polls: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub polls: u64,
    pub pages_seen: usize,
    pub clicks_reported: usize,
    pub clicks_failed: usize,
}

/// Sink for a live session: marked lines go to `out` and the session log,
/// dialogs are shown in the page.
struct SessionSink<'a, P, W> {
    page: &'a mut P,
    log: &'a SelectorLog,
    out: &'a mut W,
}

impl<P: ProbePage, W: Write> ReportSink for SessionSink<'_, P, W> {
    fn log(&mut self, marked_line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", marked_line)?;
        self.out.flush()?;
        self.log
            .record_click(marked_line.strip_prefix(LOG_MARKER).unwrap_or(marked_line));
        Ok(())
    }

    fn dialog(&mut self, line: &str) -> Result<(), SinkError> {
        self.page.show_dialog(line)?;
        Ok(())
    }
}

/// Watches a live page: keeps the click listener installed across
/// navigations and reports every captured click.
pub struct Monitor<'a, P, W> {
    page: &'a mut P,
    config: ProbeConfig,
    settings: MonitorSettings,
    log: &'a SelectorLog,
    trace: &'a TraceLogger,
    out: W,
}

impl<'a, P: ProbePage, W: Write> Monitor<'a, P, W> {
    pub fn new(
        page: &'a mut P,
        config: ProbeConfig,
        settings: MonitorSettings,
        log: &'a SelectorLog,
        trace: &'a TraceLogger,
        out: W,
    ) -> Self {
        Self {
            page,
            config,
            settings,
            log,
            trace,
            out,
        }
    }

    /// Run until the browser goes away or `max_polls` is reached.
    ///
    /// Only the initial navigation is fatal. Later session errors end the
    /// loop, and per-click failures are logged and skipped.
    pub fn run(&mut self) -> Result<MonitorSummary, SessionError> {
        let mut summary = MonitorSummary::default();

        self.page.navigate(&self.settings.initial_url)?;
        if self.config.mode == ProbeMode::Log {
            self.log.session_start(&self.settings.initial_url);
        }
        info!(
            url = %self.settings.initial_url,
            mode = self.config.mode.as_str(),
            prevent_navigation = self.config.prevent_navigation,
            "watching page"
        );

        let mut current_page: Option<String> = None;

        loop {
            if self.settings.max_polls.is_some_and(|max| summary.polls >= max) {
                break;
            }
            summary.polls += 1;

            let url = match self.page.current_url() {
                Ok(url) => url,
                Err(e) => {
                    info!(error = %e, "browser no longer reachable, stopping");
                    break;
                }
            };

            // Clicks are buffered outside the page, so ones made just before
            // a navigation are reported under the page they happened on.
            self.report_pending(&mut summary);

            if current_page.as_deref() != Some(url.as_str()) {
                if self.config.mode == ProbeMode::Log && current_page.is_some() {
                    self.log.page_transition(&url);
                }
                info!(url = %url, "page changed");
                summary.pages_seen += 1;
                current_page = Some(url.clone());
            }

            // A reload keeps the URL but drops the listener; the script is a
            // no-op on a document that already has it.
            match self.page.inject(&self.config) {
                Ok(true) => {}
                Ok(false) => debug!(url = %url, "page has no body yet, retrying"),
                Err(e) => warn!(error = %e, "failed to install click listener"),
            }

            if !self.settings.poll_interval.is_zero() {
                std::thread::sleep(self.settings.poll_interval);
            }
        }

        Ok(summary)
    }

    /// `run`, then close the page. A close failure is logged and never
    /// replaces the outcome of the run.
    pub fn run_and_close(&mut self) -> Result<MonitorSummary, SessionError> {
        let result = self.run();
        if let Err(e) = self.page.close() {
            warn!(error = %e, "failed to close browser session");
        }
        result
    }

    fn report_pending(&mut self, summary: &mut MonitorSummary) {
        let clicks = match self.page.drain_clicks() {
            Ok(clicks) => clicks,
            Err(e) => {
                warn!(error = %e, "failed to collect clicks");
                return;
            }
        };
        for click in clicks {
            match self.process_click(&click) {
                Ok(_) => summary.clicks_reported += 1,
                Err(e) => {
                    warn!(error = %e, "click skipped");
                    summary.clicks_failed += 1;
                }
            }
        }
    }

    /// Resolve and report one captured click.
    ///
    /// The page script has already flashed the element and suppressed
    /// navigation, so only the path and the report happen here.
    pub fn process_click(&mut self, click: &CapturedClick) -> Result<ClickRecord, ClickError> {
        let result = self.report_click(click);

        let event = ClickTraceEvent::now(&click.url);
        match &result {
            Ok(record) => self.trace.log(&event.with_record(record)),
            Err(e) => self.trace.log(&event.with_error(e)),
        }

        result
    }

    fn report_click(&mut self, click: &CapturedClick) -> Result<ClickRecord, ClickError> {
        let (tree, target) = click.to_tree()?;
        let mut event = ClickEvent::new(tree.node(target));

        let sink = SessionSink {
            page: &mut *self.page,
            log: self.log,
            out: &mut self.out,
        };
        let mut handler = ClickHandler::new(self.config, sink, NoHighlight);
        handler.handle(&mut event)
    }
}
