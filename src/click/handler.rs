use tracing::{debug, warn};

use crate::click::config::{ProbeConfig, ProbeMode};
use crate::click::event::ClickEvent;
use crate::click::report::ClickRecord;
use crate::click::sink::{HIGHLIGHT_BORDER, HIGHLIGHT_DURATION, Highlighter, ReportSink};
use crate::dom::node::{DomNode, LabelSource};
use crate::error::ClickError;
use crate::xpath::resolver::resolve;

/// Turns clicks into report lines.
///
/// Each call to `handle` is independent: a click whose path cannot be
/// resolved returns an error and leaves the handler ready for the next one.
pub struct ClickHandler<S, H> {
    config: ProbeConfig,
    sink: S,
    highlighter: H,
}

impl<S: ReportSink, H> ClickHandler<S, H> {
    pub fn new(config: ProbeConfig, sink: S, highlighter: H) -> Self {
        Self {
            config,
            sink,
            highlighter,
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn handle<N>(&mut self, event: &mut ClickEvent<N>) -> Result<ClickRecord, ClickError>
    where
        N: DomNode + LabelSource,
        H: Highlighter<N>,
    {
        // Suppression does not depend on the path, so a failed resolution
        // still keeps the page from navigating away.
        if self.config.prevent_navigation {
            event.prevent_default();
            event.stop_propagation();
        }

        let target = event.target();
        let xpath = resolve(target).inspect_err(|e| {
            warn!(tag = target.tag_name(), error = %e, "could not resolve clicked element");
        })?;

        let record = ClickRecord::from_target(target, xpath);
        debug!(xpath = %record.xpath, tag = %record.tag, "click resolved");

        self.highlighter
            .flash(target, HIGHLIGHT_BORDER, HIGHLIGHT_DURATION);

        match self.config.mode {
            ProbeMode::Log => self.sink.log(&record.marked_line())?,
            ProbeMode::Interactive => self.sink.dialog(&record.line())?,
        }

        Ok(record)
    }
}
