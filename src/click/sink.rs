use std::io::Write;
use std::time::Duration;

use tracing::debug;

use crate::error::SinkError;

// ============================================================================
// Report sink — consumer of report lines
// ============================================================================

/// Receives the line produced for each click.
pub trait ReportSink {
    /// Machine-readable stream; the line already carries the log marker.
    fn log(&mut self, marked_line: &str) -> Result<(), SinkError>;

    /// Blocking, user-facing dialog.
    fn dialog(&mut self, line: &str) -> Result<(), SinkError>;
}

/// Writes both kinds of delivery to a writer, one per line.
pub struct WriterSink<W: Write> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn log(&mut self, marked_line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", marked_line)?;
        self.out.flush()?;
        Ok(())
    }

    fn dialog(&mut self, line: &str) -> Result<(), SinkError> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Log(String),
    Dialog(String),
}

/// Keeps every delivery in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Vec<Delivery>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReportSink for MemorySink {
    fn log(&mut self, marked_line: &str) -> Result<(), SinkError> {
        self.delivered.push(Delivery::Log(marked_line.to_string()));
        Ok(())
    }

    fn dialog(&mut self, line: &str) -> Result<(), SinkError> {
        self.delivered.push(Delivery::Dialog(line.to_string()));
        Ok(())
    }
}

// ============================================================================
// Highlighter — visual feedback on the clicked element
// ============================================================================

/// Border drawn around the clicked element.
pub const HIGHLIGHT_BORDER: &str = "3px solid red";

/// How long the border stays before the original one is restored.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(500);

pub trait Highlighter<N> {
    fn flash(&mut self, target: &N, border: &str, duration: Duration);
}

impl<N, T: Highlighter<N> + ?Sized> Highlighter<N> for &mut T {
    fn flash(&mut self, target: &N, border: &str, duration: Duration) {
        (**self).flash(target, border, duration);
    }
}

/// For hosts that flash on their own (the injected page script does).
pub struct NoHighlight;

impl<N> Highlighter<N> for NoHighlight {
    fn flash(&mut self, _target: &N, _border: &str, _duration: Duration) {}
}

/// Reports the flash through tracing; used where there is no screen.
pub struct TraceHighlight;

impl<N: std::fmt::Debug> Highlighter<N> for TraceHighlight {
    fn flash(&mut self, target: &N, border: &str, duration: Duration) {
        debug!(?target, border, ms = duration.as_millis() as u64, "highlight");
    }
}
