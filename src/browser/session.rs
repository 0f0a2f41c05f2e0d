use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::browser::capture::CapturedClick;
use crate::browser::injector::{build_script, dialog_script};
use crate::click::config::ProbeConfig;
use crate::error::SessionError;

/// Request sent to the helper over stdin (one JSON line).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum BrowserRequest {
    Navigate { url: String },
    CurrentUrl,
    Evaluate { script: String },
    /// Take the click snapshots the helper buffered since the last drain.
    DrainClicks,
    Quit,
}

impl BrowserRequest {
    pub fn navigate(url: &str) -> Self {
        BrowserRequest::Navigate {
            url: url.to_string(),
        }
    }

    pub fn evaluate(script: impl Into<String>) -> Self {
        BrowserRequest::Evaluate {
            script: script.into(),
        }
    }

    /// Name used in error messages.
    pub fn command(&self) -> &'static str {
        match self {
            BrowserRequest::Navigate { .. } => "navigate",
            BrowserRequest::CurrentUrl => "current_url",
            BrowserRequest::Evaluate { .. } => "evaluate",
            BrowserRequest::DrainClicks => "drain_clicks",
            BrowserRequest::Quit => "quit",
        }
    }
}

/// Response received from the helper over stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct BrowserResponse {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
}

// ============================================================================
// ProbePage — what the watch loop needs from a live page
// ============================================================================

pub trait ProbePage {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError>;

    fn current_url(&mut self) -> Result<String, SessionError>;

    /// Install the click listener. `Ok(false)` means the page is not ready
    /// yet and the call should be repeated later.
    fn inject(&mut self, config: &ProbeConfig) -> Result<bool, SessionError>;

    /// Take every click captured since the last call, including clicks whose
    /// page has since navigated away.
    fn drain_clicks(&mut self) -> Result<Vec<CapturedClick>, SessionError>;

    fn show_dialog(&mut self, text: &str) -> Result<(), SessionError>;

    /// Release the page at the end of a watch.
    fn close(&mut self) -> Result<(), SessionError> {
        Ok(())
    }
}

// ============================================================================
// BrowserSession — Playwright helper process
// ============================================================================

/// A browser kept open by a long-lived Node.js helper.
///
/// Commands are sent as NDJSON over stdin, responses read from stdout.
pub struct BrowserSession {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    closed: bool,
}

impl BrowserSession {
    /// Spawn the helper script and wait for its ready signal.
    pub fn launch(script: &Path) -> Result<Self, SessionError> {
        let script_name = script.display().to_string();
        let mut child = Command::new("node")
            .arg(script)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| SessionError::SubprocessSpawn {
                script: script_name.clone(),
                source: e,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| SessionError::Io(format!("failed to capture stdin of {}", script_name)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SessionError::Io(format!("failed to capture stdout of {}", script_name)))?;

        let mut session = BrowserSession {
            child,
            stdin,
            reader: BufReader::new(stdout),
            closed: false,
        };

        let response = session.read_response("ready signal")?;
        if !response.ok || response.ready != Some(true) {
            return Err(SessionError::Protocol {
                command: "launch".into(),
                error: format!("did not receive ready signal from {}", script_name),
            });
        }

        info!(script = %script_name, "browser session ready");
        Ok(session)
    }

    fn read_response(&mut self, context: &str) -> Result<BrowserResponse, SessionError> {
        let mut line = String::new();
        self.reader
            .read_line(&mut line)
            .map_err(|e| SessionError::Io(format!("failed to read {}: {}", context, e)))?;

        if line.trim().is_empty() {
            return Err(SessionError::Io(
                "empty response from browser helper (process may have exited)".into(),
            ));
        }

        serde_json::from_str(line.trim()).map_err(|e| SessionError::JsonParse {
            context: context.to_string(),
            source: e,
        })
    }

    /// Send a request and read the response.
    fn send(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, SessionError> {
        let json = serde_json::to_string(request).map_err(|e| SessionError::JsonSerialize {
            context: "BrowserRequest".into(),
            source: e,
        })?;

        writeln!(self.stdin, "{}", json)
            .and_then(|_| self.stdin.flush())
            .map_err(|e| SessionError::Io(format!("failed to write to browser helper: {}", e)))?;

        self.read_response(request.command())
    }

    /// Send a request and verify it succeeded.
    fn send_ok(&mut self, request: &BrowserRequest) -> Result<BrowserResponse, SessionError> {
        let response = self.send(request)?;
        if !response.ok {
            return Err(SessionError::Protocol {
                command: request.command().into(),
                error: response.error.unwrap_or_else(|| "unknown error".into()),
            });
        }
        Ok(response)
    }

    /// Evaluate a script in the page and return its JSON result.
    pub fn evaluate(&mut self, script: &str) -> Result<Value, SessionError> {
        let response = self.send_ok(&BrowserRequest::evaluate(script))?;
        Ok(response.data.unwrap_or(Value::Null))
    }

    /// Close the browser and wait for the helper to exit.
    pub fn quit(&mut self) -> Result<(), SessionError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        // Best-effort: the helper may already be gone
        let _ = self.send(&BrowserRequest::Quit);
        let _ = self.child.wait();
        info!("browser session closed");
        Ok(())
    }
}

impl ProbePage for BrowserSession {
    fn navigate(&mut self, url: &str) -> Result<(), SessionError> {
        self.send_ok(&BrowserRequest::navigate(url))?;
        Ok(())
    }

    fn current_url(&mut self) -> Result<String, SessionError> {
        let response = self.send_ok(&BrowserRequest::CurrentUrl)?;
        response.url.ok_or_else(|| SessionError::Protocol {
            command: "current_url".into(),
            error: "no URL in current_url response".into(),
        })
    }

    fn inject(&mut self, config: &ProbeConfig) -> Result<bool, SessionError> {
        let result = self.evaluate(&build_script(config))?;
        Ok(result.as_bool().unwrap_or(false))
    }

    fn drain_clicks(&mut self) -> Result<Vec<CapturedClick>, SessionError> {
        let response = self.send_ok(&BrowserRequest::DrainClicks)?;
        Ok(parse_clicks(response.data.unwrap_or(Value::Null)))
    }

    fn show_dialog(&mut self, text: &str) -> Result<(), SessionError> {
        self.evaluate(&dialog_script(text))?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), SessionError> {
        self.quit()
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        let _ = self.quit();
    }
}

/// Decode a drained click queue; malformed entries are skipped with a
/// warning so one bad snapshot does not lose the others.
pub fn parse_clicks(data: Value) -> Vec<CapturedClick> {
    let Value::Array(items) = data else {
        if !data.is_null() {
            warn!("click queue is not an array");
        }
        return Vec::new();
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<CapturedClick>(item) {
            Ok(click) => Some(click),
            Err(e) => {
                warn!(error = %e, "skipping malformed click snapshot");
                None
            }
        })
        .inspect(|click| debug!(tag = %click.target.tag, "captured click"))
        .collect()
}
