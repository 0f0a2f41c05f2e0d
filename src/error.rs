use thiserror::Error;

/// The ancestor walk hit a tree that does not hang together.
///
/// Fatal for the click being resolved; the caller skips that click and
/// carries on with the next one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The sibling scan over the parent's children never met the node.
    #[error("<{tag}> is not among the children of its parent <{parent}>")]
    NotAChildOfParent { tag: String, parent: String },

    /// The walk ran out of parents before reaching the document root.
    #[error("<{tag}> has no parent and is not the document root (detached node)")]
    DetachedNode { tag: String },

    /// The ancestor chain is longer than any real document (cyclic host tree).
    #[error("ancestor walk exceeded {limit} steps")]
    DepthExceeded { limit: usize },
}

/// A locator string could not be parsed or followed back to a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocateError {
    #[error("malformed locator '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("no element with id \"{0}\"")]
    UnknownId(String),

    #[error("locator starts at <{expected}> but the document root is <{actual}>")]
    RootMismatch { expected: String, actual: String },

    #[error("step {step} ({segment}) matched nothing")]
    NoMatch { step: usize, segment: String },
}

#[derive(Debug, Error)]
pub enum HtmlError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("document has no <body> element")]
    MissingBody,

    #[error("invalid CSS selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },
}

/// A click snapshot from the page script could not be rebuilt into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("click snapshot has an empty ancestry chain")]
    EmptyChain,

    #[error("level {level} ({tag}): {reason}")]
    Inconsistent {
        level: usize,
        tag: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Node.js helper failed to spawn
    #[error("failed to spawn {script} (is Node.js installed?): {source}")]
    SubprocessSpawn {
        script: String,
        #[source]
        source: std::io::Error,
    },

    #[error("session I/O: {0}")]
    Io(String),

    #[error("JSON parse error ({context}): {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialize error ({context}): {source}")]
    JsonSerialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The helper answered `ok: false` or left out a required field.
    #[error("session command '{command}' failed: {error}")]
    Protocol { command: String, error: String },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write report line: {0}")]
    Write(#[from] std::io::Error),

    #[error("failed to show dialog: {0}")]
    Dialog(#[from] SessionError),
}

/// Everything that can go wrong while handling a single click.
#[derive(Debug, Error)]
pub enum ClickError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
