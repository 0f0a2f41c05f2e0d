use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

/// Append-only line file shared by the session log and the click trace.
///
/// Opening creates missing parent directories. When the file cannot be
/// opened the writer is disabled and every write is dropped; write errors
/// are warnings.
#[derive(Debug)]
pub struct LineWriter {
    path: PathBuf,
    file: Option<Mutex<File>>,
}

impl LineWriter {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = std::fs::create_dir_all(dir) {
                warn!(dir = %dir.display(), error = %e, "could not create log directory");
            }
        }

        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(f) => Self {
                path,
                file: Some(Mutex::new(f)),
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not open log file");
                Self { path, file: None }
            }
        }
    }

    pub fn disabled() -> Self {
        Self {
            path: PathBuf::new(),
            file: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Append `line` and a newline. Returns whether it was written.
    pub fn write_line(&self, line: &str) -> bool {
        let Some(file) = &self.file else {
            return false;
        };

        let mut file = match file.lock() {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "log file lock poisoned");
                return false;
            }
        };

        match writeln!(file, "{}", line) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to write log file");
                false
            }
        }
    }
}
