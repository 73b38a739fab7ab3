//! Error taxonomy for jsimports.
//!
//! Structural predicates (`is_module`, plugin detection) never error so bulk
//! directory scans stay total over the file set; only the deeper extraction
//! and resolution functions return these variants.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors are `Clone` so memoized per-file results can hold them.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// No `jsimports.json` between the target and the filesystem root. Fatal.
    #[error("could not find jsimports.json between {} and the filesystem root", start.display())]
    ConfigNotFound { start: PathBuf },

    /// Config file exists but is not parseable JSON or misses required keys. Fatal.
    #[error("invalid config {}: {reason}", path.display())]
    InvalidConfig { path: PathBuf, reason: String },

    /// A source file is not syntactically valid JavaScript. Recoverable: the
    /// file is treated as "not a module" in bulk operations.
    #[error("invalid js file {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// The file parses but does not match the `define([...], function(...) {})`
    /// shape once dependency extraction is attempted.
    #[error("{} is not a valid AMD module: {reason}", path.display())]
    InvalidModule { path: PathBuf, reason: String },

    /// A required configuration field was absent when resolving paths. Fatal
    /// to the operation, not to the whole run.
    #[error("config object misses parameters {0}")]
    MissingConfig(String),

    #[error("io error on {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl Error {
    pub fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            reason: err.to_string(),
        }
    }
}
