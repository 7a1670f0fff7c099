//! Error types for stowage-fetch.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Network step an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Probe,
    Transfer,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Probe => write!(f, "metadata probe"),
            Stage::Transfer => write!(f, "transfer"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] stowage_fs::Error),

    #[error(transparent)]
    Hash(#[from] stowage_verify::VerifyError),

    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("URL {url} has no file name to cache under")]
    MissingFileName { url: String },

    #[error("cannot obtain content info for non HTTP URL: ({url})")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("cannot obtain file info of {url}: {reason}")]
    Probe { url: String, reason: String },

    #[error("couldn't download {url}: {reason}")]
    Request { url: String, reason: String },

    #[error("couldn't download {url}: {status} {reason}")]
    Status {
        url:    String,
        status: u16,
        reason: String,
    },

    #[error("transfer of {url} failed: {reason}")]
    Transfer { url: String, reason: String },

    #[error("failed to write {path}: {source}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{stage} of {url} timed out after {after:?}")]
    Timeout {
        url:   String,
        stage: Stage,
        after: Duration,
    },

    #[error("HTTP client initialization failed: {0}")]
    Client(String),

    #[error("background task failed: {0}")]
    Task(String),
}

impl Error {
    /// Whether this error means the remote could not be consulted, as
    /// opposed to the request itself being invalid.
    pub fn is_probe_failure(&self) -> bool {
        matches!(
            self,
            Error::Probe { .. }
                | Error::Timeout {
                    stage: Stage::Probe,
                    ..
                }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Flatten an error and its sources into one line.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
