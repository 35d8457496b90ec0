use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by hint classification and kit installation.
#[derive(Debug, Error)]
pub enum KitError {
    #[error("malformed kit hint {hint:?}: {reason}")]
    MalformedHint { hint: String, reason: String },
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("kit source not found at {0}")]
    SourceMissing(PathBuf),
    #[error("kit target {path} is not writable: {source}")]
    TargetUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("kit copy left at {staging}; move it to {destination} to finish: {source}")]
    Stranded {
        staging: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid project file {path}: {reason}")]
    Project { path: PathBuf, reason: String },
    #[error("invalid kit catalog {path}: {reason}")]
    Catalog { path: PathBuf, reason: String },
}

impl KitError {
    pub fn malformed(hint: &str, reason: impl Into<String>) -> Self {
        Self::MalformedHint {
            hint: hint.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unwritable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::TargetUnwritable {
            path: path.into(),
            source,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type KitResult<T> = Result<T, KitError>;
