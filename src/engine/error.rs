//! Engine error type.
//!
//! Every fallible engine and modeling call returns [`EngineError`], which
//! carries a stable numeric code alongside the message. Programs are
//! expected to propagate errors to a single top-level handler that prints
//! the code and message and exits cleanly.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// An engine-reported failure.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A model-building argument was rejected (inconsistent bounds,
    /// duplicate name, out-of-range attribute value, foreign variable id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A parameter name was not recognized.
    #[error("unknown parameter: {0}")]
    UnknownParam(String),

    /// A queried value is not available in the current state, e.g. a
    /// solution query before a successful solve.
    #[error("data not available: {0}")]
    DataNotAvailable(String),

    /// An underlying file operation failed.
    #[error("cannot access {}: {source}", path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was readable but malformed for its expected format.
    #[error("malformed file {}: {detail}", path.display())]
    FileFormat { path: PathBuf, detail: String },

    /// The model shape is outside what the installed engine supports.
    #[error("model not supported by engine {engine}: {detail}")]
    Unsupported { engine: String, detail: String },

    /// A tuning result was requested at a rank that does not exist.
    #[error("no tuning result at rank {0}")]
    NoTuneResult(usize),
}

impl EngineError {
    /// Stable numeric code of this error kind.
    pub fn code(&self) -> i32 {
        match self {
            EngineError::InvalidArgument(_) => 10001,
            EngineError::UnknownParam(_) => 10002,
            EngineError::DataNotAvailable(_) => 10003,
            EngineError::FileIo { .. } => 10004,
            EngineError::FileFormat { .. } => 10005,
            EngineError::Unsupported { .. } => 10006,
            EngineError::NoTuneResult(_) => 10007,
        }
    }

    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::FileIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn file_format(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        EngineError::FileFormat {
            path: path.into(),
            detail: detail.into(),
        }
    }
}
