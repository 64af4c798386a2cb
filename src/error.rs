//! Error types for file management, conversion and compression.
//!
//! Every fallible library operation returns [`OfficeError`]. Batch loops
//! collect these per file instead of aborting; only directory resolution and
//! dependency probes abort a whole operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, converting, compressing or deleting files.
#[derive(Debug, Error)]
pub enum OfficeError {
    /// Path does not exist.
    #[error("'{}' does not exist", .0.display())]
    NotFound(PathBuf),

    /// Path exists but is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Directory is not both readable and writable.
    #[error("insufficient permissions to access '{}'", .0.display())]
    PermissionDenied(PathBuf),

    /// An optional codec or library was not compiled in.
    #[error("{dependency} is not available")]
    DependencyUnavailable {
        dependency: &'static str,
        /// Remediation shown to the user
        hint: String,
    },

    /// The external application a conversion engine drives is missing on this host.
    #[error("{engine} is not available on this system")]
    EngineUnavailable {
        engine: String,
        /// Remediation shown to the user
        hint: String,
    },

    /// The conversion engine ran but did not produce the output.
    #[error("failed to convert '{}': {reason}", .path.display())]
    ConversionFailed { path: PathBuf, reason: String },

    /// The image could not be decoded or re-encoded.
    #[error("failed to compress '{}': {reason}", .path.display())]
    CompressionFailed { path: PathBuf, reason: String },

    /// Every suffix up to the configured bound is already taken.
    #[error("no free name for '{}' within {limit} suffixes", .path.display())]
    SuffixLimitReached { path: PathBuf, limit: u32 },

    /// Menu, prompt or flag input failed validation.
    #[error("{0}")]
    InvalidInput(String),

    /// Ctrl+C arrived while work was in flight; the run stops at the next file boundary.
    #[error("interrupted by user")]
    Interrupted,

    /// Underlying filesystem failure.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl OfficeError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        OfficeError::Io {
            path: path.into(),
            source,
        }
    }

    /// Remediation hint for errors that carry one.
    pub fn hint(&self) -> Option<&str> {
        match self {
            OfficeError::DependencyUnavailable { hint, .. }
            | OfficeError::EngineUnavailable { hint, .. } => Some(hint),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, OfficeError>;
