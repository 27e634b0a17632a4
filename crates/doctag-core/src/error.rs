//! Error types and error code constants for doctag.
//!
//! Scanning and range arithmetic fail with [`ScanError`]: a start offset
//! outside the buffer, inverted bounds, or a shift that overflows. Everything the CLI can run into is
//! bridged into the unified [`DoctagError`], which carries a stable numeric
//! [`OutputErrorCode`] for JSON output and process exit codes:
//!
//! - `2`: Invalid arguments (bad offset, unknown format, malformed outline)
//! - `3`: File not found
//! - `10`: Internal errors (I/O failures, unexpected state)

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::ConfigError;

// ============================================================================
// Scan Errors
// ============================================================================

/// Errors produced while scanning a buffer for tags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The scan start offset is past the end of the buffer, or splits a
    /// multi-byte character.
    #[error("invalid range: offset {offset} is not a valid position in a buffer of {len} bytes")]
    InvalidRange { offset: usize, len: usize },

    /// A range was constructed with `start > end`.
    #[error("invalid range: start {start} is after end {end}")]
    InvertedRange { start: usize, end: usize },

    /// Shifting a range moved it past the largest representable offset.
    #[error("invalid range: offset {offset} shifted by {delta} overflows")]
    OffsetOverflow { offset: usize, delta: usize },
}

// ============================================================================
// Output Error Codes
// ============================================================================

/// Error codes for JSON output.
///
/// These codes map to CLI exit codes and appear in JSON error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller (bad input, malformed request).
    InvalidArguments = 2,
    /// Input file does not exist.
    FileNotFound = 3,
    /// Internal errors (I/O failures, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for CLI output.
#[derive(Debug, Error)]
pub enum DoctagError {
    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments {
        message: String,
        details: Option<serde_json::Value>,
    },

    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl DoctagError {
    /// Create an invalid arguments error without details.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        DoctagError::InvalidArguments {
            message: message.into(),
            details: None,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DoctagError::InternalError {
            message: message.into(),
        }
    }

    /// Build an error for a failed read of `path`.
    pub fn from_io(path: impl Into<String>, err: io::Error) -> Self {
        let path = path.into();
        if err.kind() == io::ErrorKind::NotFound {
            DoctagError::FileNotFound { path }
        } else {
            DoctagError::internal(format!("failed to read {}: {}", path, err))
        }
    }
}

impl From<&DoctagError> for OutputErrorCode {
    fn from(err: &DoctagError) -> Self {
        match err {
            DoctagError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            DoctagError::FileNotFound { .. } => OutputErrorCode::FileNotFound,
            DoctagError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl From<DoctagError> for OutputErrorCode {
    fn from(err: DoctagError) -> Self {
        OutputErrorCode::from(&err)
    }
}

// ============================================================================
// Bridges
// ============================================================================

impl From<ScanError> for DoctagError {
    fn from(err: ScanError) -> Self {
        let details = match &err {
            ScanError::InvalidRange { offset, len } => {
                serde_json::json!({ "offset": offset, "len": len })
            }
            ScanError::InvertedRange { start, end } => {
                serde_json::json!({ "start": start, "end": end })
            }
            ScanError::OffsetOverflow { offset, delta } => {
                serde_json::json!({ "offset": offset, "delta": delta })
            }
        };
        DoctagError::InvalidArguments {
            message: err.to_string(),
            details: Some(details),
        }
    }
}

impl From<ConfigError> for DoctagError {
    fn from(err: ConfigError) -> Self {
        DoctagError::invalid_args(err.to_string())
    }
}

impl From<serde_json::Error> for DoctagError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            DoctagError::internal(format!("JSON error: {}", err))
        } else {
            DoctagError::invalid_args(format!("malformed JSON input: {}", err))
        }
    }
}
