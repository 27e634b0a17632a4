//! JSON output types for CLI responses.
//!
//! Every response carries a `status` and a `schema_version` so consumers can
//! detect incompatible changes. Errors use [`ErrorResponse`] with the numeric
//! code from [`OutputErrorCode`].

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{DoctagError, OutputErrorCode};
use crate::highlight::{Highlight, StyleTag};
use crate::text::byte_offset_to_position_str;

/// Current schema version for JSON output.
pub const SCHEMA_VERSION: &str = "1";

// ============================================================================
// Highlights
// ============================================================================

/// One highlighted range in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightInfo {
    /// Start byte offset in the document (inclusive).
    pub start: usize,
    /// End byte offset in the document (exclusive).
    pub end: usize,
    /// Style classification.
    pub style: StyleTag,
    /// 1-indexed line, when the source text is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// 1-indexed column, when the source text is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
    /// The highlighted text, when the source text is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HighlightInfo {
    /// Create from a highlight, without location details.
    pub fn new(highlight: &Highlight) -> Self {
        HighlightInfo {
            start: highlight.range.start,
            end: highlight.range.end,
            style: highlight.style,
            line: None,
            col: None,
            text: None,
        }
    }

    /// Fill in line, column and text from `source`.
    ///
    /// `base_offset` is the document offset at which `source` begins; the
    /// highlight's range is translated back by it before lookup.
    pub fn with_source(mut self, source: &str, base_offset: usize) -> Self {
        let start = self.start.saturating_sub(base_offset);
        let end = self.end.saturating_sub(base_offset);
        let (line, col) = byte_offset_to_position_str(source, start);
        self.line = Some(line);
        self.col = Some(col);
        self.text = source.get(start..end).map(str::to_string);
        self
    }
}

/// Response for `scan` and `annotate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Docstring format used.
    pub format: String,
    /// Where the format setting came from (default, env, cli).
    pub format_source: String,
    /// Highlighted ranges, in the order they were found.
    pub highlights: Vec<HighlightInfo>,
}

impl HighlightResponse {
    /// Create a successful response.
    pub fn new(
        format: impl Into<String>,
        format_source: impl Into<String>,
        highlights: Vec<HighlightInfo>,
    ) -> Self {
        HighlightResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            format: format.into(),
            format_source: format_source.into(),
            highlights,
        }
    }
}

/// Response for `quote`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Status: "ok".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// The quoted, escaped literal.
    pub literal: String,
}

impl QuoteResponse {
    /// Create a successful response.
    pub fn new(literal: impl Into<String>) -> Self {
        QuoteResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            literal: literal.into(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error information for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
    /// Error-specific structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorInfo {
    /// Create from a DoctagError.
    pub fn from_error(err: &DoctagError) -> Self {
        let details = match err {
            DoctagError::InvalidArguments { details, .. } => details.clone(),
            DoctagError::FileNotFound { path } => Some(serde_json::json!({ "path": path })),
            DoctagError::InternalError { .. } => None,
        };
        ErrorInfo {
            code: OutputErrorCode::from(err).code(),
            message: err.to_string(),
            details,
        }
    }
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    /// Schema version for compatibility.
    pub schema_version: String,
    /// Error information.
    pub error: ErrorInfo,
}

impl ErrorResponse {
    /// Create an error response from a DoctagError.
    pub fn from_error(err: &DoctagError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo::from_error(err),
        }
    }
}

// ============================================================================
// Emission
// ============================================================================

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}
