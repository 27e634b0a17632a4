//! Core infrastructure for doctag.
//!
//! This crate provides language-agnostic infrastructure:
//! - Byte ranges and line:column conversion
//! - Tag sets and the tag scanner
//! - Lazy iteration over every tag occurrence in a buffer
//! - Docstring formats and their tag tables
//! - Highlight records and the sink trait that receives them
//! - String literal building through an injected expression factory
//! - Error types, configuration resolution and JSON output types

pub mod config;
pub mod error;
pub mod format;
pub mod highlight;
pub mod iter;
pub mod literal;
pub mod output;
pub mod range;
pub mod scanner;
pub mod text;

pub use error::ScanError;
pub use format::DocStringFormat;
pub use highlight::{Highlight, HighlightSink, StyleTag};
pub use iter::{find_all_tags, TagIter};
pub use range::TextRange;
pub use scanner::{find_next_tag, Boundary, TagSet};
