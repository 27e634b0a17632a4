//! doctag: documentation tag scanning for Python docstrings.
//!
//! Finds Sphinx/reST and Epydoc field tags inside docstrings and reports
//! their byte ranges with a style classification.

// Core infrastructure - re-exported from doctag-core
pub use doctag_core::config;
pub use doctag_core::error;
pub use doctag_core::format;
pub use doctag_core::highlight;
pub use doctag_core::iter;
pub use doctag_core::literal;
pub use doctag_core::output;
pub use doctag_core::range;
pub use doctag_core::scanner;
pub use doctag_core::text;

// Language support
pub use doctag_python as python;

// Front door
pub mod cli;
