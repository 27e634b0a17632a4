//! Python docstring annotation for doctag.
//!
//! Given an outline of a Python file, this crate finds the docstrings that
//! module, class and function bodies own, plus `__doc__` assignments and
//! attribute docstrings, and reports the documentation tags inside them:
//!
//! - [`model`]: the outline tree (statements, string literals, locations)
//! - [`docstring`]: rules for which string literal is a docstring
//! - [`node`]: the closed set of visitable nodes and the document walk
//! - [`annotator`]: the highlighter itself

pub mod annotator;
pub mod docstring;
pub mod model;
pub mod node;

pub use annotator::{annotate_file, DocStringAnnotator};
pub use node::{walk, DocNode};
