//! Docstring highlighting.
//!
//! The annotator visits [`DocNode`]s, finds the docstring each one owns, and
//! reports every documentation tag inside it to a [`HighlightSink`]. Tag
//! ranges are found relative to the literal and shifted by the literal's
//! start before they are reported, so the sink always sees file offsets.
//! A shift that would overflow is reported as a [`ScanError`] and stops the
//! annotation.

use tracing::debug;

use doctag_core::{DocStringFormat, HighlightSink, ScanError, StyleTag, TagIter, TagSet};

use crate::docstring::{find_docstring_expression, is_variable_docstring, DOC};
use crate::model::{File, StringLiteral};
use crate::node::{walk, DocNode};

/// Highlights docstrings in files, classes and functions, `__doc__`
/// assignments and attribute docstrings.
#[derive(Debug, Clone)]
pub struct DocStringAnnotator {
    format: DocStringFormat,
    tags: Option<TagSet>,
}

impl DocStringAnnotator {
    /// Create an annotator for docstrings written in `format`.
    pub fn new(format: DocStringFormat) -> Self {
        DocStringAnnotator {
            format,
            tags: format.tags(),
        }
    }

    /// Create an annotator for `file`, using the file's own format setting
    /// when it has one and `default` otherwise.
    pub fn for_file(file: &File, default: DocStringFormat) -> Self {
        DocStringAnnotator::new(file.format.unwrap_or(default))
    }

    /// The docstring format in effect.
    pub fn format(&self) -> DocStringFormat {
        self.format
    }

    /// Annotate a single node.
    pub fn annotate<S: HighlightSink + ?Sized>(
        &self,
        node: DocNode<'_>,
        sink: &mut S,
    ) -> Result<(), ScanError> {
        match node {
            DocNode::File(file) => {
                self.annotate_docstring(find_docstring_expression(&file.body), sink)
            }
            DocNode::Function(function) => {
                self.annotate_docstring(find_docstring_expression(&function.body), sink)
            }
            DocNode::Class(class) => {
                self.annotate_docstring(find_docstring_expression(&class.body), sink)
            }
            DocNode::Assignment(assign) => {
                if !assign.is_assignment_to(DOC) {
                    return Ok(());
                }
                match assign.value.as_string() {
                    Some(literal) => {
                        sink.highlight(literal.range, StyleTag::DocComment);
                        self.annotate_docstring(Some(literal), sink)
                    }
                    None => Ok(()),
                }
            }
            DocNode::ExpressionStatement {
                statement,
                scope,
                previous,
            } => {
                match statement.expression.as_string() {
                    Some(literal) if is_variable_docstring(scope, previous) => {
                        self.annotate_docstring(Some(literal), sink)
                    }
                    _ => Ok(()),
                }
            }
        }
    }

    /// Report every tag in `literal`, if there is a literal and the format
    /// has tags.
    ///
    /// # Errors
    ///
    /// [`ScanError::OffsetOverflow`] if a tag range cannot be shifted to the
    /// literal's position. Tags before the failing one have already been
    /// reported.
    pub fn annotate_docstring<S: HighlightSink + ?Sized>(
        &self,
        literal: Option<&StringLiteral>,
        sink: &mut S,
    ) -> Result<(), ScanError> {
        let (Some(literal), Some(tags)) = (literal, self.tags.as_ref()) else {
            return Ok(());
        };

        let base = literal.range.start;
        let mut count = 0usize;
        for range in TagIter::over(&literal.text, tags) {
            sink.highlight(range.shift_right(base)?, StyleTag::DocCommentTag);
            count += 1;
        }
        debug!(
            format = %self.format,
            literal = %literal.range,
            tags = count,
            "annotated docstring"
        );
        Ok(())
    }

    /// Annotate every node of `file`, stopping at the first error.
    pub fn annotate_file<S: HighlightSink + ?Sized>(
        &self,
        file: &File,
        sink: &mut S,
    ) -> Result<(), ScanError> {
        for node in walk(file) {
            self.annotate(node, sink)?;
        }
        Ok(())
    }
}

/// Annotate `file` with its own format, falling back to `default`.
pub fn annotate_file<S: HighlightSink + ?Sized>(
    file: &File,
    default: DocStringFormat,
    sink: &mut S,
) -> Result<(), ScanError> {
    DocStringAnnotator::for_file(file, default).annotate_file(file, sink)
}
