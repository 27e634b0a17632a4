//! Highlight records and the sink that receives them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::TextRange;

/// Style classification attached to a highlighted range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTag {
    /// A whole docstring literal.
    DocComment,
    /// A single documentation tag inside a docstring.
    DocCommentTag,
}

impl StyleTag {
    /// Snake-case name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            StyleTag::DocComment => "doc_comment",
            StyleTag::DocCommentTag => "doc_comment_tag",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A range paired with the style to render it in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Highlight {
    pub range: TextRange,
    pub style: StyleTag,
}

/// Receiver of highlight instructions.
///
/// Implementors record each range for later rendering; the order of calls is
/// the order in which ranges were found.
pub trait HighlightSink {
    fn highlight(&mut self, range: TextRange, style: StyleTag);
}

impl HighlightSink for Vec<Highlight> {
    fn highlight(&mut self, range: TextRange, style: StyleTag) {
        self.push(Highlight { range, style });
    }
}

impl<S: HighlightSink + ?Sized> HighlightSink for &mut S {
    fn highlight(&mut self, range: TextRange, style: StyleTag) {
        (**self).highlight(range, style);
    }
}
