//! Iteration over every tag occurrence in a buffer.

use tracing::trace;

use crate::error::ScanError;
use crate::range::TextRange;
use crate::scanner::{check_offset, find_next_tag, TagSet};

/// Lazily yields all non-overlapping tag occurrences in a buffer, left to
/// right.
///
/// Each step resumes scanning at the end of the previous match. The iterator
/// is fused: once a scan comes up empty it keeps returning `None`. Creating a
/// new iterator over the same inputs reproduces the same sequence.
#[derive(Debug, Clone)]
pub struct TagIter<'a> {
    text: &'a str,
    tags: &'a TagSet,
    pos: usize,
    done: bool,
}

impl<'a> TagIter<'a> {
    /// Start iterating at `from_offset`.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidRange`] if `from_offset` is not a valid position in
    /// `text`.
    pub fn new(text: &'a str, from_offset: usize, tags: &'a TagSet) -> Result<Self, ScanError> {
        check_offset(text, from_offset)?;
        Ok(TagIter {
            text,
            tags,
            pos: from_offset,
            done: false,
        })
    }

    /// Iterate over the whole buffer.
    pub fn over(text: &'a str, tags: &'a TagSet) -> Self {
        TagIter {
            text,
            tags,
            pos: 0,
            done: false,
        }
    }

    /// The offset the next scan starts from.
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Iterator for TagIter<'_> {
    type Item = TextRange;

    fn next(&mut self) -> Option<TextRange> {
        if self.done {
            return None;
        }
        match find_next_tag(self.text, self.pos, self.tags) {
            Ok(Some(range)) => {
                trace!(start = range.start, end = range.end, "tag match");
                self.pos = range.end;
                Some(range)
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                // Unreachable: `pos` is either a validated start or the end of
                // a match, and both are character boundaries within `text`.
                debug_assert!(self.text.is_char_boundary(self.pos), "{err}");
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for TagIter<'_> {}

/// Collect every tag occurrence in `text` starting from `from_offset`.
pub fn find_all_tags(
    text: &str,
    from_offset: usize,
    tags: &TagSet,
) -> Result<Vec<TextRange>, ScanError> {
    Ok(TagIter::new(text, from_offset, tags)?.collect())
}
