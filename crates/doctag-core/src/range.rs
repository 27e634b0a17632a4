//! Byte ranges into a text buffer.
//!
//! A [`TextRange`] is the unit of exchange between the scanner and whoever
//! consumes its results: it is both the location of a match inside a
//! docstring and, once shifted, the location of that match in the file.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// A half-open byte range `[start, end)`.
///
/// Deserialization goes through [`TextRange::try_new`], so inverted bounds
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct TextRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl TextRange {
    /// Create a new range.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "TextRange start ({}) must be <= end ({})",
            start,
            end
        );
        TextRange { start, end }
    }

    /// Create a new range, reporting inverted bounds as an error.
    pub fn try_new(start: usize, end: usize) -> Result<Self, ScanError> {
        if start > end {
            return Err(ScanError::InvertedRange { start, end });
        }
        Ok(TextRange { start, end })
    }

    /// Create a range covering `len` bytes from `start`.
    pub fn at(start: usize, len: usize) -> Self {
        TextRange {
            start,
            end: start + len,
        }
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if range is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this range overlaps with another.
    ///
    /// Adjacent ranges (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &TextRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if this range contains another range entirely.
    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Move the range `delta` bytes to the right.
    ///
    /// Used to translate a range relative to a string literal into a range
    /// relative to the enclosing document.
    ///
    /// # Errors
    ///
    /// [`ScanError::OffsetOverflow`] if the shifted end does not fit in a
    /// `usize`.
    pub fn shift_right(self, delta: usize) -> Result<Self, ScanError> {
        match (self.start.checked_add(delta), self.end.checked_add(delta)) {
            (Some(start), Some(end)) => Ok(TextRange { start, end }),
            _ => Err(ScanError::OffsetOverflow {
                offset: self.end,
                delta,
            }),
        }
    }

    /// The text covered by this range, if it lies on character boundaries
    /// within `text`.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Unchecked wire form of [`TextRange`].
#[derive(Deserialize)]
struct RawRange {
    start: usize,
    end: usize,
}

impl TryFrom<RawRange> for TextRange {
    type Error = ScanError;

    fn try_from(raw: RawRange) -> Result<Self, ScanError> {
        TextRange::try_new(raw.start, raw.end)
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

impl From<TextRange> for std::ops::Range<usize> {
    fn from(range: TextRange) -> Self {
        range.start..range.end
    }
}
