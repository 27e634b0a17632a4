//! Tag scanning.
//!
//! [`find_next_tag`] locates the earliest occurrence of any token from a
//! [`TagSet`] at or after a byte offset. Among tokens that start at the same
//! offset, the one listed first in the set wins, so `[":param", ":parameter"]`
//! and `[":parameter", ":param"]` scan differently under [`Boundary::Any`].
//!
//! Offsets are byte offsets into UTF-8 text. A start offset must lie on a
//! character boundary; every returned range does too, since tokens are
//! themselves valid UTF-8.

use std::borrow::Cow;

use crate::error::ScanError;
use crate::range::TextRange;

// ============================================================================
// Tag Sets
// ============================================================================

/// How the character following a token occurrence affects the match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Any occurrence of the token matches.
    #[default]
    Any,
    /// An occurrence followed by a letter or digit is skipped, so `:param`
    /// does not match the front of `:parameter` or `:params`.
    WordEnd,
}

impl Boundary {
    /// Find the first acceptable occurrence of `tag` in `text` at or after
    /// `from`.
    fn find(self, text: &str, from: usize, tag: &str) -> Option<usize> {
        let mut pos = from;
        loop {
            let start = pos + text[pos..].find(tag)?;
            let end = start + tag.len();
            match self {
                Boundary::Any => return Some(start),
                Boundary::WordEnd => {
                    let continues_word = text[end..]
                        .chars()
                        .next()
                        .is_some_and(char::is_alphanumeric);
                    if !continues_word {
                        return Some(start);
                    }
                    // Resume one character past this occurrence's start.
                    pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
    }
}

/// An ordered set of documentation tag tokens.
///
/// Order is significant: it breaks ties between tokens matching at the same
/// offset. Empty tokens are dropped on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<Cow<'static, str>>,
    boundary: Boundary,
}

impl TagSet {
    /// Create a tag set matching with [`Boundary::Any`].
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        TagSet {
            tags: tags
                .into_iter()
                .map(Into::into)
                .filter(|tag| !tag.is_empty())
                .collect(),
            boundary: Boundary::Any,
        }
    }

    /// Create a tag set from a static token table.
    pub fn from_static(tags: &'static [&'static str], boundary: Boundary) -> Self {
        TagSet::new(tags.iter().copied()).with_boundary(boundary)
    }

    /// Replace the boundary mode.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// The boundary mode used when matching.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Iterate over the tokens in tie-break order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(|tag| tag.as_ref())
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if the set has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

// ============================================================================
// Scanning
// ============================================================================

/// Verify that `offset` is a valid scan position in `text`.
pub(crate) fn check_offset(text: &str, offset: usize) -> Result<(), ScanError> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return Err(ScanError::InvalidRange {
            offset,
            len: text.len(),
        });
    }
    Ok(())
}

/// Find the next tag occurrence in `text` at or after `from_offset`.
///
/// Returns the range of the earliest occurrence of any token in `tags`, the
/// first-listed token winning ties, or `None` when nothing matches. An empty
/// tag set never matches.
///
/// # Errors
///
/// [`ScanError::InvalidRange`] if `from_offset` is past the end of `text` or
/// not on a character boundary.
pub fn find_next_tag(
    text: &str,
    from_offset: usize,
    tags: &TagSet,
) -> Result<Option<TextRange>, ScanError> {
    check_offset(text, from_offset)?;

    let mut best: Option<TextRange> = None;
    for tag in tags.iter() {
        let Some(start) = tags.boundary.find(text, from_offset, tag) else {
            continue;
        };
        match best {
            Some(found) if found.start <= start => {}
            _ => best = Some(TextRange::at(start, tag.len())),
        }
        if start == from_offset {
            // Nothing can start earlier, and later tokens lose the tie.
            break;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(tokens: &[&'static str]) -> TagSet {
        TagSet::new(tokens.iter().copied())
    }

    mod tag_set_tests {
        use super::*;

        #[test]
        fn empty_tokens_are_dropped() {
            let set = tags(&["", ":param", ""]);
            assert_eq!(set.len(), 1);
            assert_eq!(set.iter().collect::<Vec<_>>(), vec![":param"]);
        }

        #[test]
        fn owned_and_borrowed_tokens_mix() {
            let set = TagSet::new(vec![Cow::Borrowed("@param"), Cow::Owned("@custom".to_string())]);
            assert_eq!(set.iter().collect::<Vec<_>>(), vec!["@param", "@custom"]);
            assert_eq!(set.boundary(), Boundary::Any);
        }
    }

    mod find_next_tag_tests {
        use super::*;

        #[test]
        fn walks_mixed_tags_left_to_right() {
            let text = "see :param: x and @param: y";
            let set = tags(&[":param:", "@param:"]);

            let first = find_next_tag(text, 0, &set).unwrap().unwrap();
            assert_eq!(first, TextRange::new(4, 11));
            assert_eq!(first.slice(text), Some(":param:"));

            let second = find_next_tag(text, first.end, &set).unwrap().unwrap();
            assert_eq!(second, TextRange::new(18, 25));
            assert_eq!(second.slice(text), Some("@param:"));

            assert_eq!(find_next_tag(text, second.end, &set).unwrap(), None);
        }

        #[test]
        fn empty_tag_set_never_matches() {
            let set = TagSet::default();
            for offset in 0..=5 {
                assert_eq!(find_next_tag("@param", offset, &set).unwrap(), None);
            }
        }

        #[test]
        fn offset_past_end_is_invalid() {
            let text = "abc";
            let err = find_next_tag(text, 4, &tags(&["a"])).unwrap_err();
            assert_eq!(err, ScanError::InvalidRange { offset: 4, len: 3 });
        }

        #[test]
        fn offset_at_end_is_valid() {
            assert_eq!(find_next_tag("abc", 3, &tags(&["a"])).unwrap(), None);
        }

        #[test]
        fn offset_inside_multibyte_char_is_invalid() {
            let err = find_next_tag("é@param", 1, &tags(&["@param"])).unwrap_err();
            assert!(matches!(err, ScanError::InvalidRange { offset: 1, .. }));
        }

        #[test]
        fn first_listed_token_wins_ties() {
            let text = "x :parameter y";
            let short_first = tags(&[":param", ":parameter"]);
            let long_first = tags(&[":parameter", ":param"]);
            assert_eq!(
                find_next_tag(text, 0, &short_first).unwrap(),
                Some(TextRange::new(2, 8))
            );
            assert_eq!(
                find_next_tag(text, 0, &long_first).unwrap(),
                Some(TextRange::new(2, 12))
            );
        }

        #[test]
        fn earliest_start_beats_list_order() {
            let text = "@return then :param";
            let set = tags(&[":param", "@return"]);
            assert_eq!(
                find_next_tag(text, 0, &set).unwrap(),
                Some(TextRange::new(0, 7))
            );
        }

        #[test]
        fn matches_after_multibyte_text() {
            let text = "überprüft @param x";
            let range = find_next_tag(text, 0, &tags(&["@param"])).unwrap().unwrap();
            assert_eq!(range.slice(text), Some("@param"));
        }
    }

    mod boundary_tests {
        use super::*;

        #[test]
        fn word_end_skips_token_prefixes() {
            let text = ":parameter a\n:param b";
            let set = tags(&[":param", ":parameter"]).with_boundary(Boundary::WordEnd);
            let first = find_next_tag(text, 0, &set).unwrap().unwrap();
            assert_eq!(first.slice(text), Some(":parameter"));
            let second = find_next_tag(text, first.end, &set).unwrap().unwrap();
            assert_eq!(second, TextRange::new(13, 19));
        }

        #[test]
        fn word_end_accepts_token_at_end_of_text() {
            let set = tags(&["@see"]).with_boundary(Boundary::WordEnd);
            assert_eq!(
                find_next_tag("x @see", 0, &set).unwrap(),
                Some(TextRange::new(2, 6))
            );
        }

        #[test]
        fn word_end_rejects_unicode_letters() {
            let set = tags(&["@param"]).with_boundary(Boundary::WordEnd);
            assert_eq!(find_next_tag("@paramé", 0, &set).unwrap(), None);
        }

        #[test]
        fn word_end_finds_later_occurrence_after_rejected_one() {
            let set = tags(&["@type"]).with_boundary(Boundary::WordEnd);
            let text = "@types and @type:";
            assert_eq!(
                find_next_tag(text, 0, &set).unwrap(),
                Some(TextRange::new(11, 16))
            );
        }
    }
}
