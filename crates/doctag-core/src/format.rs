//! Docstring formats and their tag tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::scanner::{Boundary, TagSet};

/// Epydoc field tags.
pub const EPYTEXT_TAGS: &[&str] = &[
    "@param",
    "@type",
    "@keyword",
    "@kwarg",
    "@kwparam",
    "@return",
    "@rtype",
    "@raise",
    "@ivar",
    "@cvar",
    "@var",
    "@group",
    "@sort",
    "@see",
    "@note",
    "@attention",
    "@bug",
    "@warning",
    "@version",
    "@todo",
    "@deprecated",
    "@since",
    "@status",
    "@change",
    "@permission",
    "@requires",
    "@precondition",
    "@postcondition",
    "@invariant",
    "@author",
    "@organization",
    "@copyright",
    "@license",
    "@contact",
    "@summary",
];

/// Sphinx / reStructuredText field tags.
pub const REST_TAGS: &[&str] = &[
    ":param",
    ":parameter",
    ":arg",
    ":argument",
    ":key",
    ":keyword",
    ":type",
    ":raises",
    ":raise",
    ":except",
    ":exception",
    ":var",
    ":ivar",
    ":cvar",
    ":vartype",
    ":returns",
    ":return",
    ":rtype",
    ":meta",
];

/// The documentation format a file's docstrings are written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStringFormat {
    /// Plain text; no tags are recognized.
    #[default]
    Plain,
    /// Epydoc (`@param x: ...`).
    Epytext,
    /// reStructuredText / Sphinx (`:param x: ...`).
    Rest,
    /// NumPy style; section based, no inline tags.
    Numpy,
    /// Google style; section based, no inline tags.
    Google,
}

impl DocStringFormat {
    /// All formats, in display order.
    pub const ALL: [DocStringFormat; 5] = [
        DocStringFormat::Plain,
        DocStringFormat::Epytext,
        DocStringFormat::Rest,
        DocStringFormat::Numpy,
        DocStringFormat::Google,
    ];

    /// The tag set to scan for, or `None` when this format has no inline tags
    /// and scanning should be skipped.
    pub fn tags(self) -> Option<TagSet> {
        match self {
            DocStringFormat::Epytext => Some(TagSet::from_static(EPYTEXT_TAGS, Boundary::WordEnd)),
            DocStringFormat::Rest => Some(TagSet::from_static(REST_TAGS, Boundary::WordEnd)),
            DocStringFormat::Plain | DocStringFormat::Numpy | DocStringFormat::Google => None,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            DocStringFormat::Plain => "plain",
            DocStringFormat::Epytext => "epytext",
            DocStringFormat::Rest => "rest",
            DocStringFormat::Numpy => "numpy",
            DocStringFormat::Google => "google",
        }
    }
}

impl fmt::Display for DocStringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DocStringFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "" => Ok(DocStringFormat::Plain),
            "epytext" | "epydoc" => Ok(DocStringFormat::Epytext),
            "rest" | "restructuredtext" | "sphinx" => Ok(DocStringFormat::Rest),
            "numpy" => Ok(DocStringFormat::Numpy),
            "google" => Ok(DocStringFormat::Google),
            _ => Err(ConfigError::UnknownFormat {
                name: s.to_string(),
            }),
        }
    }
}
