//! Outline model of a Python file.
//!
//! This is the minimal tree the annotator needs: statement kinds that can
//! carry or contain a docstring, and the string literals themselves with
//! their location in the file. The model is built by the host (or
//! deserialized from JSON); nothing here parses Python source.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use doctag_core::{DocStringFormat, TextRange};

/// Errors found while loading an outline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutlineError {
    /// A literal's range does not span exactly its text.
    #[error("string literal at {range} spans {} bytes but its text is {text_len} bytes", .range.len())]
    LiteralLength { range: TextRange, text_len: usize },
}

/// A string literal as it appears in source, quotes and prefixes included.
///
/// When deserialized, `range` must span exactly `text.len()` bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStringLiteral")]
pub struct StringLiteral {
    /// Literal source text.
    pub text: String,
    /// Location of the literal in the file.
    pub range: TextRange,
}

impl StringLiteral {
    /// Create a literal starting at byte offset `start` in the file.
    pub fn at(start: usize, text: impl Into<String>) -> Self {
        let text = text.into();
        let range = TextRange::at(start, text.len());
        StringLiteral { text, range }
    }
}

#[derive(Deserialize)]
struct RawStringLiteral {
    text: String,
    range: TextRange,
}

impl TryFrom<RawStringLiteral> for StringLiteral {
    type Error = OutlineError;

    fn try_from(raw: RawStringLiteral) -> Result<Self, OutlineError> {
        if raw.range.len() != raw.text.len() {
            return Err(OutlineError::LiteralLength {
                range: raw.range,
                text_len: raw.text.len(),
            });
        }
        Ok(StringLiteral {
            text: raw.text,
            range: raw.range,
        })
    }
}

/// An expression, reduced to what matters for docstrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expression {
    /// A string literal.
    String(StringLiteral),
    /// Any other expression.
    Other {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<TextRange>,
    },
}

impl Expression {
    /// The string literal, if this expression is one.
    pub fn as_string(&self) -> Option<&StringLiteral> {
        match self {
            Expression::String(literal) => Some(literal),
            Expression::Other { .. } => None,
        }
    }
}

/// An expression used as a statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// An assignment `a = b = value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Target names, left to right.
    pub targets: Vec<String>,
    /// Assigned value.
    pub value: Expression,
}

impl Assignment {
    /// Check if `name` is one of the assignment targets.
    pub fn is_assignment_to(&self, name: &str) -> bool {
        self.targets.iter().any(|target| target == name)
    }

    /// Check if any target is an instance attribute, `self.<name>`.
    ///
    /// The outline has no parameter lists, so the conventional `self`
    /// receiver stands in for a method's first parameter.
    pub fn has_instance_attribute_target(&self) -> bool {
        self.targets.iter().any(|target| {
            target
                .strip_prefix(SELF_PREFIX)
                .is_some_and(|attr| !attr.is_empty() && !attr.contains('.'))
        })
    }
}

const SELF_PREFIX: &str = "self.";

/// A function definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    #[serde(default)]
    pub body: Vec<Statement>,
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Expression(ExpressionStatement),
    Assignment(Assignment),
    Function(Function),
    Class(Class),
    /// Any statement that can neither be nor contain a docstring.
    Other,
}

/// A Python file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// Docstring format configured for this file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DocStringFormat>,
    /// Top-level statements.
    #[serde(default)]
    pub body: Vec<Statement>,
}

impl Statement {
    /// A string-literal expression statement.
    pub fn string(literal: StringLiteral) -> Self {
        Statement::Expression(ExpressionStatement {
            expression: Expression::String(literal),
        })
    }

    /// An assignment of `value` to a single target.
    pub fn assign(target: impl Into<String>, value: Expression) -> Self {
        Statement::Assignment(Assignment {
            targets: vec![target.into()],
            value,
        })
    }
}
