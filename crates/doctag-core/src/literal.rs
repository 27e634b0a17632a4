//! Building string literal expressions from raw values.
//!
//! [`LiteralValueBuilder`] turns a raw value into double-quoted source text and
//! hands that text to an [`ExpressionFactory`], which owns the actual syntax
//! tree construction. Whatever the factory returns, error included, is
//! passed straight back to the caller.

use std::convert::Infallible;
use std::fmt::Write as _;

use tracing::trace;

/// Builds expressions from source text.
pub trait ExpressionFactory {
    /// The expression node type produced.
    type Expression;
    /// The error raised when the text is not a valid expression.
    type Error;

    /// Build an expression from a complete quoted string literal, quotes
    /// included.
    fn from_quoted_string(&self, text: &str) -> Result<Self::Expression, Self::Error>;
}

/// Factory that returns the quoted source text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceText;

impl ExpressionFactory for SourceText {
    type Expression = String;
    type Error = Infallible;

    fn from_quoted_string(&self, text: &str) -> Result<String, Infallible> {
        Ok(text.to_string())
    }
}

/// Escape function applied to raw values before quoting.
pub type EscapeFn = fn(&str) -> String;

/// Creates string literal expressions through an injected factory.
#[derive(Debug, Clone)]
pub struct LiteralValueBuilder<F> {
    factory: F,
    escape: EscapeFn,
}

impl<F: ExpressionFactory> LiteralValueBuilder<F> {
    /// Create a builder using [`escape_string_characters`].
    pub fn new(factory: F) -> Self {
        LiteralValueBuilder {
            factory,
            escape: escape_string_characters,
        }
    }

    /// Create a builder with a custom escape function.
    pub fn with_escape(factory: F, escape: EscapeFn) -> Self {
        LiteralValueBuilder { factory, escape }
    }

    /// The underlying factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Build a string literal expression whose value is `value`.
    pub fn create_literal_value(&self, value: &str) -> Result<F::Expression, F::Error> {
        let text = quote_literal(value, self.escape);
        trace!(literal = %text, "creating literal value");
        self.factory.from_quoted_string(&text)
    }
}

/// Wrap `escape(value)` in double quotes.
pub fn quote_literal(value: &str, escape: impl Fn(&str) -> String) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len() + 2);
    out.push('"');
    out.push_str(&escaped);
    out.push('"');
    out
}

/// Escape a value for use inside a double-quoted string literal.
///
/// `\b \t \n \f \r`, the backslash and the double quote get backslash
/// escapes. Characters that do not render (controls, line and paragraph
/// separators, format characters, private use) and characters outside the
/// Basic Multilingual Plane are written as `\uXXXX` UTF-16 code units.
/// Everything else is copied unchanged.
pub fn escape_string_characters(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ if is_printable(ch) => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    // Writing to a String cannot fail.
                    let _ = write!(out, "\\u{:04X}", unit);
                }
            }
        }
    }
    out
}

fn is_printable(ch: char) -> bool {
    let cp = ch as u32;
    !(ch.is_control()
        || cp > 0xFFFF
        || matches!(cp, 0x2028 | 0x2029)
        || is_format_char(cp)
        || (0xE000..=0xF8FF).contains(&cp))
}

fn is_format_char(cp: u32) -> bool {
    matches!(
        cp,
        0x00AD
            | 0x0600..=0x0605
            | 0x061C
            | 0x06DD
            | 0x070F
            | 0x180E
            | 0x200B..=0x200F
            | 0x202A..=0x202E
            | 0x2060..=0x2064
            | 0x2066..=0x206F
            | 0xFEFF
            | 0xFFF9..=0xFFFB
    )
}
