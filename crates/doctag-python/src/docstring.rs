//! Rules for locating docstrings.

use crate::model::{Statement, StringLiteral};

/// The attribute a module, class or function docstring is stored in.
pub const DOC: &str = "__doc__";

/// The kind of body a statement sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    File,
    Class,
    Function,
}

/// The docstring of a body: its first statement, when that is a bare string
/// literal.
pub fn find_docstring_expression(body: &[Statement]) -> Option<&StringLiteral> {
    match body.first()? {
        Statement::Expression(stmt) => stmt.expression.as_string(),
        _ => None,
    }
}

/// Check if a bare string literal statement documents the variable assigned
/// just before it.
///
/// In file and class bodies any assignment qualifies. Inside a function only
/// an instance attribute assignment (`self.x = ...`) does; after a local
/// variable the string is just an expression.
pub fn is_variable_docstring(scope: Scope, previous: Option<&Statement>) -> bool {
    let Some(Statement::Assignment(assign)) = previous else {
        return false;
    };
    match scope {
        Scope::File | Scope::Class => true,
        Scope::Function => assign.has_instance_attribute_target(),
    }
}
