//! Nodes the annotator visits.
//!
//! [`DocNode`] is the closed set of outline nodes that can carry a
//! docstring. [`walk`] flattens a file into these nodes in document order.

use crate::docstring::Scope;
use crate::model::{Assignment, Class, ExpressionStatement, File, Function, Statement};

/// A node that may carry a docstring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocNode<'a> {
    File(&'a File),
    Function(&'a Function),
    Class(&'a Class),
    Assignment(&'a Assignment),
    ExpressionStatement {
        statement: &'a ExpressionStatement,
        /// Body the statement sits in.
        scope: Scope,
        /// The statement immediately before this one in the same body.
        previous: Option<&'a Statement>,
    },
}

/// Collect every node of `file` in document order, the file itself first.
pub fn walk(file: &File) -> Vec<DocNode<'_>> {
    let mut nodes = vec![DocNode::File(file)];
    walk_body(&file.body, Scope::File, &mut nodes);
    nodes
}

fn walk_body<'a>(body: &'a [Statement], scope: Scope, nodes: &mut Vec<DocNode<'a>>) {
    let mut previous: Option<&'a Statement> = None;
    for stmt in body {
        match stmt {
            Statement::Expression(statement) => nodes.push(DocNode::ExpressionStatement {
                statement,
                scope,
                previous,
            }),
            Statement::Assignment(assign) => nodes.push(DocNode::Assignment(assign)),
            Statement::Function(function) => {
                nodes.push(DocNode::Function(function));
                walk_body(&function.body, Scope::Function, nodes);
            }
            Statement::Class(class) => {
                nodes.push(DocNode::Class(class));
                walk_body(&class.body, Scope::Class, nodes);
            }
            Statement::Other => {}
        }
        previous = Some(stmt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Expression, StringLiteral};

    fn kind(node: &DocNode<'_>) -> &'static str {
        match node {
            DocNode::File(_) => "file",
            DocNode::Function(_) => "function",
            DocNode::Class(_) => "class",
            DocNode::Assignment(_) => "assignment",
            DocNode::ExpressionStatement { .. } => "expression",
        }
    }

    #[test]
    fn walks_in_document_order() {
        let file = File {
            format: None,
            body: vec![
                Statement::string(StringLiteral::at(0, "'m'")),
                Statement::Class(Class {
                    name: "C".to_string(),
                    body: vec![
                        Statement::string(StringLiteral::at(20, "'c'")),
                        Statement::Function(Function {
                            name: "f".to_string(),
                            body: vec![Statement::Other],
                        }),
                    ],
                }),
                Statement::assign("x", Expression::Other { range: None }),
            ],
        };
        let kinds: Vec<_> = walk(&file).iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec!["file", "expression", "class", "expression", "function", "assignment"]
        );
    }

    #[test]
    fn expression_statements_know_scope_and_previous() {
        let assign = Statement::assign("x", Expression::Other { range: None });
        let file = File {
            format: None,
            body: vec![
                Statement::Function(Function {
                    name: "f".to_string(),
                    body: vec![assign.clone(), Statement::string(StringLiteral::at(30, "'a'"))],
                }),
                assign.clone(),
                Statement::string(StringLiteral::at(50, "'b'")),
            ],
        };
        let nodes = walk(&file);
        let contexts: Vec<_> = nodes
            .iter()
            .filter_map(|node| match node {
                DocNode::ExpressionStatement { scope, previous, .. } => Some((*scope, previous.is_some())),
                _ => None,
            })
            .collect();
        assert_eq!(contexts, vec![(Scope::Function, true), (Scope::File, true)]);
    }
}
