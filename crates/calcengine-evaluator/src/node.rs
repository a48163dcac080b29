//! The evaluation tree built from an RPN program.
//!
//! The RPN is folded once into a tagged tree; evaluation then recurses
//! over the tree instead of interpreting the token list. This keeps the
//! short-circuit functions simple: a branch that is never selected is a
//! subtree that is never visited.

use calcengine_core::{EngineError, Result};
use calcengine_parser::{RpnProgram, TokenKind};
use calcengine_registry::Registry;

/// One node of the evaluation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A numeric literal, kept as raw text so the radix lenses can
    /// reinterpret its digits.
    Literal(String),
    /// A variable reference, resolved against the registry at evaluation
    /// time.
    Variable(String),
    /// A binary operator application.
    Apply {
        symbol: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// A function call with its argument subtrees in source order.
    Call { name: String, args: Vec<Node> },
}

/// A build-stack entry: a finished subtree, or the marker opening a
/// call's argument list.
enum Entry {
    Tree(Node),
    ScopeStart,
}

/// Fold a validated RPN program into its evaluation tree.
pub fn build(program: &RpnProgram, registry: &Registry) -> Result<Node> {
    let mut stack: Vec<Entry> = Vec::with_capacity(program.len());

    for token in program.tokens() {
        match token.kind() {
            TokenKind::Number => stack.push(Entry::Tree(Node::Literal(token.text().to_string()))),

            TokenKind::LeftParen => stack.push(Entry::ScopeStart),

            TokenKind::Operator => {
                let right = pop_tree(&mut stack, token.text())?;
                let left = pop_tree(&mut stack, token.text())?;
                stack.push(Entry::Tree(Node::Apply {
                    symbol: token.text().to_string(),
                    left: Box::new(left),
                    right: Box::new(right),
                }));
            }

            TokenKind::Identifier => {
                if registry.is_function(token.text()) {
                    let mut args = Vec::new();
                    loop {
                        match stack.pop() {
                            None => return Err(EngineError::MismatchedParen),
                            Some(Entry::ScopeStart) => break,
                            Some(Entry::Tree(node)) => args.push(node),
                        }
                    }
                    args.reverse();
                    stack.push(Entry::Tree(Node::Call {
                        name: token.text().to_uppercase(),
                        args,
                    }));
                } else {
                    stack.push(Entry::Tree(Node::Variable(token.text().to_string())));
                }
            }

            // validation rejects these before we ever get here
            TokenKind::RightParen | TokenKind::Comma => {
                return Err(EngineError::MismatchedParen)
            }
        }
    }

    let mut drained = stack.into_iter();
    match (drained.next(), drained.next()) {
        (Some(Entry::Tree(root)), None) => Ok(root),
        (None, _) => Err(EngineError::EmptyExpression),
        _ => Err(EngineError::TooManyOperands),
    }
}

fn pop_tree(stack: &mut Vec<Entry>, symbol: &str) -> Result<Node> {
    match stack.pop() {
        Some(Entry::Tree(node)) => Ok(node),
        _ => Err(EngineError::TooFewOperands {
            symbol: symbol.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcengine_parser::parse;
    use pretty_assertions::assert_eq;

    fn tree(input: &str) -> Node {
        let registry = Registry::new();
        let program = parse(input, &registry).unwrap();
        build(&program, &registry).unwrap()
    }

    #[test]
    fn operator_trees_keep_source_operand_order() {
        let node = tree("8-3");
        assert_eq!(
            node,
            Node::Apply {
                symbol: "-".into(),
                left: Box::new(Node::Literal("8".into())),
                right: Box::new(Node::Literal("3".into())),
            }
        );
    }

    #[test]
    fn call_arguments_are_in_source_order() {
        let node = tree("MAX(1,5,3)");
        assert_eq!(
            node,
            Node::Call {
                name: "MAX".into(),
                args: vec![
                    Node::Literal("1".into()),
                    Node::Literal("5".into()),
                    Node::Literal("3".into()),
                ],
            }
        );
    }

    #[test]
    fn nested_calls_nest_in_the_tree() {
        let node = tree("MAX(1, MIN(2,3))");
        let Node::Call { name, args } = node else {
            panic!("expected a call");
        };
        assert_eq!(name, "MAX");
        assert_eq!(args.len(), 2);
        assert!(matches!(&args[1], Node::Call { name, .. } if name == "MIN"));
    }

    #[test]
    fn variables_become_references() {
        assert_eq!(tree("PI"), Node::Variable("PI".into()));
    }
}
