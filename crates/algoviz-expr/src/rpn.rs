//! Infix to postfix conversion (shunting-yard).

use tracing::trace;

use crate::token::{Operator, Symbol};

/// Entries of the operator stack.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Operator(Operator),
    LeftParen,
}

/// Convert infix tokens to reverse Polish notation.
///
/// All operators are treated as left-associative: an incoming operator pops
/// every stacked operator of equal or higher precedence. Unknown tokens
/// (identifiers, whitespace, stray markup) are dropped. An unmatched `)`
/// drains the stack, and unmatched `(` entries are discarded at the end.
pub fn infix_to_rpn<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Pending> = Vec::new();

    for token in tokens {
        let token = token.as_ref();
        match Symbol::classify(token) {
            Symbol::Number(_) => output.push(token.to_string()),
            Symbol::Operator(op) => {
                while let Some(&Pending::Operator(top)) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.push(top.symbol().to_string());
                    stack.pop();
                }
                stack.push(Pending::Operator(op));
            }
            Symbol::LeftParen => stack.push(Pending::LeftParen),
            Symbol::RightParen => {
                while let Some(pending) = stack.pop() {
                    match pending {
                        Pending::LeftParen => break,
                        Pending::Operator(op) => output.push(op.symbol().to_string()),
                    }
                }
            }
            Symbol::Unknown => trace!(token, "skipping unknown token"),
        }
    }

    while let Some(pending) = stack.pop() {
        if let Pending::Operator(op) = pending {
            output.push(op.symbol().to_string());
        }
    }
    output
}
