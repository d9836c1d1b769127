//! Stack evaluation of reverse Polish notation.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::normalize::normalize_to_infix;
use crate::rpn::infix_to_rpn;
use crate::token::{tokenize, Operator, Symbol};

/// One observable action of the evaluator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum EvalStep {
    /// A number was pushed.
    Push { value: f64 },
    /// `left operator right` replaced its two operands with `result`.
    Apply {
        operator: Operator,
        left: f64,
        right: f64,
        result: f64,
    },
    /// The operator found fewer than two operands and was skipped.
    Underflow { operator: Operator, depth: usize },
    /// A token that is neither a number nor an operator.
    Skip { token: String },
}

/// Evaluates RPN tokens one step at a time.
pub struct RpnEvaluator<'a, S> {
    tokens: std::slice::Iter<'a, S>,
    stack: Vec<f64>,
}

impl<'a, S: AsRef<str>> RpnEvaluator<'a, S> {
    pub fn new(tokens: &'a [S]) -> Self {
        Self {
            tokens: tokens.iter(),
            stack: Vec::new(),
        }
    }

    /// Current operand stack, bottom first.
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    /// Top of the stack, if any.
    pub fn value(&self) -> Option<f64> {
        self.stack.last().copied()
    }

    fn apply(&mut self, operator: Operator) -> EvalStep {
        let (left, right) = match *self.stack.as_slice() {
            [.., left, right] => (left, right),
            _ => {
                let depth = self.stack.len();
                warn!(%operator, depth, "operator skipped on stack underflow");
                return EvalStep::Underflow { operator, depth };
            }
        };

        let result = operator.apply(left, right);
        self.stack.truncate(self.stack.len() - 2);
        self.stack.push(result);
        EvalStep::Apply {
            operator,
            left,
            right,
            result,
        }
    }
}

impl<S: AsRef<str>> Iterator for RpnEvaluator<'_, S> {
    type Item = EvalStep;

    fn next(&mut self) -> Option<EvalStep> {
        let token = self.tokens.next()?.as_ref();
        let step = match Symbol::classify(token) {
            Symbol::Number(value) => {
                self.stack.push(value);
                EvalStep::Push { value }
            }
            Symbol::Operator(op) => self.apply(op),
            Symbol::LeftParen | Symbol::RightParen | Symbol::Unknown => EvalStep::Skip {
                token: token.to_string(),
            },
        };
        Some(step)
    }
}

/// Evaluate RPN tokens and return the top of the stack.
pub fn evaluate_rpn<S: AsRef<str>>(tokens: &[S]) -> Result<f64> {
    let mut evaluator = RpnEvaluator::new(tokens);
    evaluator.by_ref().for_each(drop);

    let value = evaluator.value().ok_or(Error::Empty)?;
    if evaluator.stack().len() > 1 {
        warn!(
            leftover = evaluator.stack().len() - 1,
            "operands left on the stack"
        );
    }
    Ok(value)
}

/// Tokenize, convert and evaluate a plain infix expression.
pub fn evaluate_infix(expression: &str) -> Result<f64> {
    let rpn = infix_to_rpn(&tokenize(expression));
    debug!(expression, rpn = ?rpn, "converted infix");
    evaluate_rpn(&rpn)
}

/// Normalize a markup expression, then evaluate it as infix.
pub fn evaluate_markup(markup: &str) -> Result<f64> {
    let infix = normalize_to_infix(markup);
    debug!(markup, infix = %infix, "normalized markup");
    evaluate_infix(&infix)
}
