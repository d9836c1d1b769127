//! Algoviz Expressions
//!
//! The pipeline a stack-machine animation walks through:
//!
//! ```text
//! markup ──normalize──▶ infix ──tokenize──▶ tokens ──shunting-yard──▶ RPN ──evaluate──▶ f64
//! ```
//!
//! - [`normalize_to_infix`]: ordered rewrite [`RULES`] from `\frac`-style
//!   markup to plain infix
//! - [`Tokenizer`]: markup and infix token splitting
//! - [`infix_to_rpn`]: shunting-yard over `+ - * / ^` and parentheses
//! - [`RpnEvaluator`]: yields one [`EvalStep`] per token, so the stack can be
//!   drawn between steps
//!
//! Evaluation is lenient: unknown tokens are skipped and an operator with too
//! few operands is skipped instead of failing the whole expression.
//!
//! # Example
//!
//! ```
//! use algoviz_expr::{evaluate_markup, infix_to_rpn, tokenize};
//!
//! assert_eq!(infix_to_rpn(&tokenize("3+4*2")), ["3", "4", "2", "*", "+"]);
//! assert_eq!(evaluate_markup("\\frac{8+6}{9-2}").unwrap(), 2.0);
//! ```

mod error;
mod eval;
mod normalize;
mod rpn;
mod token;

pub use error::{Error, Result};
pub use eval::{evaluate_infix, evaluate_markup, evaluate_rpn, EvalStep, RpnEvaluator};
pub use normalize::{
    expand_fractions, insert_multiplication, multiply_after_paren, multiply_before_paren,
    multiply_digit_letter, normalize_to_infix, replace_delimiters, wrap_functions, Rule, RULES,
};
pub use rpn::infix_to_rpn;
pub use token::{parse_number, tokenize, Operator, Symbol, Tokenizer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_tokens_survive_normalization() {
        let markup = "1*5+4+\\frac{8+6}{9-2}";
        let tokens = Tokenizer::Markup.tokenize(markup);
        assert!(tokens.contains(&"\\frac".to_string()));

        let infix = normalize_to_infix(markup);
        assert!(!Tokenizer::Markup.tokenize(&infix).iter().any(|t| t.starts_with('\\')));
        assert_eq!(evaluate_infix(&infix).unwrap(), 11.0);
    }

    #[test]
    fn implicit_products_evaluate() {
        assert_eq!(evaluate_markup("2\\left(3+4\\right)").unwrap(), 14.0);
        assert_eq!(evaluate_markup("\\left(1+1\\right)3").unwrap(), 6.0);
    }
}
