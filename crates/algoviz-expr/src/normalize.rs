//! Markup to plain infix normalization.
//!
//! An ordered list of isolated rewrite rules. Order is load-bearing: the
//! multiplication rules only see plain parentheses once the delimiter rule has
//! run, and the function-wrapping rule relies on fractions already being
//! expanded.

use tracing::trace;

use crate::token::is_word;

/// A single pure text rewrite.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The rules [`normalize_to_infix`] applies, in order.
pub const RULES: [Rule; 4] = [
    Rule {
        name: "expand-fractions",
        apply: expand_fractions,
    },
    Rule {
        name: "replace-delimiters",
        apply: replace_delimiters,
    },
    Rule {
        name: "wrap-functions",
        apply: wrap_functions,
    },
    Rule {
        name: "insert-multiplication",
        apply: insert_multiplication,
    },
];

/// Rewrite a markup expression into plain infix.
pub fn normalize_to_infix(markup: &str) -> String {
    RULES.iter().fold(markup.to_string(), |text, rule| {
        let rewritten = (rule.apply)(&text);
        if rewritten != text {
            trace!(rule = rule.name, before = %text, after = %rewritten, "rewrite");
        }
        rewritten
    })
}

/// `\frac{a}{b}` → `(a)/(b)`. Arguments run up to the first `}`, so nested
/// braces are not supported.
pub fn expand_fractions(text: &str) -> String {
    const FRAC: &str = "\\frac{";
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(FRAC) {
        out.push_str(&rest[..start]);
        let after = &rest[start + FRAC.len()..];
        match split_fraction(after) {
            Some((numerator, denominator, tail)) => {
                out.push('(');
                out.push_str(numerator);
                out.push_str(")/(");
                out.push_str(denominator);
                out.push(')');
                rest = tail;
            }
            None => {
                out.push('\\');
                rest = &rest[start + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn split_fraction(after: &str) -> Option<(&str, &str, &str)> {
    let close = after.find('}').filter(|&i| i > 0)?;
    let numerator = &after[..close];
    let second = after[close + 1..].strip_prefix('{')?;
    let close = second.find('}').filter(|&i| i > 0)?;
    Some((numerator, &second[..close], &second[close + 1..]))
}

/// `\left(` → `(` and `\right)` → `)`.
pub fn replace_delimiters(text: &str) -> String {
    text.replace("\\left(", "(").replace("\\right)", ")")
}

const FUNCTIONS: [&str; 2] = ["floor", "ceil"];
const TRIG_FUNCTIONS: [&str; 6] = ["sin", "cos", "tan", "sec", "csc", "cot"];

/// Wrap simple function calls in an extra parenthesis pair.
///
/// Heuristic: a call `f(args)` with parenthesis-free `args` is only wrapped
/// when it has one preceding character other than `(` and one following
/// character other than `)`, and those two neighbours are wrapped with it.
/// `1+sin(2)+3` therefore becomes `1(+sin(2)+)3`; the multiplication rules
/// then turn that into `1*(+sin(2)+)*3`.
pub fn wrap_functions(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 8);
    let mut pos = 0;

    while pos < chars.len() {
        match (chars[pos] != '(').then(|| wrapped_call_end(&chars, pos + 1)).flatten() {
            Some(end) => {
                out.push('(');
                out.extend(&chars[pos..end]);
                out.push(')');
                pos = end;
            }
            None => {
                out.push(chars[pos]);
                pos += 1;
            }
        }
    }
    out
}

/// End (exclusive) of `name(args)` plus one trailing non-`)` character,
/// starting at `start`.
fn wrapped_call_end(chars: &[char], start: usize) -> Option<usize> {
    let open = function_name_end(chars, start)?;
    if chars.get(open) != Some(&'(') {
        return None;
    }
    let args = chars[open + 1..]
        .iter()
        .position(|&c| c == '(' || c == ')')
        .map(|offset| open + 1 + offset)?;
    if args == open + 1 || chars[args] != ')' {
        return None;
    }
    match chars.get(args + 1) {
        Some(&c) if c != ')' => Some(args + 2),
        _ => None,
    }
}

fn function_name_end(chars: &[char], start: usize) -> Option<usize> {
    let matches = |name: &str| {
        let len = name.chars().count();
        (chars.len() >= start + len && chars[start..start + len].iter().copied().eq(name.chars()))
            .then_some(start + len)
    };

    if let Some(end) = FUNCTIONS.iter().find_map(|&name| matches(name)) {
        return Some(end);
    }
    let end = TRIG_FUNCTIONS.iter().find_map(|&name| matches(name))?;
    // Hyperbolic variants, e.g. `sinh`
    if chars.get(end) == Some(&'h') && chars.get(end + 1) == Some(&'(') {
        return Some(end + 1);
    }
    Some(end)
}

/// Make implicit products explicit: before `(`, after `)`, and between a
/// digit and a letter, in that order.
pub fn insert_multiplication(text: &str) -> String {
    multiply_digit_letter(&multiply_after_paren(&multiply_before_paren(text)))
}

/// Characters that never receive an implicit `*` before a following `(`:
/// operators, parentheses, and the letters of the known function names.
const NO_IMPLICIT_PRODUCT: &str = "()+-*/|?acefhilnorst";

/// `2(` → `2*(`, unless the character before `(` is an operator, a
/// parenthesis, or a letter that can end a known function name.
pub fn multiply_before_paren(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];
        if chars.get(pos + 1) == Some(&'(') && !NO_IMPLICIT_PRODUCT.contains(c) {
            out.push(c);
            out.push_str("*(");
            pos += 2;
        } else {
            out.push(c);
            pos += 1;
        }
    }
    out
}

/// `)x` → `)*x` for any word character after the `)`.
pub fn multiply_after_paren(text: &str) -> String {
    insert_between(text, |a, b| a == ')' && is_word(b))
}

/// `3x` → `3*x`.
pub fn multiply_digit_letter(text: &str) -> String {
    insert_between(text, |a, b| a.is_ascii_digit() && b.is_ascii_alphabetic())
}

/// Insert `*` between non-overlapping adjacent pairs matching `pred`.
fn insert_between(text: &str, pred: impl Fn(char, char) -> bool) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 4);
    let mut pos = 0;

    while pos < chars.len() {
        match chars.get(pos + 1) {
            Some(&next) if pred(chars[pos], next) => {
                out.push(chars[pos]);
                out.push('*');
                out.push(next);
                pos += 2;
            }
            _ => {
                out.push(chars[pos]);
                pos += 1;
            }
        }
    }
    out
}
