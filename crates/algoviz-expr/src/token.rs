//! Tokenizers and token classification.
//!
//! A token is a maximal word run (escaped with `\` in markup, bare in plain
//! infix), a maximal run of ASCII digits, or any other single character.
//! Line terminators never become tokens.

use std::fmt;

/// Binary operators, with their fixed precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "^" => Some(Operator::Pow),
            _ => None,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
        }
    }

    /// Higher binds tighter.
    pub const fn precedence(&self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
        }
    }

    /// `left OP right` with IEEE semantics (division by zero is not special).
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Operator::Add => left + right,
            Operator::Sub => left - right,
            Operator::Mul => left * right,
            Operator::Div => left / right,
            Operator::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// What a token means to the converter and the evaluator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Symbol {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
    Unknown,
}

impl Symbol {
    pub fn classify(token: &str) -> Self {
        if let Some(value) = parse_number(token) {
            return Symbol::Number(value);
        }
        if let Some(op) = Operator::from_symbol(token) {
            return Symbol::Operator(op);
        }
        match token {
            "(" => Symbol::LeftParen,
            ")" => Symbol::RightParen,
            _ => Symbol::Unknown,
        }
    }
}

/// Numeric literals: an optional sign, then a digit or `.`, then whatever
/// `f64` parsing accepts. Named values such as `inf` or `NaN` are identifiers.
pub fn parse_number(token: &str) -> Option<f64> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok()
}

/// Tokenizer variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tokenizer {
    /// Markup with backslash-escaped command names, e.g. `\frac`
    Markup,
    /// Plain infix with bare alphanumeric identifiers
    #[default]
    Infix,
}

impl Tokenizer {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            let c = chars[pos];
            if is_line_terminator(c) {
                pos += 1;
                continue;
            }

            let end = match self {
                Tokenizer::Markup if c == '\\' => {
                    let word = run_end(&chars, pos + 1, is_word);
                    if word > pos + 1 {
                        word
                    } else {
                        pos + 1
                    }
                }
                Tokenizer::Markup if c.is_ascii_digit() => run_end(&chars, pos, is_digit),
                Tokenizer::Markup => pos + 1,
                Tokenizer::Infix if c.is_ascii_digit() => run_end(&chars, pos, is_digit),
                Tokenizer::Infix if is_word(c) => run_end(&chars, pos, is_word),
                Tokenizer::Infix => pos + 1,
            };

            tokens.push(chars[pos..end].iter().collect());
            pos = end;
        }
        tokens
    }
}

/// Split a plain infix expression into tokens.
pub fn tokenize(expression: &str) -> Vec<String> {
    Tokenizer::Infix.tokenize(expression)
}

pub(crate) fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn run_end(chars: &[char], start: usize, pred: fn(char) -> bool) -> usize {
    chars[start..]
        .iter()
        .position(|&c| !pred(c))
        .map_or(chars.len(), |offset| start + offset)
}
