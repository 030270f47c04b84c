//! Formula tokenizer.
//!
//! Whitespace separates tokens and is otherwise ignored; it never glues
//! two lexemes together, so `1 2` stays two operands (and fails later in
//! the tree builder). At each position the scan tries, in order: a LaTeX
//! fraction (with an optional adjacent word prefix, the whole match one
//! immediate), a single operator or bracket character, a decimal literal
//! `digits.digits`, and finally a maximal word-character run.

use crate::error::FormulaError;
use stepwise_ast::op;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal lexeme: integer, decimal, LaTeX fraction, or word atom.
    Immediate(String),
    /// One of `+ - * /` or a bracket.
    Operator(char),
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End offset of a `\frac{word}{word}` match starting at `start`, if any.
fn match_frac(bytes: &[u8], start: usize) -> Option<usize> {
    const COMMAND: &[u8] = b"\\frac";
    if !bytes[start..].starts_with(COMMAND) {
        return None;
    }
    let mut at = start + COMMAND.len();
    for _ in 0..2 {
        if bytes.get(at) != Some(&b'{') {
            return None;
        }
        at += 1;
        let group_start = at;
        while at < bytes.len() && is_word_byte(bytes[at]) {
            at += 1;
        }
        if at == group_start || bytes.get(at) != Some(&b'}') {
            return None;
        }
        at += 1;
    }
    Some(at)
}

/// Scan one token at `start` (not whitespace), returning it with the
/// offset just past it.
fn next_token(formula: &str, start: usize) -> Result<(Token, usize), FormulaError> {
    let bytes = formula.as_bytes();

    // 1. word prefix immediately followed by \frac{..}{..}: one immediate
    let mut after_prefix = start;
    while after_prefix < bytes.len() && is_word_byte(bytes[after_prefix]) {
        after_prefix += 1;
    }
    if bytes.get(after_prefix) == Some(&b'\\') {
        if let Some(end) = match_frac(bytes, after_prefix) {
            return Ok((Token::Immediate(formula[start..end].to_string()), end));
        }
    }

    // 2. operator or bracket
    let c = bytes[start] as char;
    if op::OPERATOR_CHARS.contains(c) {
        return Ok((Token::Operator(c), start + 1));
    }

    // 3. decimal literal digits.digits
    if c.is_ascii_digit() {
        let mut at = start;
        while at < bytes.len() && bytes[at].is_ascii_digit() {
            at += 1;
        }
        if bytes.get(at) == Some(&b'.') {
            let mut frac_end = at + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            if frac_end > at + 1 {
                return Ok((
                    Token::Immediate(formula[start..frac_end].to_string()),
                    frac_end,
                ));
            }
        }
    }

    // 4. maximal word run (covers integers and symbolic atoms)
    if is_word_byte(bytes[start]) {
        let mut at = start;
        while at < bytes.len() && is_word_byte(bytes[at]) {
            at += 1;
        }
        return Ok((Token::Immediate(formula[start..at].to_string()), at));
    }

    Err(FormulaError::UnknownToken {
        formula: formula.to_string(),
        position: start,
    })
}

/// Tokenize a whole formula. Offsets in errors refer to the input text.
pub fn tokenize(formula: &str) -> Result<Vec<Token>, FormulaError> {
    let bytes = formula.as_bytes();
    let mut tokens = Vec::new();
    let mut at = 0;
    while at < bytes.len() {
        if bytes[at].is_ascii_whitespace() {
            at += 1;
            continue;
        }
        let (token, next) = next_token(formula, at)?;
        tokens.push(token);
        at = next;
    }
    Ok(tokens)
}
