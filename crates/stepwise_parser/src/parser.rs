//! Shunting-yard tree construction over two stacks: operand trees on
//! `result`, operator glyphs on `opstack`. Brackets match by family and
//! open brackets rank below every arithmetic operator, so they only leave
//! the stack through their matching close bracket.

use std::rc::Rc;

use crate::error::FormulaError;
use crate::lexer::{tokenize, Token};
use stepwise_ast::{op, Node};

/// Pop one operator and its two operands, push the combined tree back.
fn combine(result: &mut Vec<Rc<Node>>, glyph: char, formula: &str) -> Result<(), FormulaError> {
    let missing = || FormulaError::MissingOperand {
        formula: formula.to_string(),
    };
    let right = result.pop().ok_or_else(missing)?;
    let left = result.pop().ok_or_else(missing)?;
    result.push(Node::operator(glyph, left, right));
    Ok(())
}

/// Parse a formula into a tree.
pub fn generate_tree(formula: &str) -> Result<Rc<Node>, FormulaError> {
    let tokens = tokenize(formula)?;
    let mut result: Vec<Rc<Node>> = Vec::new();
    let mut opstack: Vec<char> = Vec::new();

    for token in tokens {
        match token {
            Token::Immediate(lexeme) => result.push(Node::immediate(lexeme)),
            Token::Operator(c) if op::is_open_bracket(c) => opstack.push(c),
            Token::Operator(c) if op::is_close_bracket(c) => {
                let open = op::matching_open(c).unwrap_or(c);
                loop {
                    match opstack.pop() {
                        Some(top) if top == open => break,
                        // a different open bracket means a cross-family pair
                        Some(top) if op::is_open_bracket(top) => {
                            return Err(FormulaError::MismatchedBracket {
                                formula: formula.to_string(),
                            })
                        }
                        Some(top) => combine(&mut result, top, formula)?,
                        None => {
                            return Err(FormulaError::MismatchedBracket {
                                formula: formula.to_string(),
                            })
                        }
                    }
                }
            }
            Token::Operator(c) => {
                while let Some(&top) = opstack.last() {
                    if op::priority(top)? >= op::priority(c)? {
                        opstack.pop();
                        combine(&mut result, top, formula)?;
                    } else {
                        break;
                    }
                }
                opstack.push(c);
            }
        }
    }

    while let Some(top) = opstack.pop() {
        if op::is_open_bracket(top) {
            return Err(FormulaError::MismatchedBracket {
                formula: formula.to_string(),
            });
        }
        combine(&mut result, top, formula)?;
    }

    match (result.pop(), result.is_empty()) {
        (Some(tree), true) => Ok(tree),
        _ => Err(FormulaError::Incomplete {
            formula: formula.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_ast::NodeKind;

    #[test]
    fn parse_respects_precedence() {
        let t = generate_tree("1+2*3").unwrap();
        assert_eq!(t.id(), "1|2|3*+");
        assert_eq!(t.op(), Some('+'));
        assert_eq!(t.children()[0].character(), "1");
        let right = &t.children()[1];
        assert_eq!(right.op(), Some('*'));
        assert_eq!(right.children()[0].character(), "2");
        assert_eq!(right.children()[1].character(), "3");
        assert_eq!(right.kind(), NodeKind::Operator);
    }

    #[test]
    fn parse_is_left_associative() {
        assert_eq!(generate_tree("1-2-3").unwrap().id(), "1|2-|3-");
        assert_eq!(generate_tree("8/4/2").unwrap().id(), "8|4/|2/");
    }

    #[test]
    fn brackets_override_precedence() {
        assert_eq!(generate_tree("(1+2)*3").unwrap().id(), "1|2+|3*");
        assert_eq!(generate_tree("[1+2]*{3}").unwrap().id(), "1|2+|3*");
    }

    #[test]
    fn frac_lexeme_is_a_leaf() {
        let t = generate_tree("\\frac{1}{2}+\\frac{1}{3}").unwrap();
        assert_eq!(t.id(), "\\frac{1}{2}|\\frac{1}{3}+");
        assert!(t.children()[0].is_immediate());
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(
            generate_tree(" 1 + 2 * 3 ").unwrap().id(),
            generate_tree("1+2*3").unwrap().id()
        );
    }

    #[test]
    fn rejects_bare_close_bracket() {
        assert!(matches!(
            generate_tree(")"),
            Err(FormulaError::MismatchedBracket { .. })
        ));
    }

    #[test]
    fn rejects_trailing_operator() {
        assert!(matches!(
            generate_tree("1+"),
            Err(FormulaError::MissingOperand { .. })
        ));
    }

    #[test]
    fn rejects_adjacent_operands() {
        assert!(matches!(
            generate_tree("1 2"),
            Err(FormulaError::Incomplete { .. })
        ));
    }

    #[test]
    fn rejects_unclosed_bracket() {
        assert!(matches!(
            generate_tree("(1+2"),
            Err(FormulaError::MismatchedBracket { .. })
        ));
    }

    #[test]
    fn rejects_cross_family_brackets() {
        assert!(matches!(
            generate_tree("(1+2]"),
            Err(FormulaError::MismatchedBracket { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            generate_tree(""),
            Err(FormulaError::Incomplete { .. })
        ));
        assert!(matches!(
            generate_tree("   "),
            Err(FormulaError::Incomplete { .. })
        ));
    }

    #[test]
    fn rejects_leading_operator() {
        assert!(matches!(
            generate_tree("*2"),
            Err(FormulaError::MissingOperand { .. })
        ));
    }
}
