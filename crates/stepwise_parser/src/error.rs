//! Parse errors. Every variant carries the offending formula text so the
//! caller can surface it verbatim.

use stepwise_ast::AstError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormulaError {
    #[error("unrecognized token at offset {position} in \"{formula}\"")]
    UnknownToken { formula: String, position: usize },

    #[error("mismatched bracket in \"{formula}\"")]
    MismatchedBracket { formula: String },

    #[error("operator is missing an operand in \"{formula}\"")]
    MissingOperand { formula: String },

    #[error("formula does not reduce to a single expression: \"{formula}\"")]
    Incomplete { formula: String },

    #[error(transparent)]
    Operator(#[from] AstError),
}
