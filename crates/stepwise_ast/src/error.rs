//! Error types for stepwise_ast.

use thiserror::Error;

/// Errors raised by tree and operator-glyph operations.
///
/// These only arise from malformed input built outside the parser; trees
/// produced by `stepwise_parser` never trigger them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AstError {
    /// A character was used where an arithmetic operator was required.
    #[error("illegal operator '{0}'")]
    IllegalOperator(char),
}
