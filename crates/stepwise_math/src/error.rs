//! Error types for stepwise_math.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,
}
