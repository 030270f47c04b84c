//! Expression tree datum for the stepwise equivalence judge.
//!
//! Trees are immutable and `Rc`-shared; every node carries a
//! content-addressed id that uniquely identifies its shape and token
//! sequence. Rewrites elsewhere in the workspace build fresh nodes and
//! reuse untouched subtrees by reference.

pub mod error;
pub mod node;
pub mod op;

pub use error::AstError;
pub use node::{Node, NodeKind};
