//! Equivalence and derivability judging for arithmetic formulas.
//!
//! Given two formulas, the engine answers: are they equal, does one reduce
//! to the other in `k` arithmetic steps, or are they unrelated? Built for
//! grading a student's written answer against a reference, where partial
//! credit depends on how many computation steps remain.
//!
//! The pipeline is `text → parse → tree → (derive ↔ evaluate ↔ rational
//! arithmetic) → verdict`. All state lives in an [`Engine`] value: a prime
//! cache, an evaluation cache, and the derivation cache that memoizes whole
//! equivalence classes.
//!
//! ```
//! use stepwise_engine::Engine;
//!
//! let mut engine = Engine::new();
//! assert_eq!(engine.compare_formulas("1+2*3", "7").unwrap(), Some(2));
//! assert_eq!(engine.compare_formulas("2+3", "3+2").unwrap(), Some(0));
//! assert_eq!(engine.compare_formulas("a+b", "c+d").unwrap(), None);
//! ```

mod compare;
mod derive;
mod engine;
mod eval;
mod literal_forms;
mod similarity;

pub use compare::{judge_tree, MAX_DERIVE_OPERATORS};
pub use engine::Engine;
pub use similarity::Similarity;

pub use stepwise_ast::{Node, NodeKind};
pub use stepwise_parser::{generate_tree, FormulaError};
