//! The `Engine` owns the three process-local caches of a judging session.
//!
//! Everything is single-threaded by contract: callers that share an
//! `Engine` across threads must wrap the whole value in a lock. The caches
//! grow monotonically and are never invalidated, so only trees produced by
//! the parser or the derivation engine may be fed in.

use std::rc::Rc;

use rustc_hash::FxHashMap;

use stepwise_ast::Node;
use stepwise_math::PrimeCache;
use stepwise_parser::{generate_tree, FormulaError};

pub struct Engine {
    /// Primes backing all fraction reduction.
    pub(crate) primes: PrimeCache,
    /// Evaluated immediates per tree id.
    pub(crate) eval_cache: FxHashMap<String, Vec<Rc<Node>>>,
    /// Equivalence class per member id; one shared vector per class.
    pub(crate) derive_cache: FxHashMap<String, Rc<Vec<Rc<Node>>>>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            primes: PrimeCache::new(),
            eval_cache: FxHashMap::default(),
            derive_cache: FxHashMap::default(),
        }
    }

    /// Parse a formula and enumerate the trees equivalent to it.
    pub fn generate_trees(&mut self, formula: &str) -> Result<Vec<Rc<Node>>, FormulaError> {
        let tree = generate_tree(formula)?;
        Ok(self.derive_tree(&tree))
    }

    /// Number of primes cached so far.
    pub fn cached_primes(&self) -> usize {
        self.primes.len()
    }

    /// Number of tree ids with a memoized evaluation.
    pub fn evaluated_trees(&self) -> usize {
        self.eval_cache.len()
    }

    /// Number of tree ids bound to a derivation class.
    pub fn derived_classes(&self) -> usize {
        self.derive_cache.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
