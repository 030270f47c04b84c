//! The comparison engine: structural containment, evaluation equality, and
//! the signed step count between two trees.

use std::cmp::Ordering;
use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::debug;

use stepwise_ast::Node;
use stepwise_math::MixedFraction;
use stepwise_parser::{generate_tree, FormulaError};

use crate::engine::Engine;

/// Above this operator count derivation branches explosively; comparison
/// degrades to evaluation.
pub const MAX_DERIVE_OPERATORS: usize = 4;

/// Structural containment by raw id substring search.
///
/// `Equal` for identical trees, `Greater` when `a` contains `b` as a
/// subtree signature, `Less` for the converse, `None` when unrelated.
pub fn judge_tree(a: &Node, b: &Node) -> Option<Ordering> {
    if a.id() == b.id() {
        Some(Ordering::Equal)
    } else if a.id().contains(b.id()) {
        Some(Ordering::Greater)
    } else if b.id().contains(a.id()) {
        Some(Ordering::Less)
    } else {
        None
    }
}

impl Engine {
    /// True when both trees evaluate to defined, equal values.
    pub fn judge_tree_eval_equals(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        match (self.eval_value(a), self.eval_value(b)) {
            (Some(x), Some(y)) => x.to_rational() == y.to_rational(),
            _ => false,
        }
    }

    /// Like [`Self::judge_tree_eval_equals`], but tuned for the rewrite
    /// searches: two *undefined* evaluations are compatible, and two
    /// valueless immediates (symbolic atoms) compare by lexeme. Only a
    /// demonstrable difference rejects.
    pub(crate) fn eval_compatible(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        let first_a = self.eval_tree(a).into_iter().next();
        let first_b = self.eval_tree(b).into_iter().next();
        match (first_a, first_b) {
            (None, None) => true,
            (Some(x), Some(y)) => {
                let vx = MixedFraction::parse(x.character(), &mut self.primes);
                let vy = MixedFraction::parse(y.character(), &mut self.primes);
                match (vx, vy) {
                    (Some(vx), Some(vy)) => {
                        vx.reduce(&mut self.primes).to_rational()
                            == vy.reduce(&mut self.primes).to_rational()
                    }
                    (None, None) => x.character() == y.character(),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Parse two formulas and compare their trees.
    pub fn compare_formulas(&mut self, a: &str, b: &str) -> Result<Option<i64>, FormulaError> {
        let left = generate_tree(a)?;
        let right = generate_tree(b)?;
        Ok(self.compare_trees(&left, &right))
    }

    /// Signed step count between two trees.
    ///
    /// Positive: `a` reduces to `b` in that many arithmetic steps;
    /// negative: the converse; zero: equal or related by rewrites alone;
    /// `None`: unrelated under this relation.
    pub fn compare_trees(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> Option<i64> {
        if a.id() == b.id() {
            return Some(0);
        }
        let (ka, kb) = (a.operator_count(), b.operator_count());
        if ka > MAX_DERIVE_OPERATORS || kb > MAX_DERIVE_OPERATORS {
            debug!(
                left = a.id(),
                right = b.id(),
                "operator count exceeds the derivation budget, comparing by evaluation"
            );
            return if self.judge_tree_eval_equals(a, b) {
                Some(ka as i64 - kb as i64)
            } else {
                None
            };
        }
        if ka < kb {
            return self
                .compare_trees_ordered(b, a, (kb - ka) as i64)
                .map(|steps| -steps);
        }
        self.compare_trees_ordered(a, b, (ka - kb) as i64)
    }

    /// `a` is the side with at least as many operators.
    fn compare_trees_ordered(&mut self, a: &Rc<Node>, b: &Rc<Node>, steps: i64) -> Option<i64> {
        if !self.eval_compatible(a, b) {
            return None;
        }
        let b = self.reduce_leaf_fractions(b);
        if a.id() == b.id() {
            return Some(0);
        }
        // related by rewrites alone: no arithmetic between them
        let class = self.derive_tree(a);
        if class.iter().any(|member| member.id() == b.id()) {
            return Some(0);
        }
        if self.collapse_search(a, &b, steps) {
            return Some(steps);
        }
        for member in class {
            if self.collapse_search(&member, &b, steps) {
                return Some(steps);
            }
        }
        None
    }

    /// Breadth-first collapse: from `start`, branch over every one-step
    /// reduction for `steps` levels and look for `target`'s id.
    fn collapse_search(&mut self, start: &Rc<Node>, target: &Rc<Node>, steps: i64) -> bool {
        let mut frontier = vec![start.clone()];
        for _ in 0..steps {
            let mut seen: FxHashSet<String> = FxHashSet::default();
            let mut next = Vec::new();
            for tree in &frontier {
                if let Some(variants) = self.collapse_deepest(tree) {
                    for variant in variants {
                        if seen.insert(variant.id().to_string()) {
                            next.push(variant);
                        }
                    }
                }
            }
            if next.is_empty() {
                return false;
            }
            frontier = next;
        }
        frontier.iter().any(|tree| tree.id() == target.id())
    }

    /// Rebuild the tree with every leaf fraction reduced in place; leaves
    /// that are not LaTeX fractions pass through untouched.
    pub fn reduce_leaf_fractions(&mut self, tree: &Rc<Node>) -> Rc<Node> {
        if tree.is_immediate() {
            if let Some(frac) = MixedFraction::parse_latex(tree.character()) {
                let reduced = frac.reduce(&mut self.primes);
                return Node::immediate(reduced.to_string());
            }
            return tree.clone();
        }
        let left = self.reduce_leaf_fractions(&tree.children()[0]);
        let right = self.reduce_leaf_fractions(&tree.children()[1]);
        if left.id() == tree.children()[0].id() && right.id() == tree.children()[1].id() {
            return tree.clone();
        }
        Node::operator(tree.op().unwrap_or('+'), left, right)
    }

    /// True iff reducing every leaf fraction leaves every id unchanged.
    pub fn judge_tree_denominator_reduced(&mut self, tree: &Rc<Node>) -> bool {
        self.reduce_leaf_fractions(tree).id() == tree.id()
    }

    /// The two trees are the same expression modulo the available
    /// rewrites, under the same evaluated value.
    pub fn is_relative_by_similarity(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        self.judge_similarity(a, b).score >= 1.0
    }

    /// The two trees relate under the signed step-count relation.
    pub fn is_relative_by_compare_trees(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        self.compare_trees(a, b).is_some()
    }

    /// The two trees evaluate to the same defined value.
    pub fn is_relative_by_eval(&mut self, a: &Rc<Node>, b: &Rc<Node>) -> bool {
        self.judge_tree_eval_equals(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_tree_containment() {
        let whole = generate_tree("1+2*3").unwrap();
        let part = generate_tree("2*3").unwrap();
        assert_eq!(judge_tree(&whole, &whole), Some(Ordering::Equal));
        assert_eq!(judge_tree(&whole, &part), Some(Ordering::Greater));
        assert_eq!(judge_tree(&part, &whole), Some(Ordering::Less));
        let other = generate_tree("4+5").unwrap();
        assert_eq!(judge_tree(&whole, &other), None);
    }

    #[test]
    fn eval_equality_needs_defined_values() {
        let mut engine = Engine::new();
        let a = generate_tree("1+1").unwrap();
        let b = generate_tree("2").unwrap();
        assert!(engine.judge_tree_eval_equals(&a, &b));

        let x = generate_tree("a+b").unwrap();
        let y = generate_tree("a+b").unwrap();
        assert!(!engine.judge_tree_eval_equals(&x, &y));
    }

    #[test]
    fn denominator_reduction_judgement() {
        let mut engine = Engine::new();
        let unreduced = generate_tree("\\frac{2}{4}+1").unwrap();
        assert!(!engine.judge_tree_denominator_reduced(&unreduced));
        let reduced = generate_tree("\\frac{1}{2}+1").unwrap();
        assert!(engine.judge_tree_denominator_reduced(&reduced));
    }
}
