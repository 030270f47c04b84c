//! Structural similarity: a fast "same expression modulo the available
//! rewrites, under the same evaluated value" predicate.

use std::rc::Rc;

use rustc_hash::FxHashSet;

use stepwise_ast::{op, Node};

use crate::derive::{commuted_forms, distributed_forms};
use crate::engine::Engine;

/// Result of a similarity judgement: a score in `[0, 1]` and the rewriting
/// of the target that achieved it (the target itself when no rewrite was
/// needed).
#[derive(Debug, Clone)]
pub struct Similarity {
    pub score: f64,
    pub derive_target: Rc<Node>,
}

impl Similarity {
    fn new(score: f64, derive_target: &Rc<Node>) -> Self {
        Self {
            score,
            derive_target: derive_target.clone(),
        }
    }
}

impl Engine {
    /// Score how closely `target` matches `template` under commutation,
    /// association, and distribution, child-wise. `1.0` means the two are
    /// the same expression modulo those rewrites.
    pub fn judge_similarity(&mut self, target: &Rc<Node>, template: &Rc<Node>) -> Similarity {
        let mut visited: FxHashSet<(String, String)> = FxHashSet::default();
        self.similarity_search(target, template, &mut visited)
    }

    /// Commutation and association are self-inverse, so the search carries
    /// a visited set of (target, template) pairs; a revisited pair
    /// contributes nothing new.
    fn similarity_search(
        &mut self,
        target: &Rc<Node>,
        template: &Rc<Node>,
        visited: &mut FxHashSet<(String, String)>,
    ) -> Similarity {
        if !self.eval_compatible(target, template) {
            return Similarity::new(0.0, target);
        }
        if target.id().contains(template.id()) || template.id().contains(target.id()) {
            return Similarity::new(1.0, target);
        }
        if target.is_immediate() || template.is_immediate() {
            return Similarity::new(1.0, target);
        }
        if target.operator_count() < template.operator_count() {
            return self.similarity_search(template, target, visited);
        }
        if !visited.insert((target.id().to_string(), template.id().to_string())) {
            return Similarity::new(0.0, target);
        }

        let left = self
            .similarity_search(&target.children()[0], &template.children()[0], visited)
            .score;
        let right = self
            .similarity_search(&target.children()[1], &template.children()[1], visited)
            .score;
        let mut best = Similarity::new((left + right) / 2.0, target);
        if best.score >= 1.0 {
            return best;
        }

        let same_priority = match (target.op(), template.op()) {
            (Some(a), Some(b)) => op::priority(a).ok() == op::priority(b).ok(),
            _ => false,
        };
        let mut branches: Vec<Rc<Node>> = Vec::new();
        if same_priority {
            branches.extend(commuted_forms(target).into_iter().skip(1));
            branches.extend(self.associated_forms(target).into_iter().skip(1));
        } else {
            // both distribution directions, not only forward: the target is
            // the side with more operators, so a sum-rooted target facing a
            // product-rooted template only aligns by factoring, and the
            // score has to agree with the zero-step compare relation there
            branches.extend(distributed_forms(target).into_iter().skip(1));
        }
        for branch in branches {
            let candidate = self.similarity_search(&branch, template, visited);
            if candidate.score > best.score {
                best = Similarity::new(candidate.score, &branch);
            }
            if best.score >= 1.0 {
                break;
            }
        }
        best
    }
}
