//! Enumeration of equivalent trees under commutation, association,
//! distribution (both directions), doubling, and literal re-expression.
//!
//! Each rewrite returns a list whose head is the input and whose tail is
//! the new equivalents. `derive_tree` runs the rewrites in a fixed staged
//! order, de-duplicating by id after every stage, and memoizes the final
//! class in the derive cache under the id of every member. The seed entry
//! is installed *before* any recursion: commutation and association are
//! self-inverse, and the partial entry is what breaks the cycle.

use std::rc::Rc;

use rustc_hash::FxHashSet;
use tracing::debug;

use stepwise_ast::{op, Node};

use crate::engine::Engine;

/// `a ∘ b → b ∘ a` for the commutative operators.
pub(crate) fn commuted_forms(tree: &Rc<Node>) -> Vec<Rc<Node>> {
    let mut out = vec![tree.clone()];
    if let Some(glyph) = tree.op() {
        if glyph == '+' || glyph == '*' {
            out.push(Node::operator(
                glyph,
                tree.children()[1].clone(),
                tree.children()[0].clone(),
            ));
        }
    }
    out
}

/// `a + a → a * 2`, when both operands share one id.
pub(crate) fn doubled_form(tree: &Rc<Node>) -> Option<Rc<Node>> {
    if tree.op() == Some('+') && tree.children()[0].id() == tree.children()[1].id() {
        return Some(Node::operator(
            '*',
            tree.children()[0].clone(),
            Node::immediate("2"),
        ));
    }
    None
}

/// Forward distribution of `*` and `/` over a `+`/`-` child:
/// `(u ± v) ∘ w → (u ∘ w) ± (v ∘ w)`. A sum on the right of a division
/// stays put, since division does not distribute over it.
pub(crate) fn forward_distributed(tree: &Rc<Node>) -> Vec<Rc<Node>> {
    let mut out = Vec::new();
    let Some(glyph) = tree.op() else { return out };
    if glyph != '*' && glyph != '/' {
        return out;
    }
    for index in 0..2 {
        if glyph == '/' && index == 1 {
            continue;
        }
        let child = &tree.children()[index];
        let Some(sum_glyph) = child.op() else { continue };
        if sum_glyph != '+' && sum_glyph != '-' {
            continue;
        }
        let u = child.children()[0].clone();
        let v = child.children()[1].clone();
        let other = tree.children()[1 - index].clone();
        let distributed = if index == 0 {
            Node::operator(
                sum_glyph,
                Node::operator(glyph, u, other.clone()),
                Node::operator(glyph, v, other),
            )
        } else {
            Node::operator(
                sum_glyph,
                Node::operator(glyph, other.clone(), u),
                Node::operator(glyph, other, v),
            )
        };
        out.push(distributed);
    }
    out
}

/// Factor a shared operand out of `(a ∘ b) ± (a ∘ c)` when both sides
/// carry it at the same child index. For `*` either index works; for `/`
/// only a shared denominator factors out (`b/a ± c/a → (b ± c)/a`).
fn factored_forms(tree: &Rc<Node>) -> Vec<Rc<Node>> {
    let mut out = Vec::new();
    let Some(sum_glyph) = tree.op() else { return out };
    let left = &tree.children()[0];
    let right = &tree.children()[1];
    let (Some(left_glyph), Some(right_glyph)) = (left.op(), right.op()) else {
        return out;
    };
    if left_glyph != right_glyph || (left_glyph != '*' && left_glyph != '/') {
        return out;
    }
    for index in 0..2 {
        if left_glyph == '/' && index == 0 {
            continue;
        }
        if left.children()[index].id() != right.children()[index].id() {
            continue;
        }
        let shared = left.children()[index].clone();
        let rest = Node::operator(
            sum_glyph,
            left.children()[1 - index].clone(),
            right.children()[1 - index].clone(),
        );
        let factored = if index == 0 {
            Node::operator(left_glyph, shared, rest)
        } else {
            Node::operator(left_glyph, rest, shared)
        };
        out.push(factored);
    }
    out
}

/// Reverse distribution over a `+`/`-` root: shared-operand factoring,
/// plus the bare-factor widening `a ± a*x → a*1 ± a*x` (one level deep).
pub(crate) fn reverse_distributed(tree: &Rc<Node>) -> Vec<Rc<Node>> {
    let Some(sum_glyph) = tree.op() else {
        return Vec::new();
    };
    if sum_glyph != '+' && sum_glyph != '-' {
        return Vec::new();
    }
    let mut out = factored_forms(tree);

    for bare_index in 0..2 {
        let bare = &tree.children()[bare_index];
        let other = &tree.children()[1 - bare_index];
        if other.op() != Some('*') {
            continue;
        }
        for index in 0..2 {
            if other.children()[index].id() != bare.id() {
                continue;
            }
            let one = Node::immediate("1");
            let synthesized = if index == 0 {
                Node::operator('*', bare.clone(), one)
            } else {
                Node::operator('*', one, bare.clone())
            };
            let widened = if bare_index == 0 {
                Node::operator(sum_glyph, synthesized, other.clone())
            } else {
                Node::operator(sum_glyph, other.clone(), synthesized)
            };
            out.extend(factored_forms(&widened));
        }
    }
    out
}

/// Both distribution directions in one pass, head first.
pub(crate) fn distributed_forms(tree: &Rc<Node>) -> Vec<Rc<Node>> {
    let mut out = vec![tree.clone()];
    out.extend(forward_distributed(tree));
    out.extend(reverse_distributed(tree));
    out
}

impl Engine {
    /// Rotations between a node and a child of equal priority, with the
    /// polarity flips subtraction and division require:
    ///
    /// ```text
    /// (u ∘ v) ⋆ w → u ∘ (v ⋆' w)    (⋆' toggled when ∘ is - or /)
    /// w ⋆ (u ∘ v) → (w ⋆ u) ∘' v    (∘' toggled when ⋆ is - or /)
    /// ```
    ///
    /// Each rotation is also probed for a doubled operand on either side,
    /// and those variants expand through the full derivation.
    pub(crate) fn associated_forms(&mut self, tree: &Rc<Node>) -> Vec<Rc<Node>> {
        let mut out = vec![tree.clone()];
        let Some(parent_glyph) = tree.op() else { return out };
        let Ok(parent_priority) = op::priority(parent_glyph) else {
            return out;
        };
        for index in 0..2 {
            let child = tree.children()[index].clone();
            let Some(child_glyph) = child.op() else { continue };
            if op::priority(child_glyph) != Ok(parent_priority) {
                continue;
            }
            let u = child.children()[0].clone();
            let v = child.children()[1].clone();
            let rotated = if index == 0 {
                let other = tree.children()[1].clone();
                let inner_glyph = if op::is_negative(child_glyph) {
                    match op::toggle(parent_glyph) {
                        Ok(g) => g,
                        Err(_) => continue,
                    }
                } else {
                    parent_glyph
                };
                Node::operator(child_glyph, u, Node::operator(inner_glyph, v, other))
            } else {
                let other = tree.children()[0].clone();
                let root_glyph = if op::is_negative(parent_glyph) {
                    match op::toggle(child_glyph) {
                        Ok(g) => g,
                        Err(_) => continue,
                    }
                } else {
                    child_glyph
                };
                Node::operator(root_glyph, Node::operator(parent_glyph, other, u), v)
            };
            out.push(rotated.clone());
            for side in 0..2 {
                if let Some(doubled) = doubled_form(&rotated.children()[side]) {
                    let with_doubled = rotated.with_child(side, doubled);
                    out.extend(self.derive_tree(&with_doubled));
                }
            }
        }
        out
    }

    /// The equivalence class of `tree` under the rewrite rules, memoized.
    pub fn derive_tree(&mut self, tree: &Rc<Node>) -> Vec<Rc<Node>> {
        if let Some(class) = self.derive_cache.get(tree.id()) {
            return class.as_ref().clone();
        }
        if tree.is_immediate() {
            let forms = self.literal_forms(tree);
            self.install_class(&forms);
            return forms;
        }

        // seed before recursing, so self-referential rewrites terminate
        self.derive_cache
            .insert(tree.id().to_string(), Rc::new(vec![tree.clone()]));

        let mut class = vec![tree.clone()];
        self.expand_with(&mut class, |_, t| commuted_forms(t));
        self.expand_children(&mut class);
        self.expand_with(&mut class, |_, t| distributed_forms(t));
        self.expand_with(&mut class, |_, t| distributed_forms(t));
        self.expand_children(&mut class);
        self.expand_with(&mut class, Self::associated_forms);
        self.expand_with(&mut class, |_, t| {
            let mut forms = vec![t.clone()];
            forms.extend(doubled_form(t));
            forms
        });
        self.expand_children(&mut class);
        self.expand_with(&mut class, |_, t| commuted_forms(t));
        self.expand_children(&mut class);

        self.install_class(&class);
        debug!(root = tree.id(), members = class.len(), "derived equivalence class");
        class
    }

    /// Replace the class with the de-duplicated union of `rule` over its
    /// members. Rules keep their input at the head, so nothing is lost.
    fn expand_with<F>(&mut self, class: &mut Vec<Rc<Node>>, mut rule: F)
    where
        F: FnMut(&mut Self, &Rc<Node>) -> Vec<Rc<Node>>,
    {
        let snapshot = class.clone();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut merged = Vec::new();
        for tree in &snapshot {
            for derived in rule(self, tree) {
                if seen.insert(derived.id().to_string()) {
                    merged.push(derived);
                }
            }
        }
        *class = merged;
    }

    /// Derive every child and re-insert each variant into its parent.
    fn expand_children(&mut self, class: &mut Vec<Rc<Node>>) {
        let snapshot = class.clone();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut merged = Vec::new();
        for tree in &snapshot {
            if seen.insert(tree.id().to_string()) {
                merged.push(tree.clone());
            }
            if !tree.is_operator() {
                continue;
            }
            for index in 0..2 {
                let child = tree.children()[index].clone();
                for variant in self.derive_tree(&child) {
                    let rebuilt = tree.with_child(index, variant);
                    if seen.insert(rebuilt.id().to_string()) {
                        merged.push(rebuilt);
                    }
                }
            }
        }
        *class = merged;
    }

    /// Bind one shared vector to every member id, so any entry point into
    /// the class returns the same collection.
    fn install_class(&mut self, class: &[Rc<Node>]) {
        let shared = Rc::new(class.to_vec());
        for member in class {
            self.derive_cache
                .insert(member.id().to_string(), Rc::clone(&shared));
        }
    }
}
