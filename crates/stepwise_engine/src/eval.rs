//! Constant evaluation: collapse the deepest constant-only operator, one
//! arithmetic step at a time, until a single immediate remains.

use std::rc::Rc;

use stepwise_ast::Node;
use stepwise_math::MixedFraction;

use crate::engine::Engine;

/// Path (child indices) of the deepest operator whose children are both
/// immediates. Ties resolve to the first such node in preorder.
fn deepest_constant_site(
    node: &Rc<Node>,
    depth: usize,
    path: &mut Vec<usize>,
    best: &mut Option<(usize, Vec<usize>)>,
) {
    if !node.is_operator() {
        return;
    }
    if node.children().iter().all(|c| c.is_immediate())
        && best.as_ref().map_or(true, |(d, _)| depth > *d)
    {
        *best = Some((depth, path.clone()));
    }
    for (index, child) in node.children().iter().enumerate() {
        path.push(index);
        deepest_constant_site(child, depth + 1, path, best);
        path.pop();
    }
}

/// Rebuild `tree` with the node at `path` replaced; ancestors get fresh ids
/// by construction, untouched siblings are shared.
fn replace_at(tree: &Rc<Node>, path: &[usize], replacement: Rc<Node>) -> Rc<Node> {
    match path.split_first() {
        None => replacement,
        Some((&index, rest)) => {
            tree.with_child(index, replace_at(&tree.children()[index], rest, replacement))
        }
    }
}

impl Engine {
    /// One arithmetic reduction of the deepest constant-only operator,
    /// branched over every admissible spelling of the collapsed value.
    /// `None` when no such site exists or an operand has no value.
    pub(crate) fn collapse_deepest(&mut self, tree: &Rc<Node>) -> Option<Vec<Rc<Node>>> {
        let mut best = None;
        deepest_constant_site(tree, 0, &mut Vec::new(), &mut best);
        let (_, path) = best?;

        let mut site = tree;
        for &index in &path {
            site = &site.children()[index];
        }
        let glyph = site.op()?;
        let left = site.children()[0].clone();
        let right = site.children()[1].clone();
        let value = self.eval_node(&left, &right, glyph)?;

        let literal = Node::immediate(value.to_string());
        let spellings = self.literal_forms(&literal);
        Some(
            spellings
                .into_iter()
                .map(|s| replace_at(tree, &path, s))
                .collect(),
        )
    }

    /// Mixed-fraction arithmetic over two literal operands. A symbolic atom
    /// or a division by zero yields no value.
    pub(crate) fn eval_node(
        &mut self,
        left: &Rc<Node>,
        right: &Rc<Node>,
        glyph: char,
    ) -> Option<MixedFraction> {
        let a = MixedFraction::parse(left.character(), &mut self.primes)?;
        let b = MixedFraction::parse(right.character(), &mut self.primes)?;
        match glyph {
            '+' => Some(a.add(b, &mut self.primes)),
            '-' => Some(a.sub(b, &mut self.primes)),
            '*' => Some(a.mul(b, &mut self.primes)),
            '/' => a.div(b, &mut self.primes).ok(),
            _ => None,
        }
    }

    /// Evaluate a tree to its list of immediate spellings, memoized on the
    /// tree id. An empty list means the tree has no value (it contains a
    /// symbolic atom, or divides by zero).
    pub fn eval_tree(&mut self, tree: &Rc<Node>) -> Vec<Rc<Node>> {
        if let Some(hit) = self.eval_cache.get(tree.id()) {
            return hit.clone();
        }
        let out = self.eval_tree_uncached(tree);
        self.eval_cache.insert(tree.id().to_string(), out.clone());
        out
    }

    fn eval_tree_uncached(&mut self, tree: &Rc<Node>) -> Vec<Rc<Node>> {
        if tree.is_immediate() {
            return vec![tree.clone()];
        }
        let mut variants = match self.collapse_deepest(tree) {
            Some(v) => v,
            None => return Vec::new(),
        };
        // follow the head until it bottoms out in an immediate
        loop {
            let head = match variants.first() {
                Some(h) => h.clone(),
                None => return Vec::new(),
            };
            if head.is_immediate() {
                break;
            }
            variants = match self.collapse_deepest(&head) {
                Some(v) => v,
                None => return Vec::new(),
            };
        }
        variants.retain(|n| n.is_immediate());
        variants
    }

    /// The evaluated value of a tree: the first immediate, parsed and
    /// reduced.
    pub(crate) fn eval_value(&mut self, tree: &Rc<Node>) -> Option<MixedFraction> {
        let first = self
            .eval_tree(tree)
            .into_iter()
            .find(|n| n.is_immediate())?;
        let value = MixedFraction::parse(first.character(), &mut self.primes)?;
        Some(value.reduce(&mut self.primes))
    }
}
