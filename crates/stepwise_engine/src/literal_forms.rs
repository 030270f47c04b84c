//! Equivalent rewritings of a single literal.

use std::rc::Rc;

use stepwise_ast::Node;
use stepwise_math::MixedFraction;

use crate::engine::Engine;

/// Terminating decimals are only emitted up to this many fractional digits.
const DECIMAL_DIGIT_LIMIT: u32 = 10;

fn push_form(forms: &mut Vec<Rc<Node>>, node: Rc<Node>) {
    if forms.iter().all(|f| f.id() != node.id()) {
        forms.push(node);
    }
}

impl Engine {
    /// Every canonically-equivalent rewriting of a literal, the original
    /// first: the reduced mixed form, the improper form, an explicit
    /// integer-plus-fraction tree when there is a whole part, and a
    /// terminating decimal when the denominator divides cleanly.
    ///
    /// A lexeme with no value (a symbolic atom) has only itself.
    pub fn literal_forms(&mut self, literal: &Rc<Node>) -> Vec<Rc<Node>> {
        let mut forms = vec![literal.clone()];
        let value = match MixedFraction::parse(literal.character(), &mut self.primes) {
            Some(v) => v,
            None => return forms,
        };
        let reduced = value.reduce(&mut self.primes);

        push_form(&mut forms, Node::immediate(reduced.to_string()));
        push_form(&mut forms, Node::immediate(reduced.to_improper().to_string()));
        if reduced.int_part() != 0 && !reduced.is_integer() {
            let whole = Node::immediate(reduced.int_part().to_string());
            let frac = Node::immediate(
                MixedFraction::new(0, reduced.numer(), reduced.denom()).to_string(),
            );
            push_form(&mut forms, Node::operator('+', whole, frac));
        }
        if let Some(decimal) = reduced.to_decimal_string(DECIMAL_DIGIT_LIMIT) {
            push_form(&mut forms, Node::immediate(decimal));
        }
        forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_atom_has_only_itself() {
        let mut engine = Engine::new();
        let atom = Node::immediate("x");
        let forms = engine.literal_forms(&atom);
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].id(), "x");
    }

    #[test]
    fn unreduced_fraction_gains_reduced_and_decimal_forms() {
        let mut engine = Engine::new();
        let forms = engine.literal_forms(&Node::immediate("\\frac{2}{4}"));
        let ids: Vec<&str> = forms.iter().map(|f| f.id()).collect();
        assert_eq!(ids[0], "\\frac{2}{4}");
        assert!(ids.contains(&"\\frac{1}{2}"));
        assert!(ids.contains(&"0.5"));
    }

    #[test]
    fn mixed_value_gains_improper_and_sum_forms() {
        let mut engine = Engine::new();
        let forms = engine.literal_forms(&Node::immediate("\\frac{7}{3}"));
        let ids: Vec<&str> = forms.iter().map(|f| f.id()).collect();
        assert_eq!(ids[0], "\\frac{7}{3}");
        assert!(ids.contains(&"2\\frac{1}{3}"));
        // explicit whole-plus-fraction operator tree
        assert!(ids.contains(&"2|\\frac{1}{3}+"));
        // 7/3 has no terminating decimal
        assert!(ids.iter().all(|id| !id.contains('.')));
    }

    #[test]
    fn integer_keeps_its_improper_spelling() {
        let mut engine = Engine::new();
        let forms = engine.literal_forms(&Node::immediate("3"));
        let ids: Vec<&str> = forms.iter().map(|f| f.id()).collect();
        assert_eq!(ids, vec!["3", "\\frac{3}{1}"]);
    }
}
