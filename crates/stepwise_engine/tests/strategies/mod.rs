//! Proptest strategies for generated formulas.

use proptest::prelude::*;

/// A small constant expression together with its exact value and operator
/// count. Only `+` and `*` are generated so every value stays a positive
/// integer (the surface grammar has no unary minus to spell a negative
/// reference value with).
#[derive(Debug, Clone)]
pub enum Ast {
    Leaf(i64),
    Node(char, Box<Ast>, Box<Ast>),
}

impl Ast {
    pub fn formula(&self) -> String {
        match self {
            Ast::Leaf(n) => n.to_string(),
            Ast::Node(op, a, b) => format!("({}{}{})", a.formula(), op, b.formula()),
        }
    }

    pub fn value(&self) -> i64 {
        match self {
            Ast::Leaf(n) => *n,
            Ast::Node('+', a, b) => a.value() + b.value(),
            Ast::Node(_, a, b) => a.value() * b.value(),
        }
    }

    pub fn operator_count(&self) -> usize {
        match self {
            Ast::Leaf(_) => 0,
            Ast::Node(_, a, b) => 1 + a.operator_count() + b.operator_count(),
        }
    }
}

/// Constant expressions with at most three operators.
pub fn arb_ast() -> impl Strategy<Value = Ast> {
    let leaf = (1i64..=9).prop_map(Ast::Leaf);
    leaf.prop_recursive(2, 8, 2, |inner| {
        (
            inner.clone(),
            prop_oneof![Just('+'), Just('*')],
            inner,
        )
            .prop_map(|(a, op, b)| Ast::Node(op, Box::new(a), Box::new(b)))
    })
}
