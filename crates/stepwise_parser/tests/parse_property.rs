//! Parser properties over generated formulas.

use proptest::prelude::*;
use stepwise_parser::generate_tree;

/// Fully parenthesized formulas over integers, decimals, fractions, and
/// atoms, so the generated text pins one unambiguous tree.
fn arb_formula() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        (0i64..100).prop_map(|n| n.to_string()),
        (0i64..20, 1i64..10).prop_map(|(w, f)| format!("{w}.{f}")),
        (1i64..20, 1i64..20).prop_map(|(n, d)| format!("\\frac{{{n}}}{{{d}}}")),
        (2i64..9, 1i64..9, 2i64..9).prop_map(|(i, n, d)| format!("{i}\\frac{{{n}}}{{{d}}}")),
        "[a-z]{1,3}",
    ];
    leaf.prop_recursive(3, 16, 2, |inner| {
        (
            inner.clone(),
            prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')],
            inner,
        )
            .prop_map(|(a, op, b)| format!("({a}{op}{b})"))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_formulas_parse(formula in arb_formula()) {
        prop_assert!(generate_tree(&formula).is_ok(), "failed on {}", formula);
    }

    #[test]
    fn whitespace_around_operators_is_insignificant(formula in arb_formula()) {
        let plain = generate_tree(&formula).unwrap();
        // pad every operator and round bracket; lexemes stay contiguous
        let spaced: String = formula
            .chars()
            .flat_map(|c| {
                if "+-*/()".contains(c) {
                    vec![' ', c, ' ']
                } else {
                    vec![c]
                }
            })
            .collect();
        let respaced = generate_tree(&spaced).unwrap();
        prop_assert_eq!(plain.id(), respaced.id());
    }

    #[test]
    fn bracket_families_are_interchangeable(formula in arb_formula()) {
        let round = generate_tree(&formula).unwrap();
        let square: String = formula
            .chars()
            .map(|c| match c {
                '(' => '[',
                ')' => ']',
                other => other,
            })
            .collect();
        let squared = generate_tree(&square).unwrap();
        prop_assert_eq!(round.id(), squared.id());
    }
}
