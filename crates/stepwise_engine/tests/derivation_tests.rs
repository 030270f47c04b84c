//! Derivation-class invariants: reflexivity, closure, and the individual
//! rewrite families seen through the public enumeration.

use rustc_hash::FxHashSet;
use stepwise_engine::{generate_tree, Engine};

fn ids(engine: &mut Engine, formula: &str) -> Vec<String> {
    let tree = generate_tree(formula).unwrap();
    engine
        .derive_tree(&tree)
        .iter()
        .map(|n| n.id().to_string())
        .collect()
}

#[test]
fn every_tree_derives_itself() {
    let mut engine = Engine::new();
    for formula in ["7", "x", "1+2", "(a+b)*c", "\\frac{2}{4}", "a-b/c"] {
        let tree = generate_tree(formula).unwrap();
        let class = engine.derive_tree(&tree);
        assert!(
            class.iter().any(|n| n.id() == tree.id()),
            "{formula} missing from its own class"
        );
    }
}

#[test]
fn classes_are_closed_under_membership() {
    let mut engine = Engine::new();
    for formula in ["2+3", "(a+b)*c", "x+x"] {
        let tree = generate_tree(formula).unwrap();
        let class = engine.derive_tree(&tree);
        let expected: FxHashSet<String> = class.iter().map(|n| n.id().to_string()).collect();
        for member in &class {
            let through_member: FxHashSet<String> = engine
                .derive_tree(member)
                .iter()
                .map(|n| n.id().to_string())
                .collect();
            assert_eq!(
                expected,
                through_member,
                "{formula}: entering through {} yields a different class",
                member.id()
            );
        }
    }
}

#[test]
fn classes_do_not_mix_values() {
    let mut engine = Engine::new();
    // every member of a constant class evaluates to the same value
    let tree = generate_tree("\\frac{1}{2}+\\frac{1}{4}").unwrap();
    let reference = engine.eval_tree(&tree)[0].character().to_string();
    for member in engine.derive_tree(&tree) {
        let value = engine.eval_tree(&member);
        assert!(
            !value.is_empty(),
            "member {} lost its value",
            member.id()
        );
        assert_eq!(
            value[0].character(),
            reference,
            "member {} changed value",
            member.id()
        );
    }
}

#[test]
fn commutation_association_and_distribution_appear() {
    let mut engine = Engine::new();
    let class = ids(&mut engine, "(1+2)+3");
    assert!(class.contains(&"3|1|2++".to_string()), "commuted root");
    assert!(class.contains(&"1|2|3++".to_string()), "associated");

    let class = ids(&mut engine, "(a+b)*c");
    assert!(class.contains(&"a|c*|b|c*+".to_string()), "distributed");
    assert!(class.contains(&"c|a|b+*".to_string()), "commuted");
}

#[test]
fn division_association_flips_polarity() {
    let mut engine = Engine::new();
    // (8/4)/2 associates to 8/(4*2)
    let class = ids(&mut engine, "8/4/2");
    assert!(class.contains(&"8|4|2*/".to_string()));
}

#[test]
fn subtraction_association_flips_polarity() {
    let mut engine = Engine::new();
    // (9-3)-2 associates to 9-(3+2)
    let class = ids(&mut engine, "9-3-2");
    assert!(class.contains(&"9|3|2+-".to_string()));
}

#[test]
fn literal_spellings_join_the_class() {
    let mut engine = Engine::new();
    let class = ids(&mut engine, "\\frac{6}{4}+1");
    assert!(class.contains(&"1\\frac{1}{2}|1+".to_string()), "reduced mixed");
    assert!(class.contains(&"\\frac{3}{2}|1+".to_string()), "improper");
    assert!(class.contains(&"1.5|1+".to_string()), "decimal");
}

#[test]
fn the_cache_reuses_whole_classes() {
    let mut engine = Engine::new();
    engine.generate_trees("2+3").unwrap();
    let classes = engine.derived_classes();
    // a member of the same class is a cache hit, not a new computation
    engine.generate_trees("3+2").unwrap();
    assert_eq!(engine.derived_classes(), classes);
}
