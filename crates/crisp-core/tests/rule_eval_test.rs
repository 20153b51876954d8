use crisp_core::norm::snorm::{AlgebraicSum, Maximum};
use crisp_core::norm::tnorm::{AlgebraicProduct, Minimum};
use crisp_core::test_utils::TestContext;
use crisp_core::{Complexity, CrispError, Rule};

#[test]
fn activation_degree_is_the_membership_of_a_single_proposition() {
    let ctx = TestContext::weather();
    ctx.set_input("x", 8.0); // membership(cold) = 0.6
    let rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();

    let degree = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap();
    assert_eq!(degree, 0.6);
}

#[test]
fn activation_forwards_the_degree_to_the_output_sink() {
    let ctx = TestContext::weather();
    ctx.set_input("x", 8.0);
    let mut rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();

    let degree = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap();
    rule.activate(&ctx, degree, Some(&Minimum)).unwrap();

    assert!(rule.is_activated());
    assert_eq!(rule.activation_degree(), 0.6);
    assert_eq!(ctx.accumulated("y"), vec![("high".to_string(), 0.6)]);
}

#[test]
fn rule_weight_scales_the_activation_degree() {
    let ctx = TestContext::weather();
    ctx.set_input("x", 8.0);
    let rule = Rule::parse("if x is cold then y is high with 0.5", &ctx).unwrap();

    let degree = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap();
    assert!((degree - 0.3).abs() < 1e-9);
}

#[test]
fn conjunction_and_disjunction_evaluate_in_token_order() {
    let ctx = TestContext::weather();
    ctx.set_input("x", 8.0); // cold 0.6, windy 0.8, humid 0.4

    // ((0.6 * 0.8) + 0.4 - (0.48 * 0.4)) under product/probabilistic-sum
    let flat = Rule::parse("if x is cold and x is windy or x is humid then y is high", &ctx)
        .unwrap()
        .compute_activation_degree(&ctx, Some(&AlgebraicProduct), Some(&AlgebraicSum))
        .unwrap();
    assert!((flat - 0.688).abs() < 1e-9);

    // 0.6 * (0.8 + 0.4 - 0.32) with the grouping made explicit
    let grouped =
        Rule::parse("if x is cold and ( x is windy or x is humid ) then y is high", &ctx)
            .unwrap()
            .compute_activation_degree(&ctx, Some(&AlgebraicProduct), Some(&AlgebraicSum))
            .unwrap();
    assert!((grouped - 0.528).abs() < 1e-9);
}

#[test]
fn hedged_propositions_transform_the_membership() {
    let ctx = TestContext::weather();
    ctx.set_input("x", 8.0);
    let rule = Rule::parse("if x is very cold then y is high", &ctx).unwrap();

    let degree = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap();
    assert!((degree - 0.36).abs() < 1e-9);
}

#[test]
fn evaluation_on_an_unloaded_rule_fails() {
    let ctx = TestContext::weather();
    let mut rule = Rule::new();

    let err = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap_err();
    assert!(matches!(err, CrispError::Evaluation { .. }));

    let err = rule.activate(&ctx, 0.5, Some(&Minimum)).unwrap_err();
    assert!(matches!(err, CrispError::Evaluation { .. }));
}

#[test]
fn zero_degree_activation_fires_without_contributing() {
    let ctx = TestContext::weather();
    let mut rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();

    rule.activate(&ctx, 0.0, Some(&Minimum)).unwrap();

    assert!(rule.is_activated());
    assert_eq!(rule.activation_degree(), 0.0);
    assert!(ctx.accumulated("y").is_empty());
}

#[test]
fn deactivation_preserves_the_loaded_trees() {
    let ctx = TestContext::weather();
    let mut rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();
    rule.activate(&ctx, 0.6, Some(&Minimum)).unwrap();

    rule.deactivate();

    assert!(!rule.is_activated());
    assert_eq!(rule.activation_degree(), 0.0);
    assert!(rule.is_loaded());
}

#[test]
fn vanished_variables_are_detected_on_evaluation() {
    let mut ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();

    ctx.remove_variable("x");

    let err = rule
        .compute_activation_degree(&ctx, Some(&Minimum), Some(&Maximum))
        .unwrap_err();
    assert!(matches!(err, CrispError::Semantic { .. }));
}

#[test]
fn complexity_counts_both_evaluation_paths() {
    let ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold and x is windy then y is high", &ctx).unwrap();

    // degree path: loaded check + weight multiply + (2 propositions, 1 and)
    assert_eq!(
        rule.complexity_of_activation_degree(),
        Complexity::new().comparison(3).arithmetic(2)
    );
    // activation path: 2 checks + one clause (weight scale + implication)
    assert_eq!(
        rule.complexity_of_activation(),
        Complexity::new().comparison(2).arithmetic(2)
    );
    assert_eq!(rule.complexity(), Complexity::new().comparison(5).arithmetic(4));
}

#[test]
fn unloaded_rules_still_estimate_their_fixed_overhead() {
    let rule = Rule::new();
    assert_eq!(rule.complexity(), Complexity::new().comparison(3).arithmetic(1));
}

#[test]
fn shared_norms_evaluate_concurrently() {
    use std::sync::Arc;
    use std::thread;

    let conjunction = Arc::new(Minimum);
    let disjunction = Arc::new(Maximum);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let conjunction = Arc::clone(&conjunction);
            let disjunction = Arc::clone(&disjunction);
            thread::spawn(move || {
                let ctx = TestContext::weather();
                ctx.set_input("x", 8.0);
                let rule =
                    Rule::parse("if x is cold and x is windy then y is high", &ctx).unwrap();
                rule.compute_activation_degree(
                    &ctx,
                    Some(conjunction.as_ref()),
                    Some(disjunction.as_ref()),
                )
                .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0.6);
    }
}
