use crisp_core::test_utils::TestContext;
use crisp_core::{CrispError, Expression, Proposition, Rule};
use proptest::prelude::*;

#[test]
fn single_proposition_rule_loads() {
    let ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();

    assert!(rule.is_loaded());
    assert_eq!(rule.weight(), 1.0);
    assert_eq!(
        rule.antecedent().root().unwrap(),
        &Expression::proposition(Proposition::new("x", "cold"))
    );
    assert_eq!(rule.consequent().conclusions().len(), 1);
    assert_eq!(
        rule.consequent().conclusions()[0].proposition,
        Proposition::new("y", "high")
    );
}

#[test]
fn weighted_conjunction_rule_loads() {
    let ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold and x is windy then y is high with 0.8", &ctx).unwrap();

    assert_eq!(rule.weight(), 0.8);
    let expected = Expression::and(
        Expression::proposition(Proposition::new("x", "cold")),
        Expression::proposition(Proposition::new("x", "windy")),
    );
    assert_eq!(rule.antecedent().root().unwrap(), &expected);
}

#[test]
fn rule_without_if_keyword_is_rejected() {
    let ctx = TestContext::weather();
    let err = Rule::parse("y is high", &ctx).unwrap_err();
    assert!(matches!(err, CrispError::Syntax { .. }));
    assert!(err.to_string().contains("expected keyword <if>"));
}

#[test]
fn rule_with_non_numeric_weight_is_rejected() {
    let ctx = TestContext::weather();
    let err = Rule::parse("if x is cold then y is high with fast", &ctx).unwrap_err();
    assert!(matches!(err, CrispError::Syntax { .. }));
    assert!(err.to_string().contains("numeric weight"));
}

#[test]
fn failed_load_leaves_the_rule_fully_unloaded() {
    let ctx = TestContext::weather();
    let mut rule = Rule::parse("if x is cold then y is high with 0.8", &ctx).unwrap();

    // The antecedent parses; the consequent fails to resolve. Nothing of
    // the previous load may survive.
    let err = rule.load("if x is cold then y is sunny", &ctx).unwrap_err();
    assert!(matches!(err, CrispError::Semantic { .. }));
    assert!(!rule.is_loaded());
    assert!(!rule.antecedent().is_loaded());
    assert!(!rule.consequent().is_loaded());
    assert_eq!(rule.weight(), 1.0);

    // The failed text is retained for error reporting.
    assert_eq!(rule.text(), "if x is cold then y is sunny");
}

#[test]
fn reloading_the_same_text_is_idempotent() {
    let ctx = TestContext::weather();
    let text = "if x is cold or not x is windy then y is high and z is low with 0.5";
    let mut rule = Rule::parse(text, &ctx).unwrap();
    let first_root = rule.antecedent().root().unwrap().clone();
    let first_conclusions = rule.consequent().conclusions().to_vec();

    rule.load(text, &ctx).unwrap();
    assert_eq!(rule.antecedent().root().unwrap(), &first_root);
    assert_eq!(rule.consequent().conclusions(), first_conclusions.as_slice());
    assert_eq!(rule.weight(), 0.5);
}

#[test]
fn rendering_reloads_to_an_equal_tree() {
    let ctx = TestContext::weather();
    for text in [
        "if x is cold then y is high",
        "if x is very somewhat cold then y is high with 0.8",
        "if x is cold and x is windy or x is humid then y is high and z is low",
        "if x is cold and ( x is windy or x is humid ) then y is low",
        "if not ( x is cold or x is windy ) then z is high with 0.25",
    ] {
        let rule = Rule::parse(text, &ctx).unwrap();
        let reloaded = Rule::parse(&rule.to_string(), &ctx).unwrap();

        assert_eq!(
            reloaded.antecedent().root(),
            rule.antecedent().root(),
            "antecedent of <{text}> did not survive the round trip"
        );
        assert_eq!(
            reloaded.antecedent().root().map(Expression::propositions),
            rule.antecedent().root().map(Expression::propositions),
            "proposition order of <{text}> did not survive the round trip"
        );
        assert_eq!(
            reloaded.consequent().conclusions(),
            rule.consequent().conclusions(),
            "consequent of <{text}> did not survive the round trip"
        );
        assert_eq!(reloaded.weight(), rule.weight());
    }
}

#[test]
fn rendering_always_includes_the_weight_clause() {
    let ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold then y is high", &ctx).unwrap();
    assert_eq!(rule.to_string(), "if x is cold then y is high with 1.000");
}

#[test]
fn comments_do_not_reach_the_parser() {
    let ctx = TestContext::weather();
    let rule = Rule::parse("if x is cold then y is high # tuned 2019-03", &ctx).unwrap();
    assert!(rule.is_loaded());
    assert_eq!(rule.consequent().conclusions()[0].proposition.term, "high");
}

#[test]
fn unknown_identifiers_are_semantic_errors() {
    let ctx = TestContext::weather();

    let err = Rule::parse("if pressure is cold then y is high", &ctx).unwrap_err();
    assert!(matches!(err, CrispError::Semantic { .. }));

    let err = Rule::parse("if x is boiling then y is high", &ctx).unwrap_err();
    assert!(matches!(err, CrispError::Semantic { .. }));
}

proptest! {
    /// Weights rendered at three decimals survive a full render/reload
    /// cycle exactly.
    #[test]
    fn weight_round_trips_through_rendering(milli in 0u32..=10_000) {
        let weight = f64::from(milli) / 1000.0;
        let ctx = TestContext::weather();
        let text = format!("if x is cold then y is high with {weight:.3}");

        let rule = Rule::parse(&text, &ctx).unwrap();
        let reloaded = Rule::parse(&rule.to_string(), &ctx).unwrap();
        prop_assert_eq!(rule.weight(), reloaded.weight());
    }
}
