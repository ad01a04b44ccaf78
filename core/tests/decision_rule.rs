use campaign_core::{
    decision::{DecisionRule, DEFAULT_THRESHOLD},
    types::Label,
};

#[test]
fn default_threshold_is_the_calibrated_operating_point() {
    assert_eq!(DEFAULT_THRESHOLD, 0.305);
    assert_eq!(DecisionRule::default().threshold, 0.305);
}

/// p == threshold is positive.
#[test]
fn boundary_probability_is_labelled_positive() {
    let rule = DecisionRule::default();
    assert_eq!(rule.decide(0.305), Label::WillJoin);
}

#[test]
fn label_is_one_iff_probability_reaches_threshold() {
    let rule = DecisionRule::default();

    for (p, expected) in [
        (0.0, 0),
        (0.3, 0),
        (0.304_999_999, 0),
        (0.305, 1),
        (0.5, 1),
        (1.0, 1),
    ] {
        assert_eq!(rule.decide(p).as_int(), expected, "p={p}");
    }
}

#[test]
fn custom_threshold_is_honoured() {
    let rule = DecisionRule::new(0.5);
    assert_eq!(rule.decide(0.305), Label::WillNotJoin);
    assert_eq!(rule.decide(0.5), Label::WillJoin);
}
