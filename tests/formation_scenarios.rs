use formation_calc::{
    allocate, apportion, compute_final, format_export, normalize, Attribute, Nature, PerStat,
    RawWeights, SessionState,
};

#[test]
fn even_split_across_two_attributes() {
    let weights = RawWeights::from_array([50, 50, 0, 0, 0]).unwrap();
    let shares = normalize(&weights);
    assert_eq!(shares.as_stats().to_array(), [50.0, 50.0, 0.0, 0.0, 0.0]);

    let added = apportion(100, &shares);
    assert_eq!(added.to_array(), [50, 50, 0, 0, 0]);

    let totals = compute_final(&PerStat::default(), &added);
    assert_eq!(totals.to_array(), [50, 50, 0, 0, 0]);
}

#[test]
fn full_weight_on_one_attribute() {
    let allocation = allocate(7, &RawWeights::from_array([100, 0, 0, 0, 0]).unwrap());
    assert_eq!(allocation.points.to_array(), [7, 0, 0, 0, 0]);
}

#[test]
fn equal_weights_break_ties_by_declared_order() {
    let allocation = allocate(11, &RawWeights::from_array([20, 20, 20, 20, 20]).unwrap());
    assert_eq!(allocation.points.to_array(), [3, 2, 2, 2, 2]);
}

#[test]
fn zero_points_keep_base_values() {
    let base = PerStat::from_array([5, 10, 15, 20, 25]);
    let shares = normalize(&RawWeights::from_array([10, 0, 40, 0, 50]).unwrap());
    assert_eq!(compute_final(&base, &apportion(0, &shares)).to_array(), [5, 10, 15, 20, 25]);
}

#[test]
fn attack_up_special_attack_down_is_marked_in_export() {
    let nature = Nature::from_name("Adamant");
    assert_eq!(nature.boosted(), Some(Attribute::Attack));
    assert_eq!(nature.lowered(), Some(Attribute::SpecialAttack));

    let text = format_export(&PerStat::from_array([10, 10, 10, 10, 10]), nature);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Nature: Adamant");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "• **Attack:** 10 (+)");
    assert_eq!(lines[4], "• **Special Atk:** 10 (-)");

    let neutral = format_export(&PerStat::from_array([10, 10, 10, 10, 10]), Nature::Neutral);
    assert!(!neutral.contains("(+)") && !neutral.contains("(-)"));
}

#[test]
fn rejected_weight_edit_keeps_the_formation() {
    let mut session = SessionState::new();
    session.set_points("37");
    session.set_weight(Attribute::Defense, 70, 0.0).unwrap();
    session.set_weight(Attribute::Speed, 25, 0.0).unwrap();
    let before = session.snapshot();

    assert!(session.set_weight(Attribute::Attack, 10, 0.5).is_err());
    let after = session.snapshot();
    assert_eq!(after.weights, before.weights);
    assert_eq!(after.added, before.added);
    assert_eq!(after.added.total(), 37);
}
