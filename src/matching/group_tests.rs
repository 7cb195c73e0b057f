use super::*;
use approx::assert_relative_eq;

fn vector(pairs: &[(&str, f64)]) -> TraitVector {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

fn group(entries: Vec<(&str, TraitVector)>) -> GroupVectors {
    entries
        .into_iter()
        .map(|(id, v)| (id.to_string(), v))
        .collect()
}

fn labels(pairs: &[(&str, &str)]) -> TraitLabels {
    pairs
        .iter()
        .map(|(id, label)| (id.to_string(), label.to_string()))
        .collect()
}

#[test]
fn test_two_participants_is_invalid_input() {
    let vectors = group(vec![
        ("r1", vector(&[("x", 0.5)])),
        ("r2", vector(&[("x", 0.5)])),
    ]);

    let err = calculate_group_insights(&vectors, &TraitLabels::new(), "quiz").unwrap_err();
    assert!(matches!(err, QuizMatchError::InvalidInput { .. }));
    assert!(err.to_string().contains("at least 3"));
}

#[test]
fn test_three_participants_succeeds() {
    let vectors = group(vec![
        ("r1", vector(&[("x", 0.2)])),
        ("r2", vector(&[("x", 0.4)])),
        ("r3", vector(&[("x", 0.6)])),
    ]);

    let result = calculate_group_insights(&vectors, &labels(&[("x", "X")]), "quiz").unwrap();
    assert_eq!(result.participant_count, 3);
    assert_eq!(result.pairwise_matches.len(), 3);
}

#[test]
fn test_pairs_follow_participant_order() {
    let vectors = group(vec![
        ("a", vector(&[("x", 1.0)])),
        ("b", vector(&[("x", 1.0)])),
        ("c", vector(&[("x", 1.0)])),
        ("d", vector(&[("x", 1.0)])),
    ]);

    let result = calculate_group_insights(&vectors, &TraitLabels::new(), "quiz").unwrap();
    let pairs: Vec<(&str, &str)> = result
        .pairwise_matches
        .iter()
        .map(|m| (m.result_a.as_str(), m.result_b.as_str()))
        .collect();

    assert_eq!(
        pairs,
        vec![
            ("a", "b"),
            ("a", "c"),
            ("a", "d"),
            ("b", "c"),
            ("b", "d"),
            ("c", "d")
        ]
    );
}

#[test]
fn test_identical_group_is_highly_aligned() {
    let profile = vector(&[("directness", 0.5), ("empathy", 0.5)]);
    let vectors = group(vec![
        ("r1", profile.clone()),
        ("r2", profile.clone()),
        ("r3", profile),
    ]);
    let trait_labels = labels(&[("directness", "Directness"), ("empathy", "Empathy")]);

    let result = calculate_group_insights(&vectors, &trait_labels, "communication").unwrap();

    assert_relative_eq!(result.average_match_score, 1.0, epsilon = 1e-9);
    for pair in &result.pairwise_matches {
        assert_relative_eq!(pair.match_score_percent, 100.0, epsilon = 1e-9);
        assert_relative_eq!(pair.match_score, pair.match_score_percent / 100.0);
    }
    assert_eq!(result.alignment_tier, AlignmentTier::High);
    assert_eq!(
        result.insights,
        vec![
            "Your group is most aligned in Directness (variance: 0)".to_string(),
            "Your group has high alignment (100% average match)".to_string(),
        ]
    );
}

#[test]
fn test_mixed_group_reports_alignment_and_diversity() {
    let vectors = group(vec![
        ("p1", vector(&[("x", 1.0), ("y", 0.5)])),
        ("p2", vector(&[("x", 0.0), ("y", 0.5)])),
        ("p3", vector(&[("x", 1.0), ("y", 0.5)])),
    ]);
    let trait_labels = labels(&[("x", "Assertiveness"), ("y", "Patience")]);

    let result = calculate_group_insights(&vectors, &trait_labels, "team").unwrap();

    let x = result.trait_distributions["x"];
    assert_relative_eq!(x.mean, 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(x.min, 0.0);
    assert_eq!(x.max, 1.0);
    assert_relative_eq!(x.variance, 2.0 / 9.0, epsilon = 1e-12);
    assert_eq!(result.trait_distributions["y"].variance, 0.0);

    // p1~p2 = p2~p3 = 1/sqrt(5), p1~p3 = 1
    let expected_average = (2.0 / 5f64.sqrt() + 1.0) / 3.0;
    assert_relative_eq!(result.average_match_score, expected_average, epsilon = 1e-9);
    assert_eq!(result.alignment_tier, AlignmentTier::Moderate);

    assert_eq!(
        result.insights,
        vec![
            "Your group is most aligned in Patience (variance: 0)".to_string(),
            "Your group shows the most diversity in Assertiveness".to_string(),
            "Your group has moderate alignment (63% average match)".to_string(),
        ]
    );
}

#[test]
fn test_diverse_group_tier() {
    let vectors = group(vec![
        ("p1", vector(&[("a", 1.0), ("b", 0.0), ("c", 0.0)])),
        ("p2", vector(&[("a", 0.0), ("b", 1.0), ("c", 0.0)])),
        ("p3", vector(&[("a", 0.0), ("b", 0.0), ("c", 1.0)])),
    ]);

    let result = calculate_group_insights(&vectors, &TraitLabels::new(), "quiz").unwrap();

    assert_eq!(result.average_match_score, 0.0);
    assert_eq!(result.alignment_tier, AlignmentTier::Diverse);
    assert_eq!(
        result.insights.last().map(String::as_str),
        Some("Your group has diverse styles (0% average match)")
    );
}

#[test]
fn test_variance_ties_pick_first_trait_in_label_order() {
    let vectors = group(vec![
        ("p1", vector(&[("x", 1.0), ("y", 1.0)])),
        ("p2", vector(&[("x", 0.0), ("y", 0.0)])),
        ("p3", vector(&[("x", 0.0), ("y", 0.0)])),
    ]);
    let trait_labels = labels(&[("y", "Second"), ("x", "First")]);

    let result = calculate_group_insights(&vectors, &trait_labels, "quiz").unwrap();

    // Both variances equal 2/9: above the aligned threshold, so no aligned line.
    assert_eq!(
        result.insights[0],
        "Your group shows the most diversity in Second"
    );
    assert_eq!(result.insights.len(), 2);
}

#[test]
fn test_missing_traits_count_as_zero_in_distributions() {
    let vectors = group(vec![
        ("p1", vector(&[("x", 0.9)])),
        ("p2", vector(&[])),
        ("p3", vector(&[("x", 0.3)])),
    ]);

    let result = calculate_group_insights(&vectors, &labels(&[("x", "X")]), "quiz").unwrap();
    let x = result.trait_distributions["x"];

    assert_relative_eq!(x.mean, 0.4, epsilon = 1e-12);
    assert_eq!(x.min, 0.0);
    assert_eq!(x.max, 0.9);
}

#[test]
fn test_unlabeled_traits_fall_back_to_sorted_ids() {
    let vectors = group(vec![
        ("p1", vector(&[("zeal", 0.5), ("calm", 0.5)])),
        ("p2", vector(&[("zeal", 0.5)])),
        ("p3", vector(&[("aim", 0.5)])),
    ]);

    let result = calculate_group_insights(&vectors, &TraitLabels::new(), "quiz").unwrap();
    let traits: Vec<&str> = result
        .trait_distributions
        .keys()
        .map(String::as_str)
        .collect();

    assert_eq!(traits, vec!["aim", "calm", "zeal"]);
}

#[test]
fn test_variance_is_rounded_in_insight() {
    let vectors = group(vec![
        ("p1", vector(&[("x", 0.1)])),
        ("p2", vector(&[("x", 0.5)])),
        ("p3", vector(&[("x", 0.6)])),
    ]);

    let result = calculate_group_insights(&vectors, &labels(&[("x", "X")]), "quiz").unwrap();

    // variance = 0.04666...
    assert_eq!(
        result.insights[0],
        "Your group is most aligned in X (variance: 0.05)"
    );
}

#[test]
fn test_custom_minimum_group_size() {
    let config = GroupConfig {
        min_participants: 4,
        ..GroupConfig::default()
    };
    let vectors = group(vec![
        ("p1", vector(&[("x", 0.1)])),
        ("p2", vector(&[("x", 0.5)])),
        ("p3", vector(&[("x", 0.6)])),
    ]);

    let result = GroupInsightEngine::new(config).calculate(&vectors, &TraitLabels::new(), "quiz");
    assert!(result.is_err());
}

#[test]
fn test_minimum_group_size_never_drops_below_three() {
    let config = GroupConfig {
        min_participants: 2,
        ..GroupConfig::default()
    };
    let vectors = group(vec![
        ("p1", vector(&[("x", 0.4)])),
        ("p2", vector(&[("x", 0.6)])),
    ]);

    let err = GroupInsightEngine::new(config)
        .calculate(&vectors, &TraitLabels::new(), "quiz")
        .unwrap_err();
    assert!(matches!(err, QuizMatchError::InvalidInput { .. }));
    assert!(err.to_string().contains("at least 3"));
}

#[test]
fn test_non_finite_participant_vector_is_rejected() {
    let vectors = group(vec![
        ("p1", vector(&[("x", f64::NAN)])),
        ("p2", vector(&[("x", 0.5)])),
        ("p3", vector(&[("x", 0.6)])),
    ]);

    let err = calculate_group_insights(&vectors, &TraitLabels::new(), "quiz").unwrap_err();
    if let QuizMatchError::InvalidInput { field, .. } = err {
        assert_eq!(field, Some("vectors.p1".to_string()));
    } else {
        panic!("Expected InvalidInput error");
    }
}

#[test]
fn test_distribution_of_single_value_has_zero_variance() {
    let distribution = TraitDistribution::from_values(&[0.7]);
    assert_eq!(distribution.variance, 0.0);
    assert_eq!(distribution.mean, 0.7);

    let empty = TraitDistribution::from_values(&[]);
    assert_eq!(empty.mean, 0.0);
}

#[test]
fn test_alignment_tier_thresholds() {
    let config = GroupConfig::default();
    assert_eq!(AlignmentTier::from_average(0.75, &config), AlignmentTier::High);
    assert_eq!(
        AlignmentTier::from_average(0.6, &config),
        AlignmentTier::Moderate
    );
    assert_eq!(
        AlignmentTier::from_average(0.59, &config),
        AlignmentTier::Diverse
    );
}
