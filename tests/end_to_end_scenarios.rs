//! End-to-end scoring and matching scenarios
//!
//! These tests drive the public API from quiz definition through normalized
//! vectors to match scores, aspect matches and group insights.

use approx::assert_relative_eq;
use quizmatch_rs::core::scoring::TraitVectorCalculator;
use quizmatch_rs::matching::{AspectProfile, GroupVectors, TraitLabels};
use quizmatch_rs::{
    calculate_group_insights, calculate_trait_ranges, calculate_trait_vector, compute_match,
    compute_match_with_breakdown, Answer, Question, QuizDefinition, QuizMatchEngine,
    SimilarityAlgorithm, TraitVector,
};

/// Six equally weighted questions with a "direct" and an "empathetic" option.
fn communication_quiz() -> QuizDefinition {
    let questions = (1..=6)
        .map(|i| {
            Question::new(format!("q{i}"))
                .with_option(
                    "opt_1",
                    [("directness", 2.0), ("empathy", 0.0), ("clarity", 1.0)],
                )
                .with_option(
                    "opt_2",
                    [("directness", 0.0), ("empathy", 2.0), ("clarity", 0.0)],
                )
        })
        .collect();
    QuizDefinition::new(questions)
}

fn answer_all(option: &str) -> Vec<Answer> {
    (1..=6).map(|i| Answer::new(format!("q{i}"), option)).collect()
}

fn vector(pairs: &[(&str, f64)]) -> TraitVector {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

#[test]
fn test_direct_and_empathetic_users_do_not_match() {
    let quiz = communication_quiz();

    let ranges = calculate_trait_ranges(&quiz);
    assert_eq!((ranges["directness"].min, ranges["directness"].max), (0.0, 12.0));
    assert_eq!((ranges["empathy"].min, ranges["empathy"].max), (0.0, 12.0));
    assert_eq!((ranges["clarity"].min, ranges["clarity"].max), (0.0, 6.0));

    let raw = TraitVectorCalculator::new()
        .raw_scores(&answer_all("opt_1"), &quiz)
        .unwrap();
    assert_eq!(raw["directness"], 12.0);
    assert_eq!(raw["empathy"], 0.0);
    assert_eq!(raw["clarity"], 6.0);

    let user_a = calculate_trait_vector(&answer_all("opt_1"), &quiz);
    let user_b = calculate_trait_vector(&answer_all("opt_2"), &quiz);

    assert_eq!(
        user_a,
        vector(&[("directness", 1.0), ("empathy", 0.0), ("clarity", 1.0)])
    );
    assert_eq!(
        user_b,
        vector(&[("directness", 0.0), ("empathy", 1.0), ("clarity", 0.0)])
    );

    let cosine = compute_match(&user_a, &user_b, None, SimilarityAlgorithm::Cosine).unwrap();
    assert_eq!(cosine, 0.0);
}

#[test]
fn test_opposite_users_score_zero_on_distance_algorithms() {
    let quiz = communication_quiz();
    let user_a = calculate_trait_vector(&answer_all("opt_1"), &quiz);
    let user_b = calculate_trait_vector(&answer_all("opt_2"), &quiz);

    let euclidean =
        compute_match(&user_a, &user_b, None, SimilarityAlgorithm::Euclidean).unwrap();
    let absolute = compute_match(&user_a, &user_b, None, SimilarityAlgorithm::Absolute).unwrap();

    assert_relative_eq!(euclidean, 0.0, epsilon = 1e-9);
    assert_relative_eq!(absolute, 0.0, epsilon = 1e-9);
}

#[test]
fn test_same_answers_match_perfectly_with_every_algorithm() {
    let quiz = communication_quiz();
    let mut answers = answer_all("opt_1");
    answers[0].option_id = "opt_2".to_string();

    let a = calculate_trait_vector(&answers, &quiz);
    let b = calculate_trait_vector(&answers, &quiz);

    for algorithm in SimilarityAlgorithm::ALL {
        let score = compute_match(&a, &b, None, algorithm).unwrap();
        assert_relative_eq!(score, 100.0, epsilon = 1e-9);
    }
}

#[test]
fn test_engine_matches_free_functions() {
    let quiz = communication_quiz();
    let engine = QuizMatchEngine::default();

    let mut answers = answer_all("opt_1");
    answers.truncate(4);
    answers.push(Answer::new("q5", "opt_2"));

    let from_engine = engine.calculate_trait_vector(&answers, &quiz).unwrap();
    let from_function = calculate_trait_vector(&answers, &quiz);
    assert_eq!(from_engine, from_function);

    // 4 * 2 of 12 directness, 2 of 12 empathy, 4 of 6 clarity
    assert_relative_eq!(from_engine["directness"], 8.0 / 12.0, epsilon = 1e-12);
    assert_relative_eq!(from_engine["empathy"], 2.0 / 12.0, epsilon = 1e-12);
    assert_relative_eq!(from_engine["clarity"], 4.0 / 6.0, epsilon = 1e-12);

    let other = calculate_trait_vector(&answer_all("opt_2"), &quiz);
    let engine_score = engine.compute_match(&from_engine, &other, None, None).unwrap();
    let function_score =
        compute_match(&from_engine, &other, None, SimilarityAlgorithm::Cosine).unwrap();
    assert_eq!(engine_score, function_score);
}

#[test]
fn test_breakdown_explains_scenario_vectors() {
    let quiz = communication_quiz();
    let user_a = calculate_trait_vector(&answer_all("opt_1"), &quiz);
    let user_b = calculate_trait_vector(&answer_all("opt_2"), &quiz);

    let result =
        compute_match_with_breakdown(&user_a, &user_b, SimilarityAlgorithm::Absolute).unwrap();

    assert_eq!(result.match_score, result.breakdown.overall);
    let traits: Vec<&str> = result.breakdown.traits.keys().map(String::as_str).collect();
    assert_eq!(traits, vec!["directness", "empathy", "clarity"]);
    for comparison in result.breakdown.traits.values() {
        assert_eq!(comparison.similarity, 0.0);
    }
}

#[test]
fn test_unknown_answers_are_skipped_by_default() {
    let quiz = communication_quiz();
    let mut answers = answer_all("opt_1");
    answers.push(Answer::new("q99", "opt_1"));
    answers.push(Answer::new("q1", "opt_9"));

    let lenient = calculate_trait_vector(&answers, &quiz);
    assert_eq!(lenient, calculate_trait_vector(&answer_all("opt_1"), &quiz));

    let strict = TraitVectorCalculator::strict().calculate(&answers, &quiz);
    assert!(strict.unwrap_err().is_invalid_input());
}

#[test]
fn test_weighted_questions_scale_ranges_and_scores() {
    let quiz = QuizDefinition::new(vec![
        Question::new("warmup")
            .with_weight(0.5)
            .with_option("a", [("risk", 4.0)])
            .with_option("b", [("risk", -2.0)]),
        Question::new("main")
            .with_weight(2.0)
            .with_option("a", [("risk", 1.0)])
            .with_option("b", [("caution", 1.0)]),
    ]);

    let ranges = calculate_trait_ranges(&quiz);
    assert_eq!((ranges["risk"].min, ranges["risk"].max), (-1.0, 4.0));
    assert_eq!((ranges["caution"].min, ranges["caution"].max), (0.0, 2.0));

    let vector = calculate_trait_vector(
        &[Answer::new("warmup", "b"), Answer::new("main", "b")],
        &quiz,
    );
    // risk raw -1 sits at the bottom of [-1, 4]; caution raw 2 at the top
    assert_eq!(vector["risk"], 0.0);
    assert_eq!(vector["caution"], 1.0);
}

#[test]
fn test_quiz_from_json_with_numeric_ids() {
    let quiz = QuizDefinition::from_json_str(
        r#"{
            "questions": [
                {"id": 101, "weight": 1, "trait_map": {"1": {"calm": 2}, "2": {"calm": 0}}},
                {"id": "102", "trait_map": []}
            ]
        }"#,
    )
    .unwrap();
    quiz.validate().unwrap();

    let answers: Vec<Answer> =
        serde_json::from_str(r#"[{"question_id": 101, "option_id": 1}]"#).unwrap();
    let vector = calculate_trait_vector(&answers, &quiz);

    assert_eq!(vector["calm"], 1.0);
    assert_eq!(vector.len(), 1);
}

#[test]
fn test_partial_profiles_compare_only_shared_quizzes() {
    let engine = QuizMatchEngine::default();
    let quiz = communication_quiz();
    let direct = calculate_trait_vector(&answer_all("opt_1"), &quiz);

    let mut alice = AspectProfile::new();
    alice.insert("communication".to_string(), direct.clone());
    alice.insert("conflict".to_string(), vector(&[("avoidance", 1.0)]));

    let mut bob = AspectProfile::new();
    bob.insert("communication".to_string(), direct);
    bob.insert("leadership".to_string(), vector(&[("vision", 0.2)]));

    let result = engine
        .match_partial_aspects(&alice, &bob, None, None)
        .unwrap();

    assert_eq!(result.breakdown.shared_aspects, vec!["communication".to_string()]);
    assert_relative_eq!(result.match_score, 100.0, epsilon = 1e-9);
}

#[test]
fn test_group_requires_three_participants() {
    let quiz = communication_quiz();
    let mut vectors = GroupVectors::new();
    vectors.insert("r1".to_string(), calculate_trait_vector(&answer_all("opt_1"), &quiz));
    vectors.insert("r2".to_string(), calculate_trait_vector(&answer_all("opt_2"), &quiz));

    let labels = TraitLabels::new();
    assert!(calculate_group_insights(&vectors, &labels, "communication").is_err());

    vectors.insert("r3".to_string(), calculate_trait_vector(&answer_all("opt_1"), &quiz));
    let result = calculate_group_insights(&vectors, &labels, "communication").unwrap();

    assert_eq!(result.participant_count, 3);
    assert_eq!(result.pairwise_matches.len(), 3);
    // r1~r3 = 100, the other two pairs = 0
    assert_relative_eq!(result.average_match_score, 1.0 / 3.0, epsilon = 1e-9);
    assert_eq!(
        result.insights.last().map(String::as_str),
        Some("Your group has diverse styles (33% average match)")
    );
}
