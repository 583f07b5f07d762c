// Integration tests for the full analysis pipeline.
//
// Exercises the orchestration contract end to end with the default
// components: branch precedence, the rating fallback, the no-input error,
// the Unidentified sentinel, and urgency independence.

use careline::analyzer::{FeedbackAnalyzer, Topics};
use careline::sentiment::Sentiment;

fn analyzer() -> FeedbackAnalyzer {
    FeedbackAnalyzer::default()
}

// ============================================================
// Idempotence
// ============================================================

#[test]
fn identical_inputs_yield_identical_results() {
    let analyzer = analyzer();
    let a = analyzer.analyze(Some("the nurse shouted at me"), Some(2));
    let b = analyzer.analyze(Some("the nurse shouted at me"), Some(2));
    assert_eq!(a, b);
}

// ============================================================
// Text takes precedence over the rating
// ============================================================

#[test]
fn text_polarity_overrides_contradicting_rating() {
    let result = analyzer().analyze(Some("amazing staff, very helpful"), Some(1));
    assert_eq!(result.sentiment, Some(Sentiment::Positive));
}

#[test]
fn negative_text_overrides_top_rating() {
    let result = analyzer().analyze(Some("a terrible, rude experience"), Some(5));
    assert_eq!(result.sentiment, Some(Sentiment::Negative));
}

// ============================================================
// Rating fallback for textless feedback
// ============================================================

#[test]
fn rating_fallback_mapping() {
    let analyzer = analyzer();
    assert_eq!(
        analyzer.analyze(None, Some(5)).sentiment,
        Some(Sentiment::Positive)
    );
    assert_eq!(
        analyzer.analyze(None, Some(3)).sentiment,
        Some(Sentiment::Neutral)
    );
    assert_eq!(
        analyzer.analyze(None, Some(2)).sentiment,
        Some(Sentiment::Negative)
    );
}

#[test]
fn empty_text_is_treated_as_absent() {
    let result = analyzer().analyze(Some(""), Some(1));
    assert_eq!(result.sentiment, Some(Sentiment::Negative));
    // Rating-only sentiment: nothing to extract topics or urgency from
    assert_eq!(result.topics, None);
    assert_eq!(result.urgent, None);
}

// ============================================================
// No-input error
// ============================================================

#[test]
fn no_input_yields_error_and_no_classification() {
    let result = analyzer().analyze(None, None);
    assert!(result.error.is_some());
    assert_eq!(result.sentiment, None);
    assert_eq!(result.topics, None);
    assert_eq!(result.urgent, None);
}

// ============================================================
// Unidentified sentinel
// ============================================================

#[test]
fn negative_text_without_topic_keywords_is_unidentified() {
    let result = analyzer().analyze(Some("this was just bad"), None);
    assert_eq!(result.sentiment, Some(Sentiment::Negative));
    // Sentinel, never an empty list and never an absent field
    assert_eq!(result.topics, Some(Topics::Unidentified));
}

// ============================================================
// Urgency and topic extraction run independently
// ============================================================

#[test]
fn urgency_and_topics_can_both_fire() {
    let result = analyzer().analyze(Some("the nurse was rude and I was bleeding"), None);
    assert_eq!(result.urgent, Some(true));
    match result.topics {
        Some(Topics::Matched(names)) => {
            assert!(names.contains(&"staff_attitude".to_string()))
        }
        other => panic!("expected matched topics, got {other:?}"),
    }
}

#[test]
fn topics_computed_even_for_positive_text() {
    // Extraction is not gated on sentiment; consumers gate at their boundary.
    let result = analyzer().analyze(Some("the doctor was wonderful"), None);
    assert_eq!(result.sentiment, Some(Sentiment::Positive));
    assert_eq!(
        result.topics,
        Some(Topics::Matched(vec!["staff_attitude".to_string()]))
    );
    assert_eq!(result.urgent, Some(false));
}

// ============================================================
// Normalization invariance
// ============================================================

#[test]
fn punctuation_and_case_do_not_change_the_outcome() {
    let analyzer = analyzer();
    let noisy = analyzer.analyze(Some("RUDE!!! staff..."), Some(2));
    let clean = analyzer.analyze(Some("rude staff"), Some(2));
    assert_eq!(noisy.sentiment, clean.sentiment);
    assert_eq!(noisy.topics, clean.topics);
}
