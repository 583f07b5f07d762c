// Unit tests for topic extraction against the configured taxonomy.
//
// Covers taxonomy closure (returned names always come from the table),
// custom taxonomy files, and the keyword strategy's ordering guarantee.

use std::fs;

use careline::topics::keyword::KeywordStrategy;
use careline::topics::taxonomy::TopicTaxonomy;
use careline::topics::traits::TopicStrategy;

// ============================================================
// Taxonomy closure
// ============================================================

#[test]
fn extracted_names_are_members_of_the_taxonomy() {
    let taxonomy = TopicTaxonomy::default();
    let strategy = KeywordStrategy::default();

    let samples = [
        "the wait was unbearable and the doctor was rude",
        "my prescription cost too much money",
        "dirty toilet and broken equipment in the ward",
        "pleasant visit overall",
    ];

    for text in samples {
        for name in strategy.extract(text) {
            assert!(
                taxonomy.contains(&name),
                "\"{name}\" is not a configured topic"
            );
        }
    }
}

// ============================================================
// Declaration-order results
// ============================================================

#[test]
fn matches_follow_taxonomy_order_not_text_order() {
    let strategy = KeywordStrategy::default();
    // Cost words appear before wait words in the text
    let found = strategy.extract("an expensive bill after an endless queue");
    assert_eq!(found, vec!["wait_time", "cost"]);
}

// ============================================================
// Custom taxonomy files
// ============================================================

#[test]
fn custom_taxonomy_file_replaces_the_builtin_table() {
    let path = std::env::temp_dir().join("careline-test-taxonomy.json");
    fs::write(
        &path,
        r#"{"entries": [{"name": "food", "triggers": ["Meal!", "COLD food"]}]}"#,
    )
    .unwrap();

    let taxonomy = TopicTaxonomy::from_json_file(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(taxonomy.names(), vec!["food"]);
    // Triggers are normalized on load
    assert_eq!(taxonomy.entries[0].triggers, vec!["meal", "cold food"]);

    let strategy = KeywordStrategy::new(taxonomy);
    assert_eq!(strategy.extract("the meal was inedible"), vec!["food"]);
    assert!(strategy.extract("a long wait").is_empty());
}

#[test]
fn empty_taxonomy_file_is_rejected() {
    let path = std::env::temp_dir().join("careline-test-empty-taxonomy.json");
    fs::write(&path, r#"{"entries": []}"#).unwrap();

    let result = TopicTaxonomy::from_json_file(&path);
    fs::remove_file(&path).ok();

    assert!(result.is_err());
}
