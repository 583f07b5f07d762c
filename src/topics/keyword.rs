// Literal keyword-overlap topic strategy — the default.
//
// A topic matches when any of its trigger terms appears as a substring of the
// normalized text. Substring rather than whole-word is deliberate: "waiting"
// should trip the "wait" trigger. Matches come back in the taxonomy's
// declaration order, not ranked — this strategy has no notion of relevance.

use tracing::debug;

use super::taxonomy::TopicTaxonomy;
use super::traits::TopicStrategy;

/// Keyword-overlap topic extractor. Zero model files, runs locally,
/// fully deterministic.
pub struct KeywordStrategy {
    taxonomy: TopicTaxonomy,
}

impl KeywordStrategy {
    pub fn new(taxonomy: TopicTaxonomy) -> Self {
        Self { taxonomy }
    }
}

impl Default for KeywordStrategy {
    fn default() -> Self {
        Self::new(TopicTaxonomy::default())
    }
}

impl TopicStrategy for KeywordStrategy {
    fn extract(&self, text: &str) -> Vec<String> {
        let found: Vec<String> = self
            .taxonomy
            .entries
            .iter()
            .filter(|entry| entry.triggers.iter().any(|t| text.contains(t.as_str())))
            .map(|entry| entry.name.clone())
            .collect();

        debug!(topics = found.len(), "Keyword topic extraction");
        found
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
