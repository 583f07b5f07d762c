// Feedback analysis orchestration.
//
// FeedbackAnalyzer wires the normalizer, polarity scorer, topic strategy, and
// urgency lexicon into one call: analyze(text, rating) -> AnalysisResult.
// Everything is constructed once at startup and read-only after, so a single
// analyzer can be shared across threads freely.

use anyhow::{Context, Result};
use serde::ser::Serializer;
use serde::Serialize;
use tracing::debug;

use crate::config::{Config, TopicStrategyKind};
use crate::preprocess::normalize;
use crate::sentiment::lexicon::LexiconScorer;
use crate::sentiment::traits::PolarityScorer;
use crate::sentiment::Sentiment;
use crate::topics::keyword::KeywordStrategy;
use crate::topics::taxonomy::{TopicTaxonomy, UNIDENTIFIED};
use crate::topics::traits::TopicStrategy;
use crate::urgency::UrgencyLexicon;

/// Topics attributed to a piece of feedback.
///
/// Unidentified is a real value, not an encoding artifact: it means "we
/// looked and nothing in the taxonomy matched", which downstream triage
/// treats differently from topics never having been computed (an absent
/// field on AnalysisResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Topics {
    /// Names from the configured taxonomy, in strategy order.
    Matched(Vec<String>),
    /// Nothing in the taxonomy matched.
    Unidentified,
}

impl Serialize for Topics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Topics::Matched(names) => names.serialize(serializer),
            Topics::Unidentified => serializer.serialize_str(UNIDENTIFIED),
        }
    }
}

/// The outcome of one analysis call.
///
/// Fields the applicable branch didn't compute stay None and are omitted
/// from serialized output — "not computed" never masquerades as "computed
/// empty". The only error outcome is the no-input case; every other input
/// produces a best-effort result.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct AnalysisResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Topics>,
    #[serde(rename = "urgency", skip_serializing_if = "Option::is_none")]
    pub urgent: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResult {
    /// The no-input result — neither text nor rating was supplied.
    pub fn no_input() -> Self {
        Self {
            error: Some("No input text or rating provided.".to_string()),
            ..Self::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The analysis pipeline. Construct once (from_config or new), call
/// analyze() from as many threads as you like.
pub struct FeedbackAnalyzer {
    scorer: Box<dyn PolarityScorer>,
    topics: Box<dyn TopicStrategy>,
    urgency: UrgencyLexicon,
}

impl Default for FeedbackAnalyzer {
    fn default() -> Self {
        Self::new(
            Box::new(LexiconScorer::new()),
            Box::new(KeywordStrategy::default()),
            UrgencyLexicon::default(),
        )
    }
}

impl FeedbackAnalyzer {
    pub fn new(
        scorer: Box<dyn PolarityScorer>,
        topics: Box<dyn TopicStrategy>,
        urgency: UrgencyLexicon,
    ) -> Self {
        Self {
            scorer,
            topics,
            urgency,
        }
    }

    /// Build the analyzer the way the config asks for: taxonomy from file or
    /// built-in, topic strategy per CARELINE_TOPIC_STRATEGY.
    pub fn from_config(config: &Config) -> Result<Self> {
        let taxonomy = match &config.taxonomy_path {
            Some(path) => TopicTaxonomy::from_json_file(path)
                .context("Could not load the configured taxonomy")?,
            None => TopicTaxonomy::default(),
        };

        let topics: Box<dyn TopicStrategy> = match config.topic_strategy {
            TopicStrategyKind::Keyword => Box::new(KeywordStrategy::new(taxonomy)),
            #[cfg(feature = "semantic")]
            TopicStrategyKind::Semantic => Box::new(crate::topics::semantic::SemanticStrategy::new(
                taxonomy,
                config.semantic_threshold,
                &config.model_dir,
            )),
        };

        debug!(strategy = topics.name(), "Built feedback analyzer");

        Ok(Self::new(
            Box::new(LexiconScorer::new()),
            topics,
            UrgencyLexicon::default(),
        ))
    }

    /// Analyze one piece of feedback.
    ///
    /// Branching, in strict order:
    /// 1. Neither text nor rating supplied — error result, nothing computed.
    /// 2. Text that survives normalization sets sentiment from polarity; a
    ///    rating supplied alongside is ignored (text takes precedence).
    /// 3. Otherwise the rating, if any, sets sentiment. Text that normalizes
    ///    to empty (pure punctuation) counts as absent.
    /// 4. Topics and the urgency flag are computed whenever normalized text
    ///    is non-empty, independent of sentiment — consumers that only care
    ///    about negative feedback gate on sentiment at their own boundary.
    pub fn analyze(&self, text: Option<&str>, rating: Option<i64>) -> AnalysisResult {
        if text.is_none() && rating.is_none() {
            return AnalysisResult::no_input();
        }

        let normalized = text.map(normalize).unwrap_or_default();
        let mut result = AnalysisResult::default();

        if !normalized.is_empty() {
            let polarity = self.scorer.polarity(&normalized);
            result.sentiment = Some(Sentiment::from_polarity(polarity));
            debug!(polarity, sentiment = ?result.sentiment, "Scored feedback text");
        } else if let Some(rating) = rating {
            result.sentiment = Some(Sentiment::from_rating(rating));
        }

        if !normalized.is_empty() {
            let found = self.topics.extract(&normalized);
            result.topics = Some(if found.is_empty() {
                Topics::Unidentified
            } else {
                Topics::Matched(found)
            });
            result.urgent = Some(self.urgency.is_urgent(&normalized));
        }

        result
    }
}
