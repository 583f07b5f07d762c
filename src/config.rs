use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which topic extraction strategy to use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TopicStrategyKind {
    /// Literal trigger matching (default) — no model files needed
    Keyword,
    /// Local embedding model — requires the `semantic` feature and model files
    #[cfg(feature = "semantic")]
    Semantic,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Everything
/// has a working default: with no environment at all the analyzer runs the
/// keyword strategy over the built-in taxonomy.
pub struct Config {
    /// Which topic strategy to build (CARELINE_TOPIC_STRATEGY)
    pub topic_strategy: TopicStrategyKind,
    /// Optional JSON file overriding the built-in topic taxonomy
    /// (CARELINE_TAXONOMY_PATH)
    pub taxonomy_path: Option<PathBuf>,
    /// Directory containing the embedding model files (CARELINE_MODEL_DIR)
    #[cfg(feature = "semantic")]
    pub model_dir: PathBuf,
    /// Score a topic must clear under the semantic strategy
    /// (CARELINE_SEMANTIC_THRESHOLD)
    #[cfg(feature = "semantic")]
    pub semantic_threshold: f64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let topic_strategy = match env::var("CARELINE_TOPIC_STRATEGY").as_deref() {
            Ok("semantic") => {
                #[cfg(feature = "semantic")]
                {
                    TopicStrategyKind::Semantic
                }
                #[cfg(not(feature = "semantic"))]
                {
                    tracing::warn!(
                        "CARELINE_TOPIC_STRATEGY=semantic but this build lacks the \
                         `semantic` feature; using the keyword strategy"
                    );
                    TopicStrategyKind::Keyword
                }
            }
            // "keyword" or unset both default to keyword matching
            _ => TopicStrategyKind::Keyword,
        };

        let taxonomy_path = env::var("CARELINE_TAXONOMY_PATH").ok().map(PathBuf::from);

        #[cfg(feature = "semantic")]
        let model_dir = env::var("CARELINE_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::topics::semantic::default_model_dir());

        #[cfg(feature = "semantic")]
        let semantic_threshold = match env::var("CARELINE_SEMANTIC_THRESHOLD") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("CARELINE_SEMANTIC_THRESHOLD must be a number, got \"{raw}\"")
            })?,
            Err(_) => crate::topics::semantic::DEFAULT_THRESHOLD,
        };

        Ok(Self {
            topic_strategy,
            taxonomy_path,
            #[cfg(feature = "semantic")]
            model_dir,
            #[cfg(feature = "semantic")]
            semantic_threshold,
        })
    }

    /// Check that a configured taxonomy file actually exists.
    /// Call this before building the analyzer to fail with a clear message
    /// instead of a deep parse error.
    pub fn require_taxonomy(&self) -> Result<()> {
        if let Some(path) = &self.taxonomy_path {
            if !path.exists() {
                anyhow::bail!(
                    "CARELINE_TAXONOMY_PATH points to {} but the file does not exist.",
                    path.display()
                );
            }
        }
        Ok(())
    }
}
