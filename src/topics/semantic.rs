// Embedding-based topic strategy using a local sentence-transformer model.
//
// Instead of literal trigger matching (which fails when a patient writes
// "overcharged" and the taxonomy says "expensive"), this strategy embeds each
// content token of the feedback into a 384-dimensional vector and compares it
// against pre-embedded trigger terms. A topic's score is the mean over tokens
// of the best similarity to any of its triggers; topics clearing the
// threshold come back sorted by score, best first.
//
// The model runs locally via ONNX — no API calls, no rate limits. When the
// model files are missing or inference fails, the strategy degrades to a
// whole-word overlap fraction on the same 0..1 scale, so the configured
// threshold keeps its meaning. That degradation is recovered here and never
// surfaced to callers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::{debug, warn};

use super::taxonomy::TopicTaxonomy;
use super::traits::TopicStrategy;

/// Embedding dimension for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

/// Score threshold a topic must clear to be reported.
pub const DEFAULT_THRESHOLD: f64 = 0.45;

/// Default directory for the embedding model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("careline")
        .join("embedding-model")
}

/// Term embedder backed by a local ONNX model. Converts short terms and
/// tokens into dense vectors suitable for cosine comparison.
///
/// Session sits behind a Mutex because ort's run takes &mut self; inference
/// is CPU-bound and short, so contention is minimal.
pub struct TermEmbedder {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
}

impl TermEmbedder {
    /// Load the embedding model and tokenizer from the given directory.
    ///
    /// Expects `model.onnx` and `tokenizer.json` in the directory.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!("Embedding model not found: {}", model_path.display());
        }
        if !tokenizer_path.exists() {
            anyhow::bail!("Embedding tokenizer not found: {}", tokenizer_path.display());
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| {
                format!("Failed to load embedding model from {}", model_path.display())
            })?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load embedding tokenizer: {}", e))?;

        debug!("Loaded embedding model from {}", model_dir.display());

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embed a batch of terms into mean-pooled vectors.
    pub fn embed_batch(&self, terms: &[String]) -> Result<Vec<Vec<f64>>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let encodings: Vec<_> = terms
            .iter()
            .map(|t| {
                self.tokenizer
                    .encode(t.as_str(), true)
                    .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
            })
            .collect::<Result<Vec<_>>>()?;

        let batch_size = encodings.len();
        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        if max_len == 0 {
            return Ok(vec![vec![0.0; EMBEDDING_DIM]; batch_size]);
        }

        // Padded BERT inputs: input_ids, attention_mask (1 for real tokens),
        // token_type_ids (all zeros for single-sentence input).
        let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
        let mut token_type_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

        for enc in &encodings {
            let ids = enc.get_ids();
            let mask = enc.get_attention_mask();
            let pad_len = max_len - ids.len();

            input_ids_flat.extend(ids.iter().map(|&id| id as i64));
            attention_mask_flat.extend(mask.iter().map(|&m| m as i64));
            token_type_ids_flat.extend(std::iter::repeat_n(0i64, ids.len()));

            input_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
            attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
            token_type_ids_flat.extend(std::iter::repeat_n(0i64, pad_len));
        }

        let shape = [batch_size as i64, max_len as i64];

        let input_ids_tensor = Tensor::from_array((shape, input_ids_flat))
            .context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat.clone()))
            .context("Failed to create attention_mask tensor")?;
        let token_type_ids_tensor = Tensor::from_array((shape, token_type_ids_flat))
            .context("Failed to create token_type_ids tensor")?;

        // Output is last_hidden_state: [batch, seq_len, 384]
        let hidden_states = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor
                })
                .context("Embedding ONNX inference failed")?;

            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract embedding output tensor")?;

            data.to_vec()
        };

        // Mean pooling: average token embeddings weighted by attention mask.
        let mut embeddings = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let mut sum = vec![0.0_f64; EMBEDDING_DIM];
            let mut mask_sum = 0.0_f64;

            for j in 0..max_len {
                let mask_val = attention_mask_flat[i * max_len + j] as f64;
                if mask_val > 0.0 {
                    mask_sum += mask_val;
                    let offset = (i * max_len + j) * EMBEDDING_DIM;
                    for k in 0..EMBEDDING_DIM {
                        sum[k] += hidden_states[offset + k] as f64 * mask_val;
                    }
                }
            }

            if mask_sum > 0.0 {
                for val in &mut sum {
                    *val /= mask_sum;
                }
            }

            embeddings.push(sum);
        }

        Ok(embeddings)
    }
}

/// Cosine similarity clamped to [0, 1]. Anti-correlated vectors are treated
/// as "no similarity" for scoring purposes.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

enum Backend {
    /// Model loaded; trigger vectors are pre-embedded per topic, in taxonomy
    /// order, so per-call work is one batch over the text's tokens.
    Embedding {
        embedder: TermEmbedder,
        trigger_vecs: Vec<Vec<Vec<f64>>>,
    },
    /// Model unavailable — score by whole-word overlap fraction instead.
    Overlap,
}

/// Embedding-based topic extractor with a built-in degraded mode.
pub struct SemanticStrategy {
    taxonomy: TopicTaxonomy,
    threshold: f64,
    stopwords: HashSet<String>,
    backend: Backend,
}

impl SemanticStrategy {
    /// Build the strategy, loading the model from `model_dir`.
    ///
    /// A missing or unloadable model is not an error: the strategy comes up
    /// in overlap mode and logs a warning. Trigger embeddings are computed
    /// once here, never per call.
    pub fn new(taxonomy: TopicTaxonomy, threshold: f64, model_dir: &Path) -> Self {
        let stopwords: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .collect();

        let backend = match Self::load_backend(&taxonomy, model_dir) {
            Ok(backend) => backend,
            Err(e) => {
                warn!(
                    error = %e,
                    "Embedding model unavailable, using overlap scoring"
                );
                Backend::Overlap
            }
        };

        Self {
            taxonomy,
            threshold,
            stopwords,
            backend,
        }
    }

    fn load_backend(taxonomy: &TopicTaxonomy, model_dir: &Path) -> Result<Backend> {
        let embedder = TermEmbedder::load(model_dir)?;

        let mut trigger_vecs = Vec::with_capacity(taxonomy.entries.len());
        for entry in &taxonomy.entries {
            let vecs = embedder
                .embed_batch(&entry.triggers)
                .with_context(|| format!("Failed to embed triggers for \"{}\"", entry.name))?;
            trigger_vecs.push(vecs);
        }

        Ok(Backend::Embedding {
            embedder,
            trigger_vecs,
        })
    }

    /// Content tokens of the text: whitespace-split, stopwords removed.
    fn content_tokens(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter(|t| !self.stopwords.contains(*t))
            .map(str::to_string)
            .collect()
    }

    /// Per-topic score = mean over tokens of the max similarity to any of the
    /// topic's trigger vectors.
    fn score_with_embeddings(
        &self,
        embedder: &TermEmbedder,
        trigger_vecs: &[Vec<Vec<f64>>],
        tokens: &[String],
    ) -> Result<Vec<(String, f64)>> {
        let token_vecs = embedder.embed_batch(tokens)?;

        let scores = self
            .taxonomy
            .entries
            .iter()
            .zip(trigger_vecs.iter())
            .map(|(entry, triggers)| {
                let total: f64 = token_vecs
                    .iter()
                    .map(|tv| {
                        triggers
                            .iter()
                            .map(|trig| cosine_similarity(tv, trig))
                            .fold(0.0_f64, f64::max)
                    })
                    .sum();
                (entry.name.clone(), total / token_vecs.len() as f64)
            })
            .collect();

        Ok(scores)
    }

    /// Degraded scoring: fraction of a topic's triggers present in the text
    /// as whole words. Same 0..1 scale as the embedding path, so the
    /// threshold stays meaningful.
    fn score_with_overlap(&self, text: &str) -> Vec<(String, f64)> {
        let padded = format!(" {text} ");

        self.taxonomy
            .entries
            .iter()
            .map(|entry| {
                let present = entry
                    .triggers
                    .iter()
                    .filter(|t| padded.contains(&format!(" {t} ")))
                    .count();
                (entry.name.clone(), present as f64 / entry.triggers.len() as f64)
            })
            .collect()
    }
}

impl TopicStrategy for SemanticStrategy {
    fn extract(&self, text: &str) -> Vec<String> {
        let tokens = self.content_tokens(text);
        if tokens.is_empty() {
            return Vec::new();
        }

        let scored = match &self.backend {
            Backend::Embedding {
                embedder,
                trigger_vecs,
            } => match self.score_with_embeddings(embedder, trigger_vecs, &tokens) {
                Ok(scored) => scored,
                Err(e) => {
                    warn!(error = %e, "Embedding inference failed, using overlap scoring");
                    self.score_with_overlap(text)
                }
            },
            Backend::Overlap => self.score_with_overlap(text),
        };

        let mut hits: Vec<(String, f64)> = scored
            .into_iter()
            .filter(|(_, score)| *score > self.threshold)
            .collect();
        hits.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        debug!(topics = hits.len(), "Semantic topic extraction");
        hits.into_iter().map(|(name, _)| name).collect()
    }

    fn name(&self) -> &'static str {
        "semantic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::taxonomy::TopicEntry;

    fn overlap_strategy(threshold: f64) -> SemanticStrategy {
        let taxonomy = TopicTaxonomy {
            entries: vec![
                TopicEntry {
                    name: "wait_time".to_string(),
                    triggers: vec!["wait".to_string(), "queue".to_string()],
                },
                TopicEntry {
                    name: "cost".to_string(),
                    triggers: vec![
                        "expensive".to_string(),
                        "bill".to_string(),
                        "price".to_string(),
                    ],
                },
            ],
        };
        // Nonexistent dir forces the overlap backend
        SemanticStrategy::new(taxonomy, threshold, Path::new("/nonexistent/model-dir"))
    }

    #[test]
    fn missing_model_degrades_to_overlap() {
        let strategy = overlap_strategy(0.45);
        assert!(matches!(strategy.backend, Backend::Overlap));
    }

    #[test]
    fn overlap_fraction_thresholding() {
        let strategy = overlap_strategy(0.45);
        // 1 of 2 wait_time triggers present as whole words = 0.5 > 0.45
        assert_eq!(strategy.extract("the wait was endless"), vec!["wait_time"]);
        // 1 of 3 cost triggers = 0.33, below the bar
        assert!(strategy.extract("the bill confused me").is_empty());
    }

    #[test]
    fn overlap_requires_whole_words() {
        let strategy = overlap_strategy(0.45);
        // "waiting" is not a whole-word hit for "wait" in this mode
        assert!(strategy.extract("waiting around all day").is_empty());
    }

    #[test]
    fn ranked_by_score_descending() {
        let strategy = overlap_strategy(0.3);
        // wait_time 2/2 = 1.0, cost 2/3 = 0.66 — wait_time first
        let found = strategy.extract("the queue to dispute an expensive bill was a long wait");
        assert_eq!(found, vec!["wait_time", "cost"]);
    }

    #[test]
    fn cosine_similarity_edge_cases() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]) - 1.0).abs() < 1e-9);
        // Anti-correlated clamps to zero
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]), 0.0);
    }
}
