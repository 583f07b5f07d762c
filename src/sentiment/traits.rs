// Polarity scorer trait — the swap-ready abstraction.
//
// Like the TopicStrategy trait, this lets us swap the polarity model without
// changing the rest of the pipeline. The default implementation is a weighted
// lexicon; a statistical sentence-level model is a drop-in replacement as
// long as it stays deterministic.

/// Trait for scoring the emotional valence of normalized text.
pub trait PolarityScorer: Send + Sync {
    /// Score a normalized text for polarity.
    ///
    /// Returns a value in [-1.0, 1.0]: negative for critical text, positive
    /// for appreciative text, near zero for neutral or unscorable text.
    /// Must be deterministic and monotonic in valence — the same text always
    /// produces the same score.
    fn polarity(&self, text: &str) -> f64;
}
