// Topic strategy trait — swap-ready abstraction.
//
// Like the PolarityScorer trait, this lets us swap the topic extraction
// approach without changing the orchestration. The default implementation
// matches trigger keywords literally; the `semantic` feature adds an
// embedding-based strategy behind the same interface.

/// Trait for extracting topic names from normalized feedback text.
pub trait TopicStrategy: Send + Sync {
    /// Return the names of every configured topic the text matched.
    ///
    /// An empty vec means "no configured topic matched" — the orchestrator
    /// turns that into the Unidentified sentinel. Every returned name must
    /// come from the configured taxonomy, never from the input text.
    fn extract(&self, text: &str) -> Vec<String>;

    /// Short identifier for logs ("keyword", "semantic").
    fn name(&self) -> &'static str;
}
