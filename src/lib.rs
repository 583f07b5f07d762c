// Careline: sentiment, topic, and urgency analysis for patient feedback.
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline; analyzer wires them together.

pub mod analyzer;
pub mod config;
pub mod output;
pub mod preprocess;
pub mod sentiment;
pub mod topics;
pub mod urgency;

pub use analyzer::{AnalysisResult, FeedbackAnalyzer, Topics};
pub use sentiment::Sentiment;
