// Sentiment classification — polarity scoring plus the rating fallback.
//
// The PolarityScorer trait defines the interface. LexiconScorer implements it
// with a weighted word list; a statistical model could be swapped in later
// without touching the orchestration.

pub mod lexicon;
pub mod traits;

use serde::Serialize;

/// Polarity above this is positive, below the negation of it is negative.
pub const POLARITY_THRESHOLD: f64 = 0.1;

/// The three sentiment labels stored alongside feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Map a polarity score in [-1, 1] to a label.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POLARITY_THRESHOLD {
            Sentiment::Positive
        } else if polarity < -POLARITY_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Map a written 1-5 rating to a label. Only used when the feedback has
    /// no usable text. No bounds checking: anything >= 4 is positive,
    /// exactly 3 is neutral, everything else is negative.
    pub fn from_rating(rating: i64) -> Self {
        if rating >= 4 {
            Sentiment::Positive
        } else if rating == 3 {
            Sentiment::Neutral
        } else {
            Sentiment::Negative
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_thresholds() {
        assert_eq!(Sentiment::from_polarity(0.5), Sentiment::Positive);
        assert_eq!(Sentiment::from_polarity(0.10), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.10), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.11), Sentiment::Negative);
    }

    #[test]
    fn rating_mapping() {
        assert_eq!(Sentiment::from_rating(5), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(4), Sentiment::Positive);
        assert_eq!(Sentiment::from_rating(3), Sentiment::Neutral);
        assert_eq!(Sentiment::from_rating(2), Sentiment::Negative);
        assert_eq!(Sentiment::from_rating(1), Sentiment::Negative);
        // No special-casing below the scale
        assert_eq!(Sentiment::from_rating(0), Sentiment::Negative);
    }
}
