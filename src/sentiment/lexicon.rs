// Weighted-lexicon polarity scorer — the default backend.
//
// Zero model files, runs locally, fully deterministic. Each sentiment-bearing
// word carries a weight in [-1, 1]; the text's polarity is the mean weight of
// the matched words, with simple negation flipping ("not helpful") and
// intensifier boosting ("very rude"). Words the lexicon doesn't know
// contribute nothing, so neutral administrative text scores 0.0.

use std::collections::HashMap;

use super::traits::PolarityScorer;

/// Sentiment-bearing vocabulary tuned for patient feedback. Weights are
/// relative strength, not probabilities.
const WORD_WEIGHTS: &[(&str, f64)] = &[
    // Appreciative
    ("amazing", 0.9),
    ("excellent", 0.9),
    ("wonderful", 0.9),
    ("fantastic", 0.9),
    ("outstanding", 0.9),
    ("great", 0.8),
    ("best", 0.8),
    ("love", 0.8),
    ("loved", 0.8),
    ("grateful", 0.8),
    ("happy", 0.7),
    ("helpful", 0.7),
    ("kind", 0.7),
    ("friendly", 0.7),
    ("caring", 0.7),
    ("attentive", 0.7),
    ("polite", 0.7),
    ("good", 0.6),
    ("professional", 0.6),
    ("thank", 0.6),
    ("thanks", 0.6),
    ("satisfied", 0.6),
    ("pleasant", 0.6),
    ("nice", 0.6),
    ("efficient", 0.6),
    ("clean", 0.5),
    ("quick", 0.5),
    ("fast", 0.5),
    ("comfortable", 0.5),
    ("smooth", 0.5),
    // Critical
    ("terrible", -0.9),
    ("horrible", -0.9),
    ("awful", -0.9),
    ("worst", -0.9),
    ("rude", -0.8),
    ("disrespectful", -0.8),
    ("negligent", -0.8),
    ("hate", -0.8),
    ("hated", -0.8),
    ("filthy", -0.8),
    ("impolite", -0.7),
    ("unfriendly", -0.7),
    ("angry", -0.7),
    ("disappointed", -0.7),
    ("disappointing", -0.7),
    ("frustrated", -0.7),
    ("frustrating", -0.7),
    ("ignored", -0.7),
    ("unhelpful", -0.7),
    ("careless", -0.7),
    ("unprofessional", -0.7),
    ("useless", -0.7),
    ("shouted", -0.7),
    ("shouting", -0.7),
    ("yelled", -0.7),
    ("unhygienic", -0.7),
    ("bad", -0.6),
    ("poor", -0.6),
    ("dirty", -0.6),
    ("upset", -0.6),
    ("overpriced", -0.6),
    ("painful", -0.6),
    ("waste", -0.6),
    ("nonchalant", -0.5),
    ("slow", -0.5),
    ("delayed", -0.5),
    ("expensive", -0.5),
    ("pain", -0.5),
    ("wrong", -0.5),
    ("mistake", -0.5),
    ("uncomfortable", -0.5),
    ("sad", -0.5),
    ("late", -0.4),
    ("confusing", -0.4),
    ("confused", -0.4),
    ("crowded", -0.4),
    ("noisy", -0.4),
];

/// Words that invert the polarity of the word that follows them.
const NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "cannot", "cant", "dont", "didnt", "wasnt",
    "isnt", "wont", "couldnt", "wouldnt", "hardly", "barely",
];

/// Words that amplify the polarity of the word that follows them.
const INTENSIFIERS: &[&str] = &["very", "really", "extremely", "so", "too", "incredibly"];

/// How much a negated word keeps of its flipped weight ("not great" is mildly
/// negative, not the mirror image of "great").
const NEGATION_DAMPING: f64 = 0.5;

/// Multiplier applied by an intensifier, result clamped to [-1, 1].
const INTENSIFIER_BOOST: f64 = 1.5;

/// Lexicon-based polarity scorer. Built once at startup and read-only after.
pub struct LexiconScorer {
    weights: HashMap<&'static str, f64>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            weights: WORD_WEIGHTS.iter().copied().collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl PolarityScorer for LexiconScorer {
    /// Mean weight of the matched words, with negation and intensifiers
    /// applied from the immediately preceding token. Expects text already
    /// normalized (lowercase, punctuation stripped).
    fn polarity(&self, text: &str) -> f64 {
        let tokens: Vec<&str> = text.split_whitespace().collect();

        let mut sum = 0.0;
        let mut matched = 0u32;

        for (i, token) in tokens.iter().enumerate() {
            let Some(&weight) = self.weights.get(token) else {
                continue;
            };

            let prev = i.checked_sub(1).map(|j| tokens[j]);
            let weight = match prev {
                Some(p) if NEGATORS.contains(&p) => -weight * NEGATION_DAMPING,
                Some(p) if INTENSIFIERS.contains(&p) => {
                    (weight * INTENSIFIER_BOOST).clamp(-1.0, 1.0)
                }
                _ => weight,
            };

            sum += weight;
            matched += 1;
        }

        if matched == 0 {
            0.0
        } else {
            (sum / f64::from(matched)).clamp(-1.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> f64 {
        LexiconScorer::new().polarity(text)
    }

    #[test]
    fn appreciative_text_is_positive() {
        assert!(score("amazing staff very helpful") > 0.1);
    }

    #[test]
    fn critical_text_is_negative() {
        assert!(score("the nurse was rude and dismissive") < -0.1);
    }

    #[test]
    fn unknown_words_score_zero() {
        assert_eq!(score("i visited the clinic on tuesday"), 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(score("the staff were not helpful") < 0.0);
        assert!(score("the wait was not bad") > 0.0);
    }

    #[test]
    fn intensifier_amplifies() {
        assert!(score("very rude reception") < score("rude reception"));
    }

    #[test]
    fn deterministic() {
        let text = "good doctors but a terrible wait";
        assert_eq!(score(text), score(text));
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(score(""), 0.0);
    }
}
