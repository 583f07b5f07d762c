// Urgency flagging — fixed safety lexicon, substring match.
//
// Independent of topic extraction: a complaint about billing that mentions
// bleeding still gets flagged. Substring (not whole-word) matching is
// deliberate so "severely" trips "severe". First hit wins; there is no
// severity ranking.

use tracing::debug;

/// Safety-critical terms that flag feedback for immediate attention.
const SAFETY_TERMS: &[&str] = &[
    "wrong drug",
    "bleeding",
    "dying",
    "emergency",
    "critical",
    "injury",
    "pain",
    "severe",
    "unconscious",
    "collapsed",
];

/// Fixed lexicon of safety-critical terms. Built once at startup.
pub struct UrgencyLexicon {
    terms: Vec<String>,
}

impl Default for UrgencyLexicon {
    fn default() -> Self {
        Self {
            terms: SAFETY_TERMS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl UrgencyLexicon {
    /// True when any safety term appears in the normalized text.
    pub fn is_urgent(&self, text: &str) -> bool {
        let hit = self.terms.iter().find(|t| text.contains(t.as_str()));
        if let Some(term) = hit {
            debug!(term = term.as_str(), "Urgency term matched");
        }
        hit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urgent(text: &str) -> bool {
        UrgencyLexicon::default().is_urgent(text)
    }

    #[test]
    fn flags_safety_terms() {
        assert!(urgent("i was bleeding in the waiting room"));
        assert!(urgent("they gave my father the wrong drug"));
    }

    #[test]
    fn substring_matching() {
        // "severely" contains "severe", "painful" contains "pain"
        assert!(urgent("severely understaffed"));
        assert!(urgent("a painful injection"));
    }

    #[test]
    fn benign_text_not_flagged() {
        assert!(!urgent("the visit went fine overall"));
        assert!(!urgent(""));
    }
}
