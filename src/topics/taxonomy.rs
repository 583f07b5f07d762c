// Topic taxonomy — the fixed table of categories negative feedback maps to.
//
// The taxonomy is configuration, not a database entity: an ordered list of
// named topics, each with the trigger terms that indicate it. The built-in
// table covers the usual complaint categories for a clinic; deployments can
// swap in their own via a JSON file (CARELINE_TAXONOMY_PATH).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::preprocess::normalize;

/// Sentinel topic emitted when feedback matched no configured category.
/// Distinct from "topics were never computed" — see AnalysisResult.
pub const UNIDENTIFIED: &str = "Unidentified";

/// One topic and the terms that indicate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEntry {
    pub name: String,
    pub triggers: Vec<String>,
}

/// Ordered topic table. Declaration order is significant: the keyword
/// strategy reports matches in this order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTaxonomy {
    pub entries: Vec<TopicEntry>,
}

impl Default for TopicTaxonomy {
    fn default() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("wait_time", &["wait", "delay", "queue", "slow"]),
            (
                "staff_attitude",
                &[
                    "rude",
                    "impolite",
                    "shouted",
                    "disrespectful",
                    "unfriendly",
                    "nonchalant",
                    "care",
                    "attitude",
                    "doctor",
                    "nurse",
                    "receptionist",
                ],
            ),
            (
                "medication",
                &["drug", "pill", "prescription", "dose", "tablet", "medicine", "pharmacy"],
            ),
            (
                "cost",
                &["expensive", "bill", "cost", "money", "price", "insurance", "charge"],
            ),
            (
                "cleanliness",
                &["dirty", "filthy", "unhygienic", "unclean", "hygiene", "smell"],
            ),
            (
                "facilities",
                &["equipment", "bed", "toilet", "ward", "parking", "broken"],
            ),
        ];

        Self {
            entries: table
                .iter()
                .map(|(name, triggers)| TopicEntry {
                    name: (*name).to_string(),
                    triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl TopicTaxonomy {
    /// Load a taxonomy from a JSON file of the same shape as the built-in
    /// table: `{"entries": [{"name": ..., "triggers": [...]}]}`.
    ///
    /// Triggers are normalized on load so the table matches against canonical
    /// text no matter how the file was written.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read taxonomy file {}", path.display()))?;
        let mut taxonomy: TopicTaxonomy = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse taxonomy file {}", path.display()))?;

        if taxonomy.entries.is_empty() {
            anyhow::bail!("Taxonomy file {} defines no topics", path.display());
        }

        for entry in &mut taxonomy.entries {
            entry.triggers = entry.triggers.iter().map(|t| normalize(t)).collect();
            entry.triggers.retain(|t| !t.is_empty());
            if entry.triggers.is_empty() {
                anyhow::bail!("Topic \"{}\" has no usable triggers", entry.name);
            }
        }

        Ok(taxonomy)
    }

    /// Topic names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_order_is_stable() {
        let taxonomy = TopicTaxonomy::default();
        assert_eq!(
            taxonomy.names(),
            vec![
                "wait_time",
                "staff_attitude",
                "medication",
                "cost",
                "cleanliness",
                "facilities"
            ]
        );
    }

    #[test]
    fn default_triggers_are_normalized_already() {
        let taxonomy = TopicTaxonomy::default();
        for entry in &taxonomy.entries {
            for trigger in &entry.triggers {
                assert_eq!(trigger, &normalize(trigger), "trigger not canonical");
            }
        }
    }
}
