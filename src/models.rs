use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Name reported for labels that match no taxonomy entry closely enough.
pub const FALLBACK_CATEGORY: &str = "Other";

/// The category a label ends up in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// A taxonomy entry, spelled as in the taxonomy.
    Matched(String),
    /// No entry reached the similarity threshold.
    Fallback,
}

impl Category {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Category::Fallback)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Matched(name) => write!(f, "{}", name),
            Category::Fallback => write!(f, "{}", FALLBACK_CATEGORY),
        }
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Classification outcome for one distinct label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelAssignment {
    /// The label as it appeared in the source data.
    pub label: String,
    /// The label after rewrite rules were applied; this is what was scored.
    pub preprocessed: String,
    pub category: Category,
    /// Best similarity score found, kept even when the fallback was chosen.
    pub confidence: f64,
}

/// Assignments keyed by raw label. Ordered so serialized output is stable.
pub type Assignments = BTreeMap<String, LabelAssignment>;

/// Label and record counts for one category after re-tagging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub labels: usize,
    pub records: usize,
}

/// How well the mapping covers the record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total_records: usize,
    pub distinct_labels: usize,
    pub fallback_labels: usize,
    pub fallback_records: usize,
    pub fallback_label_ratio: f64,
    pub fallback_record_ratio: f64,
    pub categories: Vec<CategoryCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_displays_as_other() {
        assert_eq!(Category::Fallback.to_string(), "Other");
        assert_eq!(Category::Matched("Hail".into()).to_string(), "Hail");
    }

    #[test]
    fn test_category_serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Matched("Tornado".into())).unwrap();
        assert_eq!(json, "\"Tornado\"");
        let json = serde_json::to_string(&Category::Fallback).unwrap();
        assert_eq!(json, "\"Other\"");
    }
}
