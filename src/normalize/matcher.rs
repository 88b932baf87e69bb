use std::collections::BTreeSet;

use tracing::debug;

use crate::error::NormalizeError;
use crate::models::{Assignments, Category, LabelAssignment};
use crate::taxonomy::ReferenceTaxonomy;

use super::similarity::SimilarityMetric;

/// Acceptance threshold for a best match, validated to lie in `[0, 1]`.
///
/// No default value: callers choose the operating point.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinSimilarity(f64);

impl MinSimilarity {
    pub fn new(value: f64) -> Result<Self, NormalizeError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(NormalizeError::InvalidThreshold {
                name: "min_similarity",
                value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Dense label × taxonomy score table, row-major.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    labels: Vec<String>,
    entries: Vec<String>,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> usize {
        self.labels.len()
    }

    pub fn cols(&self) -> usize {
        self.entries.len()
    }

    /// Scores of label `i` against every taxonomy entry, in taxonomy order.
    pub fn row(&self, i: usize) -> &[f64] {
        let cols = self.cols();
        &self.scores[i * cols..(i + 1) * cols]
    }

    /// Score for a `(label, entry)` pair, independent of positions.
    pub fn get(&self, label: &str, entry: &str) -> Option<f64> {
        let i = self.labels.iter().position(|l| l == label)?;
        let j = self.entries.iter().position(|e| e == entry)?;
        Some(self.scores[i * self.cols() + j])
    }
}

/// Score every label against every taxonomy entry.
///
/// Both sides are upper-cased before scoring. Labels are scored in the order
/// given; duplicates get their own (identical) rows.
pub fn compute_similarity_matrix<S: AsRef<str>>(
    labels: &[S],
    taxonomy: &ReferenceTaxonomy,
    metric: &dyn SimilarityMetric,
) -> SimilarityMatrix {
    let upper_entries: Vec<String> = taxonomy.entries().iter().map(|e| e.to_uppercase()).collect();
    let mut scores = Vec::with_capacity(labels.len() * upper_entries.len());

    for label in labels {
        let upper = label.as_ref().to_uppercase();
        scores.extend(upper_entries.iter().map(|e| metric.similarity(&upper, e)));
    }

    SimilarityMatrix {
        labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
        entries: taxonomy.entries().to_vec(),
        scores,
    }
}

/// Highest-scoring entry for one matrix row.
///
/// Ties go to the entry that comes first in taxonomy order: a later entry only
/// replaces the current best when its score is strictly greater.
///
/// # Panics
/// If `row` does not have exactly one score per taxonomy entry.
pub fn best_match<'t>(row: &[f64], taxonomy: &'t ReferenceTaxonomy) -> (&'t str, f64) {
    assert_eq!(
        row.len(),
        taxonomy.len(),
        "similarity row has {} scores for a taxonomy of {} entries",
        row.len(),
        taxonomy.len()
    );

    let mut best = 0;
    for (j, &score) in row.iter().enumerate().skip(1) {
        if score > row[best] {
            best = j;
        }
    }
    (taxonomy.entries()[best].as_str(), row[best])
}

/// Apply the threshold to a best match.
pub fn classify(
    label: &str,
    best_entry: &str,
    best_score: f64,
    min_similarity: MinSimilarity,
) -> LabelAssignment {
    let category = if best_score >= min_similarity.value() {
        Category::Matched(best_entry.to_string())
    } else {
        Category::Fallback
    };

    LabelAssignment {
        label: label.to_string(),
        preprocessed: label.to_string(),
        category,
        confidence: best_score,
    }
}

/// Classify every distinct label once.
///
/// The result holds exactly one assignment per distinct input label.
pub fn classify_all<S: AsRef<str>>(
    labels: &[S],
    taxonomy: &ReferenceTaxonomy,
    metric: &dyn SimilarityMetric,
    min_similarity: MinSimilarity,
) -> Assignments {
    let distinct: Vec<&str> = labels
        .iter()
        .map(|l| l.as_ref())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .collect();

    let matrix = compute_similarity_matrix(&distinct, taxonomy, metric);
    debug!(
        rows = matrix.rows(),
        cols = matrix.cols(),
        "similarity matrix computed"
    );

    distinct
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let (entry, score) = best_match(matrix.row(i), taxonomy);
            let assignment = classify(label, entry, score, min_similarity);
            if assignment.category.is_fallback() {
                debug!(label, best = entry, score, "label below threshold");
            }
            (label.to_string(), assignment)
        })
        .collect()
}
