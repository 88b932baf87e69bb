//! Fuzzy normalization of free-text event labels onto a reference taxonomy.
//!
//! - [`preprocess`] — ordered, case-insensitive abbreviation rewrites.
//! - [`similarity`] — edit-distance similarity metrics normalized to `[0, 1]`.
//! - [`matcher`] — similarity matrix, best-match selection, threshold
//!   classification over the distinct label set.
//!
//! [`Normalizer`] chains the three and keys its output by the raw label.

pub mod matcher;
pub mod preprocess;
pub mod similarity;

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::models::Assignments;
use crate::taxonomy::ReferenceTaxonomy;

use matcher::{classify_all, MinSimilarity};
use preprocess::Preprocessor;
use similarity::SimilarityMetric;

/// Preprocessing plus classification, configured once per run.
pub struct Normalizer {
    preprocessor: Preprocessor,
    taxonomy: ReferenceTaxonomy,
    metric: Box<dyn SimilarityMetric>,
    min_similarity: MinSimilarity,
}

impl Normalizer {
    pub fn new(
        preprocessor: Preprocessor,
        taxonomy: ReferenceTaxonomy,
        metric: Box<dyn SimilarityMetric>,
        min_similarity: MinSimilarity,
    ) -> Self {
        Self {
            preprocessor,
            taxonomy,
            metric,
            min_similarity,
        }
    }

    pub fn taxonomy(&self) -> &ReferenceTaxonomy {
        &self.taxonomy
    }

    pub fn min_similarity(&self) -> MinSimilarity {
        self.min_similarity
    }

    /// Assign every distinct raw label.
    ///
    /// Raw labels that rewrite to the same text are scored once and share the
    /// result; each still gets its own entry keyed by its original spelling.
    pub fn normalize<S: AsRef<str>>(&self, raw_labels: &[S]) -> Assignments {
        let rewritten: BTreeMap<&str, String> = raw_labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<BTreeSet<&str>>()
            .into_iter()
            .map(|raw| (raw, self.preprocessor.apply(raw)))
            .collect();

        let scored: Vec<&str> = rewritten.values().map(String::as_str).collect();
        let by_text = classify_all(
            &scored,
            &self.taxonomy,
            self.metric.as_ref(),
            self.min_similarity,
        );

        info!(
            raw = rewritten.len(),
            scored = by_text.len(),
            taxonomy = self.taxonomy.len(),
            "labels classified"
        );

        rewritten
            .into_iter()
            .map(|(raw, text)| {
                let mut assignment = by_text
                    .get(&text)
                    .expect("classify_all assigns every distinct input label")
                    .clone();
                assignment.label = raw.to_string();
                assignment.preprocessed = text;
                (raw.to_string(), assignment)
            })
            .collect()
    }
}
