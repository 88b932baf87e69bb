use std::collections::HashMap;

use crate::models::{Assignments, Category, CategoryCount, QualityReport};

impl QualityReport {
    /// Re-tag every record through `assignments` and count the outcome.
    ///
    /// Records whose label has no assignment are counted under the fallback
    /// category, so every record is accounted for.
    pub fn build<S: AsRef<str>>(records: &[S], assignments: &Assignments) -> Self {
        let mut record_counts: HashMap<&Category, usize> = HashMap::new();
        let mut fallback_records = 0;

        for record in records {
            let category = assignments
                .get(record.as_ref())
                .map(|a| &a.category)
                .unwrap_or(&Category::Fallback);
            if category.is_fallback() {
                fallback_records += 1;
            }
            *record_counts.entry(category).or_insert(0) += 1;
        }

        let mut label_counts: HashMap<&Category, usize> = HashMap::new();
        for a in assignments.values() {
            *label_counts.entry(&a.category).or_insert(0) += 1;
        }

        let fallback_labels = label_counts.get(&Category::Fallback).copied().unwrap_or(0);

        let mut categories: Vec<CategoryCount> = label_counts
            .keys()
            .chain(record_counts.keys())
            .copied()
            .collect::<std::collections::BTreeSet<&Category>>()
            .into_iter()
            .map(|category| CategoryCount {
                category: category.clone(),
                labels: label_counts.get(category).copied().unwrap_or(0),
                records: record_counts.get(category).copied().unwrap_or(0),
            })
            .collect();
        categories.sort_by(|a, b| {
            b.records
                .cmp(&a.records)
                .then_with(|| a.category.to_string().cmp(&b.category.to_string()))
        });

        QualityReport {
            total_records: records.len(),
            distinct_labels: assignments.len(),
            fallback_labels,
            fallback_records,
            fallback_label_ratio: ratio(fallback_labels, assignments.len()),
            fallback_record_ratio: ratio(fallback_records, records.len()),
            categories,
        }
    }

    /// Whether the record-level fallback ratio is above `max`.
    /// Without a ceiling the run always passes.
    pub fn exceeds_fallback_limit(&self, max: Option<f64>) -> bool {
        max.is_some_and(|max| self.fallback_record_ratio > max)
    }

    /// Record counts per raw label that ended in the fallback category, most frequent first.
    pub fn fallback_label_records<'a, S: AsRef<str>>(
        records: &'a [S],
        assignments: &Assignments,
    ) -> Vec<(&'a str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in records {
            let label = record.as_ref();
            let is_fallback = assignments
                .get(label)
                .map_or(true, |a| a.category.is_fallback());
            if is_fallback {
                *counts.entry(label).or_insert(0) += 1;
            }
        }
        let mut pairs: Vec<(&str, usize)> = counts.into_iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabelAssignment;

    fn assignment(label: &str, category: Category) -> (String, LabelAssignment) {
        (
            label.to_string(),
            LabelAssignment {
                label: label.to_string(),
                preprocessed: label.to_string(),
                category,
                confidence: 1.0,
            },
        )
    }

    fn sample() -> Assignments {
        [
            assignment("TORNADO", Category::Matched("Tornado".into())),
            assignment("TORNDAO", Category::Matched("Tornado".into())),
            assignment("HAIL", Category::Matched("Hail".into())),
            assignment("XYZZY", Category::Fallback),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_counts_records_and_labels() {
        let records = ["TORNADO", "TORNADO", "TORNDAO", "HAIL", "XYZZY", "XYZZY"];
        let report = QualityReport::build(&records, &sample());

        assert_eq!(report.total_records, 6);
        assert_eq!(report.distinct_labels, 4);
        assert_eq!(report.fallback_labels, 1);
        assert_eq!(report.fallback_records, 2);
        assert!((report.fallback_record_ratio - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(report.fallback_label_ratio, 0.25);

        assert_eq!(report.categories[0].category, Category::Matched("Tornado".into()));
        assert_eq!(report.categories[0].labels, 2);
        assert_eq!(report.categories[0].records, 3);
        // Sorted by record count, descending.
        assert_eq!(report.categories[1].category, Category::Fallback);
        assert_eq!(report.categories[2].category, Category::Matched("Hail".into()));
    }

    #[test]
    fn test_every_record_accounted_for() {
        let records = ["TORNADO", "NEVER SEEN", "HAIL"];
        let report = QualityReport::build(&records, &sample());
        let sum: usize = report.categories.iter().map(|c| c.records).sum();
        assert_eq!(sum, records.len());
        assert_eq!(report.fallback_records, 1);
    }

    #[test]
    fn test_empty_input() {
        let records: [&str; 0] = [];
        let report = QualityReport::build(&records, &Assignments::new());
        assert_eq!(report.fallback_record_ratio, 0.0);
        assert!(report.categories.is_empty());
    }

    #[test]
    fn test_fallback_limit_decision() {
        let records = ["TORNADO", "HAIL", "XYZZY", "XYZZY"];
        let report = QualityReport::build(&records, &sample());
        assert_eq!(report.fallback_record_ratio, 0.5);

        assert!(!report.exceeds_fallback_limit(None));
        assert!(!report.exceeds_fallback_limit(Some(0.5)));
        assert!(!report.exceeds_fallback_limit(Some(1.0)));
        assert!(report.exceeds_fallback_limit(Some(0.49)));
        assert!(report.exceeds_fallback_limit(Some(0.0)));
    }

    #[test]
    fn test_no_fallback_never_exceeds() {
        let records = ["TORNADO", "HAIL"];
        let report = QualityReport::build(&records, &sample());
        assert!(!report.exceeds_fallback_limit(Some(0.0)));
    }

    #[test]
    fn test_fallback_label_records_sorted_by_count() {
        let records = ["XYZZY", "NEVER SEEN", "XYZZY", "HAIL"];
        let pairs = QualityReport::fallback_label_records(&records, &sample());
        assert_eq!(pairs, vec![("XYZZY", 2), ("NEVER SEEN", 1)]);
    }
}
