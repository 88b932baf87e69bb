use std::str::FromStr;

use serde::Deserialize;

use crate::error::NormalizeError;

/// A total, deterministic string similarity in `[0, 1]`.
///
/// Implementations compare the strings exactly as given; case folding is the
/// caller's job (see [`compute_similarity_matrix`](super::matcher::compute_similarity_matrix)).
pub trait SimilarityMetric {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Optimal string alignment: substitutions, insertions, deletions and
/// transpositions of adjacent characters each cost 1. No substring is edited
/// more than once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Osa;

/// Plain edit distance: substitutions, insertions and deletions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Levenshtein;

impl SimilarityMetric for Osa {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized(a, b, true)
    }
}

impl SimilarityMetric for Levenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized(a, b, false)
    }
}

/// Configurable choice of metric.
///
/// Parsed through [`FromStr`] everywhere (config and CLI), which also accepts
/// `lv` as an alias for `levenshtein`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MetricKind {
    #[default]
    Osa,
    Levenshtein,
}

impl MetricKind {
    pub fn build(self) -> Box<dyn SimilarityMetric> {
        match self {
            MetricKind::Osa => Box::new(Osa),
            MetricKind::Levenshtein => Box::new(Levenshtein),
        }
    }
}

impl FromStr for MetricKind {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "osa" => Ok(MetricKind::Osa),
            "levenshtein" | "lv" => Ok(MetricKind::Levenshtein),
            _ => Err(NormalizeError::UnknownMetric(s.to_string())),
        }
    }
}

impl TryFrom<String> for MetricKind {
    type Error = NormalizeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricKind::Osa => write!(f, "osa"),
            MetricKind::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

/// `1 - distance / longer_length`, counted in chars.
/// Two empty strings are identical (1.0); one empty string scores 0.0.
fn normalized(a: &str, b: &str, transpositions: bool) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }
    let distance = edit_distance(&a, &b, transpositions);
    1.0 - distance as f64 / longest as f64
}

fn edit_distance(a: &[char], b: &[char], transpositions: bool) -> usize {
    if a == b {
        return 0;
    }
    let m = b.len();
    if a.is_empty() {
        return m;
    }
    if m == 0 {
        return a.len();
    }

    // Rolling rows: i-2, i-1, i.
    let mut prev2 = vec![0usize; m + 1];
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut curr = vec![0usize; m + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=m {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut d = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
            if transpositions && i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d = d.min(prev2[j - 2] + 1);
            }
            curr[j] = d;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}
