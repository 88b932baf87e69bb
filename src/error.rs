use thiserror::Error;

/// Precondition failures raised before any similarity scoring takes place.
///
/// A label that scores below the threshold is *not* an error; it is assigned
/// to the fallback category instead.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("invalid taxonomy: {reason}")]
    InvalidTaxonomy { reason: String },
    #[error("invalid label set: {reason}")]
    InvalidLabelSet { reason: String },
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("rewrite rule pattern '{pattern}' does not compile: {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("unknown similarity metric '{0}' (expected 'osa' or 'levenshtein')")]
    UnknownMetric(String),
}
