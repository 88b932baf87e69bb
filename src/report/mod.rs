//! Report renderers for a normalization run.
//!
//! - [`terminal`] — colored summary box and tables; respects `--verbose` / `--quiet`.
//!
//! JSON output is a plain `serde_json` dump of [`RunReport`].

pub mod terminal;

use serde::Serialize;

use crate::models::{Assignments, QualityReport};

/// Everything a run produces, as serialized by `--report json`.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub min_similarity: f64,
    pub metric: String,
    pub quality: &'a QualityReport,
    pub assignments: &'a Assignments,
}
