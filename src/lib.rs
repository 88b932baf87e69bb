//! Fuzzy normalization of free-text storm event types onto a fixed taxonomy.
//!
//! - [`normalize`] — preprocessing, similarity scoring, thresholded classification.
//! - [`taxonomy`] — validated reference taxonomy and the built-in storm event list.
//! - [`records`] — reading the label column from record files.
//! - [`quality`] — re-tagging records and measuring the fallback rate.
//! - [`config`] — TOML configuration for every tunable.
//! - [`report`] — terminal and JSON output.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod quality;
pub mod records;
pub mod report;
pub mod taxonomy;

pub use error::NormalizeError;
pub use models::{Assignments, Category, LabelAssignment, QualityReport, FALLBACK_CATEGORY};
pub use normalize::Normalizer;
pub use taxonomy::ReferenceTaxonomy;
