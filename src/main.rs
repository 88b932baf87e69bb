//! `stormtype` — map free-text storm event labels onto a fixed taxonomy.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and apply CLI overrides.
//! 3. Load the taxonomy (file or built-in) and compile rewrite rules.
//! 4. Read the label column of the record file ([`records`]).
//! 5. Normalize the distinct labels ([`Normalizer::normalize`]).
//! 6. Re-tag all records and measure the fallback rate ([`QualityReport::build`]).
//! 7. Render the requested report.
//! 8. Exit `0`, or `1` when `max_fallback_ratio` is set and exceeded.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cli::{Cli, ReportFormat};
use stormtype::config::load_config;
use stormtype::logging::init_tracing;
use stormtype::normalize::matcher::MinSimilarity;
use stormtype::normalize::preprocess::Preprocessor;
use stormtype::records;
use stormtype::report::{self, RunReport};
use stormtype::{Normalizer, QualityReport, ReferenceTaxonomy};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir()?;
    let mut config = load_config(&cwd, cli.config.as_deref())?;

    // CLI overrides
    if let Some(min) = cli.min_similarity {
        config.normalizer.min_similarity = min;
    }
    if let Some(metric) = cli.metric {
        config.normalizer.metric = metric;
    }
    if let Some(column) = cli.column.clone() {
        config.input.label_column = column;
    }
    if let Some(path) = cli.taxonomy.clone() {
        config.input.taxonomy = Some(path);
    }

    let min_similarity: MinSimilarity = config.min_similarity()?;
    let max_fallback_ratio = config.max_fallback_ratio()?;
    let taxonomy = match &config.input.taxonomy {
        Some(path) => ReferenceTaxonomy::from_file(path)?,
        None => ReferenceTaxonomy::storm_events(),
    };
    let preprocessor = Preprocessor::new(config.rewrite_rules()?);
    info!(
        taxonomy = taxonomy.len(),
        rules = preprocessor.rules().len(),
        min_similarity = min_similarity.value(),
        metric = %config.normalizer.metric,
        "configuration loaded"
    );

    let labels = read_records(&cli, &config.input.label_column)?;
    info!(records = labels.len(), "records loaded");

    let normalizer = Normalizer::new(
        preprocessor,
        taxonomy,
        config.normalizer.metric.build(),
        min_similarity,
    );
    let assignments = normalizer.normalize(&labels);

    let quality = QualityReport::build(&labels, &assignments);
    info!(
        fallback_labels = quality.fallback_labels,
        fallback_records = quality.fallback_records,
        fallback_record_ratio = quality.fallback_record_ratio,
        "mapping quality"
    );

    match cli.report {
        ReportFormat::Terminal => {
            let fallbacks = QualityReport::fallback_label_records(&labels, &assignments);
            report::terminal::render(
                &quality,
                &assignments,
                &fallbacks,
                &cli.input,
                cli.verbose,
                cli.quiet,
            )?;
        }
        ReportFormat::Json => {
            let run = RunReport {
                min_similarity: min_similarity.value(),
                metric: config.normalizer.metric.to_string(),
                quality: &quality,
                assignments: &assignments,
            };
            println!("{}", serde_json::to_string_pretty(&run)?);
        }
    }

    // Exit code: 1 if the fallback share is above the configured ceiling
    if quality.exceeds_fallback_limit(max_fallback_ratio) {
        warn!(
            ratio = quality.fallback_record_ratio,
            max = max_fallback_ratio,
            "fallback ratio above configured maximum"
        );
        std::process::exit(1);
    }

    Ok(())
}

fn read_records(cli: &Cli, column: &str) -> Result<Vec<String>> {
    let spinner = if !cli.quiet {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Reading {}", cli.input.display()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let reader = records::reader_for(&cli.input, column);
    let labels = reader
        .read_labels(&cli.input)
        .with_context(|| format!("loading labels from {}", cli.input.display()))?;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
        eprintln!(
            "  {} {} records from {}",
            "→".cyan(),
            labels.len(),
            cli.input.display()
        );
    }

    Ok(labels)
}
