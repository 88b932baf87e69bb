use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

use stormtype::normalize::similarity::MetricKind;

#[derive(Parser, Debug)]
#[command(
    name = "stormtype",
    about = "Map free-text storm event types onto a fixed taxonomy",
    version
)]
pub struct Cli {
    /// Record file: CSV with a header row, or one label per line
    pub input: PathBuf,

    /// Config file [default: ./.stormtype/config.toml, fallback ~/.config/stormtype/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Taxonomy file, one entry per line (overrides config; built-in list otherwise)
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// CSV column holding the event type (overrides config)
    #[arg(long, value_name = "NAME")]
    pub column: Option<String>,

    /// Acceptance threshold in [0, 1] (overrides config)
    #[arg(long, value_name = "X")]
    pub min_similarity: Option<f64>,

    /// Similarity metric: osa | levenshtein (alias lv) (overrides config)
    #[arg(long, value_name = "METRIC", value_parser = MetricKind::from_str)]
    pub metric: Option<MetricKind>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Show every assignment, and info-level logs
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
