use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::NormalizeError;
use crate::normalize::matcher::MinSimilarity;
use crate::normalize::preprocess::{RewriteRule, DEFAULT_RULES};
use crate::normalize::similarity::MetricKind;

/// Root configuration structure, deserialized from `.stormtype/config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Matching policy.
    pub normalizer: NormalizerConfig,
    /// Where labels and the taxonomy come from.
    #[serde(default)]
    pub input: InputConfig,
    /// Abbreviation rewrites applied before scoring, in order.
    /// Omitted means the default storm rules; `rewrite = []` disables rewriting.
    #[serde(default = "default_rewrite_rules")]
    pub rewrite: Vec<RuleConfig>,
}

/// Defines how labels are matched against the taxonomy.
#[derive(Debug, Deserialize)]
pub struct NormalizerConfig {
    /// Best matches scoring below this go to the fallback category.
    pub min_similarity: f64,
    #[serde(default)]
    pub metric: MetricKind,
    /// Fail the run when more than this fraction of records falls back.
    #[serde(default)]
    pub max_fallback_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct InputConfig {
    /// CSV header of the event-type column.
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// Taxonomy file, one entry per line. The built-in list is used when absent.
    #[serde(default)]
    pub taxonomy: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            label_column: default_label_column(),
            taxonomy: None,
        }
    }
}

/// One `[[rewrite]]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub replacement: String,
}

fn default_label_column() -> String {
    "EVTYPE".to_string()
}

fn default_rewrite_rules() -> Vec<RuleConfig> {
    DEFAULT_RULES
        .iter()
        .map(|(pattern, replacement)| RuleConfig {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
        })
        .collect()
}

impl Default for Config {
    /// Built-in configuration used when no config file is found.
    ///
    /// Accepts matches scoring at least 0.4 under OSA similarity, expands the
    /// `TSTM` and `FLD`/`FLDG` abbreviations, and never fails on fallback rate.
    fn default() -> Self {
        Config {
            normalizer: NormalizerConfig {
                min_similarity: 0.4,
                metric: MetricKind::Osa,
                max_fallback_ratio: None,
            },
            input: InputConfig::default(),
            rewrite: default_rewrite_rules(),
        }
    }
}

impl Config {
    /// Validated threshold.
    pub fn min_similarity(&self) -> Result<MinSimilarity> {
        Ok(MinSimilarity::new(self.normalizer.min_similarity)?)
    }

    /// Validated fallback ceiling, if one is configured.
    pub fn max_fallback_ratio(&self) -> Result<Option<f64>> {
        match self.normalizer.max_fallback_ratio {
            Some(value) if !(0.0..=1.0).contains(&value) => {
                Err(NormalizeError::InvalidThreshold {
                    name: "max_fallback_ratio",
                    value,
                }
                .into())
            }
            other => Ok(other),
        }
    }

    /// Compile the `[[rewrite]]` tables in order.
    pub fn rewrite_rules(&self) -> Result<Vec<RewriteRule>> {
        let rules = self
            .rewrite
            .iter()
            .map(|r| RewriteRule::new(&r.pattern, &r.replacement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rules)
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.stormtype/config.toml`
/// 3. `~/.config/stormtype/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".stormtype").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("stormtype").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&content)?;

    // Relative taxonomy paths resolve against the config file's directory.
    if let (Some(taxonomy), Some(dir)) = (config.input.taxonomy.as_mut(), path.parent()) {
        if taxonomy.is_relative() {
            *taxonomy = dir.join(&*taxonomy);
        }
    }

    Ok(config)
}
