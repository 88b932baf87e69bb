use regex::{Regex, RegexBuilder};

use crate::error::NormalizeError;

/// A case-insensitive rewrite applied to a label before scoring.
#[derive(Debug, Clone)]
pub struct RewriteRule {
    regex: Regex,
    replacement: String,
}

impl RewriteRule {
    /// Compile `pattern` case-insensitively. The replacement is inserted
    /// literally; `$` has no capture-group meaning.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self, NormalizeError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| NormalizeError::InvalidRule {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            regex,
            replacement: replacement.to_string(),
        })
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, regex::NoExpand(&self.replacement))
            .into_owned()
    }
}

/// Abbreviation expansions for storm event labels, as `(pattern, replacement)`.
///
/// `TSTM` has no trailing boundary so glued forms (`TSTMW`, `TSTMWIND`) expand too.
pub const DEFAULT_RULES: [(&str, &str); 2] = [
    (r"\bTSTM", "Thunderstorm"),
    (r"\bFLDG?\b", "Flood"),
];

/// Compile [`DEFAULT_RULES`].
pub fn default_rules() -> Result<Vec<RewriteRule>, NormalizeError> {
    DEFAULT_RULES
        .iter()
        .map(|(p, r)| RewriteRule::new(p, r))
        .collect()
}

/// Ordered rule list; each rule sees the output of the one before it.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    rules: Vec<RewriteRule>,
}

impl Preprocessor {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn apply(&self, label: &str) -> String {
        self.rules
            .iter()
            .fold(label.to_string(), |text, rule| rule.apply(&text))
    }
}
