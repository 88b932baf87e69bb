use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::NormalizeError;

/// The 48 permitted event types of the NWS Storm Data directive (10-1605).
pub const STORM_EVENT_TYPES: [&str; 48] = [
    "Astronomical Low Tide",
    "Avalanche",
    "Blizzard",
    "Coastal Flood",
    "Cold/Wind Chill",
    "Debris Flow",
    "Dense Fog",
    "Dense Smoke",
    "Drought",
    "Dust Devil",
    "Dust Storm",
    "Excessive Heat",
    "Extreme Cold/Wind Chill",
    "Flash Flood",
    "Flood",
    "Frost/Freeze",
    "Funnel Cloud",
    "Freezing Fog",
    "Hail",
    "Heat",
    "Heavy Rain",
    "Heavy Snow",
    "High Surf",
    "High Wind",
    "Hurricane (Typhoon)",
    "Ice Storm",
    "Lake-Effect Snow",
    "Lakeshore Flood",
    "Lightning",
    "Marine Hail",
    "Marine High Wind",
    "Marine Strong Wind",
    "Marine Thunderstorm Wind",
    "Rip Current",
    "Seiche",
    "Sleet",
    "Storm Surge/Tide",
    "Strong Wind",
    "Thunderstorm Wind",
    "Tornado",
    "Tropical Depression",
    "Tropical Storm",
    "Tsunami",
    "Volcanic Ash",
    "Waterspout",
    "Wildfire",
    "Winter Storm",
    "Winter Weather",
];

/// Closed, ordered list of valid category names.
///
/// Entries are non-empty as a list and unique under upper-casing, so that
/// best-match selection is always defined and never ambiguous between two
/// spellings of the same category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTaxonomy {
    entries: Vec<String>,
}

impl ReferenceTaxonomy {
    pub fn new<I, S>(entries: I) -> Result<Self, NormalizeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<String> = entries.into_iter().map(Into::into).collect();

        if entries.is_empty() {
            return Err(NormalizeError::InvalidTaxonomy {
                reason: "taxonomy has no entries".to_string(),
            });
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if let Some(first) = seen.insert(entry.to_uppercase(), idx) {
                return Err(NormalizeError::InvalidTaxonomy {
                    reason: format!(
                        "duplicate entry '{}' at positions {} and {}",
                        entry, first, idx
                    ),
                });
            }
        }

        Ok(Self { entries })
    }

    /// The built-in storm event taxonomy.
    pub fn storm_events() -> Self {
        Self {
            entries: STORM_EVENT_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Load a taxonomy file: one entry per line, blank lines and `#` comments skipped.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading taxonomy {}", path.display()))?;
        let entries = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'));
        Ok(Self::new(entries)?)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_builtin_list_is_valid() {
        let builtin = ReferenceTaxonomy::storm_events();
        assert_eq!(builtin.len(), 48);
        assert!(ReferenceTaxonomy::new(STORM_EVENT_TYPES).is_ok());
    }

    #[test]
    fn test_empty_rejected() {
        let err = ReferenceTaxonomy::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidTaxonomy { .. }));
    }

    #[test]
    fn test_case_insensitive_duplicate_rejected() {
        let err = ReferenceTaxonomy::new(["Hail", "Flood", "HAIL"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("HAIL"), "{msg}");
        assert!(msg.contains("0 and 2"), "{msg}");
    }

    #[test]
    fn test_from_file_skips_comments() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# storm types\nTornado\n\n  Flood  \n").unwrap();
        let taxonomy = ReferenceTaxonomy::from_file(file.path()).unwrap();
        assert_eq!(taxonomy.entries(), ["Tornado", "Flood"]);
    }
}
