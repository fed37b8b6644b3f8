//! Configuration loading for the Journal Club Assistant.
//!
//! Configuration lives in a YAML file (default `config.yaml`) listing the
//! journals to scan, the keywords to match, the lookback window, and an
//! optional contact email for the CrossRef polite pool.

use crate::error::{JournalClubError, Result};
use serde::Deserialize;
use std::path::Path;

/// A single journal to scan.
#[derive(Debug, Clone, Deserialize)]
pub struct JournalConfig {
    /// Human-readable journal name (fallback when the API omits a container title)
    pub name: String,
    /// The journal's ISSN
    pub issn: String,
}

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Journals to scan
    pub journals: Vec<JournalConfig>,
    /// Keywords to match against title and abstract
    pub keywords: Vec<String>,
    /// How many days back to search
    #[serde(default = "default_search_days")]
    pub search_days: u32,
    /// Contact email for polite API headers
    #[serde(default)]
    pub email: String,
}

fn default_search_days() -> u32 {
    30
}

impl Config {
    /// Load and validate configuration from a YAML file.
    ///
    /// Fails when the file is missing or empty, a journal entry lacks a name
    /// or ISSN, or the journal or keyword list ends up empty.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(JournalClubError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Err(JournalClubError::Config("Config file is empty".to_string()));
        }

        let mut config: Config = serde_yaml::from_str(&raw)?;
        config.validate()?;

        // Trim keywords and drop blanks
        config.keywords = config
            .keywords
            .iter()
            .map(|kw| kw.trim().to_string())
            .filter(|kw| !kw.is_empty())
            .collect();

        if config.keywords.is_empty() {
            return Err(JournalClubError::Config(
                "At least one keyword must be configured".to_string(),
            ));
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.journals.is_empty() {
            return Err(JournalClubError::Config(
                "At least one journal must be configured".to_string(),
            ));
        }

        for journal in &self.journals {
            if journal.name.trim().is_empty() || journal.issn.trim().is_empty() {
                return Err(JournalClubError::Config(format!(
                    "Each journal must have 'name' and 'issn': {:?}",
                    journal
                )));
            }
        }

        if self.keywords.is_empty() {
            return Err(JournalClubError::Config(
                "At least one keyword must be configured".to_string(),
            ));
        }

        Ok(())
    }
}
