use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::substitution::SubstitutionOptions;

/// Application configuration module
/// This module handles the application configuration including loading
/// and validating configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language codes offered by the selector, first one is the default
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Name of the per-language object holding the source -> replacement pairs
    #[serde(default = "default_dictionary_section")]
    pub dictionary_section: String,

    /// Matching rules for the substitution pass
    #[serde(default)]
    pub substitution: SubstitutionOptions,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output document settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Extension suggested for the saved document
    #[serde(default = "default_extension")]
    pub default_extension: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_extension: default_extension(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_languages() -> Vec<String> {
    vec!["RU".to_string(), "EN".to_string()]
}

fn default_dictionary_section() -> String {
    "Title".to_string()
}

fn default_extension() -> String {
    "xml".to_string()
}

impl Config {
    /// Load the configuration from a JSON file, falling back to defaults when
    /// the file does not exist. The file is never created or rewritten.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {:?}", path))?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(anyhow!("At least one language must be configured"));
        }

        let mut seen = HashSet::new();
        for code in &self.languages {
            if code.trim().is_empty() {
                return Err(anyhow!("Language codes cannot be blank"));
            }
            // Selection ignores ASCII case, so codes differing only in case clash
            if !seen.insert(code.trim().to_ascii_uppercase()) {
                return Err(anyhow!("Duplicate language code: {}", code));
            }
        }

        if self.dictionary_section.trim().is_empty() {
            return Err(anyhow!("Dictionary section name cannot be blank"));
        }

        if self.output.default_extension.trim().is_empty() {
            return Err(anyhow!("Output extension cannot be blank"));
        }

        Ok(())
    }

    /// The language selected when the user makes no choice
    pub fn default_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            dictionary_section: default_dictionary_section(),
            substitution: SubstitutionOptions::default(),
            output: OutputConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
