//! Thresholds for mining and recommendation.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{check_top_n, check_unit_interval, Result};

/// Default minimum support (2% of users).
pub const DEFAULT_MIN_SUPPORT: f64 = 0.02;

/// Default minimum rule confidence.
pub const DEFAULT_MIN_CONFIDENCE: f64 = 0.3;

/// Default number of recommendations returned per query.
pub const DEFAULT_TOP_N: usize = 5;

/// Mining and ranking thresholds.
///
/// # Examples
///
/// ```
/// use assocrec::config::RecommenderConfig;
///
/// let config = RecommenderConfig::from_toml_str("min_support = 0.05").unwrap();
/// assert_eq!(config.min_support, 0.05);
/// assert_eq!(config.min_confidence, 0.3);
/// assert_eq!(config.top_n, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecommenderConfig {
    /// Minimum fraction of users that must like an itemset, in (0, 1]
    pub min_support: f64,
    /// Minimum rule confidence, in (0, 1]
    pub min_confidence: f64,
    /// Maximum number of recommendations per query
    pub top_n: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_support: DEFAULT_MIN_SUPPORT,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl RecommenderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_support(mut self, min_support: f64) -> Self {
        self.min_support = min_support;
        self
    }

    #[must_use]
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Check every threshold.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::InvalidInput`](crate::error::RulesError::InvalidInput)
    /// for the first out-of-range field.
    pub fn validate(&self) -> Result<()> {
        check_unit_interval("min_support", self.min_support)?;
        check_unit_interval("min_confidence", self.min_confidence)?;
        check_top_n(self.top_n)
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed TOML or unknown keys, and an
    /// invalid input error for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config = Self::parse_toml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read [`Self::from_toml_str`] from a file.
    ///
    /// # Errors
    ///
    /// Also fails if the file cannot be read.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let config = Self::read_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode a TOML document without range checks, for callers that
    /// override fields before calling [`Self::validate`].
    ///
    /// # Errors
    ///
    /// Returns a config error for malformed TOML or unknown keys.
    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read [`Self::parse_toml`] from a file.
    ///
    /// # Errors
    ///
    /// Also fails if the file cannot be read.
    pub fn read_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }
}
