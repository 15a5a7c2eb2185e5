//! Comparison parameters and their validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("window size must be at least 1")]
    ZeroWindowSize,
    #[error("minimum matches must be at least 1")]
    ZeroMinimumMatches,
    #[error("minimum matches ({minimum_matches}) exceeds window size ({window_size})")]
    MinimumMatchesExceedsWindow {
        minimum_matches: usize,
        window_size: usize,
    },
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Comparison parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonParams {
    pub match_case: bool,
    pub strict_search: bool,
    pub use_porter_stemmer: bool,
    pub use_stop_words: bool,
    pub minimum_matches: usize,  // Overlap needed to accept a window pair
    pub window_size: usize,      // Significant tokens per base window
    pub maximize_primary_window_size: bool,
    pub minimum_secondary_matches: usize,
    pub print_best_only: bool,   // Reporting only
    pub brute_force: bool,       // Skip the inverted index, test every secondary window
}

impl Default for ComparisonParams {
    fn default() -> Self {
        Self {
            match_case: false,
            strict_search: true,
            use_porter_stemmer: true,
            use_stop_words: true,
            minimum_matches: 1,
            window_size: 1,
            maximize_primary_window_size: false,
            minimum_secondary_matches: 1,
            print_best_only: true,
            brute_force: false,
        }
    }
}

impl ComparisonParams {
    /// Check the parameters before any comparison work begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.minimum_matches == 0 {
            return Err(ConfigError::ZeroMinimumMatches);
        }
        if self.minimum_matches > self.window_size {
            return Err(ConfigError::MinimumMatchesExceedsWindow {
                minimum_matches: self.minimum_matches,
                window_size: self.window_size,
            });
        }
        Ok(())
    }

    /// Parse parameters from TOML. Missing keys fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let params: ComparisonParams = toml::from_str(content)?;
        Ok(params)
    }

    /// Load parameters from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Overlap required for a window pair whose longer side has
    /// `significant_len` significant tokens.
    ///
    /// For base windows this is `minimum_matches`; extended windows keep the
    /// same tolerance ratio, rounded up.
    pub fn required_overlap(&self, significant_len: usize) -> usize {
        if significant_len <= self.window_size {
            return self.minimum_matches;
        }
        (self.minimum_matches * significant_len).div_ceil(self.window_size)
    }
}
