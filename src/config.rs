use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::config_schema::{ConfigSchema, ValidationHelpers};
use crate::logging::DEFAULT_TIME_FORMAT;
use crate::mixin::MixConfig;

/// Configuration for mixkit consumers
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Logging configuration
    pub logging: Option<LoggingConfig>,

    /// Default provider options, kept raw and validated on access
    pub mix: Option<toml::Value>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Enable verbose logging by default
    pub verbose: Option<bool>,

    /// Time format for log timestamps (uses time crate format syntax)
    pub time_format: Option<String>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file as TOML")
    }

    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    /// Check if verbose logging is enabled by default
    pub fn is_verbose_default(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    /// Get the time format for log timestamps
    pub fn get_time_format(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|l| l.time_format.clone())
            .unwrap_or_else(|| DEFAULT_TIME_FORMAT.to_string())
    }

    /// Default provider options from the `[mix]` section.
    ///
    /// An invalid section is reported with a warning and replaced by
    /// `MixConfig::default()`.
    pub fn mix_defaults(&self) -> MixConfig {
        let Some(raw) = &self.mix else {
            return MixConfig::default();
        };

        match MixConfig::from_toml_value(raw) {
            Ok(config) => config,
            Err(e) => {
                let error_msg = ValidationHelpers::format_validation_error(
                    "mix",
                    "public_methods, mix_methods, define",
                    r#"mix_methods = ["getX", "updateX"]"#,
                    &e,
                );
                tracing::warn!("{error_msg}");
                MixConfig::default()
            }
        }
    }
}
