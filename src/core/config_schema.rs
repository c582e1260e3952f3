use crate::core::key::PropertyKey;
use crate::symbols::*;
use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Trait for configuration sections with validation and schema support
pub trait ConfigSchema: DeserializeOwned + JsonSchema {
    /// The name of this configuration schema (for error reporting)
    fn schema_name() -> &'static str;

    /// Validate the configuration and provide detailed error messages
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Parse and validate configuration from TOML value
    fn from_toml_value(value: &toml::Value) -> Result<Self> {
        let config: Self = value.clone().try_into().with_context(|| {
            format!(
                "Failed to parse {} configuration",
                <Self as ConfigSchema>::schema_name()
            )
        })?;

        config.validate().with_context(|| {
            format!(
                "Invalid {} configuration",
                <Self as ConfigSchema>::schema_name()
            )
        })?;

        Ok(config)
    }

    /// JSON schema describing this configuration section
    fn json_schema() -> Result<serde_json::Value> {
        let schema = schemars::schema_for!(Self);
        serde_json::to_value(schema).with_context(|| {
            format!(
                "Failed to render {} schema",
                <Self as ConfigSchema>::schema_name()
            )
        })
    }
}

/// Helper functions for common validation patterns
pub struct ValidationHelpers;

impl ValidationHelpers {
    /// Validate that every configured method key is a non-empty name
    pub fn validate_method_keys(field: &str, keys: Option<&[PropertyKey]>) -> Result<()> {
        for (position, key) in keys.unwrap_or_default().iter().enumerate() {
            if key.as_str().is_some_and(|name| name.trim().is_empty()) {
                return Err(anyhow::anyhow!(
                    "Empty method name in '{field}' at position {position}"
                ));
            }
        }
        Ok(())
    }

    /// Format a validation error message for a configuration section
    pub fn format_validation_error(
        section: &str,
        valid_fields: &str,
        example: &str,
        error: &anyhow::Error,
    ) -> String {
        // Extract the most specific error from the chain
        let root_error = error
            .chain()
            .last()
            .map(|e| e.to_string())
            .unwrap_or_else(|| error.to_string());

        format!(
            "{SYMBOL_INDICATOR_WARNING} Configuration validation failed for [{section}]\n\
             Error: {root_error}\n\
             Valid fields: {valid_fields}\n\
             Example: {example}\n\
             Note: Continuing with default configuration"
        )
    }
}
