use anyhow::Result;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::core::config_schema::{ConfigSchema, ValidationHelpers};
use crate::core::key::PropertyKey;
use crate::core::value::Value;

/// Options for a single provider call
///
/// The method lists and `define` flag can be read from TOML/JSON; contexts
/// are live objects and are always supplied in code.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct MixConfig {
    /// Must be a `Value::Object` for method installation or seeding;
    /// `Value::Array` is plain data and is rejected like any other non-object.
    #[serde(skip)]
    pub public_context: Option<Value>,

    #[serde(skip)]
    pub shared_context: Option<Value>,

    #[schemars(
        with = "Option<Vec<String>>",
        description = "Methods installed on the public context"
    )]
    pub public_methods: Option<Vec<PropertyKey>>,

    #[schemars(
        with = "Option<Vec<String>>",
        description = "Methods installed on the returned mix object"
    )]
    pub mix_methods: Option<Vec<PropertyKey>>,

    #[schemars(description = "Run the context initializers before installing methods")]
    pub define: bool,
}

impl MixConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_public_context(mut self, context: impl Into<Value>) -> Self {
        self.public_context = Some(context.into());
        self
    }

    pub fn with_shared_context(mut self, context: impl Into<Value>) -> Self {
        self.shared_context = Some(context.into());
        self
    }

    pub fn with_public_methods<K, I>(mut self, keys: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = K>,
    {
        self.public_methods = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_mix_methods<K, I>(mut self, keys: I) -> Self
    where
        K: Into<PropertyKey>,
        I: IntoIterator<Item = K>,
    {
        self.mix_methods = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_define(mut self, define: bool) -> Self {
        self.define = define;
        self
    }
}

impl ConfigSchema for MixConfig {
    fn schema_name() -> &'static str {
        "MixConfig"
    }

    fn validate(&self) -> Result<()> {
        ValidationHelpers::validate_method_keys("public_methods", self.public_methods.as_deref())?;
        ValidationHelpers::validate_method_keys("mix_methods", self.mix_methods.as_deref())?;
        Ok(())
    }
}
