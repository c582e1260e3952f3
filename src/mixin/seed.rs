//! Context seeding for providers called with `define`
//!
//! An initializer returns an object whose own properties (data or accessor,
//! enumerable or not) are merged by descriptor onto its context. Unlike
//! method installation this may redefine existing properties.

use std::sync::Arc;
use tracing::debug;

use crate::core::error::MixinError;
use crate::core::value::Value;
use crate::mixin::ContextFn;
use crate::symbols::*;

#[derive(Clone, Copy, Debug)]
enum ContextSide {
    Public,
    Shared,
}

impl ContextSide {
    fn field(self) -> &'static str {
        match self {
            ContextSide::Public => "public_context",
            ContextSide::Shared => "shared_context",
        }
    }

    fn builder(self) -> &'static str {
        match self {
            ContextSide::Public => "with_public_context_initializer",
            ContextSide::Shared => "with_shared_context_initializer",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ContextSide::Public => "public context",
            ContextSide::Shared => "shared context",
        }
    }
}

/// Optional initializers attached to a provider
#[derive(Clone, Default)]
pub(crate) struct ContextInitializers {
    pub(crate) public: Option<Arc<ContextFn>>,
    pub(crate) shared: Option<Arc<ContextFn>>,
}

impl ContextInitializers {
    /// Runs the public initializer, then the shared one. Either may be absent.
    pub(crate) fn seed(&self, public: &Value, shared: &Value) -> Result<(), MixinError> {
        if let Some(initializer) = &self.public {
            seed_context(ContextSide::Public, initializer.as_ref(), public, shared)?;
        }
        if let Some(initializer) = &self.shared {
            seed_context(ContextSide::Shared, initializer.as_ref(), public, shared)?;
        }
        Ok(())
    }
}

fn seed_context(
    side: ContextSide,
    initializer: &ContextFn,
    public: &Value,
    shared: &Value,
) -> Result<usize, MixinError> {
    let target = match side {
        ContextSide::Public => public,
        ContextSide::Shared => shared,
    };
    let target = target.as_object().ok_or_else(|| {
        MixinError::validation(format!(
            "{} must be an object when {} is provided",
            side.field(),
            side.builder()
        ))
    })?;

    let seed = initializer(public, shared).map_err(MixinError::Initializer)?;
    let source = seed.as_object().ok_or_else(|| {
        MixinError::validation(format!("{} initializer must return an object", side.label()))
    })?;

    let count = target.define_properties_from(source)?;
    debug!("{SYMBOL_ACTION_SEED} Seeded {count} properties onto the {}", side.label());
    Ok(count)
}
