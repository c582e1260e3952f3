//! Mixin providers
//!
//! A [`Mixin`] wraps a producer that builds a bag of methods closed over
//! private state. Each call to [`Mixin::mix`] runs the producer once,
//! optionally seeds the contexts, then installs the requested methods onto
//! the public context and onto a fresh mix object, which is returned.
//!
//! Methods installed on the public context must not own it: capture
//! [`ObjectRef::downgrade`] rather than a clone of the context, or the
//! context and its methods keep each other alive once every outside handle
//! is gone. The same applies to a method that calls a sibling through the
//! bag; capture the sibling [`Method`](crate::core::value::Method) itself.
//!
//! ```
//! use mixkit::{MixConfig, Method, Mixin, ObjectRef, Value};
//! use std::sync::atomic::{AtomicI32, Ordering};
//! use std::sync::Arc;
//!
//! let counter = Mixin::new(|_public, _shared| {
//!     let x = Arc::new(AtomicI32::new(0));
//!     let read = x.clone();
//!     Ok(Value::from(ObjectRef::from_entries([
//!         ("getX", Method::new(move |_, _| Ok(Value::from(read.load(Ordering::SeqCst))))),
//!         ("updateX", Method::new(move |_, _| {
//!             x.fetch_add(1, Ordering::SeqCst);
//!             Ok(Value::Undefined)
//!         })),
//!     ])))
//! });
//!
//! let mix = counter
//!     .mix(&MixConfig::new().with_mix_methods(["getX", "updateX"]))
//!     .unwrap();
//! mix.call_method("updateX", &[]).unwrap();
//! assert_eq!(mix.call_method("getX", &[]).unwrap(), Value::from(1));
//! ```

pub mod config;
mod install;
mod seed;

#[cfg(test)]
mod tests;

use anyhow::Result;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::core::error::MixinError;
use crate::core::object::ObjectRef;
use crate::core::value::Value;
use crate::symbols::*;

pub use config::MixConfig;
use install::install_methods;
use seed::ContextInitializers;

/// Signature shared by producers and context initializers:
/// `(public_context, shared_context) -> value`
pub type ContextFn = dyn Fn(&Value, &Value) -> Result<Value> + Send + Sync;

/// Factory and provider in one: holds the producer and the optional
/// context initializers, and performs one mixing operation per [`mix`](Mixin::mix) call.
#[derive(Clone)]
pub struct Mixin {
    producer: Arc<ContextFn>,
    initializers: ContextInitializers,
}

impl Mixin {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(producer),
            initializers: ContextInitializers::default(),
        }
    }

    /// Builds a mixin from a dynamic value, which must be a function. It is
    /// called with `this` undefined and `[public_context, shared_context]`.
    pub fn from_value(producer: &Value) -> Result<Self, MixinError> {
        let Some(producer) = producer.as_function().cloned() else {
            return Err(MixinError::validation("producer must be a function"));
        };
        Ok(Self::new(move |public, shared| {
            producer.call(&Value::Undefined, &[public.clone(), shared.clone()])
        }))
    }

    /// Returns a provider that, on `define`, merges the initializer's result
    /// onto the public context.
    pub fn with_public_context_initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.initializers.public = Some(Arc::new(initializer));
        self
    }

    /// Returns a provider that, on `define`, merges the initializer's result
    /// onto the shared context.
    pub fn with_shared_context_initializer<F>(mut self, initializer: F) -> Self
    where
        F: Fn(&Value, &Value) -> Result<Value> + Send + Sync + 'static,
    {
        self.initializers.shared = Some(Arc::new(initializer));
        self
    }

    pub fn has_public_context_initializer(&self) -> bool {
        self.initializers.public.is_some()
    }

    pub fn has_shared_context_initializer(&self) -> bool {
        self.initializers.shared.is_some()
    }

    /// Performs one mixing operation and returns the new mix object.
    ///
    /// The producer always runs first, even if the call then fails. A failure
    /// aborts the call without undoing methods already installed by it.
    pub fn mix(&self, config: &MixConfig) -> Result<ObjectRef, MixinError> {
        let public = config.public_context.clone().unwrap_or_default();
        let shared = config.shared_context.clone().unwrap_or_default();

        debug!(
            "{SYMBOL_ACTION_MIX} Mixing {} public and {} mix methods (define: {})",
            config.public_methods.as_ref().map_or(0, Vec::len),
            config.mix_methods.as_ref().map_or(0, Vec::len),
            config.define
        );

        let methods = (self.producer)(&public, &shared).map_err(MixinError::Producer)?;

        if config.define {
            self.initializers.seed(&public, &shared)?;
        }

        if let Some(keys) = &config.public_methods {
            let target = public.as_object().ok_or_else(|| {
                MixinError::validation(
                    "public_context must be an object when public_methods is provided",
                )
            })?;
            install_methods(keys, target, &methods)?;
        }

        let mix = ObjectRef::new();
        if let Some(keys) = &config.mix_methods {
            install_methods(keys, &mix, &methods)?;
        }

        Ok(mix)
    }
}

impl fmt::Debug for Mixin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mixin")
            .field("public_context_initializer", &self.has_public_context_initializer())
            .field("shared_context_initializer", &self.has_shared_context_initializer())
            .finish_non_exhaustive()
    }
}
