//! Error types for the object model and the mixing operation.

use crate::core::key::PropertyKey;
use thiserror::Error;

/// Failures raised by [`ObjectRef`](crate::core::object::ObjectRef) operations
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("Cannot assign to read only property '{0}'")]
    ReadOnly(PropertyKey),

    #[error("Cannot redefine property: {0}")]
    NotConfigurable(PropertyKey),

    #[error("{0} is not a function")]
    NotCallable(PropertyKey),

    #[error("Converting circular structure to JSON")]
    CircularStructure,

    #[error("Accessor for '{key}' failed")]
    Accessor {
        key: PropertyKey,
        #[source]
        source: anyhow::Error,
    },
}

/// Failures raised while creating or calling a mixin provider
#[derive(Debug, Error)]
pub enum MixinError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} was already mixed in.")]
    Conflict(PropertyKey),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error("Mixin producer failed")]
    Producer(#[source] anyhow::Error),

    #[error("Context initializer failed")]
    Initializer(#[source] anyhow::Error),
}

impl MixinError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        MixinError::Validation(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, MixinError::Validation(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, MixinError::Conflict(_))
    }
}
