// Library interface for mixkit
pub mod config;
pub mod core;
pub mod logging;
pub mod mixin;
pub mod symbols;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::core::descriptor::{PropertyDescriptor, PropertySlot};
pub use crate::core::error::{MixinError, ObjectError};
pub use crate::core::key::{PropertyKey, Symbol};
pub use crate::core::object::{ObjectRef, WeakObjectRef};
pub use crate::core::value::{Method, Value};
pub use crate::mixin::{MixConfig, Mixin};
