//! Object model the mixing operates on
//!
//! - [`key`]: string and symbol property keys
//! - [`value`]: dynamic values and callable methods
//! - [`descriptor`]: data/accessor property descriptors
//! - [`object`]: shared object handles with prototype lookup
//! - [`error`]: error types
//! - [`config_schema`]: validated configuration sections

pub mod config_schema;
pub mod descriptor;
pub mod error;
pub mod key;
pub mod object;
pub mod value;
