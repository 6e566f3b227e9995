//! Error types produced while resolving configuration.

mod constructors;
mod conversions;
mod types;

pub use types::{ConfigError, PropertyError};
