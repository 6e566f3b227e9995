//! Extensions for mapping errors to `ConfigResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(...))` patterns
//! when converting external error types into the crate's
//! `ConfigResult<T>` alias (`Result<T, Arc<ConfigError>>`).
//!
//! - Use [`ConfigResultExt::into_config`] for error types that implement
//!   `Into<ConfigError>` (e.g., `figment::Error`).
//! - Use [`MalformedExt::malformed`] inside extractors to report that a
//!   node's declared metadata could not be parsed.
//! - Use [`ResultIntoFigment::to_figment`] where an API expects
//!   `figment::Error`, such as a `figment::Jail` closure.
//!
//! # Examples
//!
//! ```
//! use ancestry_config::{ConfigResult, FragmentKind, MalformedExt};
//!
//! fn parse_level(raw: &str) -> ConfigResult<u32> {
//!     raw.parse::<u32>()
//!         .malformed(FragmentKind::of::<u32>(), "(top)")
//! }
//!
//! assert!(parse_level("21").is_ok());
//! assert!(parse_level("twenty").is_err());
//! ```

use std::fmt::Display;
use std::sync::Arc;

use crate::{ConfigError, ConfigResult, FragmentKind};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<ConfigError>` into a `ConfigResult<T>`.
pub trait ConfigResultExt<T, E> {
    /// Convert `Result<T, E>` into `ConfigResult<T>` using `Into<ConfigError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<ConfigError>`.
    fn into_config(self) -> ConfigResult<T>;
}

impl<T, E> ConfigResultExt<T, E> for Result<T, E>
where
    E: Into<ConfigError>,
{
    fn into_config(self) -> ConfigResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}

/// Extension tailored to reporting unparseable declared metadata.
pub trait MalformedExt<T> {
    /// Convert the error into a [`ConfigError::MalformedFragment`] for `kind`
    /// at `node`.
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when the input is `Err`.
    fn malformed(self, kind: FragmentKind, node: impl Display) -> ConfigResult<T>;
}

impl<T, E> MalformedExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn malformed(self, kind: FragmentKind, node: impl Display) -> ConfigResult<T> {
        self.map_err(|e| ConfigError::malformed(kind, node, e))
    }
}

/// Convert shared errors into `figment::Error`.
pub trait IntoFigmentError {
    /// Convert into a `figment::Error`. The original figment error is kept
    /// when this is the last handle to a [`ConfigError::Settings`]; otherwise
    /// only the message survives.
    fn into_figment(self) -> figment::Error;
}

impl IntoFigmentError for Arc<ConfigError> {
    fn into_figment(self) -> figment::Error {
        Arc::try_unwrap(self).map_or_else(
            |shared| figment::Error::from(shared.to_string()),
            figment::Error::from,
        )
    }
}

/// Extension to convert `ConfigResult<T>` into `Result<T, figment::Error>`.
pub trait ResultIntoFigment<T> {
    /// Map the error with [`IntoFigmentError::into_figment`].
    ///
    /// # Errors
    ///
    /// Returns the converted error when the input is `Err`.
    fn to_figment(self) -> Result<T, figment::Error>;
}

impl<T> ResultIntoFigment<T> for ConfigResult<T> {
    fn to_figment(self) -> Result<T, figment::Error> {
        self.map_err(IntoFigmentError::into_figment)
    }
}
