//! Trait-based conversions between external error types and `ConfigError`.

use figment::Error as FigmentError;

use super::ConfigError;

impl From<FigmentError> for ConfigError {
    fn from(e: FigmentError) -> Self {
        Self::Settings(Box::new(e))
    }
}

impl From<ConfigError> for FigmentError {
    /// Allow using `?` in tests that run inside `figment::Jail`.
    fn from(e: ConfigError) -> Self {
        match e {
            ConfigError::Settings(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
