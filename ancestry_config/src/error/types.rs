//! Primary error enum for resolution flows.

use camino::Utf8PathBuf;
use figment::Error as FigmentError;
use thiserror::Error;

/// Errors that can occur while resolving configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// Declared metadata for one kind could not be turned into a fragment.
    ///
    /// Captured per kind inside a [`crate::Configuration`]; sibling kinds of
    /// the same resolution are unaffected.
    #[error("malformed {kind} fragment at {node}: {source}")]
    MalformedFragment {
        /// Name of the fragment kind whose extractor failed.
        kind: &'static str,
        /// Ancestry node whose declared metadata was rejected.
        node: String,
        /// Underlying parse or deserialisation failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration kind was requested that no extractor produces.
    #[error("no extractor is registered for {kind}")]
    NoSuchKind {
        /// Name of the requested fragment kind.
        kind: &'static str,
    },

    /// The inheritance description of a unit has no defined chain order.
    #[error("ambiguous hierarchy for '{unit}': {reason}")]
    AmbiguousHierarchy {
        /// Display form of the unit being resolved.
        unit: String,
        /// Why the lineage was rejected.
        reason: String,
    },

    /// Two extractors were registered for the same fragment kind.
    #[error("an extractor for {kind} is already registered")]
    DuplicateKind {
        /// Name of the fragment kind registered twice.
        kind: &'static str,
    },

    /// A property resource exists but could not be read.
    #[error("failed to read resource '{path}': {source}")]
    Resource {
        /// Resource path relative to the lookup root.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Resolver settings could not be gathered or extracted.
    #[error("invalid resolver settings: {0}")]
    Settings(#[from] Box<FigmentError>),
}

/// Failure converting a raw property value into a typed field.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropertyError {
    /// The value does not parse as the field's type.
    #[error("property '{key}' has invalid value '{value}': {reason}")]
    InvalidValue {
        /// Property key.
        key: String,
        /// Raw value as written in the resource.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}
