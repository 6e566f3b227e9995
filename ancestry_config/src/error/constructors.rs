//! Constructors for `ConfigError` values shared behind an [`Arc`].

use std::fmt::Display;
use std::sync::Arc;

use camino::Utf8Path;

use super::ConfigError;
use crate::FragmentKind;

impl ConfigError {
    /// Construct a [`ConfigError::MalformedFragment`] for `kind` at `node`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::{ConfigError, FragmentKind};
    ///
    /// let err = ConfigError::malformed(FragmentKind::of::<String>(), "(top)", "bad sdk");
    /// assert!(matches!(&*err, ConfigError::MalformedFragment { node, .. } if node == "(top)"));
    /// ```
    #[must_use]
    pub fn malformed(
        kind: FragmentKind,
        node: impl Display,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Arc<Self> {
        Arc::new(Self::MalformedFragment {
            kind: kind.name(),
            node: node.to_string(),
            source: source.into(),
        })
    }

    /// Construct a [`ConfigError::NoSuchKind`] for `kind`.
    #[must_use]
    pub fn no_such_kind(kind: FragmentKind) -> Arc<Self> {
        Arc::new(Self::NoSuchKind { kind: kind.name() })
    }

    /// Construct a [`ConfigError::AmbiguousHierarchy`] for `unit`.
    #[must_use]
    pub fn ambiguous(unit: impl Display, reason: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::AmbiguousHierarchy {
            unit: unit.to_string(),
            reason: reason.into(),
        })
    }

    /// Construct a [`ConfigError::DuplicateKind`] for `kind`.
    #[must_use]
    pub fn duplicate_kind(kind: FragmentKind) -> Arc<Self> {
        Arc::new(Self::DuplicateKind { kind: kind.name() })
    }

    /// Construct a [`ConfigError::Resource`] for a failed read of `path`.
    #[must_use]
    pub fn resource(path: &Utf8Path, source: std::io::Error) -> Arc<Self> {
        Arc::new(Self::Resource {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns `true` when the error is a per-kind metadata failure.
    #[must_use]
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedFragment { .. })
    }
}
