//! Package-scoped property files.
//!
//! Every package prefix may carry a property resource. The resource for
//! package `a.b` lives at `a/b/<file>`; the top-level resource is `<file>`
//! itself. Values are plain strings; list-valued keys hold comma-separated
//! entries.

mod loader;
mod parser;

use std::sync::Arc;

use camino::Utf8PathBuf;
use tracing::trace;

use crate::ConfigResult;

pub use loader::{DirResources, InMemoryResources, ResourceLoader};
pub use parser::PropertySet;

/// File name looked up in every package when none is configured.
pub const DEFAULT_PROPERTIES_FILE: &str = "config.properties";

/// Loads and parses the property resource of each package.
#[derive(Clone)]
pub struct PackageProperties {
    loader: Arc<dyn ResourceLoader>,
    file_name: String,
}

impl PackageProperties {
    /// Look up [`DEFAULT_PROPERTIES_FILE`] through `loader`.
    #[must_use]
    pub fn new(loader: impl ResourceLoader + 'static) -> Self {
        Self::shared(Arc::new(loader))
    }

    /// Look up [`DEFAULT_PROPERTIES_FILE`] through a shared `loader`.
    #[must_use]
    pub fn shared(loader: Arc<dyn ResourceLoader>) -> Self {
        Self {
            loader,
            file_name: DEFAULT_PROPERTIES_FILE.to_owned(),
        }
    }

    /// Look up `file_name` instead of the default.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// File name looked up in each package.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Resource path of the property file for `package`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::properties::{InMemoryResources, PackageProperties};
    ///
    /// let properties = PackageProperties::new(InMemoryResources::new());
    /// assert_eq!(properties.resource_path(""), "config.properties");
    /// assert_eq!(properties.resource_path("org.example"), "org/example/config.properties");
    /// ```
    #[must_use]
    pub fn resource_path(&self, package: &str) -> Utf8PathBuf {
        let mut path = Utf8PathBuf::new();
        for segment in package.split('.').filter(|segment| !segment.is_empty()) {
            path.push(segment);
        }
        path.push(&self.file_name);
        path
    }

    /// Load and parse the property file of `package`, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Resource`] when the resource exists but
    /// cannot be read.
    pub fn load(&self, package: &str) -> ConfigResult<Option<PropertySet>> {
        let path = self.resource_path(package);
        let Some(text) = self.loader.load(&path)? else {
            trace!(path = %path, "no property resource");
            return Ok(None);
        };
        Ok(Some(PropertySet::parse(&text)))
    }
}

impl std::fmt::Debug for PackageProperties {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackageProperties")
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
