//! Resource lookup for property files.

use std::collections::HashMap;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};

use crate::{ConfigError, ConfigResult};

/// Reads a resource by relative path.
///
/// A missing resource is `Ok(None)`, never an error.
pub trait ResourceLoader: Send + Sync {
    /// Contents of the resource at `path`, if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Resource`] when the resource exists but cannot
    /// be read.
    fn load(&self, path: &Utf8Path) -> ConfigResult<Option<String>>;
}

/// Resources held in memory, keyed by relative path.
///
/// # Examples
///
/// ```
/// use ancestry_config::properties::{InMemoryResources, ResourceLoader};
/// use camino::Utf8Path;
///
/// let resources = InMemoryResources::new().with_resource("config.properties", "sdk: 21");
/// let text = resources.load(Utf8Path::new("config.properties"))?;
/// assert_eq!(text.as_deref(), Some("sdk: 21"));
/// # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryResources {
    resources: HashMap<Utf8PathBuf, String>,
}

impl InMemoryResources {
    /// Create an empty resource set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource.
    #[must_use]
    pub fn with_resource(mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) -> Self {
        self.insert(path, contents);
        self
    }

    /// Add or replace a resource.
    pub fn insert(&mut self, path: impl Into<Utf8PathBuf>, contents: impl Into<String>) {
        self.resources.insert(path.into(), contents.into());
    }
}

impl<P, C> FromIterator<(P, C)> for InMemoryResources
where
    P: Into<Utf8PathBuf>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut resources = Self::new();
        for (path, contents) in iter {
            resources.insert(path, contents);
        }
        resources
    }
}

impl ResourceLoader for InMemoryResources {
    fn load(&self, path: &Utf8Path) -> ConfigResult<Option<String>> {
        Ok(self.resources.get(path).cloned())
    }
}

/// Resources read from beneath a directory through `cap-std`.
///
/// Lookups cannot escape the root directory.
#[derive(Debug)]
pub struct DirResources {
    root: Dir,
}

impl DirResources {
    /// Open `path` as the resource root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Resource`] when the directory cannot be opened.
    pub fn open(path: &Utf8Path) -> ConfigResult<Self> {
        let root = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| ConfigError::resource(path, err))?;
        Ok(Self { root })
    }

    /// Use an already opened directory as the resource root.
    #[must_use]
    pub const fn from_dir(root: Dir) -> Self {
        Self { root }
    }
}

impl ResourceLoader for DirResources {
    fn load(&self, path: &Utf8Path) -> ConfigResult<Option<String>> {
        match self.root.read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::resource(path, err)),
        }
    }
}
