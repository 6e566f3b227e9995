//! An extractor that logs each fetch and folds node names into a trail.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use ancestry_config::{FragmentCache, Resolver, TestUnitRef, TypeRef};
//! use ancestry_config_test_helpers::spy::{SpyExtractor, Trail};
//!
//! let spy = SpyExtractor::new();
//! let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
//!     .register(spy.clone())?
//!     .build();
//! let unit = TestUnitRef::leaf_member(vec![TypeRef::new("a.Leaf")], "runs");
//! let config = resolver.resolve(&unit)?;
//! assert_eq!(config.get::<Trail>()?.as_str(), "default:(top):a:a.Leaf:runs");
//! assert_eq!(spy.take_log(), ["default", "(top)", "a", "a.Leaf", "runs"]);
//! # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
//! ```

use std::sync::Arc;

use ancestry_config::{ConfigResult, Extractor, MemberRef, TypeRef};
use parking_lot::Mutex;

/// Colon-separated names of every node folded into a resolution.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trail(String);

impl Trail {
    /// The folded names.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extractor whose fragments are node names, logging every fetch.
///
/// Clones share one log, so a test can keep a handle after registering.
#[derive(Clone, Debug, Default)]
pub struct SpyExtractor {
    log: Arc<Mutex<Vec<String>>>,
}

impl SpyExtractor {
    /// Create a spy with an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches received since the log was last taken, in call order.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Drain the log.
    #[must_use]
    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.lock())
    }

    fn record(&self, name: &str) -> Trail {
        self.log.lock().push(name.to_owned());
        Trail(name.to_owned())
    }
}

impl Extractor for SpyExtractor {
    type Fragment = Trail;

    fn default_fragment(&self) -> Trail {
        self.record("default")
    }

    fn fragment_for_package(&self, name: &str) -> ConfigResult<Option<Trail>> {
        let label = if name.is_empty() { "(top)" } else { name };
        Ok(Some(self.record(label)))
    }

    fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<Trail>> {
        Ok(Some(self.record(ty.name())))
    }

    fn fragment_for_member(&self, member: &MemberRef) -> ConfigResult<Option<Trail>> {
        Ok(Some(self.record(member.name())))
    }

    fn merge(&self, parent: &Trail, child: &Trail) -> Trail {
        Trail(format!("{}:{}", parent.0, child.0))
    }
}
