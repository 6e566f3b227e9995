//! Process-wide memoisation of merged-from-root fragments.
//!
//! An entry for a node always holds the fold of `DEFAULT` through that node
//! along its canonical prefix, for one registered extractor. Package prefixes do not depend on the type
//! being resolved, so any type in the lineage of a package shares them. Type
//! entries fold in a package chain and every base type, so their key records
//! both. Entries are added on first computation and never removed; failures
//! are never stored.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::extractor::SharedFragment;
use crate::{ConfigResult, ExtractorId, FragmentKind};

/// Ancestry position of a cached fragment.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NodeKey {
    /// The `DEFAULT` node.
    Default,
    /// A package prefix.
    Package(String),
    /// A type, identified by the package chain and lineage prefix ending at it.
    Type {
        /// Package whose prefixes precede the type nodes.
        package: String,
        /// Type names from the most-base type down to this one.
        lineage: Vec<String>,
    },
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Package(name) if name.is_empty() => f.write_str("(top)"),
            Self::Package(name) => f.write_str(name),
            Self::Type { lineage, .. } => f.write_str(&lineage.join(" > ")),
        }
    }
}

/// Key of one cache entry: which extractor, which kind, and which node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CacheKey {
    extractor: ExtractorId,
    kind: FragmentKind,
    node: NodeKey,
}

impl CacheKey {
    /// Key the fragment of `kind` produced by `extractor` at `node`.
    #[must_use]
    pub const fn new(extractor: ExtractorId, kind: FragmentKind, node: NodeKey) -> Self {
        Self {
            extractor,
            kind,
            node,
        }
    }

    /// Extractor that produced the entry.
    #[must_use]
    pub const fn extractor(&self) -> ExtractorId {
        self.extractor
    }

    /// Fragment kind of the entry.
    #[must_use]
    pub const fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Node of the entry.
    #[must_use]
    pub const fn node(&self) -> &NodeKey {
        &self.node
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}@{}", self.kind, self.extractor, self.node)
    }
}

/// Snapshot of cache counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute the fragment.
    pub misses: u64,
    /// Entries currently held.
    pub entries: usize,
}

/// Append-only store of merged fragments, safe to share between threads.
///
/// Create one per process (or per test) and hand it to
/// [`crate::Resolver::builder`]. Several resolvers may share it: entries are
/// keyed by the registration that produced them, so sharing never changes
/// what a resolver returns.
#[derive(Default)]
pub struct FragmentCache {
    entries: RwLock<HashMap<CacheKey, SharedFragment>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl FragmentCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs without holding the lock. When two callers race on the
    /// same missing key, both compute and the first stored value is returned
    /// to each of them. Errors are returned without being stored, so a later
    /// call retries.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `compute`.
    pub fn get_or_compute<F, C>(&self, key: CacheKey, compute: C) -> ConfigResult<Arc<F>>
    where
        F: Send + Sync + 'static,
        C: FnOnce() -> ConfigResult<Arc<F>>,
    {
        if let Some(hit) = self.lookup::<F>(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            trace!(key = %key, "fragment cache hit");
            return Ok(hit);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(key = %key, "fragment cache miss");
        let computed = compute()?;
        let mut entries = self.entries.write();
        let stored = entries
            .entry(key)
            .or_insert_with(|| Arc::clone(&computed) as SharedFragment);
        Ok(Arc::clone(stored).downcast::<F>().unwrap_or(computed))
    }

    /// Returns `true` when an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` when nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Current hit, miss, and entry counts.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }

    fn lookup<F: Send + Sync + 'static>(&self, key: &CacheKey) -> Option<Arc<F>> {
        let entry = self.entries.read().get(key).map(Arc::clone)?;
        entry.downcast::<F>().ok()
    }
}

impl fmt::Debug for FragmentCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FragmentCache")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}
