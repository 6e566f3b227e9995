//! The pluggable extractor contract and the kind identifiers that index it.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ancestry::AncestryChain;
use crate::{ConfigResult, FragmentCache, MemberRef, TypeRef};

/// Produces and merges configuration fragments of one kind.
///
/// The extractor supplies single-node contributions; the resolver supplies
/// the ancestry. Returning `Ok(None)` means the node contributes nothing and
/// its parent passes through unchanged.
///
/// `merge` must make a left fold along a chain well defined: the resolver
/// reuses any cached prefix as the parent for the rest of the walk.
///
/// # Examples
///
/// ```
/// use ancestry_config::{ConfigResult, Extractor, MemberRef, TypeRef};
///
/// /// Counts how many nodes declared anything.
/// struct Depth;
///
/// impl Extractor for Depth {
///     type Fragment = u32;
///
///     fn default_fragment(&self) -> u32 { 0 }
///     fn fragment_for_package(&self, _: &str) -> ConfigResult<Option<u32>> { Ok(None) }
///     fn fragment_for_type(&self, _: &TypeRef) -> ConfigResult<Option<u32>> { Ok(Some(1)) }
///     fn fragment_for_member(&self, _: &MemberRef) -> ConfigResult<Option<u32>> { Ok(Some(1)) }
///     fn merge(&self, parent: &u32, child: &u32) -> u32 { parent + child }
/// }
/// ```
pub trait Extractor: Send + Sync + 'static {
    /// Fragment type produced by this extractor; also the kind key.
    type Fragment: Send + Sync + 'static;

    /// Value used at the `DEFAULT` node.
    fn default_fragment(&self) -> Self::Fragment;

    /// Contribution of exactly the package `name` (the top level is `""`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MalformedFragment`] when the package's
    /// declared configuration cannot be parsed.
    fn fragment_for_package(&self, name: &str) -> ConfigResult<Option<Self::Fragment>>;

    /// Contribution of the type's own declared metadata.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MalformedFragment`] when the metadata
    /// cannot be parsed.
    fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<Self::Fragment>>;

    /// Contribution of the member's own declared metadata.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::MalformedFragment`] when the metadata
    /// cannot be parsed.
    fn fragment_for_member(&self, member: &MemberRef) -> ConfigResult<Option<Self::Fragment>>;

    /// Overlay `child` on `parent`; fields the child leaves unset inherit.
    fn merge(&self, parent: &Self::Fragment, child: &Self::Fragment) -> Self::Fragment;
}

/// Stable identifier of a configuration kind, derived from its fragment type.
#[derive(Clone, Copy, Debug)]
pub struct FragmentKind {
    id: TypeId,
    name: &'static str,
}

impl FragmentKind {
    /// The kind whose fragments have type `F`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::FragmentKind;
    ///
    /// assert_eq!(FragmentKind::of::<String>(), FragmentKind::of::<String>());
    /// assert_ne!(FragmentKind::of::<String>(), FragmentKind::of::<u32>());
    /// ```
    #[must_use]
    pub fn of<F: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<F>(),
            name: std::any::type_name::<F>(),
        }
    }

    /// Human-readable name of the fragment type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }
}

impl PartialEq for FragmentKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FragmentKind {}

impl Hash for FragmentKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Identity of one registered extractor instance.
///
/// Two extractors producing the same fragment type still get distinct ids,
/// so resolvers sharing a [`FragmentCache`] never read each other's entries.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct ExtractorId(u64);

static NEXT_EXTRACTOR_ID: AtomicU64 = AtomicU64::new(0);

impl ExtractorId {
    /// Allocate an id no other caller in this process has received.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::ExtractorId;
    ///
    /// assert_ne!(ExtractorId::fresh(), ExtractorId::fresh());
    /// ```
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_EXTRACTOR_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ExtractorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A fragment stored without its static type.
pub(crate) type SharedFragment = Arc<dyn Any + Send + Sync>;

/// Object-safe view of an [`Extractor`], used to hold several kinds at once.
pub(crate) trait ErasedExtractor: Send + Sync {
    fn kind(&self) -> FragmentKind;

    fn resolve(
        &self,
        id: ExtractorId,
        chain: &AncestryChain,
        cache: &FragmentCache,
    ) -> ConfigResult<SharedFragment>;
}

impl<E: Extractor> ErasedExtractor for E {
    fn kind(&self) -> FragmentKind {
        FragmentKind::of::<E::Fragment>()
    }

    fn resolve(
        &self,
        id: ExtractorId,
        chain: &AncestryChain,
        cache: &FragmentCache,
    ) -> ConfigResult<SharedFragment> {
        crate::resolver::walk(self, id, chain, cache).map(|fragment| fragment as SharedFragment)
    }
}
