//! Reference extractors backed by declared metadata and package properties.
//!
//! A [`DeclaredExtractor`] reads one fragment kind from two sources: the
//! property file of each package prefix, and the metadata blobs declared on
//! types and members. Both sources are first turned into the kind's
//! [`DeclaredFragment::Declaration`] (every field optional), then into the
//! fragment itself.

mod kinds;
mod list;

use std::borrow::Cow;
use std::fmt::Display;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ancestry::AncestryNode;
use crate::metadata::MetadataSource;
use crate::properties::{PackageProperties, PropertySet};
use crate::{
    ConfigResult, Extractor, FragmentKind, MalformedExt, MemberRef, PropertyError, TypeRef,
};

pub use kinds::{
    ResourceDeclaration, ResourcePaths, RuntimeDeclaration, RuntimeOptions, SdkDeclaration,
    SdkSelection,
};
pub use list::{ListMode, ListSetting};

/// A fragment kind that can be declared in metadata and property files.
pub trait DeclaredFragment: Clone + Send + Sync + 'static {
    /// Raw declaration at a single node, with every field optional.
    type Declaration: DeserializeOwned;

    /// Read this kind's keys from a package property file.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] when a value cannot be parsed.
    fn from_properties(properties: &PropertySet) -> Result<Self::Declaration, PropertyError>;

    /// Build the fragment contributed by `declaration`.
    fn from_declaration(declaration: Self::Declaration) -> Self;

    /// Overlay `child` on `self`.
    #[must_use]
    fn overlay(&self, child: &Self) -> Self;
}

/// Extractor for one [`DeclaredFragment`] kind.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use ancestry_config::declared::{DeclaredExtractor, SdkSelection};
/// use ancestry_config::metadata::StaticMetadata;
/// use ancestry_config::properties::{InMemoryResources, PackageProperties};
/// use ancestry_config::{FragmentCache, Resolver, TestUnitRef, TypeRef};
/// use serde_json::json;
///
/// let metadata = StaticMetadata::new().with_type("org.example.Base", json!({"sdk": [21]}));
/// let properties =
///     PackageProperties::new(InMemoryResources::new().with_resource("config.properties", "sdk: 19"));
/// let sdk = DeclaredExtractor::<SdkSelection>::new(Arc::new(metadata)).with_properties(properties);
///
/// let resolver = Resolver::builder(Arc::new(FragmentCache::new())).register(sdk)?.build();
/// let unit = TestUnitRef::leaf_member(vec![TypeRef::new("org.example.Base")], "runs");
/// let config = resolver.resolve(&unit)?;
/// assert_eq!(config.get::<SdkSelection>()?.sdk, [21]);
/// # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
/// ```
pub struct DeclaredExtractor<F> {
    metadata: Arc<dyn MetadataSource>,
    properties: Option<PackageProperties>,
    defaults: F,
}

impl<F: DeclaredFragment + Default> DeclaredExtractor<F> {
    /// Read type and member declarations from `metadata`; defaults are
    /// `F::default()` and no property files are consulted.
    #[must_use]
    pub fn new(metadata: Arc<dyn MetadataSource>) -> Self {
        Self::with_defaults(metadata, F::default())
    }
}

impl<F: DeclaredFragment> DeclaredExtractor<F> {
    /// Like [`Self::new`] but seeds every chain with the global `defaults`.
    #[must_use]
    pub fn with_defaults(metadata: Arc<dyn MetadataSource>, defaults: F) -> Self {
        Self {
            metadata,
            properties: None,
            defaults,
        }
    }

    /// Also read package-level declarations from `properties`.
    #[must_use]
    pub fn with_properties(mut self, properties: PackageProperties) -> Self {
        self.properties = Some(properties);
        self
    }

    fn from_metadata(
        &self,
        blob: Option<Cow<'_, Value>>,
        node: impl Display,
    ) -> ConfigResult<Option<F>> {
        let Some(blob) = blob else {
            return Ok(None);
        };
        F::Declaration::deserialize(&*blob)
            .map(|declaration| Some(F::from_declaration(declaration)))
            .malformed(FragmentKind::of::<F>(), node)
    }
}

impl<F: DeclaredFragment> Extractor for DeclaredExtractor<F> {
    type Fragment = F;

    fn default_fragment(&self) -> F {
        self.defaults.clone()
    }

    fn fragment_for_package(&self, name: &str) -> ConfigResult<Option<F>> {
        let Some(properties) = &self.properties else {
            return Ok(None);
        };
        let Some(set) = properties.load(name)? else {
            return Ok(None);
        };
        F::from_properties(&set)
            .map(|declaration| Some(F::from_declaration(declaration)))
            .malformed(
                FragmentKind::of::<F>(),
                AncestryNode::Package(name.to_owned()),
            )
    }

    fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<F>> {
        self.from_metadata(self.metadata.type_metadata(ty), ty)
    }

    fn fragment_for_member(&self, member: &MemberRef) -> ConfigResult<Option<F>> {
        self.from_metadata(self.metadata.member_metadata(member), member)
    }

    fn merge(&self, parent: &F, child: &F) -> F {
        parent.overlay(child)
    }
}

impl<F: DeclaredFragment + std::fmt::Debug> std::fmt::Debug for DeclaredExtractor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredExtractor")
            .field("properties", &self.properties)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
