//! The resolution engine.
//!
//! For every registered extractor, the resolver folds the unit's ancestry
//! chain from `DEFAULT` down to the member. Package and type prefixes are
//! looked up in the shared [`FragmentCache`] first, so units sharing
//! ancestors only pay for the nodes nobody has visited yet. The member node
//! is always merged fresh.

mod builder;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::ancestry::{AncestryChain, AncestryNode, AncestryWalker};
use crate::cache::{CacheKey, FragmentCache, NodeKey};
use crate::extractor::ErasedExtractor;
use crate::{ConfigResult, Configuration, Extractor, ExtractorId, FragmentKind, TestUnitRef};

pub use builder::ResolverBuilder;

/// Resolves [`Configuration`] values for units.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use ancestry_config::{
///     ConfigResult, Extractor, FragmentCache, MemberRef, Resolver, TestUnitRef, TypeRef,
/// };
///
/// /// Records the path a resolution walked.
/// struct Trail;
///
/// impl Extractor for Trail {
///     type Fragment = String;
///
///     fn default_fragment(&self) -> String { "default".into() }
///     fn fragment_for_package(&self, name: &str) -> ConfigResult<Option<String>> {
///         Ok((!name.is_empty()).then(|| name.to_owned()))
///     }
///     fn fragment_for_type(&self, ty: &TypeRef) -> ConfigResult<Option<String>> {
///         Ok(Some(ty.name().to_owned()))
///     }
///     fn fragment_for_member(&self, member: &MemberRef) -> ConfigResult<Option<String>> {
///         Ok(Some(member.name().to_owned()))
///     }
///     fn merge(&self, parent: &String, child: &String) -> String {
///         format!("{parent}:{child}")
///     }
/// }
///
/// let resolver = Resolver::builder(Arc::new(FragmentCache::new()))
///     .register(Trail)?
///     .build();
/// let unit = TestUnitRef::leaf_member(vec![TypeRef::new("org.Leaf")], "runs");
/// let config = resolver.resolve(&unit)?;
/// assert_eq!(config.get::<String>()?, "default:org:org.Leaf:runs");
/// # Ok::<(), std::sync::Arc<ancestry_config::ConfigError>>(())
/// ```
pub struct Resolver {
    extractors: Vec<Registered>,
    cache: Arc<FragmentCache>,
    walker: AncestryWalker,
}

impl Resolver {
    /// Start configuring a resolver backed by `cache`.
    #[must_use]
    pub fn builder(cache: Arc<FragmentCache>) -> ResolverBuilder {
        ResolverBuilder::new(cache)
    }

    /// Resolve every registered kind for `unit`.
    ///
    /// Per-kind failures are captured in the returned [`Configuration`];
    /// only an invalid lineage aborts the call.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::AmbiguousHierarchy`] when `unit` has no
    /// well-defined ancestry chain.
    pub fn resolve(&self, unit: &TestUnitRef) -> ConfigResult<Configuration> {
        let chain = self.walker.build_chain(unit)?;
        let resolved = self
            .extractors
            .iter()
            .map(|registered| {
                let kind = registered.extractor.kind();
                let outcome = registered
                    .extractor
                    .resolve(registered.id, &chain, &self.cache);
                match &outcome {
                    Ok(_) => debug!(unit = %chain.unit(), kind = %kind, "resolved configuration kind"),
                    Err(err) => {
                        warn!(unit = %chain.unit(), kind = %kind, error = %err, "configuration kind failed to resolve");
                    }
                }
                (kind, outcome)
            })
            .collect();
        Ok(Configuration::new(chain.unit().to_owned(), resolved))
    }

    /// Kinds this resolver produces, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = FragmentKind> + '_ {
        self.extractors
            .iter()
            .map(|registered| registered.extractor.kind())
    }

    /// The cache shared by this resolver.
    #[must_use]
    pub const fn cache(&self) -> &Arc<FragmentCache> {
        &self.cache
    }

    /// The walker deriving ancestry chains.
    #[must_use]
    pub const fn walker(&self) -> &AncestryWalker {
        &self.walker
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("kinds", &self.kinds().map(FragmentKind::name).collect::<Vec<_>>())
            .field("cache", &self.cache)
            .field("walker", &self.walker)
            .finish()
    }
}

/// An extractor together with the identity its cache entries are keyed by.
pub(crate) struct Registered {
    pub(crate) id: ExtractorId,
    pub(crate) extractor: Box<dyn ErasedExtractor>,
}

/// Fold `chain` for one extractor, reusing and filling `cache`.
pub(crate) fn walk<E: Extractor>(
    extractor: &E,
    id: ExtractorId,
    chain: &AncestryChain,
    cache: &FragmentCache,
) -> ConfigResult<Arc<E::Fragment>> {
    let kind = FragmentKind::of::<E::Fragment>();
    let mut current = cache.get_or_compute(CacheKey::new(id, kind, NodeKey::Default), || {
        Ok(Arc::new(extractor.default_fragment()))
    })?;
    let mut lineage = Vec::new();
    for node in chain {
        current = match node {
            // seeded above
            AncestryNode::Default => continue,
            AncestryNode::Package(name) => {
                let key = CacheKey::new(id, kind, NodeKey::Package(name.clone()));
                cache.get_or_compute(key, || {
                    let child = extractor.fragment_for_package(name)?;
                    Ok(overlay(extractor, current, child))
                })?
            }
            AncestryNode::Type(ty) => {
                lineage.push(ty.name().to_owned());
                let key = CacheKey::new(
                    id,
                    kind,
                    NodeKey::Type {
                        package: chain.package().to_owned(),
                        lineage: lineage.clone(),
                    },
                );
                cache.get_or_compute(key, || {
                    let child = extractor.fragment_for_type(ty)?;
                    Ok(overlay(extractor, current, child))
                })?
            }
            AncestryNode::Member(member) => {
                let child = extractor.fragment_for_member(member)?;
                overlay(extractor, current, child)
            }
        };
    }
    Ok(current)
}

fn overlay<E: Extractor>(
    extractor: &E,
    parent: Arc<E::Fragment>,
    child: Option<E::Fragment>,
) -> Arc<E::Fragment> {
    match child {
        Some(child) => Arc::new(extractor.merge(&parent, &child)),
        None => parent,
    }
}

#[cfg(test)]
mod tests;
