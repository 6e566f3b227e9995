//! Builder assembling a [`Resolver`] from extractors and settings.

use std::sync::Arc;

use crate::ancestry::AncestryWalker;
use crate::extractor::ErasedExtractor;
use crate::{ConfigError, ConfigResult, Extractor, ExtractorId, FragmentCache, ResolverSettings};

use super::{Registered, Resolver};

/// Registers extractors for a [`Resolver`].
///
/// Each fragment type may be registered once; kinds are resolved in
/// registration order. Every registration gets a fresh [`ExtractorId`].
pub struct ResolverBuilder {
    cache: Arc<FragmentCache>,
    walker: AncestryWalker,
    extractors: Vec<Registered>,
}

impl ResolverBuilder {
    pub(crate) fn new(cache: Arc<FragmentCache>) -> Self {
        Self {
            cache,
            walker: AncestryWalker::new(),
            extractors: Vec::new(),
        }
    }

    /// Register `extractor` for its fragment kind.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateKind`] when an extractor producing the
    /// same fragment type is already registered.
    pub fn register<E: Extractor>(mut self, extractor: E) -> ConfigResult<Self> {
        let candidate: Box<dyn ErasedExtractor> = Box::new(extractor);
        let kind = candidate.kind();
        if self
            .extractors
            .iter()
            .any(|existing| existing.extractor.kind() == kind)
        {
            return Err(ConfigError::duplicate_kind(kind));
        }
        self.extractors.push(Registered {
            id: ExtractorId::fresh(),
            extractor: candidate,
        });
        Ok(self)
    }

    /// Use `walker` to derive ancestry chains.
    #[must_use]
    pub fn walker(mut self, walker: AncestryWalker) -> Self {
        self.walker = walker;
        self
    }

    /// Apply engine-level settings such as the platform root.
    #[must_use]
    pub fn settings(self, settings: &ResolverSettings) -> Self {
        self.walker(settings.walker())
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> Resolver {
        Resolver {
            extractors: self.extractors,
            cache: self.cache,
            walker: self.walker,
        }
    }
}

impl std::fmt::Debug for ResolverBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverBuilder")
            .field("registered", &self.extractors.len())
            .field("walker", &self.walker)
            .finish_non_exhaustive()
    }
}
