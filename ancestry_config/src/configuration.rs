//! The type-indexed result of one resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::extractor::SharedFragment;
use crate::{ConfigError, ConfigResult, FragmentKind};

/// Fully merged fragments for one unit, one per registered kind.
///
/// A kind that failed to resolve keeps its error; reading it returns that
/// error while other kinds stay readable. A `Configuration` is never mutated
/// after the resolver returns it.
pub struct Configuration {
    unit: String,
    kinds: Vec<FragmentKind>,
    entries: HashMap<FragmentKind, ConfigResult<SharedFragment>>,
}

impl Configuration {
    pub(crate) fn new(unit: String, resolved: Vec<(FragmentKind, ConfigResult<SharedFragment>)>) -> Self {
        let kinds = resolved.iter().map(|(kind, _)| *kind).collect();
        Self {
            unit,
            kinds,
            entries: resolved.into_iter().collect(),
        }
    }

    /// Display form of the unit this configuration was resolved for.
    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Borrow the merged fragment of type `F`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSuchKind`] when no extractor for `F` was
    /// registered, or the captured error when the kind failed to resolve
    /// for this unit.
    pub fn get<F: 'static>(&self) -> ConfigResult<&F> {
        let kind = FragmentKind::of::<F>();
        match self.entries.get(&kind) {
            Some(Ok(fragment)) => fragment
                .downcast_ref::<F>()
                .ok_or_else(|| ConfigError::no_such_kind(kind)),
            Some(Err(err)) => Err(Arc::clone(err)),
            None => Err(ConfigError::no_such_kind(kind)),
        }
    }

    /// Like [`Self::get`] but returns a shared handle to the fragment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get`].
    pub fn get_shared<F: Send + Sync + 'static>(&self) -> ConfigResult<Arc<F>> {
        let kind = FragmentKind::of::<F>();
        match self.entries.get(&kind) {
            Some(Ok(fragment)) => Arc::clone(fragment)
                .downcast::<F>()
                .map_err(|_| ConfigError::no_such_kind(kind)),
            Some(Err(err)) => Err(Arc::clone(err)),
            None => Err(ConfigError::no_such_kind(kind)),
        }
    }

    /// Returns `true` when an extractor for `F` took part in the resolution.
    #[must_use]
    pub fn contains<F: 'static>(&self) -> bool {
        self.entries.contains_key(&FragmentKind::of::<F>())
    }

    /// Kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = FragmentKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Kinds that failed, with their errors, in registration order.
    pub fn failures(&self) -> impl Iterator<Item = (FragmentKind, &Arc<ConfigError>)> {
        self.kinds.iter().filter_map(|kind| match self.entries.get(kind) {
            Some(Err(err)) => Some((*kind, err)),
            _ => None,
        })
    }

    /// Returns `true` when every kind resolved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds = f.debug_map();
        for kind in &self.kinds {
            let status = match self.entries.get(kind) {
                Some(Ok(_)) => "resolved".to_owned(),
                Some(Err(err)) => format!("failed: {err}"),
                None => "missing".to_owned(),
            };
            kinds.entry(&kind.name(), &status);
        }
        kinds.finish()?;
        write!(f, " for {}", self.unit)
    }
}
