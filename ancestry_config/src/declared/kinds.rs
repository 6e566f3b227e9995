//! Reference configuration kinds.
//!
//! Property keys and metadata keys are the camelCase field names, for
//! example `minSdk`, `resourceDir` or `instrumentedPackages`.

use serde::Deserialize;

use super::{DeclaredFragment, ListMode, ListSetting};
use crate::PropertyError;
use crate::properties::PropertySet;

/// Which platform API levels a unit runs against.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SdkSelection {
    /// Explicit levels; empty when none were declared.
    pub sdk: Vec<u32>,
    /// Lowest level to run against when no explicit levels are declared.
    pub min_sdk: Option<u32>,
    /// Highest level to run against when no explicit levels are declared.
    pub max_sdk: Option<u32>,
}

/// One node's declaration of [`SdkSelection`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SdkDeclaration {
    sdk: Option<Vec<u32>>,
    min_sdk: Option<u32>,
    max_sdk: Option<u32>,
}

impl SdkSelection {
    /// Levels from `known` this selection runs against.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::declared::SdkSelection;
    ///
    /// let bounded = SdkSelection { min_sdk: Some(28), ..SdkSelection::default() };
    /// assert_eq!(bounded.levels(&[26, 28, 33]), [28, 33]);
    /// let explicit = SdkSelection { sdk: vec![21], ..SdkSelection::default() };
    /// assert_eq!(explicit.levels(&[26, 28, 33]), [21]);
    /// ```
    #[must_use]
    pub fn levels(&self, known: &[u32]) -> Vec<u32> {
        if !self.sdk.is_empty() {
            return self.sdk.clone();
        }
        known
            .iter()
            .copied()
            .filter(|level| self.min_sdk.is_none_or(|min| *level >= min))
            .filter(|level| self.max_sdk.is_none_or(|max| *level <= max))
            .collect()
    }
}

impl DeclaredFragment for SdkSelection {
    type Declaration = SdkDeclaration;

    fn from_properties(properties: &PropertySet) -> Result<SdkDeclaration, PropertyError> {
        Ok(SdkDeclaration {
            sdk: properties.parse_list("sdk")?,
            min_sdk: properties.parse_value("minSdk")?,
            max_sdk: properties.parse_value("maxSdk")?,
        })
    }

    fn from_declaration(declaration: SdkDeclaration) -> Self {
        Self {
            sdk: declaration.sdk.unwrap_or_default(),
            min_sdk: declaration.min_sdk,
            max_sdk: declaration.max_sdk,
        }
    }

    /// Explicit levels replace the parent's levels and bounds together. A
    /// bound declared without levels clears inherited explicit levels.
    fn overlay(&self, child: &Self) -> Self {
        if !child.sdk.is_empty() {
            return child.clone();
        }
        let bounded = child.min_sdk.is_some() || child.max_sdk.is_some();
        Self {
            sdk: if bounded { Vec::new() } else { self.sdk.clone() },
            min_sdk: child.min_sdk.or(self.min_sdk),
            max_sdk: child.max_sdk.or(self.max_sdk),
        }
    }
}

/// Where a unit's resources are looked up.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ResourcePaths {
    /// Manifest location.
    pub manifest: Option<String>,
    /// Resource directory.
    pub resource_dir: Option<String>,
    /// Asset directory.
    pub asset_dir: Option<String>,
    /// Package name used for resource lookups.
    pub package_name: Option<String>,
    /// Library directories; a declaration replaces inherited entries.
    pub libraries: ListSetting<String>,
}

/// One node's declaration of [`ResourcePaths`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDeclaration {
    manifest: Option<String>,
    resource_dir: Option<String>,
    asset_dir: Option<String>,
    package_name: Option<String>,
    libraries: Option<Vec<String>>,
}

impl DeclaredFragment for ResourcePaths {
    type Declaration = ResourceDeclaration;

    fn from_properties(properties: &PropertySet) -> Result<ResourceDeclaration, PropertyError> {
        Ok(ResourceDeclaration {
            manifest: properties.string("manifest"),
            resource_dir: properties.string("resourceDir"),
            asset_dir: properties.string("assetDir"),
            package_name: properties.string("packageName"),
            libraries: properties.list("libraries"),
        })
    }

    fn from_declaration(declaration: ResourceDeclaration) -> Self {
        Self {
            manifest: declaration.manifest,
            resource_dir: declaration.resource_dir,
            asset_dir: declaration.asset_dir,
            package_name: declaration.package_name,
            libraries: ListSetting::declared(declaration.libraries, ListMode::Replace),
        }
    }

    fn overlay(&self, child: &Self) -> Self {
        Self {
            manifest: child.manifest.clone().or_else(|| self.manifest.clone()),
            resource_dir: child.resource_dir.clone().or_else(|| self.resource_dir.clone()),
            asset_dir: child.asset_dir.clone().or_else(|| self.asset_dir.clone()),
            package_name: child.package_name.clone().or_else(|| self.package_name.clone()),
            libraries: self.libraries.overlay(&child.libraries),
        }
    }
}

/// How the runtime is set up around a unit.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RuntimeOptions {
    /// Device qualifiers; a value starting with `+` extends the parent's, or
    /// stands alone without the marker when nothing is inherited.
    pub qualifiers: Option<String>,
    /// Application type to instantiate.
    pub application: Option<String>,
    /// Shadow types to install; declarations accumulate.
    pub shadows: ListSetting<String>,
    /// Packages to instrument; declarations accumulate.
    pub instrumented_packages: ListSetting<String>,
}

/// One node's declaration of [`RuntimeOptions`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDeclaration {
    qualifiers: Option<String>,
    application: Option<String>,
    shadows: Option<Vec<String>>,
    instrumented_packages: Option<Vec<String>>,
}

impl DeclaredFragment for RuntimeOptions {
    type Declaration = RuntimeDeclaration;

    fn from_properties(properties: &PropertySet) -> Result<RuntimeDeclaration, PropertyError> {
        Ok(RuntimeDeclaration {
            qualifiers: properties.string("qualifiers"),
            application: properties.string("application"),
            shadows: properties.list("shadows"),
            instrumented_packages: properties.list("instrumentedPackages"),
        })
    }

    fn from_declaration(declaration: RuntimeDeclaration) -> Self {
        Self {
            qualifiers: declaration.qualifiers.filter(|value| !value.is_empty()),
            application: declaration.application,
            shadows: ListSetting::declared(declaration.shadows, ListMode::Accumulate),
            instrumented_packages: ListSetting::declared(
                declaration.instrumented_packages,
                ListMode::Accumulate,
            ),
        }
    }

    fn overlay(&self, child: &Self) -> Self {
        let qualifiers = match (&self.qualifiers, &child.qualifiers) {
            (Some(inherited), Some(extra)) if extra.starts_with('+') => {
                Some(format!("{inherited} {extra}"))
            }
            // nothing to extend: the marker is dropped
            (None, Some(extra)) if extra.starts_with('+') => extra
                .strip_prefix('+')
                .filter(|rest| !rest.is_empty())
                .map(str::to_owned),
            (inherited, declared) => declared.clone().or_else(|| inherited.clone()),
        };
        Self {
            qualifiers,
            application: child.application.clone().or_else(|| self.application.clone()),
            shadows: self.shadows.overlay(&child.shadows),
            instrumented_packages: self
                .instrumented_packages
                .overlay(&child.instrumented_packages),
        }
    }
}
