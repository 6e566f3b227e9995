//! Engine-level settings gathered through `figment`.
//!
//! Settings are layered: struct defaults, then the optional
//! [`SETTINGS_FILE`] in the working directory, then `ANCESTRY_CONFIG_*`
//! environment variables.

use std::sync::Arc;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::ancestry::AncestryWalker;
use crate::properties::{DEFAULT_PROPERTIES_FILE, PackageProperties, ResourceLoader};
use crate::{ConfigResult, ConfigResultExt};

/// TOML file consulted by [`ResolverSettings::figment`].
pub const SETTINGS_FILE: &str = "ancestry_config.toml";

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "ANCESTRY_CONFIG_";

/// Settings shared by every resolver built from them.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// File name of the property resource looked up in each package.
    pub properties_file: String,
    /// Implicit most-base type of every lineage, skipped when walking.
    pub platform_root: Option<String>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            properties_file: DEFAULT_PROPERTIES_FILE.to_owned(),
            platform_root: None,
        }
    }
}

impl ResolverSettings {
    /// Provider stack used by [`Self::load`].
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(SETTINGS_FILE))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// Gather settings from defaults, [`SETTINGS_FILE`] and the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConfigError::Settings`] when a layer holds a value
    /// of the wrong shape.
    pub fn load() -> ConfigResult<Self> {
        Self::figment().extract().into_config()
    }

    /// Walker honouring [`Self::platform_root`].
    #[must_use]
    pub fn walker(&self) -> AncestryWalker {
        match &self.platform_root {
            Some(root) => AncestryWalker::new().with_platform_root(root.as_str()),
            None => AncestryWalker::new(),
        }
    }

    /// Property lookup through `loader` using [`Self::properties_file`].
    #[must_use]
    pub fn package_properties(&self, loader: Arc<dyn ResourceLoader>) -> PackageProperties {
        PackageProperties::shared(loader).with_file_name(self.properties_file.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use figment::Jail;
    use rstest::rstest;

    use super::{ResolverSettings, SETTINGS_FILE};
    use crate::ResultIntoFigment;
    use crate::properties::InMemoryResources;

    #[rstest]
    fn defaults_apply_without_overrides() {
        Jail::expect_with(|_| {
            let settings = ResolverSettings::load().to_figment()?;
            assert_eq!(settings, ResolverSettings::default());
            assert_eq!(settings.properties_file, "config.properties");
            assert!(settings.walker().platform_root().is_none());
            Ok(())
        });
    }

    #[rstest]
    fn environment_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                SETTINGS_FILE,
                "properties_file = \"robolectric.properties\"\nplatform_root = \"Object\"\n",
            )?;
            jail.set_env("ANCESTRY_CONFIG_PLATFORM_ROOT", "java.lang.Object");
            let settings = ResolverSettings::load().to_figment()?;
            assert_eq!(settings.properties_file, "robolectric.properties");
            assert_eq!(settings.walker().platform_root(), Some("java.lang.Object"));
            Ok(())
        });
    }

    #[rstest]
    fn malformed_file_reports_settings_error() {
        Jail::expect_with(|jail| {
            jail.create_file(SETTINGS_FILE, "properties_file = [1, 2]")?;
            let err = ResolverSettings::load().err();
            assert!(
                err.as_deref()
                    .is_some_and(|err| matches!(err, crate::ConfigError::Settings(_)))
            );
            Ok(())
        });
    }

    #[rstest]
    fn package_properties_use_configured_file_name() {
        let settings = ResolverSettings {
            properties_file: "robolectric.properties".into(),
            platform_root: None,
        };
        let properties = settings.package_properties(Arc::new(InMemoryResources::new()));
        assert_eq!(
            properties.resource_path("org.example"),
            "org/example/robolectric.properties"
        );
    }
}
