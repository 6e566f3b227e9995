//! Load [`ResolverSettings`] inside a [`figment::Jail`].
//!
//! The jail gives each test its own working directory and environment, so
//! settings files and `ANCESTRY_CONFIG_*` variables never leak between tests.

use ancestry_config::{ResolverSettings, ResultIntoFigment};
use anyhow::{Result, anyhow};

/// Run `setup` in a fresh jail, then load settings from it.
///
/// # Errors
///
/// Returns an error if `setup` fails or the settings cannot be extracted.
///
/// # Examples
///
/// ```
/// use ancestry_config_test_helpers::figment::settings_in_jail;
///
/// let settings = settings_in_jail(|jail| {
///     jail.set_env("ANCESTRY_CONFIG_PROPERTIES_FILE", "robolectric.properties");
///     Ok(())
/// })?;
/// assert_eq!(settings.properties_file, "robolectric.properties");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn settings_in_jail<F>(setup: F) -> Result<ResolverSettings>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<()>,
{
    let mut loaded = None;
    figment::Jail::try_with(|jail| {
        setup(jail)?;
        loaded = Some(ResolverSettings::load().to_figment()?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    loaded.ok_or_else(|| anyhow!("jail closure did not load settings"))
}
