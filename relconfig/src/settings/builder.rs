//! Assembling settings from every source.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::settings::environment::EnvironmentSettings;
use crate::settings::merger::SettingsMerger;
use crate::settings::schema::{Settings, SETTINGS_FILE_NAME};
use crate::settings::validator::SettingsValidator;

/// Builds validated settings.
///
/// Sources, lowest precedence first: built-in defaults, the settings file,
/// environment variables, programmatic overrides.
///
/// # Examples
///
/// ```
/// use relconfig::settings::{Settings, SettingsBuilder};
///
/// let settings = SettingsBuilder::new()
///     .skip_env()
///     .with_overrides(Settings {
///         target_release: Some("trunk".into()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
/// assert_eq!(settings.target_release.as_deref(), Some("trunk"));
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    file: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    skip_env: bool,
    overrides: Option<Settings>,
}

impl SettingsBuilder {
    /// Creates a builder with every source enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from an explicit file, which must exist.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Reads `relconfig.yaml` from `dir` if present and no explicit file is set.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Ignores environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Applies programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Settings) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Merges and validates every source.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings file cannot be read or parsed, an
    /// environment variable is invalid, or the merged settings fail validation.
    pub fn build(self) -> Result<Settings> {
        let mut sources = vec![Settings::defaults()];

        let file = self.file.or_else(|| {
            self.working_dir
                .map(|dir| dir.join(SETTINGS_FILE_NAME))
                .filter(|path| path.is_file())
        });
        if let Some(path) = file {
            log::debug!("Reading settings from {}", path.display());
            sources.push(Settings::load(&path)?);
        }

        if !self.skip_env {
            let mut env = Settings::default();
            EnvironmentSettings::apply_overrides(&mut env)?;
            sources.push(env);
        }

        if let Some(overrides) = self.overrides {
            sources.push(overrides);
        }

        let settings = SettingsMerger::merge(sources);
        SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}
