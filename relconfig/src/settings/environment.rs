//! Environment variable overrides.
//!
//! | Variable              | Field                                   |
//! |-----------------------|-----------------------------------------|
//! | `RELCONFIG_MAPS`      | `maps` (`:`-separated)                  |
//! | `TARGET_RELEASE`      | `target_release`                        |
//! | `RELCONFIG_OUT_DIR`   | `out_dir`                               |
//! | `RELCONFIG_FORMATS`   | `formats` (comma-separated)             |
//! | `RELCONFIG_PARALLEL`  | `parallel_decode` and `parallel_resolve` |

use std::env;
use std::path::PathBuf;

use crate::artifact::ArtifactFormat;
use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Environment variable holding map paths.
pub const ENV_MAPS: &str = "RELCONFIG_MAPS";
/// Environment variable holding the target release.
pub const ENV_TARGET_RELEASE: &str = "TARGET_RELEASE";
/// Environment variable holding the output directory.
pub const ENV_OUT_DIR: &str = "RELCONFIG_OUT_DIR";
/// Environment variable holding artifact formats.
pub const ENV_FORMATS: &str = "RELCONFIG_FORMATS";
/// Environment variable toggling concurrency.
pub const ENV_PARALLEL: &str = "RELCONFIG_PARALLEL";

/// Applies environment variable overrides to settings.
///
/// # Examples
///
/// ```
/// use relconfig::settings::{EnvironmentSettings, Settings};
///
/// let mut settings = Settings::default();
/// EnvironmentSettings::apply_with(&mut settings, |name| {
///     (name == "TARGET_RELEASE").then(|| "trunk".to_string())
/// })
/// .unwrap();
/// assert_eq!(settings.target_release.as_deref(), Some("trunk"));
/// ```
pub struct EnvironmentSettings;

impl EnvironmentSettings {
    /// Applies overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable holds an invalid value.
    pub fn apply_overrides(settings: &mut Settings) -> Result<()> {
        Self::apply_with(settings, |name| env::var(name).ok())
    }

    /// Applies overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a variable holds an invalid value.
    pub fn apply_with<F>(settings: &mut Settings, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(maps) = get(ENV_MAPS) {
            settings.maps = Some(Self::parse_maps(&maps));
        }

        if let Some(release) = get(ENV_TARGET_RELEASE) {
            settings.target_release = Some(release.trim().to_string());
        }

        if let Some(out_dir) = get(ENV_OUT_DIR) {
            settings.out_dir = Some(PathBuf::from(out_dir));
        }

        if let Some(formats) = get(ENV_FORMATS) {
            settings.formats = Some(Self::parse_formats(&formats)?);
        }

        if let Some(parallel) = get(ENV_PARALLEL) {
            let parallel = Self::parse_bool(ENV_PARALLEL, &parallel)?;
            settings.parallel_decode = Some(parallel);
            settings.parallel_resolve = Some(parallel);
        }

        Ok(())
    }

    /// Splits a `:`-separated list of map paths, skipping empty entries.
    #[must_use]
    pub fn parse_maps(s: &str) -> Vec<PathBuf> {
        s.split(':')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Parses a comma-separated list of formats.
    fn parse_formats(s: &str) -> Result<Vec<ArtifactFormat>> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                ArtifactFormat::parse(part).map_err(|_| Error::Validation {
                    field: ENV_FORMATS.into(),
                    message: format!("Invalid format: '{part}' (expected yaml, pb, json or make)"),
                })
            })
            .collect()
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
