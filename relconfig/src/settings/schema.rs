//! Settings schema.
//!
//! Every field is optional so that partial settings from different sources
//! can be layered. Accessors apply built-in defaults for unset fields.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactFormat;
use crate::error::{Error, Result};

/// File name of the optional settings file.
pub const SETTINGS_FILE_NAME: &str = "relconfig.yaml";

/// Tool settings.
///
/// # Examples
///
/// ```
/// use relconfig::settings::Settings;
/// use relconfig::artifact::ArtifactFormat;
///
/// let settings: Settings = serde_yaml::from_str("target_release: trunk\nformats: [json]\n").unwrap();
/// assert_eq!(settings.target_release.as_deref(), Some("trunk"));
/// assert_eq!(settings.formats(), vec![ArtifactFormat::Json]);
/// assert!(settings.parallel_decode());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Release config map files, in precedence order.
    pub maps: Option<Vec<PathBuf>>,

    /// Release to single out in artifacts.
    pub target_release: Option<String>,

    /// Directory artifacts are written to.
    pub out_dir: Option<PathBuf>,

    /// Artifact formats to write.
    pub formats: Option<Vec<ArtifactFormat>>,

    /// Decode configuration directories concurrently.
    pub parallel_decode: Option<bool>,

    /// Resolve releases concurrently.
    pub parallel_resolve: Option<bool>,
}

impl Settings {
    /// Built-in defaults, the lowest-precedence source.
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            maps: None,
            target_release: None,
            out_dir: None,
            formats: Some(ArtifactFormat::ALL.to_vec()),
            parallel_decode: Some(true),
            parallel_resolve: Some(true),
        }
    }

    /// Reads a settings file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a validation
    /// error if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid settings file: {e}"),
        })
    }

    /// Map files, or none.
    #[must_use]
    pub fn maps(&self) -> &[PathBuf] {
        self.maps.as_deref().unwrap_or_default()
    }

    /// Formats to write; every format if unset.
    #[must_use]
    pub fn formats(&self) -> Vec<ArtifactFormat> {
        self.formats
            .clone()
            .unwrap_or_else(|| ArtifactFormat::ALL.to_vec())
    }

    /// Whether directories are decoded concurrently; defaults to true.
    #[must_use]
    pub fn parallel_decode(&self) -> bool {
        self.parallel_decode.unwrap_or(true)
    }

    /// Whether releases are resolved concurrently; defaults to true.
    #[must_use]
    pub fn parallel_resolve(&self) -> bool {
        self.parallel_resolve.unwrap_or(true)
    }
}
