//! Settings validation.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::settings::schema::Settings;

/// Validates merged settings.
///
/// # Examples
///
/// ```
/// use relconfig::settings::{Settings, SettingsValidator};
///
/// SettingsValidator::validate(&Settings::defaults()).unwrap();
///
/// let bad = Settings { target_release: Some("has space".into()), ..Default::default() };
/// assert!(SettingsValidator::validate(&bad).is_err());
/// ```
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate a complete settings value.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first invalid field.
    pub fn validate(settings: &Settings) -> Result<()> {
        if let Some(ref release) = settings.target_release {
            Self::validate_release_name(release)?;
        }

        if let Some(ref formats) = settings.formats {
            if formats.is_empty() {
                return Err(Error::Validation {
                    field: "formats".into(),
                    message: "At least one format is required".into(),
                });
            }
            let mut seen = HashSet::new();
            for format in formats {
                if !seen.insert(format) {
                    return Err(Error::Validation {
                        field: "formats".into(),
                        message: format!("Duplicate format: {format}"),
                    });
                }
            }
        }

        if let Some(ref maps) = settings.maps {
            if maps.iter().any(|m| m.as_os_str().is_empty()) {
                return Err(Error::Validation {
                    field: "maps".into(),
                    message: "Map paths cannot be empty".into(),
                });
            }
        }

        Ok(())
    }

    /// Validates a release name: non-empty, no whitespace.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is invalid.
    pub fn validate_release_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::Validation {
                field: "target_release".into(),
                message: "Release name cannot be empty".into(),
            });
        }
        if name.chars().any(char::is_whitespace) {
            return Err(Error::Validation {
                field: "target_release".into(),
                message: format!("Release name '{name}' cannot contain whitespace"),
            });
        }
        Ok(())
    }
}
