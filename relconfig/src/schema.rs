//! On-disk record definitions.
//!
//! These are the decoded forms of the files found in a configuration
//! directory. They mirror the files one-to-one and carry no defaults; the
//! loader applies directory defaults when it turns them into declarations.
//!
//! ```text
//! <dir>/release_config_map.yaml
//! <dir>/flag_declarations/**/*.yaml
//! <dir>/release_configs/<release>.yaml
//! <dir>/flag_values/<release>/**/<flag>.yaml
//! ```

use serde::{Deserialize, Serialize};

use crate::value::{Container, Value};

/// Name of the map file that identifies a configuration directory.
pub const MAP_FILE_NAME: &str = "release_config_map.yaml";

/// Sub-directory holding flag declarations.
pub const FLAG_DECLARATIONS_DIR: &str = "flag_declarations";

/// Sub-directory holding release contributions.
pub const RELEASE_CONFIGS_DIR: &str = "release_configs";

/// Sub-directory holding per-release flag values.
pub const FLAG_VALUES_DIR: &str = "flag_values";

/// Extension of every record file.
pub const RECORD_EXTENSION: &str = "yaml";

/// The `release_config_map.yaml` record of one directory.
///
/// # Examples
///
/// ```
/// use relconfig::schema::ReleaseConfigMapRecord;
/// use relconfig::Container;
///
/// let map: ReleaseConfigMapRecord = serde_yaml::from_str(
///     "default_container: SYSTEM\naliases:\n  - name: next\n    target: trunk\n",
/// ).unwrap();
/// assert_eq!(map.default_container, Some(Container::System));
/// assert_eq!(map.aliases[0].target, "trunk");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfigMapRecord {
    /// Container applied to flags declared here without one.
    #[serde(default)]
    pub default_container: Option<Container>,

    /// Alias declarations.
    #[serde(default)]
    pub aliases: Vec<AliasRecord>,

    /// Free-form description of the directory.
    #[serde(default)]
    pub description: Option<String>,
}

/// One alias declaration inside a map record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasRecord {
    /// The alias name.
    pub name: String,
    /// The release (or alias) it points to.
    pub target: String,
}

/// A value as written in a record file.
///
/// Exactly one field must be set.
///
/// # Examples
///
/// ```
/// use relconfig::schema::ValueRecord;
/// use relconfig::Value;
///
/// let record: ValueRecord = serde_yaml::from_str("bool_value: true").unwrap();
/// assert_eq!(record.into_value().unwrap(), Value::Bool(true));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueRecord {
    /// A string value.
    #[serde(default)]
    pub string_value: Option<String>,
    /// A boolean value.
    #[serde(default)]
    pub bool_value: Option<bool>,
    /// An explicitly unspecified value.
    #[serde(default)]
    pub unspecified_value: Option<bool>,
}

impl ValueRecord {
    /// Converts the record into a tagged value.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when zero or several fields are set.
    pub fn into_value(self) -> std::result::Result<Value, String> {
        match (self.string_value, self.bool_value, self.unspecified_value) {
            (Some(s), None, None) => Ok(Value::String(s)),
            (None, Some(b), None) => Ok(Value::Bool(b)),
            (None, None, Some(_)) => Ok(Value::Unspecified),
            (None, None, None) => Err("value has no field set".to_string()),
            _ => Err("value sets more than one of string_value, bool_value, unspecified_value".to_string()),
        }
    }
}

impl From<Value> for ValueRecord {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self {
                string_value: Some(s),
                ..Self::default()
            },
            Value::Bool(b) => Self {
                bool_value: Some(b),
                ..Self::default()
            },
            Value::Unspecified => Self {
                unspecified_value: Some(true),
                ..Self::default()
            },
        }
    }
}

/// A flag declaration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagDeclarationRecord {
    /// Flag name.
    pub name: String,
    /// Owning namespace.
    #[serde(default)]
    pub namespace: Option<String>,
    /// Container; defaults to the directory's default container.
    #[serde(default)]
    pub container: Option<Container>,
    /// Default value; defaults to unspecified.
    #[serde(default)]
    pub value: Option<ValueRecord>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A release contribution file, `release_configs/<name>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfigRecord {
    /// Release name; must match the file stem.
    pub name: String,
    /// Releases whose values apply before this one's.
    #[serde(default)]
    pub inherits: Vec<String>,
    /// Aconfig value sets to include in builds of this release.
    #[serde(default)]
    pub aconfig_value_sets: Vec<String>,
}

/// A flag value file, `flag_values/<release>/<flag>.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlagValueRecord {
    /// Flag name; must match the file stem.
    pub name: String,
    /// The value to set.
    pub value: ValueRecord,
}
