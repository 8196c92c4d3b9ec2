//! Flag values and build containers.
//!
//! A [`Value`] always carries its tag: `Unspecified` is distinct from every
//! concrete value, including the empty string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A flag value.
///
/// # Examples
///
/// ```
/// use relconfig::Value;
///
/// assert_eq!(Value::String("on".into()).as_make_value(), "on");
/// assert_eq!(Value::Bool(true).as_make_value(), "true");
/// assert_eq!(Value::Bool(false).as_make_value(), "");
/// assert_eq!(Value::Unspecified.as_make_value(), "");
/// assert_ne!(Value::String(String::new()), Value::Unspecified);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A string value.
    String(String),
    /// A boolean value.
    Bool(bool),
    /// No value was given.
    Unspecified,
}

impl Value {
    /// Renders the value the way build-system variables expect it.
    ///
    /// False booleans and unspecified values become the empty string.
    #[must_use]
    pub fn as_make_value(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Bool(true) => "true".to_string(),
            Self::Bool(false) | Self::Unspecified => String::new(),
        }
    }

    /// Returns true for [`Value::Unspecified`].
    #[must_use]
    pub const fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Unspecified => write!(f, "<unspecified>"),
        }
    }
}

/// The build partition a flag's value applies to.
///
/// `All` is a sentinel meaning every concrete partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Container {
    /// Every partition.
    All,
    /// The product partition.
    Product,
    /// The system partition.
    System,
    /// The `system_ext` partition.
    SystemExt,
    /// The vendor partition.
    Vendor,
}

impl Container {
    /// The concrete partitions that `All` expands to.
    pub const PARTITIONS: [Self; 4] = [Self::Product, Self::System, Self::SystemExt, Self::Vendor];

    /// Lower-case partition name as used in build variables.
    ///
    /// # Examples
    ///
    /// ```
    /// use relconfig::Container;
    ///
    /// assert_eq!(Container::SystemExt.partition_name(), "system_ext");
    /// assert_eq!(Container::All.partition_name(), "all");
    /// ```
    #[must_use]
    pub const fn partition_name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Product => "product",
            Self::System => "system",
            Self::SystemExt => "system_ext",
            Self::Vendor => "vendor",
        }
    }

    /// The partitions a flag with this container belongs to.
    #[must_use]
    pub fn partitions(self) -> Vec<Self> {
        match self {
            Self::All => Self::PARTITIONS.to_vec(),
            other => vec![other],
        }
    }

    /// Parses a container name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is not a known container.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "product" => Ok(Self::Product),
            "system" => Ok(Self::System),
            "system_ext" => Ok(Self::SystemExt),
            "vendor" => Ok(Self::Vendor),
            _ => Err(Error::Validation {
                field: "container".to_string(),
                message: format!(
                    "unknown container '{s}': expected one of all, product, system, system_ext, vendor"
                ),
            }),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.partition_name())
    }
}
