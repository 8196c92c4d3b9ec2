//! Error types for the relconfig library.
//!
//! Every condition here is fatal to a run: the resolver is a build-correctness
//! gate, so a structural inconsistency in any directory or release aborts the
//! whole resolution instead of producing a partial artifact set.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a relconfig error.
///
/// # Examples
///
/// ```
/// use relconfig::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Joins a name trace for display, e.g. `a -> b -> c`.
fn arrow(trace: &[String]) -> String {
    trace.join(" -> ")
}

/// The main error type for the relconfig library.
#[derive(Debug, Error)]
pub enum Error {
    /// A release config map does not declare its default container.
    #[error("release config map {} lacks default_container", path.display())]
    MissingDefaultContainer {
        /// Path to the offending map file.
        path: PathBuf,
    },

    /// An input file could not be read or decoded.
    #[error("malformed input {}: {reason}", path.display())]
    MalformedInput {
        /// Path to the offending file.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A file declares a name that does not match its file stem.
    #[error("{} incorrectly declares '{declared}' (expected '{expected}')", path.display())]
    NameMismatch {
        /// Path to the offending file.
        path: PathBuf,
        /// Name found inside the file.
        declared: String,
        /// Name implied by the file name.
        expected: String,
    },

    /// Two directories declare the same flag with different content.
    #[error("duplicate definition of flag {name}: {} vs {}", first.display(), second.display())]
    DuplicateFlagDeclaration {
        /// The flag name.
        name: String,
        /// File holding the first declaration.
        first: PathBuf,
        /// File holding the conflicting declaration.
        second: PathBuf,
    },

    /// An alias was redeclared with a different target.
    #[error(
        "conflicting alias declarations for {name}: {first_target} ({}) vs {second_target} ({})",
        first_source.display(),
        second_source.display()
    )]
    ConflictingAlias {
        /// The alias name.
        name: String,
        /// Target of the first declaration.
        first_target: String,
        /// Map file of the first declaration.
        first_source: PathBuf,
        /// Target of the conflicting declaration.
        second_target: String,
        /// Map file of the conflicting declaration.
        second_source: PathBuf,
    },

    /// An alias uses a name that is also a declared release.
    #[error("alias {alias} is a declared release config (alias declared in {})", path.display())]
    AliasShadowsRelease {
        /// The alias name.
        alias: String,
        /// Map file declaring the alias.
        path: PathBuf,
    },

    /// An alias chain ends at a name that is neither a release nor an alias.
    #[error("alias points to non-existing config: {}", arrow(.trace))]
    DanglingAlias {
        /// Names visited, starting with the alias that was resolved.
        trace: Vec<String>,
    },

    /// An alias chain revisits a name.
    #[error("alias cycle: {}", arrow(.trace))]
    AliasCycle {
        /// Names visited, ending with the repeated name.
        trace: Vec<String>,
    },

    /// A release transitively inherits itself.
    #[error("inheritance cycle: {}", arrow(.path))]
    InheritanceCycle {
        /// Releases on the inheritance path, ending with the repeated name.
        path: Vec<String>,
    },

    /// No release exists with the requested name.
    #[error("missing config {name}. Trace={}", arrow(.trace))]
    UnknownRelease {
        /// The name that was looked up after alias resolution.
        name: String,
        /// Inheritance path and alias chain followed to reach `name`.
        trace: Vec<String>,
    },

    /// A flag value names a flag that was never declared.
    #[error(
        "{} sets undeclared flag {flag} for release {release} (inheritance: {})",
        path.display(),
        arrow(.trace)
    )]
    UnknownFlag {
        /// The flag name.
        flag: String,
        /// The release being resolved.
        release: String,
        /// File holding the flag value.
        path: PathBuf,
        /// Inheritance chain from the resolved release to the contributing one.
        trace: Vec<String>,
    },

    /// No configuration directories were supplied or discovered.
    #[error("no release config maps found")]
    NoConfigDirectories,

    /// Encoding or decoding an artifact failed.
    #[error("{format} encoding error: {message}")]
    Encoding {
        /// The artifact format involved.
        format: String,
        /// What went wrong.
        message: String,
    },

    /// A settings value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The settings field that failed validation.
        field: String,
        /// A description of the failure.
        message: String,
    },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if error is a structural problem with one input file.
    ///
    /// # Examples
    ///
    /// ```
    /// use relconfig::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::MissingDefaultContainer { path: PathBuf::from("m.yaml") };
    /// assert!(err.is_structural());
    /// ```
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::MissingDefaultContainer { .. }
                | Self::MalformedInput { .. }
                | Self::NameMismatch { .. }
        )
    }

    /// Check if error is a conflict between declarations from two sources.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::DuplicateFlagDeclaration { .. }
                | Self::ConflictingAlias { .. }
                | Self::AliasShadowsRelease { .. }
        )
    }

    /// Check if error is a dangling or cyclic reference found while resolving.
    ///
    /// # Examples
    ///
    /// ```
    /// use relconfig::Error;
    ///
    /// let err = Error::InheritanceCycle { path: vec!["a".into(), "b".into(), "a".into()] };
    /// assert!(err.is_referential());
    /// assert!(!err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            Self::DanglingAlias { .. }
                | Self::AliasCycle { .. }
                | Self::InheritanceCycle { .. }
                | Self::UnknownRelease { .. }
                | Self::UnknownFlag { .. }
        )
    }
}

impl From<postcard::Error> for Error {
    fn from(err: postcard::Error) -> Self {
        Self::Encoding {
            format: "pb".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding {
            format: "json".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Encoding {
            format: "yaml".to_string(),
            message: err.to_string(),
        }
    }
}
