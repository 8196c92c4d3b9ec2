//! Flag declarations, flag values, and provenance trails.
//!
//! A flag is declared once (possibly re-declared identically by overlay
//! directories) and then assigned values by release contributions. Every
//! assignment applied to a flag for a release is kept as a [`Trace`], oldest
//! first, so the resolved value can always be explained.

pub mod registry;

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::value::{Container, Value};

pub use registry::{FlagRegistry, RegisteredFlag};

/// Namespace substituted when a declaration omits one.
pub const UNKNOWN_NAMESPACE: &str = "android_UNKNOWN";

/// A normalized flag declaration.
///
/// Structural equality over every field decides whether two declarations of
/// the same name may be unified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagDeclaration {
    /// Flag name.
    pub name: String,
    /// Owning namespace.
    pub namespace: String,
    /// Partition the value applies to.
    pub container: Container,
    /// Default value.
    pub value: Value,
    /// Free-form description.
    pub description: Option<String>,
}

/// A single assertion of what a flag should be, attributable to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagValue {
    /// Flag name.
    pub name: String,
    /// Value to assign.
    pub value: Value,
    /// File the value came from.
    pub path: PathBuf,
}

/// One entry in a provenance trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// File that supplied the value.
    pub source: String,
    /// The value supplied.
    pub value: Value,
}

/// A flag's final state for one release.
///
/// The trail always has at least one entry: the declared default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFlag {
    declaration: Arc<FlagDeclaration>,
    declaration_index: usize,
    traces: Vec<Trace>,
}

impl ResolvedFlag {
    /// Seeds a trail with the flag's declared default.
    #[must_use]
    pub fn seeded(flag: &RegisteredFlag) -> Self {
        Self {
            declaration: Arc::clone(&flag.declaration),
            declaration_index: flag.declaration_index,
            traces: vec![Trace {
                source: flag.path.display().to_string(),
                value: flag.declaration.value.clone(),
            }],
        }
    }

    /// Appends an assignment; later entries supersede earlier ones.
    pub fn apply(&mut self, flag_value: &FlagValue) {
        self.traces.push(Trace {
            source: flag_value.path.display().to_string(),
            value: flag_value.value.clone(),
        });
    }

    /// The flag's declaration.
    #[must_use]
    pub fn declaration(&self) -> &FlagDeclaration {
        &self.declaration
    }

    /// Index of the directory that declared the flag.
    #[must_use]
    pub const fn declaration_index(&self) -> usize {
        self.declaration_index
    }

    /// The full provenance trail, oldest first.
    #[must_use]
    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    /// The effective value (last trail entry).
    #[must_use]
    pub fn value(&self) -> &Value {
        self.traces
            .last()
            .map_or(&self.declaration.value, |trace| &trace.value)
    }

    /// Source of the declaration (first trail entry).
    #[must_use]
    pub fn declared_in(&self) -> &str {
        self.traces.first().map_or("", |trace| trace.source.as_str())
    }

    /// Source of the effective value (last trail entry).
    #[must_use]
    pub fn set_in(&self) -> &str {
        self.traces.last().map_or("", |trace| trace.source.as_str())
    }
}
