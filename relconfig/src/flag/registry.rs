//! The set of all known flags.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::flag::FlagDeclaration;

/// A flag as stored in the registry.
#[derive(Debug, Clone)]
pub struct RegisteredFlag {
    /// The declaration.
    pub declaration: Arc<FlagDeclaration>,
    /// Index of the directory that first declared the flag.
    pub declaration_index: usize,
    /// File holding the first declaration.
    pub path: PathBuf,
}

/// All declared flags, keyed and enumerated by name.
///
/// # Examples
///
/// ```
/// use relconfig::flag::{FlagDeclaration, FlagRegistry};
/// use relconfig::{Container, Value};
/// use std::path::Path;
///
/// let decl = FlagDeclaration {
///     name: "RELEASE_FOO".into(),
///     namespace: "build".into(),
///     container: Container::System,
///     value: Value::Bool(false),
///     description: None,
/// };
///
/// let mut registry = FlagRegistry::new();
/// registry.register(decl.clone(), 0, Path::new("a/RELEASE_FOO.yaml")).unwrap();
/// // Identical re-declaration by an overlay is unified.
/// registry.register(decl, 1, Path::new("b/RELEASE_FOO.yaml")).unwrap();
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlagRegistry {
    flags: BTreeMap<String, RegisteredFlag>,
}

impl FlagRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration.
    ///
    /// A new name is stored with its declaring directory. A repeated name is
    /// accepted only if the declaration is structurally identical; the first
    /// declaration's source is kept.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateFlagDeclaration` if the name exists with different content.
    pub fn register(
        &mut self,
        declaration: FlagDeclaration,
        declaration_index: usize,
        path: &Path,
    ) -> Result<()> {
        if let Some(existing) = self.flags.get(&declaration.name) {
            if *existing.declaration != declaration {
                return Err(Error::DuplicateFlagDeclaration {
                    name: declaration.name,
                    first: existing.path.clone(),
                    second: path.to_path_buf(),
                });
            }
            log::debug!(
                "Flag {} re-declared identically in {}",
                declaration.name,
                path.display()
            );
            return Ok(());
        }

        self.flags.insert(
            declaration.name.clone(),
            RegisteredFlag {
                declaration: Arc::new(declaration),
                declaration_index,
                path: path.to_path_buf(),
            },
        );
        Ok(())
    }

    /// Looks up a flag by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredFlag> {
        self.flags.get(name)
    }

    /// Returns true if the flag is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    /// Iterates flags in name order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredFlag> {
        self.flags.values()
    }

    /// Flag names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.flags.keys().map(String::as_str).collect()
    }

    /// Number of declared flags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Returns true if no flags are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
