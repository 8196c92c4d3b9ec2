//! Release-name aliases.
//!
//! Aliases are declared in the map files of any configuration directory and
//! form one global table. An alias may point at another alias; resolution
//! follows the chain until it reaches a declared release.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One alias binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// The alias name.
    pub name: String,
    /// The name it points to.
    pub target: String,
    /// Map file that first declared it.
    pub path: PathBuf,
}

/// Outcome of following an alias chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasResolution {
    /// The chain ended at this release.
    Resolved(String),
    /// The chain revisited a name; the last entry is the repeated one.
    Cycle(Vec<String>),
    /// The chain ended at a name that is neither a release nor an alias.
    Dangling(Vec<String>),
}

/// The global alias table.
///
/// # Examples
///
/// ```
/// use relconfig::alias::{AliasResolution, AliasTable};
/// use std::path::Path;
///
/// let mut aliases = AliasTable::new();
/// aliases.declare("next", "staging", Path::new("a/release_config_map.yaml")).unwrap();
/// aliases.declare("staging", "trunk", Path::new("a/release_config_map.yaml")).unwrap();
///
/// let resolution = aliases.resolve("next", |name| name == "trunk");
/// assert_eq!(resolution, AliasResolution::Resolved("trunk".into()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: BTreeMap<String, Alias>,
}

impl AliasTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an alias.
    ///
    /// Redeclaring an alias with the same target is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConflictingAlias` if the alias already points elsewhere.
    pub fn declare(&mut self, name: &str, target: &str, path: &Path) -> Result<()> {
        if let Some(existing) = self.entries.get(name) {
            if existing.target == target {
                log::debug!(
                    "Alias {name} -> {target} redeclared in {}",
                    path.display()
                );
                return Ok(());
            }
            return Err(Error::ConflictingAlias {
                name: name.to_string(),
                first_target: existing.target.clone(),
                first_source: existing.path.clone(),
                second_target: target.to_string(),
                second_source: path.to_path_buf(),
            });
        }

        self.entries.insert(
            name.to_string(),
            Alias {
                name: name.to_string(),
                target: target.to_string(),
                path: path.to_path_buf(),
            },
        );
        Ok(())
    }

    /// Looks up an alias by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.entries.get(name)
    }

    /// Returns true if `name` is a declared alias.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates aliases in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.entries.values()
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no aliases are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Follows the alias chain starting at `name`.
    ///
    /// A name for which `is_release` holds resolves to itself.
    pub fn resolve<F>(&self, name: &str, is_release: F) -> AliasResolution
    where
        F: Fn(&str) -> bool,
    {
        let mut path = vec![name.to_string()];
        let mut visited = BTreeSet::from([name.to_string()]);
        let mut current = name;

        loop {
            if is_release(current) {
                return AliasResolution::Resolved(current.to_string());
            }
            let Some(alias) = self.entries.get(current) else {
                return AliasResolution::Dangling(path);
            };

            let next = alias.target.as_str();
            path.push(next.to_string());
            if !visited.insert(next.to_string()) {
                return AliasResolution::Cycle(path);
            }
            current = next;
        }
    }

    /// Follows the alias chain and converts failures into errors.
    ///
    /// # Errors
    ///
    /// Returns `AliasCycle` or `DanglingAlias` carrying the visited names.
    pub fn resolve_canonical<F>(&self, name: &str, is_release: F) -> Result<String>
    where
        F: Fn(&str) -> bool,
    {
        match self.resolve(name, is_release) {
            AliasResolution::Resolved(release) => Ok(release),
            AliasResolution::Cycle(trace) => Err(Error::AliasCycle { trace }),
            AliasResolution::Dangling(trace) => Err(Error::DanglingAlias { trace }),
        }
    }
}
