//! Load-time and run-time contexts.
//!
//! [`LoadContext`] accumulates directories one at a time, strictly in index
//! order. Freezing it validates aliases and yields [`ReleaseConfigs`], the
//! read-only context that every resolution runs against.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::alias::{AliasResolution, AliasTable};
use crate::error::{Error, Result};
use crate::flag::FlagRegistry;
use crate::loader::{ConfigDirectory, DirectoryLoader, DirectorySource, LoadedDirectory};
use crate::release::ReleaseGraph;
use crate::resolve::engine::{self, ResolvedRelease};
use crate::schema::ReleaseConfigMapRecord;

/// Mutable state while directories are merged.
#[derive(Debug, Default)]
pub struct LoadContext {
    directories: Vec<ConfigDirectory>,
    maps: BTreeMap<PathBuf, ReleaseConfigMapRecord>,
    flags: FlagRegistry,
    aliases: AliasTable,
    releases: ReleaseGraph,
}

impl LoadContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of directories merged so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Returns true if no directory has been merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    /// Merges one loaded directory.
    ///
    /// Aliases are declared first, then flags, then release contributions.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the directory is out of index order, or
    /// any conflict raised by the alias table, flag registry or release graph.
    pub fn apply(&mut self, loaded: LoadedDirectory) -> Result<()> {
        let index = loaded.directory.index;
        if index != self.directories.len() {
            return Err(Error::MalformedInput {
                path: loaded.directory.map_path,
                reason: format!(
                    "directory has index {index}, expected {}",
                    self.directories.len()
                ),
            });
        }

        for alias in &loaded.aliases {
            self.aliases
                .declare(&alias.name, &alias.target, &loaded.directory.map_path)?;
        }
        for declared in loaded.flag_declarations {
            self.flags
                .register(declared.declaration, index, &declared.path)?;
        }
        for contribution in loaded.contributions {
            self.releases.contribute(contribution)?;
        }

        self.maps.insert(loaded.directory.path.clone(), loaded.map);
        self.directories.push(loaded.directory);
        Ok(())
    }

    /// Validates aliases and produces the read-only run context.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDirectories` if nothing was merged, or any alias error.
    pub fn freeze(mut self) -> Result<ReleaseConfigs> {
        if self.directories.is_empty() {
            return Err(Error::NoConfigDirectories);
        }
        self.releases.finalize_aliases(&self.aliases)?;
        Ok(ReleaseConfigs {
            directories: self.directories,
            maps: self.maps,
            flags: self.flags,
            aliases: self.aliases,
            releases: self.releases,
        })
    }
}

/// The frozen result of loading every configuration directory.
///
/// # Examples
///
/// ```
/// use relconfig::loader::{MemoryDirectory, MemorySource};
/// use relconfig::{Container, ReleaseConfigs, Value};
///
/// let mut source = MemorySource::new();
/// let map = source.add(
///     MemoryDirectory::new("build/release", Some(Container::All))
///         .declare("RELEASE_FOO", Value::Bool(false))
///         .release("trunk", &[])
///         .value("trunk", "RELEASE_FOO", Value::Bool(true)),
/// );
///
/// let configs = ReleaseConfigs::load(&source, &[map], false).unwrap();
/// let trunk = configs.resolve("trunk").unwrap();
/// assert_eq!(trunk.flag("RELEASE_FOO").unwrap().value(), &Value::Bool(true));
/// ```
#[derive(Debug)]
pub struct ReleaseConfigs {
    directories: Vec<ConfigDirectory>,
    maps: BTreeMap<PathBuf, ReleaseConfigMapRecord>,
    flags: FlagRegistry,
    aliases: AliasTable,
    releases: ReleaseGraph,
}

impl ReleaseConfigs {
    /// Loads and merges the directories named by `map_paths`, in order.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigDirectories` for an empty list, or the first loading
    /// or merging error.
    pub fn load<S: DirectorySource + ?Sized>(
        source: &S,
        map_paths: &[PathBuf],
        parallel: bool,
    ) -> Result<Self> {
        if map_paths.is_empty() {
            return Err(Error::NoConfigDirectories);
        }

        let loaded = DirectoryLoader::new(source).load_all(map_paths, parallel)?;
        let mut context = LoadContext::new();
        for directory in loaded {
            context.apply(directory)?;
        }
        context.freeze()
    }

    /// The configuration directories, in index order.
    #[must_use]
    pub fn directories(&self) -> &[ConfigDirectory] {
        &self.directories
    }

    /// Map records keyed by directory.
    #[must_use]
    pub fn maps(&self) -> &BTreeMap<PathBuf, ReleaseConfigMapRecord> {
        &self.maps
    }

    /// The directory path with the given index.
    #[must_use]
    pub fn directory_path(&self, index: usize) -> Option<&Path> {
        self.directories.get(index).map(|d| d.path.as_path())
    }

    /// Every declared flag.
    #[must_use]
    pub fn flags(&self) -> &FlagRegistry {
        &self.flags
    }

    /// The alias table.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// The release graph.
    #[must_use]
    pub fn releases(&self) -> &ReleaseGraph {
        &self.releases
    }

    /// Resolves a release name or alias to the canonical release name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelease` if no release exists under that name, or
    /// `AliasCycle` if the alias chain loops.
    pub fn canonical_name(&self, name: &str) -> Result<String> {
        match self.aliases.resolve(name, |n| self.releases.contains(n)) {
            AliasResolution::Resolved(release) => Ok(release),
            AliasResolution::Cycle(trace) => Err(Error::AliasCycle { trace }),
            AliasResolution::Dangling(trace) => Err(Error::UnknownRelease {
                name: trace.last().cloned().unwrap_or_else(|| name.to_string()),
                trace,
            }),
        }
    }

    /// Resolves one release by name or alias.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelease`, `InheritanceCycle`, or `UnknownFlag`.
    pub fn resolve(&self, name: &str) -> Result<ResolvedRelease> {
        engine::resolve_release(self, name)
    }

    /// Resolves every release, sorted by name.
    ///
    /// Releases are independent, so with `parallel` set they are resolved
    /// concurrently. Any failure aborts the whole run; the first failure in
    /// name order is reported.
    ///
    /// # Errors
    ///
    /// Returns the first resolution error in name order.
    pub fn resolve_all(&self, parallel: bool) -> Result<Vec<ResolvedRelease>> {
        let names = self.releases.names();
        let results: Vec<Result<ResolvedRelease>> = if parallel {
            names.par_iter().map(|name| self.resolve(name)).collect()
        } else {
            names.iter().map(|name| self.resolve(name)).collect()
        };
        results.into_iter().collect()
    }
}
