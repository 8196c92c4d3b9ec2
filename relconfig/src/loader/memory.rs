//! An in-memory [`DirectorySource`].
//!
//! Records are attached to synthesized paths laid out exactly as they would
//! be on disk, so provenance in resolved output looks the same as for a
//! filesystem source.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::loader::source::{Decoded, DirectorySource};
use crate::schema::{
    AliasRecord, FlagDeclarationRecord, FlagValueRecord, ReleaseConfigMapRecord,
    ReleaseConfigRecord, FLAG_DECLARATIONS_DIR, FLAG_VALUES_DIR, MAP_FILE_NAME,
    RELEASE_CONFIGS_DIR,
};
use crate::value::{Container, Value};

/// One configuration directory held in memory.
///
/// # Examples
///
/// ```
/// use relconfig::loader::{MemoryDirectory, MemorySource};
/// use relconfig::{Container, Value};
///
/// let mut source = MemorySource::new();
/// let map = source.add(
///     MemoryDirectory::new("build/release", Some(Container::All))
///         .declare("RELEASE_FOO", Value::Bool(false))
///         .release("trunk", &[])
///         .value("trunk", "RELEASE_FOO", Value::Bool(true)),
/// );
/// assert!(map.ends_with("release_config_map.yaml"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    root: PathBuf,
    map: ReleaseConfigMapRecord,
    flag_declarations: Vec<Decoded<FlagDeclarationRecord>>,
    release_configs: Vec<Decoded<ReleaseConfigRecord>>,
    flag_values: BTreeMap<String, Vec<Decoded<FlagValueRecord>>>,
}

impl MemoryDirectory {
    /// Creates an empty directory rooted at `root`.
    pub fn new(root: impl Into<PathBuf>, default_container: Option<Container>) -> Self {
        Self {
            root: root.into(),
            map: ReleaseConfigMapRecord {
                default_container,
                ..ReleaseConfigMapRecord::default()
            },
            flag_declarations: Vec::new(),
            release_configs: Vec::new(),
            flag_values: BTreeMap::new(),
        }
    }

    /// The directory root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the directory's map file.
    #[must_use]
    pub fn map_path(&self) -> PathBuf {
        self.root.join(MAP_FILE_NAME)
    }

    /// Adds an alias to the map record.
    #[must_use]
    pub fn alias(mut self, name: &str, target: &str) -> Self {
        self.map.aliases.push(AliasRecord {
            name: name.to_string(),
            target: target.to_string(),
        });
        self
    }

    /// Adds a flag declaration with a default value and nothing else set.
    #[must_use]
    pub fn declare(self, name: &str, value: Value) -> Self {
        self.flag(FlagDeclarationRecord {
            name: name.to_string(),
            namespace: Some("build".to_string()),
            container: None,
            value: Some(value.into()),
            description: None,
        })
    }

    /// Adds a full flag declaration record.
    #[must_use]
    pub fn flag(mut self, record: FlagDeclarationRecord) -> Self {
        let path = self
            .root
            .join(FLAG_DECLARATIONS_DIR)
            .join(format!("{}.yaml", record.name));
        self.flag_declarations.push(Decoded { path, record });
        self
    }

    /// Adds a release contribution.
    #[must_use]
    pub fn release(self, name: &str, inherits: &[&str]) -> Self {
        let record = ReleaseConfigRecord {
            name: name.to_string(),
            inherits: inherits.iter().map(ToString::to_string).collect(),
            aconfig_value_sets: Vec::new(),
        };
        self.release_at(name, record)
    }

    /// Adds a release contribution stored under an explicit file stem.
    #[must_use]
    pub fn release_at(mut self, stem: &str, record: ReleaseConfigRecord) -> Self {
        let path = self
            .root
            .join(RELEASE_CONFIGS_DIR)
            .join(format!("{stem}.yaml"));
        self.release_configs.push(Decoded { path, record });
        self
    }

    /// Sets a flag value for a release.
    #[must_use]
    pub fn value(self, release: &str, flag: &str, value: Value) -> Self {
        let record = FlagValueRecord {
            name: flag.to_string(),
            value: value.into(),
        };
        self.value_at(release, flag, record)
    }

    /// Sets a flag value record stored under an explicit file stem.
    #[must_use]
    pub fn value_at(mut self, release: &str, stem: &str, record: FlagValueRecord) -> Self {
        let path = self
            .root
            .join(FLAG_VALUES_DIR)
            .join(release)
            .join(format!("{stem}.yaml"));
        self.flag_values
            .entry(release.to_string())
            .or_default()
            .push(Decoded { path, record });
        self
    }
}

/// A [`DirectorySource`] backed by [`MemoryDirectory`] values.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    directories: BTreeMap<PathBuf, MemoryDirectory>,
}

impl MemorySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory and returns the path of its map file.
    pub fn add(&mut self, directory: MemoryDirectory) -> PathBuf {
        let map_path = directory.map_path();
        self.directories.insert(directory.root.clone(), directory);
        map_path
    }

    fn directory(&self, dir: &Path) -> Result<&MemoryDirectory> {
        self.directories.get(dir).ok_or_else(|| Error::MalformedInput {
            path: dir.join(MAP_FILE_NAME),
            reason: "no such configuration directory".to_string(),
        })
    }
}

impl DirectorySource for MemorySource {
    fn read_map(&self, map_path: &Path) -> Result<ReleaseConfigMapRecord> {
        let dir = map_path.parent().unwrap_or_else(|| Path::new(""));
        Ok(self.directory(dir)?.map.clone())
    }

    fn flag_declarations(&self, dir: &Path) -> Result<Vec<Decoded<FlagDeclarationRecord>>> {
        Ok(self.directory(dir)?.flag_declarations.clone())
    }

    fn release_configs(&self, dir: &Path) -> Result<Vec<Decoded<ReleaseConfigRecord>>> {
        Ok(self.directory(dir)?.release_configs.clone())
    }

    fn flag_values(&self, dir: &Path, release: &str) -> Result<Vec<Decoded<FlagValueRecord>>> {
        Ok(self
            .directory(dir)?
            .flag_values
            .get(release)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_mirror_disk_layout() {
        let dir = MemoryDirectory::new("d0", Some(Container::All))
            .declare("RELEASE_FOO", Value::Unspecified)
            .release("trunk", &["base"])
            .value("trunk", "RELEASE_FOO", Value::Bool(true));

        let mut source = MemorySource::new();
        let map = source.add(dir);
        assert_eq!(map, PathBuf::from("d0/release_config_map.yaml"));

        let decls = source.flag_declarations(Path::new("d0")).unwrap();
        assert_eq!(
            decls[0].path,
            PathBuf::from("d0/flag_declarations/RELEASE_FOO.yaml")
        );

        let values = source.flag_values(Path::new("d0"), "trunk").unwrap();
        assert_eq!(
            values[0].path,
            PathBuf::from("d0/flag_values/trunk/RELEASE_FOO.yaml")
        );
        assert!(source.flag_values(Path::new("d0"), "other").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_directory_is_malformed_input() {
        let source = MemorySource::new();
        let err = source
            .read_map(Path::new("nowhere/release_config_map.yaml"))
            .unwrap_err();
        assert!(err.is_structural());
    }
}
