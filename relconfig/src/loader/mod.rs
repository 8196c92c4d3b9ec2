//! Loading configuration directories.
//!
//! A configuration directory is identified by its `release_config_map.yaml`
//! and an index giving its precedence: directories with a higher index
//! override earlier ones. [`DirectoryLoader`] turns the records of one
//! directory into normalized declarations and release contributions without
//! consulting any other directory, so directories may be decoded in parallel.

mod memory;
mod source;

use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::flag::{FlagDeclaration, FlagValue, UNKNOWN_NAMESPACE};
use crate::release::ReleaseContribution;
use crate::schema::{AliasRecord, FlagDeclarationRecord, ReleaseConfigMapRecord};
use crate::value::{Container, Value};

pub use memory::{MemoryDirectory, MemorySource};
pub use source::{Decoded, DirectorySource, FsDirectorySource};

/// An input directory and its precedence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDirectory {
    /// The directory holding the map file.
    pub path: PathBuf,
    /// The map file itself.
    pub map_path: PathBuf,
    /// Zero-based load order.
    pub index: usize,
}

impl ConfigDirectory {
    /// Describes the directory whose map file is `map_path`.
    #[must_use]
    pub fn from_map_path(map_path: &Path, index: usize) -> Self {
        let path = map_path
            .parent()
            .map_or_else(PathBuf::new, Path::to_path_buf);
        Self {
            path,
            map_path: map_path.to_path_buf(),
            index,
        }
    }
}

/// A flag declaration and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredFlag {
    /// The normalized declaration.
    pub declaration: FlagDeclaration,
    /// Source file.
    pub path: PathBuf,
}

/// Everything one directory contributes, normalized.
#[derive(Debug, Clone)]
pub struct LoadedDirectory {
    /// The directory.
    pub directory: ConfigDirectory,
    /// The decoded map record.
    pub map: ReleaseConfigMapRecord,
    /// Container applied to declarations without one.
    pub default_container: Container,
    /// Flag declarations, in file order.
    pub flag_declarations: Vec<DeclaredFlag>,
    /// Release contributions, in file order.
    pub contributions: Vec<ReleaseContribution>,
    /// Alias declarations from the map.
    pub aliases: Vec<AliasRecord>,
}

/// Loads configuration directories from a [`DirectorySource`].
pub struct DirectoryLoader<'a, S: DirectorySource + ?Sized> {
    source: &'a S,
}

impl<'a, S: DirectorySource + ?Sized> DirectoryLoader<'a, S> {
    /// Creates a loader reading from `source`.
    pub const fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Loads the directory whose map file is `map_path`.
    ///
    /// # Errors
    ///
    /// Returns `MissingDefaultContainer` if the map lacks a default container,
    /// `NameMismatch` if a release or flag value file is misnamed, and
    /// `MalformedInput` if any record cannot be read or decoded.
    pub fn load(&self, map_path: &Path, index: usize) -> Result<LoadedDirectory> {
        let directory = ConfigDirectory::from_map_path(map_path, index);
        let map = self.source.read_map(map_path)?;
        let default_container =
            map.default_container
                .ok_or_else(|| Error::MissingDefaultContainer {
                    path: map_path.to_path_buf(),
                })?;

        let flag_declarations = self
            .source
            .flag_declarations(&directory.path)?
            .into_iter()
            .map(|decoded| {
                Ok(DeclaredFlag {
                    declaration: normalize_declaration(
                        decoded.record,
                        default_container,
                        &decoded.path,
                    )?,
                    path: decoded.path,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut contributions = Vec::new();
        for decoded in self.source.release_configs(&directory.path)? {
            let stem = decoded.stem();
            if decoded.record.name != stem {
                return Err(Error::NameMismatch {
                    path: decoded.path,
                    declared: decoded.record.name,
                    expected: stem,
                });
            }
            let flag_values = self.load_flag_values(&directory.path, &decoded.record.name)?;
            contributions.push(ReleaseContribution {
                name: decoded.record.name,
                directory_index: index,
                inherits: decoded.record.inherits,
                flag_values,
                aconfig_value_sets: decoded.record.aconfig_value_sets,
                path: decoded.path,
            });
        }

        log::info!(
            "Loaded {} (index {index}): {} flag declarations, {} releases, {} aliases",
            map_path.display(),
            flag_declarations.len(),
            contributions.len(),
            map.aliases.len()
        );

        Ok(LoadedDirectory {
            aliases: map.aliases.clone(),
            directory,
            map,
            default_container,
            flag_declarations,
            contributions,
        })
    }

    fn load_flag_values(&self, dir: &Path, release: &str) -> Result<Vec<FlagValue>> {
        self.source
            .flag_values(dir, release)?
            .into_iter()
            .map(|decoded| {
                let stem = decoded.stem();
                if decoded.record.name != stem {
                    return Err(Error::NameMismatch {
                        path: decoded.path,
                        declared: decoded.record.name,
                        expected: stem,
                    });
                }
                let value =
                    decoded
                        .record
                        .value
                        .into_value()
                        .map_err(|reason| Error::MalformedInput {
                            path: decoded.path.clone(),
                            reason,
                        })?;
                Ok(FlagValue {
                    name: decoded.record.name,
                    value,
                    path: decoded.path,
                })
            })
            .collect()
    }

    /// Loads every map in `map_paths`, assigning indices in list order.
    ///
    /// With `parallel` set, directories are decoded concurrently. Results are
    /// returned in input order either way, and the first failure in input
    /// order is reported.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered, in input order.
    pub fn load_all(&self, map_paths: &[PathBuf], parallel: bool) -> Result<Vec<LoadedDirectory>> {
        let results: Vec<Result<LoadedDirectory>> = if parallel {
            map_paths
                .par_iter()
                .enumerate()
                .map(|(index, path)| self.load(path, index))
                .collect()
        } else {
            map_paths
                .iter()
                .enumerate()
                .map(|(index, path)| self.load(path, index))
                .collect()
        };
        results.into_iter().collect()
    }
}

fn normalize_declaration(
    record: FlagDeclarationRecord,
    default_container: Container,
    path: &Path,
) -> Result<FlagDeclaration> {
    let namespace = record.namespace.unwrap_or_else(|| {
        log::warn!(
            "Flag {} in {} has no namespace, using {UNKNOWN_NAMESPACE}",
            record.name,
            path.display()
        );
        UNKNOWN_NAMESPACE.to_string()
    });

    let value = match record.value {
        Some(value) => value.into_value().map_err(|reason| Error::MalformedInput {
            path: path.to_path_buf(),
            reason,
        })?,
        None => {
            log::debug!(
                "Flag {} in {} has no default value, using unspecified",
                record.name,
                path.display()
            );
            Value::Unspecified
        }
    };

    Ok(FlagDeclaration {
        name: record.name,
        namespace,
        container: record.container.unwrap_or(default_container),
        value,
        description: record.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FlagValueRecord, ReleaseConfigRecord};

    fn source_with(dir: MemoryDirectory) -> (MemorySource, PathBuf) {
        let mut source = MemorySource::new();
        let map = source.add(dir);
        (source, map)
    }

    #[test]
    fn test_load_applies_directory_defaults() {
        let (source, map) = source_with(
            MemoryDirectory::new("d0", Some(Container::Vendor)).flag(FlagDeclarationRecord {
                name: "RELEASE_BARE".into(),
                namespace: None,
                container: None,
                value: None,
                description: None,
            }),
        );

        let loaded = DirectoryLoader::new(&source).load(&map, 0).unwrap();
        let decl = &loaded.flag_declarations[0].declaration;
        assert_eq!(decl.namespace, UNKNOWN_NAMESPACE);
        assert_eq!(decl.container, Container::Vendor);
        assert_eq!(decl.value, Value::Unspecified);
    }

    #[test]
    fn test_load_requires_default_container() {
        let (source, map) = source_with(MemoryDirectory::new("d0", None));
        let err = DirectoryLoader::new(&source).load(&map, 0).unwrap_err();
        assert!(matches!(err, Error::MissingDefaultContainer { .. }));
    }

    #[test]
    fn test_release_stem_mismatch() {
        let (source, map) = source_with(MemoryDirectory::new("d0", Some(Container::All)).release_at(
            "trunk",
            ReleaseConfigRecord {
                name: "next".into(),
                inherits: Vec::new(),
                aconfig_value_sets: Vec::new(),
            },
        ));
        let err = DirectoryLoader::new(&source).load(&map, 0).unwrap_err();
        match err {
            Error::NameMismatch {
                declared, expected, ..
            } => {
                assert_eq!(declared, "next");
                assert_eq!(expected, "trunk");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_flag_value_stem_mismatch() {
        let (source, map) = source_with(
            MemoryDirectory::new("d0", Some(Container::All))
                .release("trunk", &[])
                .value_at(
                    "trunk",
                    "RELEASE_A",
                    FlagValueRecord {
                        name: "RELEASE_B".into(),
                        value: Value::Bool(true).into(),
                    },
                ),
        );
        let err = DirectoryLoader::new(&source).load(&map, 0).unwrap_err();
        assert!(matches!(err, Error::NameMismatch { .. }));
    }

    #[test]
    fn test_contribution_carries_values_and_index() {
        let (source, map) = source_with(
            MemoryDirectory::new("d0", Some(Container::All))
                .declare("RELEASE_A", Value::Bool(false))
                .release("trunk", &["base"])
                .release("base", &[])
                .value("trunk", "RELEASE_A", Value::Bool(true)),
        );
        let loaded = DirectoryLoader::new(&source).load(&map, 3).unwrap();

        let trunk = loaded
            .contributions
            .iter()
            .find(|c| c.name == "trunk")
            .unwrap();
        assert_eq!(trunk.directory_index, 3);
        assert_eq!(trunk.inherits, vec!["base"]);
        assert_eq!(trunk.flag_values.len(), 1);
        assert_eq!(trunk.flag_values[0].value, Value::Bool(true));
        assert_eq!(loaded.directory.path, PathBuf::from("d0"));
    }

    #[test]
    fn test_load_all_preserves_order_and_first_error() {
        let mut source = MemorySource::new();
        let maps: Vec<PathBuf> = (0..8)
            .map(|i| source.add(MemoryDirectory::new(format!("d{i}"), Some(Container::All))))
            .collect();

        for parallel in [false, true] {
            let loaded = DirectoryLoader::new(&source).load_all(&maps, parallel).unwrap();
            let indices: Vec<usize> = loaded.iter().map(|l| l.directory.index).collect();
            assert_eq!(indices, (0..8).collect::<Vec<_>>());
        }

        let mut broken = maps.clone();
        broken.insert(2, PathBuf::from("missing1/release_config_map.yaml"));
        broken.insert(5, PathBuf::from("missing2/release_config_map.yaml"));
        let err = DirectoryLoader::new(&source).load_all(&broken, true).unwrap_err();
        match err {
            Error::MalformedInput { path, .. } => {
                assert!(path.starts_with("missing1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
