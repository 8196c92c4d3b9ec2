//! Where directory records come from.
//!
//! The loader never touches the filesystem directly; it asks a
//! [`DirectorySource`] for decoded records. [`FsDirectorySource`] reads YAML
//! files from disk.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::schema::{
    FlagDeclarationRecord, FlagValueRecord, ReleaseConfigMapRecord, ReleaseConfigRecord,
    FLAG_DECLARATIONS_DIR, FLAG_VALUES_DIR, RECORD_EXTENSION, RELEASE_CONFIGS_DIR,
};

/// A decoded record and the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T> {
    /// Source file.
    pub path: PathBuf,
    /// Decoded content.
    pub record: T,
}

impl<T> Decoded<T> {
    /// The file stem of the source path.
    #[must_use]
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Provides the decoded records of configuration directories.
///
/// Every listing must be returned in a deterministic order.
pub trait DirectorySource: Sync {
    /// Reads the map record at `map_path`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the map cannot be read or decoded.
    fn read_map(&self, map_path: &Path) -> Result<ReleaseConfigMapRecord>;

    /// All flag declarations under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if a file cannot be read or decoded.
    fn flag_declarations(&self, dir: &Path) -> Result<Vec<Decoded<FlagDeclarationRecord>>>;

    /// All release contributions under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if a file cannot be read or decoded.
    fn release_configs(&self, dir: &Path) -> Result<Vec<Decoded<ReleaseConfigRecord>>>;

    /// All flag values for `release` under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if a file cannot be read or decoded.
    fn flag_values(&self, dir: &Path, release: &str) -> Result<Vec<Decoded<FlagValueRecord>>>;
}

/// Reads configuration directories from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDirectorySource;

impl FsDirectorySource {
    /// Creates a filesystem source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn decode_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let contents = fs::read_to_string(path).map_err(|e| Error::MalformedInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_yaml::from_str(&contents).map_err(|e| Error::MalformedInput {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Decodes every record file under `root`, in file-name order.
    ///
    /// A missing `root` yields no records.
    fn decode_tree<T: DeserializeOwned>(root: &Path) -> Result<Vec<Decoded<T>>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| Error::MalformedInput {
                path: e.path().map_or_else(|| root.to_path_buf(), Path::to_path_buf),
                reason: e.to_string(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXTENSION)
            {
                continue;
            }
            records.push(Decoded {
                path: path.to_path_buf(),
                record: Self::decode_file(path)?,
            });
        }
        Ok(records)
    }
}

impl DirectorySource for FsDirectorySource {
    fn read_map(&self, map_path: &Path) -> Result<ReleaseConfigMapRecord> {
        Self::decode_file(map_path)
    }

    fn flag_declarations(&self, dir: &Path) -> Result<Vec<Decoded<FlagDeclarationRecord>>> {
        Self::decode_tree(&dir.join(FLAG_DECLARATIONS_DIR))
    }

    fn release_configs(&self, dir: &Path) -> Result<Vec<Decoded<ReleaseConfigRecord>>> {
        Self::decode_tree(&dir.join(RELEASE_CONFIGS_DIR))
    }

    fn flag_values(&self, dir: &Path, release: &str) -> Result<Vec<Decoded<FlagValueRecord>>> {
        Self::decode_tree(&dir.join(FLAG_VALUES_DIR).join(release))
    }
}
