//! Common test utilities for integration tests.
//!
//! [`ConfigTree`] lays out configuration directories on disk inside a
//! temporary directory, using the same file layout the filesystem source
//! reads.

use std::fs;
use std::path::{Path, PathBuf};

use relconfig::schema::{FlagDeclarationRecord, FlagValueRecord, ReleaseConfigRecord};
use relconfig::{Container, Value};
use tempfile::TempDir;

/// A temporary tree of configuration directories.
pub struct ConfigTree {
    tmp: TempDir,
}

#[allow(dead_code)]
impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            tmp: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Creates a configuration directory with a map file.
    pub fn dir(&self, rel: &str, default_container: Container) -> DirFixture {
        self.dir_with_aliases(rel, default_container, &[])
    }

    /// Creates a configuration directory whose map declares aliases.
    pub fn dir_with_aliases(
        &self,
        rel: &str,
        default_container: Container,
        aliases: &[(&str, &str)],
    ) -> DirFixture {
        let mut map = format!("default_container: {}\n", container_yaml(default_container));
        if !aliases.is_empty() {
            map.push_str("aliases:\n");
            for (name, target) in aliases {
                map.push_str(&format!("  - name: {name}\n    target: {target}\n"));
            }
        }
        self.dir_with_map(rel, &map)
    }

    /// Creates a configuration directory with a raw map file.
    pub fn dir_with_map(&self, rel: &str, map_yaml: &str) -> DirFixture {
        let fixture = DirFixture {
            path: self.root().join(rel),
        };
        fixture.write("release_config_map.yaml", map_yaml);
        fixture
    }
}

/// One configuration directory inside a [`ConfigTree`].
pub struct DirFixture {
    path: PathBuf,
}

#[allow(dead_code)]
impl DirFixture {
    /// The directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The directory's map file.
    pub fn map_path(&self) -> PathBuf {
        self.path.join("release_config_map.yaml")
    }

    /// Writes a file relative to the directory.
    pub fn write(&self, rel: &str, contents: &str) -> &Self {
        let path = self.path.join(rel);
        fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
        fs::write(path, contents).expect("write file");
        self
    }

    /// Declares a flag in namespace `build` with the directory's default container.
    pub fn flag(&self, name: &str, default: Value) -> &Self {
        self.flag_record(FlagDeclarationRecord {
            name: name.to_string(),
            namespace: Some("build".to_string()),
            container: None,
            value: Some(default.into()),
            description: None,
        })
    }

    /// Writes a full flag declaration record.
    pub fn flag_record(&self, record: FlagDeclarationRecord) -> &Self {
        let yaml = serde_yaml::to_string(&record).expect("encode declaration");
        self.write(&format!("flag_declarations/{}.yaml", record.name), &yaml)
    }

    /// Contributes to a release.
    pub fn release(&self, name: &str, inherits: &[&str]) -> &Self {
        self.release_with_value_sets(name, inherits, &[])
    }

    /// Contributes to a release, naming aconfig value sets.
    pub fn release_with_value_sets(&self, name: &str, inherits: &[&str], sets: &[&str]) -> &Self {
        let record = ReleaseConfigRecord {
            name: name.to_string(),
            inherits: inherits.iter().map(ToString::to_string).collect(),
            aconfig_value_sets: sets.iter().map(ToString::to_string).collect(),
        };
        let yaml = serde_yaml::to_string(&record).expect("encode release");
        self.write(&format!("release_configs/{name}.yaml"), &yaml)
    }

    /// Sets a flag value for a release.
    pub fn value(&self, release: &str, flag: &str, value: Value) -> &Self {
        let record = FlagValueRecord {
            name: flag.to_string(),
            value: value.into(),
        };
        let yaml = serde_yaml::to_string(&record).expect("encode value");
        self.write(&format!("flag_values/{release}/{flag}.yaml"), &yaml)
    }

    /// Path of the declaration file for `flag`.
    pub fn declaration_path(&self, flag: &str) -> String {
        self.path
            .join("flag_declarations")
            .join(format!("{flag}.yaml"))
            .display()
            .to_string()
    }

    /// Path of the value file for `flag` in `release`.
    pub fn value_path(&self, release: &str, flag: &str) -> String {
        self.path
            .join("flag_values")
            .join(release)
            .join(format!("{flag}.yaml"))
            .display()
            .to_string()
    }
}

fn container_yaml(container: Container) -> &'static str {
    match container {
        Container::All => "ALL",
        Container::Product => "PRODUCT",
        Container::System => "SYSTEM",
        Container::SystemExt => "SYSTEM_EXT",
        Container::Vendor => "VENDOR",
    }
}
