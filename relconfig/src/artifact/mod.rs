//! Exported artifacts.
//!
//! The assembler turns resolved releases into a [`ReleaseConfigsArtifact`],
//! which every structured encoder serializes as-is. The build-variable
//! listing is a flattened view of the target release only.

mod assembler;
mod encoding;
mod makefile;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flag::{FlagDeclaration, Trace};
use crate::schema::ReleaseConfigMapRecord;
use crate::value::{Container, Value};

pub use assembler::ArtifactAssembler;
pub use encoding::{
    decode, ArtifactEncoder, ArtifactWriter, JsonEncoder, PostcardEncoder, YamlEncoder,
};
pub use makefile::{MakefileEncoder, MAKE_ASSIGN, MAKE_PREFIX};

/// Every release, with the target release singled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfigsArtifact {
    /// The target release.
    pub release_config: ReleaseConfigArtifact,
    /// Every other release, sorted by name.
    pub other_release_configs: Vec<ReleaseConfigArtifact>,
    /// Map record of each configuration directory, keyed by directory.
    pub release_config_maps_map: BTreeMap<String, ReleaseConfigMapRecord>,
}

impl ReleaseConfigsArtifact {
    /// Iterates the target release followed by the others.
    pub fn releases(&self) -> impl Iterator<Item = &ReleaseConfigArtifact> {
        std::iter::once(&self.release_config).chain(self.other_release_configs.iter())
    }
}

/// One resolved release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfigArtifact {
    /// Canonical name.
    pub name: String,
    /// Aliases resolving to this release, sorted.
    pub other_names: Vec<String>,
    /// Inherited releases in application order.
    pub inherits: Vec<String>,
    /// Contributing directories in index order.
    pub directories: Vec<String>,
    /// Aconfig value sets.
    pub aconfig_value_sets: Vec<String>,
    /// Every flag, sorted by name.
    pub flag_artifacts: Vec<FlagArtifact>,
}

impl ReleaseConfigArtifact {
    /// Looks up a flag by name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&FlagArtifact> {
        self.flag_artifacts
            .binary_search_by(|f| f.flag_declaration.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.flag_artifacts[i])
    }
}

/// One flag's final state within a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagArtifact {
    /// The declaration.
    pub flag_declaration: FlagDeclaration,
    /// Effective value.
    pub value: Value,
    /// Provenance trail, oldest first.
    pub traces: Vec<Trace>,
}

impl FlagArtifact {
    /// Flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.flag_declaration.name
    }

    /// File that declared the flag.
    #[must_use]
    pub fn declared_in(&self) -> &str {
        self.traces.first().map_or("", |t| t.source.as_str())
    }

    /// File that set the effective value.
    #[must_use]
    pub fn set_in(&self) -> &str {
        self.traces.last().map_or("", |t| t.source.as_str())
    }
}

/// Flag names grouped by partition.
///
/// Flags whose container is `ALL` appear under every concrete partition.
///
/// # Examples
///
/// ```
/// use relconfig::artifact::PartitionView;
/// use relconfig::Container;
///
/// let view = PartitionView::from_flags([
///     ("RELEASE_A", Container::All),
///     ("RELEASE_B", Container::Vendor),
/// ]);
/// assert_eq!(view.flags("vendor"), ["RELEASE_A", "RELEASE_B"]);
/// assert_eq!(view.flags("system"), ["RELEASE_A"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionView {
    partitions: BTreeMap<String, Vec<String>>,
}

impl PartitionView {
    /// Groups `(flag, container)` pairs, keeping input order within a partition.
    pub fn from_flags<'a, I>(flags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Container)>,
    {
        let mut partitions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (name, container) in flags {
            for partition in container.partitions() {
                partitions
                    .entry(partition.partition_name().to_string())
                    .or_default()
                    .push(name.to_string());
            }
        }
        Self { partitions }
    }

    /// Groups the flags of one release.
    #[must_use]
    pub fn from_release(release: &ReleaseConfigArtifact) -> Self {
        Self::from_flags(
            release
                .flag_artifacts
                .iter()
                .map(|f| (f.name(), f.flag_declaration.container)),
        )
    }

    /// Flags in `partition`; empty if none.
    #[must_use]
    pub fn flags(&self, partition: &str) -> &[String] {
        self.partitions
            .get(partition)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates partitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.partitions
            .iter()
            .map(|(name, flags)| (name.as_str(), flags.as_slice()))
    }
}

/// An artifact output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// `all_release_configs.yaml`
    Yaml,
    /// `all_release_configs.pb`, postcard binary.
    Pb,
    /// `all_release_configs.json`
    Json,
    /// `release_config.mk`
    Make,
}

impl ArtifactFormat {
    /// Every format, in output order.
    pub const ALL: [Self; 4] = [Self::Yaml, Self::Pb, Self::Json, Self::Make];

    /// Parses a format name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an unknown name.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yaml" => Ok(Self::Yaml),
            "pb" => Ok(Self::Pb),
            "json" => Ok(Self::Json),
            "make" => Ok(Self::Make),
            _ => Err(Error::Validation {
                field: "formats".to_string(),
                message: format!("unknown format '{s}': expected one of yaml, pb, json, make"),
            }),
        }
    }

    /// Creates the encoder for this format.
    #[must_use]
    pub fn create_encoder(self) -> Box<dyn ArtifactEncoder> {
        match self {
            Self::Yaml => Box::new(YamlEncoder),
            Self::Pb => Box::new(PostcardEncoder),
            Self::Json => Box::new(JsonEncoder),
            Self::Make => Box::new(MakefileEncoder),
        }
    }

    /// Output file name.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        self.create_encoder().file_name()
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Pb => write!(f, "pb"),
            Self::Json => write!(f, "json"),
            Self::Make => write!(f, "make"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse_and_display() {
        for format in ArtifactFormat::ALL {
            assert_eq!(ArtifactFormat::parse(&format.to_string()).unwrap(), format);
        }
        assert_eq!(ArtifactFormat::parse(" JSON ").unwrap(), ArtifactFormat::Json);
        assert!(ArtifactFormat::parse("textproto").is_err());
    }

    #[test]
    fn test_format_file_names() {
        assert_eq!(ArtifactFormat::Yaml.file_name(), "all_release_configs.yaml");
        assert_eq!(ArtifactFormat::Pb.file_name(), "all_release_configs.pb");
        assert_eq!(ArtifactFormat::Json.file_name(), "all_release_configs.json");
        assert_eq!(ArtifactFormat::Make.file_name(), "release_config.mk");
    }

    #[test]
    fn test_partition_view_replicates_all() {
        let view = PartitionView::from_flags([
            ("RELEASE_A", Container::All),
            ("RELEASE_B", Container::SystemExt),
        ]);
        let names: Vec<&str> = view.iter().map(|(p, _)| p).collect();
        assert_eq!(names, vec!["product", "system", "system_ext", "vendor"]);
        assert_eq!(view.flags("system_ext"), ["RELEASE_A", "RELEASE_B"]);
        assert_eq!(view.flags("product"), ["RELEASE_A"]);
        assert!(view.flags("odm").is_empty());
    }
}
