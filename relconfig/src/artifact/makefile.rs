//! The build-variable listing (`release_config.mk`).
//!
//! Only the target release is listed. Layout:
//!
//! ```text
//! _ALL_RELEASE_FLAGS :=$= <flags>
//! _ALL_RELEASE_FLAGS.PARTITIONS.<partition> :=$= <flags>
//! _ALL_RELEASE_FLAGS.<flag>.<FIELD> :=$= <value>
//!
//!
//! # Values for all build flags
//! RELEASE_ACONFIG_VALUE_SETS :=$= <value sets>
//! <flag> :=$= <value>
//! ```

use crate::artifact::{ArtifactEncoder, PartitionView, ReleaseConfigsArtifact};
use crate::error::Result;

/// Prefix of every per-flag metadata variable.
pub const MAKE_PREFIX: &str = "_ALL_RELEASE_FLAGS";

/// Assignment operator used throughout the listing.
pub const MAKE_ASSIGN: &str = ":=$=";

/// Renders the target release as build-system variables.
pub struct MakefileEncoder;

impl MakefileEncoder {
    /// Renders the listing as text.
    #[must_use]
    pub fn render(artifact: &ReleaseConfigsArtifact) -> String {
        let release = &artifact.release_config;
        let names: Vec<&str> = release.flag_artifacts.iter().map(|f| f.name()).collect();

        let mut vars: Vec<(String, String)> = Vec::with_capacity(names.len() * 6);
        for flag in &release.flag_artifacts {
            let name = flag.name();
            let decl = &flag.flag_declaration;
            let mut add = |field: &str, value: String| {
                vars.push((format!("{MAKE_PREFIX}.{name}.{field}"), value));
            };
            add("PARTITIONS", decl.container.partition_name().to_string());
            add("DEFAULT", decl.value.as_make_value());
            add("VALUE", flag.value.as_make_value());
            add("DECLARED_IN", flag.declared_in().to_string());
            add("SET_IN", flag.set_in().to_string());
            add("NAMESPACE", decl.namespace.clone());
        }
        vars.sort();

        let mut lines = Vec::with_capacity(vars.len() + names.len() + 8);
        lines.push(format!("{MAKE_PREFIX} {MAKE_ASSIGN} {}", names.join(" ")));
        for (partition, flags) in PartitionView::from_release(release).iter() {
            lines.push(format!(
                "{MAKE_PREFIX}.PARTITIONS.{partition} {MAKE_ASSIGN} {}",
                flags.join(" ")
            ));
        }
        lines.extend(
            vars.iter()
                .map(|(var, value)| format!("{var} {MAKE_ASSIGN} {value}")),
        );

        lines.push(String::new());
        lines.push(String::new());
        lines.push("# Values for all build flags".to_string());
        lines.push(format!(
            "RELEASE_ACONFIG_VALUE_SETS {MAKE_ASSIGN} {}",
            release.aconfig_value_sets.join(" ")
        ));
        lines.extend(release.flag_artifacts.iter().map(|flag| {
            format!("{} {MAKE_ASSIGN} {}", flag.name(), flag.value.as_make_value())
        }));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl ArtifactEncoder for MakefileEncoder {
    fn encode(&self, artifact: &ReleaseConfigsArtifact) -> Result<Vec<u8>> {
        Ok(Self::render(artifact).into_bytes())
    }

    fn file_name(&self) -> &'static str {
        "release_config.mk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactAssembler;
    use crate::loader::{MemoryDirectory, MemorySource};
    use crate::resolve::ReleaseConfigs;
    use crate::schema::{FlagDeclarationRecord, ReleaseConfigRecord};
    use crate::value::{Container, Value};

    fn render() -> String {
        let mut source = MemorySource::new();
        let d0 = source.add(
            MemoryDirectory::new("d0", Some(Container::All))
                .declare("RELEASE_B", Value::Bool(false))
                .flag(FlagDeclarationRecord {
                    name: "RELEASE_A".into(),
                    namespace: Some("vendor_ns".into()),
                    container: Some(Container::Vendor),
                    value: Some(Value::String("dflt".into()).into()),
                    description: None,
                })
                .release_at(
                    "trunk",
                    ReleaseConfigRecord {
                        name: "trunk".into(),
                        inherits: Vec::new(),
                        aconfig_value_sets: vec!["aconfig_a".into(), "aconfig_b".into()],
                    },
                ),
        );
        let d1 = source.add(
            MemoryDirectory::new("d1", Some(Container::All))
                .release("trunk", &[])
                .value("trunk", "RELEASE_B", Value::Bool(true)),
        );
        let configs = ReleaseConfigs::load(&source, &[d0, d1], false).unwrap();
        let artifact = ArtifactAssembler::new(&configs).assemble("trunk").unwrap();
        MakefileEncoder::render(&artifact)
    }

    #[test]
    fn test_header_and_partitions() {
        let text = render();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "_ALL_RELEASE_FLAGS :=$= RELEASE_A RELEASE_B");
        assert_eq!(lines[1], "_ALL_RELEASE_FLAGS.PARTITIONS.product :=$= RELEASE_B");
        assert_eq!(lines[2], "_ALL_RELEASE_FLAGS.PARTITIONS.system :=$= RELEASE_B");
        assert_eq!(lines[3], "_ALL_RELEASE_FLAGS.PARTITIONS.system_ext :=$= RELEASE_B");
        assert_eq!(
            lines[4],
            "_ALL_RELEASE_FLAGS.PARTITIONS.vendor :=$= RELEASE_A RELEASE_B"
        );
    }

    #[test]
    fn test_metadata_variables_sorted() {
        let text = render();
        let vars: Vec<&str> = text
            .lines()
            .filter(|l| l.starts_with("_ALL_RELEASE_FLAGS.RELEASE_"))
            .collect();
        assert_eq!(vars.len(), 12);
        let mut sorted = vars.clone();
        sorted.sort_unstable();
        assert_eq!(vars, sorted);

        assert!(text.contains("_ALL_RELEASE_FLAGS.RELEASE_A.PARTITIONS :=$= vendor\n"));
        assert!(text.contains("_ALL_RELEASE_FLAGS.RELEASE_B.PARTITIONS :=$= all\n"));
        assert!(text.contains("_ALL_RELEASE_FLAGS.RELEASE_A.NAMESPACE :=$= vendor_ns\n"));
        assert!(text.contains("_ALL_RELEASE_FLAGS.RELEASE_B.DEFAULT :=$= \n"));
        assert!(text.contains("_ALL_RELEASE_FLAGS.RELEASE_B.VALUE :=$= true\n"));
        assert!(text.contains(
            "_ALL_RELEASE_FLAGS.RELEASE_B.DECLARED_IN :=$= d0/flag_declarations/RELEASE_B.yaml\n"
        ));
        assert!(text.contains(
            "_ALL_RELEASE_FLAGS.RELEASE_B.SET_IN :=$= d1/flag_values/trunk/RELEASE_B.yaml\n"
        ));
    }

    #[test]
    fn test_values_section() {
        let text = render();
        let (_, values) = text.split_once("\n\n\n# Values for all build flags\n").unwrap();
        assert_eq!(
            values,
            "RELEASE_ACONFIG_VALUE_SETS :=$= aconfig_a aconfig_b\n\
             RELEASE_A :=$= dflt\n\
             RELEASE_B :=$= true\n"
        );
    }
}
