//! Release nodes and their per-directory contributions.
//!
//! The graph only accumulates; nothing is merged until a release is resolved.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::alias::AliasTable;
use crate::error::{Error, Result};
use crate::flag::FlagValue;

/// What one configuration directory says about one release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseContribution {
    /// Release name.
    pub name: String,
    /// Index of the contributing directory.
    pub directory_index: usize,
    /// Releases inherited by this contribution, in declaration order.
    pub inherits: Vec<String>,
    /// Flag values set by this contribution, in file order.
    pub flag_values: Vec<FlagValue>,
    /// Aconfig value sets named by this contribution.
    pub aconfig_value_sets: Vec<String>,
    /// The `release_configs/<name>.yaml` file.
    pub path: PathBuf,
}

/// A release node: its contributions in directory-index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseConfig {
    /// Release name.
    pub name: String,
    /// Aliases that resolve to this release, sorted.
    pub other_names: Vec<String>,
    /// Contributions in ascending directory-index order.
    pub contributions: Vec<ReleaseContribution>,
}

impl ReleaseConfig {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            other_names: Vec::new(),
            contributions: Vec::new(),
        }
    }

    /// Inherited release names across all contributions, in application order.
    pub fn inherits(&self) -> impl Iterator<Item = &str> {
        self.contributions
            .iter()
            .flat_map(|c| c.inherits.iter().map(String::as_str))
    }
}

/// All releases, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ReleaseGraph {
    releases: BTreeMap<String, ReleaseConfig>,
}

impl ReleaseGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a contribution, creating the release on first reference.
    ///
    /// # Errors
    ///
    /// Returns `MalformedInput` if the directory already contributed to this release.
    pub fn contribute(&mut self, contribution: ReleaseContribution) -> Result<()> {
        let release = self
            .releases
            .entry(contribution.name.clone())
            .or_insert_with(|| ReleaseConfig::new(&contribution.name));

        if let Some(previous) = release
            .contributions
            .iter()
            .find(|c| c.directory_index == contribution.directory_index)
        {
            return Err(Error::MalformedInput {
                path: contribution.path,
                reason: format!(
                    "release {} already defined in this directory by {}",
                    contribution.name,
                    previous.path.display()
                ),
            });
        }

        let at = release
            .contributions
            .partition_point(|c| c.directory_index < contribution.directory_index);
        release.contributions.insert(at, contribution);
        Ok(())
    }

    /// Looks up a release by its canonical name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ReleaseConfig> {
        self.releases.get(name)
    }

    /// Returns true if a release with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.releases.contains_key(name)
    }

    /// Iterates releases in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ReleaseConfig> {
        self.releases.values()
    }

    /// Release names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.releases.keys().map(String::as_str).collect()
    }

    /// Number of releases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.releases.len()
    }

    /// Returns true if there are no releases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    /// Validates every alias against the graph and records alternate names.
    ///
    /// An alias may not share a release's name and must eventually resolve to
    /// a release. Each release's `other_names` becomes the sorted list of all
    /// aliases that resolve to it, directly or through other aliases.
    ///
    /// # Errors
    ///
    /// Returns `AliasShadowsRelease`, `AliasCycle`, or `DanglingAlias`.
    pub fn finalize_aliases(&mut self, aliases: &AliasTable) -> Result<()> {
        for alias in aliases.iter() {
            if self.releases.contains_key(&alias.name) {
                return Err(Error::AliasShadowsRelease {
                    alias: alias.name.clone(),
                    path: alias.path.clone(),
                });
            }
        }

        let mut other_names: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for alias in aliases.iter() {
            let release =
                aliases.resolve_canonical(&alias.name, |name| self.releases.contains_key(name))?;
            other_names
                .entry(release)
                .or_default()
                .push(alias.name.clone());
        }

        for release in self.releases.values_mut() {
            let mut names = other_names.remove(&release.name).unwrap_or_default();
            names.sort();
            release.other_names = names;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn contribution(name: &str, index: usize) -> ReleaseContribution {
        ReleaseContribution {
            name: name.to_string(),
            directory_index: index,
            inherits: Vec::new(),
            flag_values: Vec::new(),
            aconfig_value_sets: Vec::new(),
            path: PathBuf::from(format!("d{index}/release_configs/{name}.yaml")),
        }
    }

    #[test]
    fn test_contribute_keeps_index_order() {
        let mut graph = ReleaseGraph::new();
        graph.contribute(contribution("trunk", 2)).unwrap();
        graph.contribute(contribution("trunk", 0)).unwrap();
        graph.contribute(contribution("trunk", 1)).unwrap();

        let indices: Vec<usize> = graph
            .get("trunk")
            .unwrap()
            .contributions
            .iter()
            .map(|c| c.directory_index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_second_contribution_from_same_directory_rejected() {
        let mut graph = ReleaseGraph::new();
        graph.contribute(contribution("trunk", 0)).unwrap();
        let err = graph.contribute(contribution("trunk", 0)).unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn test_inherits_spans_contributions() {
        let mut graph = ReleaseGraph::new();
        let mut first = contribution("trunk", 0);
        first.inherits = vec!["base".into()];
        let mut second = contribution("trunk", 1);
        second.inherits = vec!["extra".into(), "base".into()];
        graph.contribute(second).unwrap();
        graph.contribute(first).unwrap();

        let inherits: Vec<&str> = graph.get("trunk").unwrap().inherits().collect();
        assert_eq!(inherits, vec!["base", "extra", "base"]);
    }

    #[test]
    fn test_finalize_aliases_collects_transitive_names() {
        let mut graph = ReleaseGraph::new();
        graph.contribute(contribution("trunk", 0)).unwrap();
        graph.contribute(contribution("other", 0)).unwrap();

        let map = Path::new("d0/release_config_map.yaml");
        let mut aliases = AliasTable::new();
        aliases.declare("next", "trunk", map).unwrap();
        aliases.declare("beta", "next", map).unwrap();

        graph.finalize_aliases(&aliases).unwrap();
        assert_eq!(graph.get("trunk").unwrap().other_names, vec!["beta", "next"]);
        assert!(graph.get("other").unwrap().other_names.is_empty());
    }

    #[test]
    fn test_alias_shadowing_release_rejected() {
        let mut graph = ReleaseGraph::new();
        graph.contribute(contribution("trunk", 0)).unwrap();
        graph.contribute(contribution("next", 0)).unwrap();

        let mut aliases = AliasTable::new();
        aliases
            .declare("next", "trunk", Path::new("d0/release_config_map.yaml"))
            .unwrap();

        let err = graph.finalize_aliases(&aliases).unwrap_err();
        assert!(matches!(err, Error::AliasShadowsRelease { ref alias, .. } if alias == "next"));
    }

    #[test]
    fn test_dangling_alias_rejected() {
        let mut graph = ReleaseGraph::new();
        graph.contribute(contribution("trunk", 0)).unwrap();

        let mut aliases = AliasTable::new();
        aliases
            .declare("next", "ghost", Path::new("d0/release_config_map.yaml"))
            .unwrap();

        let err = graph.finalize_aliases(&aliases).unwrap_err();
        assert!(matches!(err, Error::DanglingAlias { .. }));
    }
}
