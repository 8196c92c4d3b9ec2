//! Projecting resolved releases into the artifact model.

use crate::artifact::{FlagArtifact, ReleaseConfigArtifact, ReleaseConfigsArtifact};
use crate::error::{Error, Result};
use crate::resolve::{ReleaseConfigs, ResolvedRelease};

impl From<&ResolvedRelease> for ReleaseConfigArtifact {
    fn from(release: &ResolvedRelease) -> Self {
        let flag_artifacts = release
            .flags()
            .values()
            .map(|flag| FlagArtifact {
                flag_declaration: flag.declaration().clone(),
                value: flag.value().clone(),
                traces: flag.traces().to_vec(),
            })
            .collect();

        Self {
            name: release.name().to_string(),
            other_names: release.other_names().to_vec(),
            inherits: release.inherits().to_vec(),
            directories: release.directories().to_vec(),
            aconfig_value_sets: release.aconfig_value_sets().to_vec(),
            flag_artifacts,
        }
    }
}

/// Builds the artifact for a target release.
pub struct ArtifactAssembler<'a> {
    configs: &'a ReleaseConfigs,
    parallel: bool,
}

impl<'a> ArtifactAssembler<'a> {
    /// Creates an assembler over a loaded configuration.
    #[must_use]
    pub const fn new(configs: &'a ReleaseConfigs) -> Self {
        Self {
            configs,
            parallel: false,
        }
    }

    /// Resolves releases concurrently.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Resolves every release and singles out `target`.
    ///
    /// Any release failing to resolve fails the whole artifact, even if it is
    /// not the target.
    ///
    /// # Errors
    ///
    /// Returns `UnknownRelease` for an unknown target, or the first
    /// resolution error in release-name order.
    pub fn assemble(&self, target: &str) -> Result<ReleaseConfigsArtifact> {
        let resolved = self.configs.resolve_all(self.parallel)?;
        let canonical = self.configs.canonical_name(target)?;

        let mut release_config = None;
        let mut other_release_configs = Vec::with_capacity(resolved.len());
        for release in &resolved {
            let artifact = ReleaseConfigArtifact::from(release);
            if artifact.name == canonical {
                release_config = Some(artifact);
            } else {
                other_release_configs.push(artifact);
            }
        }
        let release_config = release_config.ok_or_else(|| Error::UnknownRelease {
            name: canonical.clone(),
            trace: vec![target.to_string()],
        })?;

        let release_config_maps_map = self
            .configs
            .maps()
            .iter()
            .map(|(dir, map)| (dir.display().to_string(), map.clone()))
            .collect();

        log::debug!(
            "Assembled artifact for {canonical} with {} other releases",
            other_release_configs.len()
        );

        Ok(ReleaseConfigsArtifact {
            release_config,
            other_release_configs,
            release_config_maps_map,
        })
    }
}
