//! Folding a release's inheritance and contributions into final flag values.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::flag::ResolvedFlag;
use crate::release::{ReleaseConfig, ReleaseContribution};
use crate::resolve::context::ReleaseConfigs;

/// A fully resolved release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    name: String,
    other_names: Vec<String>,
    inherits: Vec<String>,
    directories: Vec<String>,
    aconfig_value_sets: Vec<String>,
    flags: BTreeMap<String, ResolvedFlag>,
}

impl ResolvedRelease {
    /// Canonical release name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Aliases resolving to this release, sorted.
    #[must_use]
    pub fn other_names(&self) -> &[String] {
        &self.other_names
    }

    /// Inherited releases in the order their values were applied.
    #[must_use]
    pub fn inherits(&self) -> &[String] {
        &self.inherits
    }

    /// Directories that contributed to this release, in index order.
    #[must_use]
    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// Aconfig value sets, first occurrence kept.
    #[must_use]
    pub fn aconfig_value_sets(&self) -> &[String] {
        &self.aconfig_value_sets
    }

    /// Every flag, keyed by name.
    #[must_use]
    pub fn flags(&self) -> &BTreeMap<String, ResolvedFlag> {
        &self.flags
    }

    /// One flag by name.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<&ResolvedFlag> {
        self.flags.get(name)
    }
}

struct Frame {
    name: String,
    inherits: Vec<String>,
    next: usize,
}

impl Frame {
    fn new(release: &ReleaseConfig) -> Self {
        Self {
            name: release.name.clone(),
            inherits: release.inherits().map(ToString::to_string).collect(),
            next: 0,
        }
    }
}

/// Inherited releases in application order, with the chain that reached each.
struct Inheritance {
    order: Vec<String>,
    chains: BTreeMap<String, Vec<String>>,
}

/// Depth-first, left-to-right, post-order walk of the inheritance graph.
///
/// Each release is expanded at most once. Reaching a release that is still
/// being expanded is a cycle.
fn inheritance_order(configs: &ReleaseConfigs, target: &ReleaseConfig) -> Result<Inheritance> {
    let mut order = Vec::new();
    let mut chains = BTreeMap::new();
    let mut done = BTreeSet::new();
    let mut stack = vec![Frame::new(target)];

    loop {
        let Some(frame) = stack.last_mut() else {
            break;
        };
        let next = frame.inherits.get(frame.next).cloned();
        frame.next += 1;

        if let Some(inherited) = next {
            let parent = configs
                .canonical_name(&inherited)
                .map_err(|e| with_inheritance_path(e, &stack))?;
            if stack.iter().any(|f| f.name == parent) {
                let mut path: Vec<String> = stack.iter().map(|f| f.name.clone()).collect();
                path.push(parent);
                return Err(Error::InheritanceCycle { path });
            }
            if done.contains(&parent) {
                continue;
            }
            let Some(release) = configs.releases().get(&parent) else {
                let unknown = Error::UnknownRelease {
                    name: parent,
                    trace: vec![inherited],
                };
                return Err(with_inheritance_path(unknown, &stack));
            };
            stack.push(Frame::new(release));
            continue;
        }

        let chain: Vec<String> = stack.iter().map(|f| f.name.clone()).collect();
        if let Some(finished) = stack.pop() {
            if !stack.is_empty() {
                done.insert(finished.name.clone());
                order.push(finished.name.clone());
            }
            chains.entry(finished.name).or_insert(chain);
        }
    }

    Ok(Inheritance { order, chains })
}

/// Prefixes an `UnknownRelease` trace with the releases being expanded.
fn with_inheritance_path(err: Error, stack: &[Frame]) -> Error {
    match err {
        Error::UnknownRelease { name, trace } => Error::UnknownRelease {
            name,
            trace: stack
                .iter()
                .map(|f| f.name.clone())
                .chain(trace)
                .collect(),
        },
        other => other,
    }
}

/// Resolves one release by name or alias.
pub(crate) fn resolve_release(configs: &ReleaseConfigs, name: &str) -> Result<ResolvedRelease> {
    let canonical = configs.canonical_name(name)?;
    let target = configs
        .releases()
        .get(&canonical)
        .ok_or_else(|| Error::UnknownRelease {
            name: canonical.clone(),
            trace: vec![name.to_string()],
        })?;

    let inheritance = inheritance_order(configs, target)?;

    let mut application: Vec<&ReleaseContribution> = Vec::new();
    for inherited in &inheritance.order {
        if let Some(release) = configs.releases().get(inherited) {
            application.extend(release.contributions.iter());
        }
    }
    application.extend(target.contributions.iter());

    let mut flags: BTreeMap<String, ResolvedFlag> = configs
        .flags()
        .iter()
        .map(|flag| (flag.declaration.name.clone(), ResolvedFlag::seeded(flag)))
        .collect();
    let mut aconfig_value_sets = Vec::new();
    let mut seen_value_sets = BTreeSet::new();
    let mut directory_indices = BTreeSet::new();

    for contribution in &application {
        directory_indices.insert(contribution.directory_index);
        for flag_value in &contribution.flag_values {
            let Some(flag) = flags.get_mut(&flag_value.name) else {
                return Err(Error::UnknownFlag {
                    flag: flag_value.name.clone(),
                    release: canonical,
                    path: flag_value.path.clone(),
                    trace: inheritance
                        .chains
                        .get(&contribution.name)
                        .cloned()
                        .unwrap_or_else(|| vec![contribution.name.clone()]),
                });
            };
            flag.apply(flag_value);
        }
        for value_set in &contribution.aconfig_value_sets {
            if seen_value_sets.insert(value_set.as_str()) {
                aconfig_value_sets.push(value_set.clone());
            }
        }
    }

    let directories = directory_indices
        .into_iter()
        .filter_map(|index| configs.directory_path(index))
        .map(|path| path.display().to_string())
        .collect();

    log::debug!(
        "Resolved release {canonical}: {} inherited, {} contributions, {} flags",
        inheritance.order.len(),
        application.len(),
        flags.len()
    );

    Ok(ResolvedRelease {
        name: canonical,
        other_names: target.other_names.clone(),
        inherits: inheritance.order,
        directories,
        aconfig_value_sets,
        flags,
    })
}
