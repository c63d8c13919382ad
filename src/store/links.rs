//! store::links
//!
//! Desired alias state and its materialization.
//!
//! A [`LinkPlan`] maps each alias name to the version it should point at.
//! [`materialize`] then walks the plan and lets [`DocStore::bind_alias`]
//! touch only the links whose target differs from the filesystem, and
//! [`prune`] drops minor links the plan no longer names.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::metadata::VersionMetadata;
use crate::core::version::{Alias, AliasPins, MinorVersion, Version};

use super::{DocStore, LinkChange, StoreError};

/// One alias the plan wants to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedLink {
    pub name: String,
    pub target: Version,
}

/// The result of materializing one planned link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkOutcome {
    pub name: String,
    pub target: Version,
    pub change: LinkChange,
}

/// Desired symlink state for a version root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPlan {
    pub links: Vec<PlannedLink>,
}

impl LinkPlan {
    /// Plan the alias links for reconciled metadata.
    ///
    /// `stable` falls back to the dev version and `dev` to the stable one, so
    /// both links exist whenever any version does. Minor links follow with
    /// the highest minor first.
    pub fn for_metadata(metadata: &VersionMetadata, pins: &AliasPins) -> Self {
        let mut links = Vec::new();

        for alias in Alias::ALL {
            let other = match alias {
                Alias::Stable => Alias::Dev,
                Alias::Dev => Alias::Stable,
            };
            if let Some(target) = metadata.alias(alias).or_else(|| metadata.alias(other)) {
                links.push(PlannedLink {
                    name: alias.to_string(),
                    target: target.clone(),
                });
            }
        }

        for (minor, target) in minor_targets(&metadata.versions, pins).into_iter().rev() {
            links.push(PlannedLink {
                name: minor.to_string(),
                target: target.clone(),
            });
        }

        Self { links }
    }

    /// The planned target for `name`.
    pub fn target(&self, name: &str) -> Option<&Version> {
        self.links
            .iter()
            .find(|l| l.name == name)
            .map(|l| &l.target)
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Choose the patch each minor-version link points at.
///
/// Within a minor group, the highest patch that classifies as stable wins;
/// a group without any stable patch uses its highest patch overall.
///
/// # Example
///
/// ```
/// use docversions::core::version::{AliasPins, Version};
/// use docversions::store::minor_targets;
///
/// let versions: Vec<Version> = ["1.1.0-rc.1", "1.1.0", "1.0.1", "1.0.0"]
///     .iter()
///     .map(|s| Version::normalize(s).unwrap())
///     .collect();
/// let targets = minor_targets(&versions, &AliasPins::default());
///
/// let names: Vec<String> = targets
///     .iter()
///     .map(|(minor, v)| format!("{} -> {}", minor, v))
///     .collect();
/// assert_eq!(names, vec!["v1.0 -> v1.0.1", "v1.1 -> v1.1.0"]);
/// ```
pub fn minor_targets<'a>(
    versions: &'a [Version],
    pins: &AliasPins,
) -> BTreeMap<MinorVersion, &'a Version> {
    let mut groups: BTreeMap<MinorVersion, Vec<&'a Version>> = BTreeMap::new();
    for version in versions {
        groups.entry(version.minor()).or_default().push(version);
    }

    groups
        .into_iter()
        .filter_map(|(minor, members)| {
            let stable = pins.latest(Alias::Stable, members.iter().copied());
            let chosen = stable.or_else(|| members.iter().copied().max())?;
            Some((minor, chosen))
        })
        .collect()
}

/// Apply a plan to the filesystem.
///
/// Links are processed in plan order and the first failure aborts the pass;
/// links already bound stay bound (a later successful run converges).
pub fn materialize(
    store: &DocStore,
    plan: &LinkPlan,
    relative: bool,
) -> Result<Vec<LinkOutcome>, StoreError> {
    plan.links
        .iter()
        .map(|link| {
            let change = store.bind_alias(&link.name, &link.target, relative)?;
            Ok(LinkOutcome {
                name: link.name.clone(),
                target: link.target.clone(),
                change,
            })
        })
        .collect()
}

/// Remove minor-version links that are not part of the plan.
///
/// A minor link outlives its group when every patch of that minor was
/// deleted out of band; the plan no longer names it and it would dangle.
pub fn prune(store: &DocStore, plan: &LinkPlan) -> Result<Vec<String>, StoreError> {
    let keep: BTreeSet<String> = plan.links.iter().map(|l| l.name.clone()).collect();
    store.prune_minor_aliases(&keep)
}
