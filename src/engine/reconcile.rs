//! engine::reconcile
//!
//! Merge persisted metadata with a filesystem snapshot.
//!
//! # Invariants
//!
//! - Pure: the result depends only on the arguments
//! - `versions` is sorted descending with no duplicates
//! - Prior entries survive only while their directory exists
//! - `stable` and `dev`, when set, are members of `versions`
//! - Running twice over the same state yields identical metadata

use serde::Serialize;

use super::scan::DocSnapshot;
use crate::core::metadata::VersionMetadata;
use crate::core::version::{sort_descending, Alias, AliasPins, Version};

/// Compute the corrected metadata for a version root.
///
/// Candidates are the prior record's versions whose directories still
/// exist, every scanned directory, the version just built, and the current
/// targets of the alias links. Aliases are then chosen by [`decide_aliases`].
///
/// # Example
///
/// ```
/// use docversions::core::metadata::VersionMetadata;
/// use docversions::core::version::{AliasPins, Version};
/// use docversions::engine::reconcile::reconcile;
/// use docversions::engine::scan::DocSnapshot;
///
/// let current = Version::normalize("0.1.0").unwrap();
/// let meta = reconcile(
///     &VersionMetadata::default(),
///     &DocSnapshot::default(),
///     &current,
///     &AliasPins::default(),
/// );
/// assert_eq!(meta.versions, vec![current.clone()]);
/// assert_eq!(meta.dev, Some(current));
/// assert!(meta.stable.is_none());
/// ```
pub fn reconcile(
    prior: &VersionMetadata,
    snapshot: &DocSnapshot,
    current: &Version,
    pins: &AliasPins,
) -> VersionMetadata {
    let mut versions: Vec<Version> = prior
        .mentioned()
        .filter(|v| snapshot.contains(v))
        .chain(snapshot.versions.iter())
        .chain(std::iter::once(current))
        .chain(snapshot.stable_link.iter())
        .chain(snapshot.dev_link.iter())
        .cloned()
        .collect();
    sort_descending(&mut versions);

    let (stable, dev) = decide_aliases(&versions, pins);
    VersionMetadata {
        versions,
        stable,
        dev,
    }
}

/// Choose the `stable` and `dev` versions among `versions`.
///
/// A pinned version wins when it is present. Otherwise the latest version of
/// each class is taken, except that a computed `dev` older than the chosen
/// `stable` is dropped.
pub fn decide_aliases(versions: &[Version], pins: &AliasPins) -> (Option<Version>, Option<Version>) {
    let pinned = |alias: Alias| {
        pins.pin(alias)
            .exact()
            .filter(|pin| versions.contains(pin))
            .cloned()
    };

    let stable = pinned(Alias::Stable).or_else(|| pins.latest(Alias::Stable, versions).cloned());

    let dev = pinned(Alias::Dev).or_else(|| {
        pins.latest(Alias::Dev, versions)
            .filter(|dev| stable.as_ref().map_or(true, |stable| *dev >= stable))
            .cloned()
    });

    (stable, dev)
}

/// Differences between the persisted record and the reconciled one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetadataDiff {
    /// Versions the reconciled record adds.
    pub added: Vec<Version>,
    /// Versions the reconciled record drops.
    pub removed: Vec<Version>,
    /// `(before, after)` when the stable binding changes.
    pub stable: Option<(Option<Version>, Option<Version>)>,
    /// `(before, after)` when the dev binding changes.
    pub dev: Option<(Option<Version>, Option<Version>)>,
}

impl MetadataDiff {
    pub fn between(prior: &VersionMetadata, next: &VersionMetadata) -> Self {
        let changed = |alias: Alias| {
            let (a, b) = (prior.alias(alias), next.alias(alias));
            (a != b).then(|| (a.cloned(), b.cloned()))
        };

        Self {
            added: next
                .versions
                .iter()
                .filter(|v| !prior.versions.contains(v))
                .cloned()
                .collect(),
            removed: prior
                .versions
                .iter()
                .filter(|v| !next.versions.contains(v))
                .cloned()
                .collect(),
            stable: changed(Alias::Stable),
            dev: changed(Alias::Dev),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.stable.is_none()
            && self.dev.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::version::VersionPin;

    fn v(s: &str) -> Version {
        Version::normalize(s).unwrap()
    }

    fn snapshot(dirs: &[&str]) -> DocSnapshot {
        DocSnapshot {
            versions: dirs.iter().map(|s| v(s)).collect(),
            ..Default::default()
        }
    }

    fn pins(stable: &str, dev: &str) -> AliasPins {
        AliasPins::new(
            VersionPin::parse(stable).unwrap(),
            VersionPin::parse(dev).unwrap(),
        )
    }

    mod candidates {
        use super::*;

        #[test]
        fn first_build() {
            let meta = reconcile(
                &VersionMetadata::default(),
                &DocSnapshot::default(),
                &v("1.2.0"),
                &AliasPins::default(),
            );
            assert_eq!(meta.versions, vec![v("1.2.0")]);
            assert_eq!(meta.stable, Some(v("1.2.0")));
            assert_eq!(meta.dev, None);
        }

        #[test]
        fn union_sorted_descending() {
            let snap = snapshot(&["v0.5.0", "v1.0.0", "v2.0.0-alpha.1"]);
            let meta = reconcile(
                &VersionMetadata::default(),
                &snap,
                &v("1.1.0"),
                &AliasPins::default(),
            );
            assert_eq!(
                meta.versions,
                vec![v("2.0.0-alpha.1"), v("1.1.0"), v("1.0.0"), v("0.5.0")]
            );
            assert_eq!(meta.stable, Some(v("1.1.0")));
            assert_eq!(meta.dev, Some(v("2.0.0-alpha.1")));
        }

        #[test]
        fn prior_without_directory_is_dropped() {
            let prior = VersionMetadata {
                versions: vec![v("1.1.0"), v("1.0.0")],
                stable: Some(v("1.1.0")),
                dev: None,
            };
            let meta = reconcile(&prior, &snapshot(&["v1.0.0"]), &v("1.0.0"), &AliasPins::default());
            assert_eq!(meta.versions, vec![v("1.0.0")]);
            assert_eq!(meta.stable, Some(v("1.0.0")));
        }

        #[test]
        fn link_targets_join_candidates() {
            let snap = DocSnapshot {
                stable_link: Some(v("0.9.0")),
                ..snapshot(&["v1.0.0"])
            };
            let meta = reconcile(
                &VersionMetadata::default(),
                &snap,
                &v("1.0.0"),
                &AliasPins::default(),
            );
            assert_eq!(meta.versions, vec![v("1.0.0"), v("0.9.0")]);
        }

        #[test]
        fn current_version_is_deduplicated() {
            let meta = reconcile(
                &VersionMetadata::default(),
                &snapshot(&["v1.0.0"]),
                &v("1.0.0"),
                &AliasPins::default(),
            );
            assert_eq!(meta.versions.len(), 1);
        }
    }

    mod aliases {
        use super::*;

        #[test]
        fn older_dev_is_dropped() {
            let versions = vec![v("1.1.0"), v("1.1.0-rc.1"), v("1.0.0")];
            let (stable, dev) = decide_aliases(&versions, &AliasPins::default());
            assert_eq!(stable, Some(v("1.1.0")));
            assert_eq!(dev, None);
        }

        #[test]
        fn only_prereleases() {
            let versions = vec![v("0.3.0"), v("0.2.0")];
            let (stable, dev) = decide_aliases(&versions, &AliasPins::default());
            assert_eq!(stable, None);
            assert_eq!(dev, Some(v("0.3.0")));
        }

        #[test]
        fn stable_pin_wins() {
            let versions = vec![v("2.0.0"), v("1.0.0")];
            let (stable, _) = decide_aliases(&versions, &pins("1.0.0", "auto"));
            assert_eq!(stable, Some(v("1.0.0")));
        }

        #[test]
        fn absent_pin_falls_back_to_latest() {
            let versions = vec![v("2.0.0"), v("1.0.0")];
            let (stable, _) = decide_aliases(&versions, &pins("3.0.0", "auto"));
            assert_eq!(stable, Some(v("2.0.0")));
        }

        #[test]
        fn dev_pin_skips_ordering_check() {
            let versions = vec![v("2.0.0"), v("1.0.0-beta.1")];
            let (stable, dev) = decide_aliases(&versions, &pins("auto", "1.0.0-beta.1"));
            assert_eq!(stable, Some(v("2.0.0")));
            assert_eq!(dev, Some(v("1.0.0-beta.1")));
        }

        #[test]
        fn pinned_dev_reclassifies_release() {
            let versions = vec![v("2.0.0"), v("1.0.0")];
            let (stable, dev) = decide_aliases(&versions, &pins("auto", "2.0.0"));
            assert_eq!(stable, Some(v("1.0.0")));
            assert_eq!(dev, Some(v("2.0.0")));
        }
    }

    #[test]
    fn reconcile_is_idempotent() {
        let snap = snapshot(&["v0.1.0", "v1.0.0", "v1.1.0-beta.2"]);
        let first = reconcile(&VersionMetadata::default(), &snap, &v("1.0.0"), &AliasPins::default());
        let second = reconcile(&first, &snap, &v("1.0.0"), &AliasPins::default());
        assert_eq!(first, second);
    }

    mod diff {
        use super::*;

        #[test]
        fn identical_is_empty() {
            let meta = VersionMetadata {
                versions: vec![v("1.0.0")],
                stable: Some(v("1.0.0")),
                dev: None,
            };
            assert!(MetadataDiff::between(&meta, &meta).is_empty());
        }

        #[test]
        fn reports_changes() {
            let prior = VersionMetadata {
                versions: vec![v("1.0.0"), v("0.9.0")],
                stable: Some(v("1.0.0")),
                dev: Some(v("0.9.0")),
            };
            let next = VersionMetadata {
                versions: vec![v("1.1.0"), v("1.0.0")],
                stable: Some(v("1.1.0")),
                dev: None,
            };
            let diff = MetadataDiff::between(&prior, &next);
            assert_eq!(diff.added, vec![v("1.1.0")]);
            assert_eq!(diff.removed, vec![v("0.9.0")]);
            assert_eq!(diff.stable, Some((Some(v("1.0.0")), Some(v("1.1.0")))));
            assert_eq!(diff.dev, Some((Some(v("0.9.0")), None)));
        }
    }
}
