//! Property-based tests for the version model and reconciliation.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use docversions::core::metadata::VersionMetadata;
use docversions::core::version::{AliasPins, Version, VersionPin};
use docversions::engine::reconcile::reconcile;
use docversions::engine::scan::DocSnapshot;
use docversions::emit::version_keys;

/// Strategy for prerelease tags.
fn prerelease() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        3 => Just(None),
        1 => (prop::sample::select(vec!["alpha", "beta", "rc"]), 0u8..5)
            .prop_map(|(tag, n)| Some(format!("{}.{}", tag, n))),
    ]
}

/// Strategy for valid versions with small components so groups collide.
fn version() -> impl Strategy<Value = Version> {
    (0u64..4, 0u64..4, 0u64..4, prerelease()).prop_map(|(major, minor, patch, pre)| {
        let raw = match pre {
            Some(pre) => format!("{}.{}.{}-{}", major, minor, patch, pre),
            None => format!("{}.{}.{}", major, minor, patch),
        };
        Version::normalize(&raw).unwrap()
    })
}

fn versions() -> impl Strategy<Value = Vec<Version>> {
    prop::collection::vec(version(), 0..12)
}

fn pin() -> impl Strategy<Value = VersionPin> {
    prop_oneof![
        2 => Just(VersionPin::Auto),
        1 => version().prop_map(VersionPin::Exact),
    ]
}

fn pins() -> impl Strategy<Value = AliasPins> {
    (pin(), pin()).prop_map(|(stable, dev)| AliasPins::new(stable, dev))
}

fn snapshot(dirs: &[Version]) -> DocSnapshot {
    DocSnapshot {
        versions: dirs.iter().cloned().collect::<BTreeSet<_>>(),
        ..Default::default()
    }
}

proptest! {
    /// Normalizing an already normalized version changes nothing.
    #[test]
    fn normalize_is_idempotent(raw in "\\PC{0,24}") {
        if let Ok(first) = Version::normalize(&raw) {
            let second = Version::normalize(first.as_str()).unwrap();
            prop_assert_eq!(first.as_str(), second.as_str());
        }
    }

    /// Normalized versions always carry the `v` prefix.
    #[test]
    fn normalized_has_prefix(v in version()) {
        prop_assert!(v.as_str().starts_with('v'));
    }

    /// Reconciled versions are strictly descending.
    #[test]
    fn reconcile_sorted_unique(
        prior in versions(),
        dirs in versions(),
        current in version(),
        pins in pins(),
    ) {
        let prior = VersionMetadata { versions: prior, stable: None, dev: None };
        let meta = reconcile(&prior, &snapshot(&dirs), &current, &pins);

        prop_assert!(meta.versions.windows(2).all(|w| w[0] > w[1]));
        prop_assert!(meta.versions.contains(&current));
    }

    /// Aliases only ever name known versions.
    #[test]
    fn reconcile_aliases_are_members(dirs in versions(), current in version(), pins in pins()) {
        let meta = reconcile(&VersionMetadata::default(), &snapshot(&dirs), &current, &pins);

        if let Some(stable) = &meta.stable {
            prop_assert!(meta.versions.contains(stable));
        }
        if let Some(dev) = &meta.dev {
            prop_assert!(meta.versions.contains(dev));
        }
        prop_assert!(meta.stable.is_some() || meta.dev.is_some());
    }

    /// A prior version without a directory never survives.
    #[test]
    fn reconcile_drops_vanished(prior in versions(), dirs in versions(), current in version()) {
        let prior = VersionMetadata { versions: prior, stable: None, dev: None };
        let meta = reconcile(&prior, &snapshot(&dirs), &current, &AliasPins::default());

        for v in &meta.versions {
            prop_assert!(dirs.contains(v) || *v == current);
        }
    }

    /// A second pass over its own output is a fixed point.
    #[test]
    fn reconcile_is_idempotent(dirs in versions(), current in version(), pins in pins()) {
        let snap = snapshot(&dirs);
        let first = reconcile(&VersionMetadata::default(), &snap, &current, &pins);
        let second = reconcile(&first, &snap, &current, &pins);
        prop_assert_eq!(first, second);
    }

    /// Switcher entries never repeat.
    #[test]
    fn version_keys_unique(dirs in versions(), current in version(), show_patch in any::<bool>()) {
        let meta = reconcile(&VersionMetadata::default(), &snapshot(&dirs), &current, &AliasPins::default());
        let keys = version_keys(&meta, show_patch);
        let unique: BTreeSet<_> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
    }
}
