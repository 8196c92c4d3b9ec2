//! Property-based tests for settings merging.

use std::path::PathBuf;

use proptest::prelude::*;

use super::merger::SettingsMerger;
use super::schema::Settings;
use crate::artifact::ArtifactFormat;

fn format_strategy() -> impl Strategy<Value = ArtifactFormat> {
    prop::sample::select(ArtifactFormat::ALL.to_vec())
}

fn settings_strategy() -> impl Strategy<Value = Settings> {
    (
        prop::option::of(prop::collection::vec("[a-z]{1,8}/release_config_map.yaml", 0..4)),
        prop::option::of("[a-z_]{1,12}"),
        prop::option::of("[a-z]{1,8}"),
        prop::option::of(prop::collection::vec(format_strategy(), 0..4)),
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(maps, release, out_dir, formats, decode, resolve)| Settings {
            maps: maps.map(|m| m.into_iter().map(PathBuf::from).collect()),
            target_release: release,
            out_dir: out_dir.map(PathBuf::from),
            formats,
            parallel_decode: decode,
            parallel_resolve: resolve,
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Merging an empty source changes nothing.
    #[test]
    fn merge_empty_is_identity(settings in settings_strategy()) {
        let mut merged = settings.clone();
        SettingsMerger::merge_into(&mut merged, &Settings::default());
        prop_assert_eq!(merged, settings);
    }

    // Every field set in the higher source wins.
    #[test]
    fn higher_precedence_wins(low in settings_strategy(), high in settings_strategy()) {
        let merged = SettingsMerger::merge(vec![low.clone(), high.clone()]);
        prop_assert_eq!(&merged.maps, if high.maps.is_some() { &high.maps } else { &low.maps });
        prop_assert_eq!(
            &merged.target_release,
            if high.target_release.is_some() { &high.target_release } else { &low.target_release }
        );
        prop_assert_eq!(
            merged.parallel_decode,
            high.parallel_decode.or(low.parallel_decode)
        );
    }

    // Merging is idempotent.
    #[test]
    fn merge_idempotent(low in settings_strategy(), high in settings_strategy()) {
        let mut once = low.clone();
        SettingsMerger::merge_into(&mut once, &high);
        let mut twice = once.clone();
        SettingsMerger::merge_into(&mut twice, &high);
        prop_assert_eq!(once, twice);
    }
}
