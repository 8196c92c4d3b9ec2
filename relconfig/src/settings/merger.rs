//! Settings merging and precedence handling.

use crate::settings::schema::Settings;

/// Merges settings sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use relconfig::settings::{Settings, SettingsMerger};
///
/// let low = Settings { target_release: Some("low".to_string()), ..Default::default() };
/// let high = Settings { target_release: Some("high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// SettingsMerger::merge_into(&mut result, &high);
/// assert_eq!(result.target_release, Some("high".to_string()));
/// ```
pub struct SettingsMerger;

impl SettingsMerger {
    /// Merges sources given from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<Settings>) -> Settings {
        let mut result = Settings::default();
        for source in sources {
            Self::merge_into(&mut result, &source);
        }
        result
    }

    /// Merge source settings into target (source overwrites target).
    ///
    /// Every field is replaced wholesale when set in `source`; map lists are
    /// not concatenated, since their order defines precedence.
    pub fn merge_into(target: &mut Settings, source: &Settings) {
        if source.maps.is_some() {
            target.maps.clone_from(&source.maps);
        }

        if source.target_release.is_some() {
            target.target_release.clone_from(&source.target_release);
        }

        if source.out_dir.is_some() {
            target.out_dir.clone_from(&source.out_dir);
        }

        if source.formats.is_some() {
            target.formats.clone_from(&source.formats);
        }

        if source.parallel_decode.is_some() {
            target.parallel_decode = source.parallel_decode;
        }

        if source.parallel_resolve.is_some() {
            target.parallel_resolve = source.parallel_resolve;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactFormat;
    use std::path::PathBuf;

    #[test]
    fn test_merge_none_keeps_target() {
        let mut target = Settings::defaults();
        SettingsMerger::merge_into(&mut target, &Settings::default());
        assert_eq!(target, Settings::defaults());
    }

    #[test]
    fn test_maps_replaced_not_appended() {
        let mut target = Settings {
            maps: Some(vec![PathBuf::from("a.yaml"), PathBuf::from("b.yaml")]),
            ..Settings::default()
        };
        let source = Settings {
            maps: Some(vec![PathBuf::from("c.yaml")]),
            ..Settings::default()
        };
        SettingsMerger::merge_into(&mut target, &source);
        assert_eq!(target.maps(), [PathBuf::from("c.yaml")]);
    }

    #[test]
    fn test_merge_precedence_order() {
        let merged = SettingsMerger::merge(vec![
            Settings::defaults(),
            Settings {
                formats: Some(vec![ArtifactFormat::Json]),
                parallel_decode: Some(false),
                ..Settings::default()
            },
            Settings {
                formats: Some(vec![ArtifactFormat::Make]),
                ..Settings::default()
            },
        ]);
        assert_eq!(merged.formats(), vec![ArtifactFormat::Make]);
        assert!(!merged.parallel_decode());
        assert!(merged.parallel_resolve());
    }
}
