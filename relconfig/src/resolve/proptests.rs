//! Property-based tests for resolution.

use std::path::PathBuf;

use proptest::prelude::*;

use super::ReleaseConfigs;
use crate::loader::{MemoryDirectory, MemorySource};
use crate::value::{Container, Value};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z0-9_]{0,8}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
        Just(Value::Unspecified),
    ]
}

fn load(dirs: Vec<MemoryDirectory>) -> ReleaseConfigs {
    let mut source = MemorySource::new();
    let maps: Vec<PathBuf> = dirs.into_iter().map(|d| source.add(d)).collect();
    ReleaseConfigs::load(&source, &maps, false).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    // Trail entry zero is the declared default and every override is recorded.
    #[test]
    fn trail_starts_with_default(
        default in value_strategy(),
        overrides in prop::collection::vec(prop::option::of(value_strategy()), 1..6),
    ) {
        let mut dirs = vec![MemoryDirectory::new("d0", Some(Container::All))
            .declare("RELEASE_F", default.clone())
            .release("trunk", &[])];
        for (i, value) in overrides.iter().enumerate() {
            let mut dir = MemoryDirectory::new(format!("d{}", i + 1), Some(Container::All))
                .release("trunk", &[]);
            if let Some(value) = value {
                dir = dir.value("trunk", "RELEASE_F", value.clone());
            }
            dirs.push(dir);
        }

        let configs = load(dirs);
        let resolved = configs.resolve("trunk").unwrap();
        let flag = resolved.flag("RELEASE_F").unwrap();

        let applied: Vec<&Value> = overrides.iter().flatten().collect();
        prop_assert_eq!(&flag.traces()[0].value, &default);
        prop_assert_eq!(flag.traces().len(), applied.len() + 1);
        let expected = applied.last().copied().unwrap_or(&default);
        prop_assert_eq!(flag.value(), expected);
    }

    // Every link of an alias chain resolves to the same release.
    #[test]
    fn alias_chain_resolves_from_any_link(length in 1usize..12) {
        let mut dir = MemoryDirectory::new("d0", Some(Container::All)).release("trunk", &[]);
        let names: Vec<String> = (0..length).map(|i| format!("alias{i}")).collect();
        for (i, name) in names.iter().enumerate() {
            let target = names.get(i + 1).map_or("trunk", String::as_str);
            dir = dir.alias(name, target);
        }

        let configs = load(vec![dir]);
        for name in &names {
            prop_assert_eq!(configs.canonical_name(name).unwrap(), "trunk");
        }
        prop_assert_eq!(configs.resolve("trunk").unwrap().other_names().len(), length);
    }

    // A linear inheritance chain applies ancestors first, so the most derived value wins.
    #[test]
    fn linear_inheritance_most_derived_wins(depth in 1usize..8) {
        let mut dir = MemoryDirectory::new("d0", Some(Container::All))
            .declare("RELEASE_F", Value::Unspecified);
        for level in 0..depth {
            let name = format!("r{level}");
            let parent = format!("r{}", level + 1);
            let inherits: Vec<&str> = if level + 1 < depth { vec![parent.as_str()] } else { Vec::new() };
            dir = dir
                .release(&name, &inherits)
                .value(&name, "RELEASE_F", Value::String(name.clone()));
        }

        let configs = load(vec![dir]);
        let resolved = configs.resolve("r0").unwrap();
        prop_assert_eq!(resolved.inherits().len(), depth - 1);
        prop_assert_eq!(
            resolved.flag("RELEASE_F").unwrap().value(),
            &Value::String("r0".into())
        );
        prop_assert_eq!(resolved.flag("RELEASE_F").unwrap().traces().len(), depth + 1);
    }
}
