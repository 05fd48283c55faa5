//! Property tests for merging and list flattening

use proptest::prelude::*;
use stacker_core::config::{ConfigMap, merge};
use stacker_core::{ConfigDocument, Defaults, RawValue, ResolverRegistry, StackConfig, StackContext};

fn scalar() -> impl Strategy<Value = (RawValue, String)> {
    prop_oneof![
        "[a-zA-Z0-9_./-]{1,12}".prop_map(|s| (RawValue::from(s.as_str()), s)),
        any::<i64>().prop_map(|n| (RawValue::from(n), n.to_string())),
        any::<bool>().prop_map(|b| (RawValue::from(b), b.to_string())),
    ]
}

fn defaults(region: &str, value: Option<&str>) -> ConfigDocument {
    ConfigDocument {
        defaults: Defaults {
            region: region.to_string(),
            parameters: value
                .map(|v| [("P".to_string(), RawValue::from(v))].into_iter().collect())
                .unwrap_or_default(),
        },
        stacks: Vec::new(),
    }
}

proptest! {
    #[test]
    fn list_resolves_to_joined_elements(items in prop::collection::vec(scalar(), 0..8)) {
        let (values, expected): (Vec<RawValue>, Vec<String>) = items.into_iter().unzip();
        let param = ResolverRegistry::new()
            .resolve_value("k", &RawValue::Sequence(values), &StackContext::default())
            .unwrap();
        prop_assert_eq!(param.value, expected.join(","));
    }

    #[test]
    fn nearest_defining_ancestor_wins(
        segments in prop::collection::vec("[a-z]{1,4}", 1..6),
        defines in prop::collection::vec(any::<bool>(), 6),
    ) {
        let keys: Vec<String> = (1..=segments.len()).map(|n| segments[..n].join("/")).collect();
        let mut documents = ConfigMap::new();
        for (depth, key) in keys.iter().enumerate() {
            let value = defines[depth].then(|| format!("depth-{depth}"));
            let region = if defines[depth] { format!("region-{depth}") } else { String::new() };
            documents.insert(key.clone(), defaults(&region, value.as_deref()));
        }

        let leaf = keys.last().unwrap();
        let merged = merge(StackConfig::new("S"), leaf, &documents);

        let nearest = (0..keys.len()).rev().find(|&depth| defines[depth]);
        let parameters = merged.parameters.unwrap();
        match nearest {
            Some(depth) => {
                prop_assert_eq!(parameters.get("P"), Some(&RawValue::from(format!("depth-{depth}"))));
                prop_assert_eq!(merged.region, format!("region-{depth}"));
            }
            None => {
                prop_assert!(parameters.is_empty());
                prop_assert!(merged.region.is_empty());
            }
        }
    }
}
