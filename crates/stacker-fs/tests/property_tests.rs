use proptest::prelude::*;
use stacker_fs::{ROOT_KEY, key_ancestors, parent_key};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,8}"
}

proptest! {
    #[test]
    fn ancestors_are_prefixes_nearest_first(segments in prop::collection::vec(segment(), 1..6)) {
        let key = segments.join("/");
        let chain: Vec<&str> = key_ancestors(&key).collect();

        prop_assert_eq!(chain.len(), segments.len());
        prop_assert_eq!(chain[0], key.as_str());
        for window in chain.windows(2) {
            prop_assert!(window[0].starts_with(window[1]));
            prop_assert!(window[0].len() > window[1].len());
        }
        prop_assert_eq!(parent_key(chain[chain.len() - 1]), ROOT_KEY);
    }
}
