use stacker_fs::{NormalizedPath, ROOT_KEY, key_ancestors, parent_key};

#[test]
fn test_normalize_forward_slashes() {
    let path = NormalizedPath::new("foo/bar/baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz");
    assert_eq!(path.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz");
    assert_eq!(joined.as_str(), "foo/bar/baz");
}

#[test]
fn test_join_onto_trailing_slash() {
    let base = NormalizedPath::new("foo/");
    assert_eq!(base.join("bar").as_str(), "foo/bar");
}

#[test]
fn test_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
}

#[test]
fn test_extension() {
    assert_eq!(NormalizedPath::new("vpc.yaml").extension(), Some("yaml"));
    assert_eq!(NormalizedPath::new(".hidden").extension(), None);
    assert_eq!(NormalizedPath::new("README").extension(), None);
}

#[test]
fn test_parent_key_reaches_root() {
    let mut key = "a/b/c/d";
    let mut steps = 0;
    while key != ROOT_KEY {
        key = parent_key(key);
        steps += 1;
    }
    assert_eq!(steps, 4);
}

#[test]
fn test_key_ancestors_single_segment() {
    let chain: Vec<_> = key_ancestors("sandbox").collect();
    assert_eq!(chain, vec!["sandbox"]);
}
