//! Paths into `test-fixtures/` at the workspace root.

use std::path::PathBuf;

/// The `test-fixtures` directory.
pub fn fixtures_dir() -> PathBuf {
    // crates/stacker-test-utils -> ../../test-fixtures
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures")
}

/// The golden stacker base directory (`environments/` + `templates/`).
pub fn stacker_base() -> PathBuf {
    fixtures_dir().join("stacker")
}

/// A data file for the `File` resolver, containing `101010\n`.
pub fn data_file() -> PathBuf {
    fixtures_dir().join("data.txt")
}
