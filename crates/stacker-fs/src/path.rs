//! Normalized path handling and logical path keys
//!
//! Configuration documents are addressed by a *logical key*: the document's
//! path relative to the configuration root, using forward slashes and with the
//! extension removed (`production/vpc`). Inheritance walks a key's ancestors
//! until it reaches [`ROOT_KEY`].

use std::path::{Path, PathBuf};

/// The key every logical path reduces to once all segments are removed.
pub const ROOT_KEY: &str = ".";

/// A path normalized to use forward slashes internally.
///
/// Provides consistent path handling across platforms by normalizing
/// all paths to forward slashes internally and converting to
/// platform-native format only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment_normalized = segment.replace('\\', "/");
        let joined = if self.inner.is_empty() {
            segment_normalized
        } else if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment_normalized)
        } else {
            format!("{}/{}", self.inner, segment_normalized)
        };
        Self { inner: joined }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }

    /// Remove the extension (and its dot) from the final segment.
    pub fn without_extension(&self) -> Self {
        match self.extension() {
            Some(ext) => Self {
                inner: self.inner[..self.inner.len() - ext.len() - 1].to_string(),
            },
            None => self.clone(),
        }
    }

    /// Compute the logical key of `file` relative to `root`.
    ///
    /// Returns `None` when `file` is not located under `root`.
    pub fn logical_key(root: impl AsRef<Path>, file: impl AsRef<Path>) -> Option<String> {
        let relative = file.as_ref().strip_prefix(root.as_ref()).ok()?;
        let key = Self::new(relative).without_extension();
        let key = key.as_str().trim_start_matches('/');
        if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        }
    }
}

/// Return the parent of a logical key, or [`ROOT_KEY`] for a top-level key.
///
/// ```
/// use stacker_fs::parent_key;
///
/// assert_eq!(parent_key("production/vpc"), "production");
/// assert_eq!(parent_key("production"), ".");
/// ```
pub fn parent_key(key: &str) -> &str {
    let trimmed = key.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) if idx > 0 => &trimmed[..idx],
        _ => ROOT_KEY,
    }
}

/// Iterate a logical key and each of its ancestors, nearest first.
///
/// The root sentinel itself is never yielded.
pub fn key_ancestors(key: &str) -> impl Iterator<Item = &str> {
    let first = if key.is_empty() || key == ROOT_KEY {
        None
    } else {
        Some(key)
    };
    std::iter::successors(first, |&current| {
        let parent = parent_key(current);
        (parent != ROOT_KEY).then_some(parent)
    })
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
