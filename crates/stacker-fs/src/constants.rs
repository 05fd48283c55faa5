//! Constants for the stacker directory layout.

use std::path::Path;

/// Environment variable naming the stacker base directory.
pub const STACKER_PATH_ENV: &str = "STACKER_PATH";

/// Extensions recognised as configuration documents, without the dot.
pub const CONFIG_EXTENSIONS: &[&str] = &["yml", "yaml"];

/// Extensions probed for templates, in probe order.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml", "json"];

/// Well-known directories under the stacker base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackerDir {
    /// `environments/` (preferred configuration root)
    Environments,
    /// `regions/` (first fallback configuration root)
    Regions,
    /// `stacks/` (second fallback configuration root)
    Stacks,
    /// `templates/` (template documents)
    Templates,
}

impl StackerDir {
    /// Configuration root candidates, in probe order.
    pub const CONFIG_ROOTS: [StackerDir; 3] = [Self::Environments, Self::Regions, Self::Stacks];

    /// Get the directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Environments => "environments",
            Self::Regions => "regions",
            Self::Stacks => "stacks",
            Self::Templates => "templates",
        }
    }
}

impl AsRef<Path> for StackerDir {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for StackerDir {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for StackerDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
