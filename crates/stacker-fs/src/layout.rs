//! Stacker directory layout discovery
//!
//! A stacker base directory holds one configuration root and a `templates/`
//! directory:
//!
//! ```text
//! <base>/
//!   environments/        (or regions/, or stacks/)
//!     production.yml
//!     production/vpc.yml
//!   templates/
//!     VPC.yml
//! ```

use std::path::Path;

use crate::{NormalizedPath, StackerDir};

/// Resolved locations of a stacker base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackerLayout {
    base: NormalizedPath,
    config_root: NormalizedPath,
    templates_root: NormalizedPath,
}

impl StackerLayout {
    /// Discover the layout under `base`.
    ///
    /// The configuration root is the first existing directory among
    /// `environments`, `regions` and `stacks`. When none exists the layout
    /// still points at `environments`, and loading reports it as missing.
    pub fn discover(base: impl AsRef<Path>) -> Self {
        let base = NormalizedPath::new(base);
        let config_root = StackerDir::CONFIG_ROOTS
            .iter()
            .map(|dir| base.join(dir.as_str()))
            .find(NormalizedPath::is_dir)
            .unwrap_or_else(|| base.join(StackerDir::Environments.as_str()));
        let templates_root = base.join(StackerDir::Templates.as_str());

        tracing::debug!(
            base = %base,
            config_root = %config_root,
            templates_root = %templates_root,
            "Discovered stacker layout"
        );

        Self {
            base,
            config_root,
            templates_root,
        }
    }

    /// The base directory the layout was discovered from.
    pub fn base(&self) -> &NormalizedPath {
        &self.base
    }

    /// Root of the configuration document tree.
    pub fn config_root(&self) -> &NormalizedPath {
        &self.config_root
    }

    /// Directory holding template documents.
    pub fn templates_root(&self) -> &NormalizedPath {
        &self.templates_root
    }
}
