//! Engine façade over a stacker base directory

use std::path::Path;
use std::sync::Arc;

use stacker_cloud::{CloudFactory, aws_factory};
use stacker_fs::StackerLayout;

use crate::Result;
use crate::config::ConfigStore;
use crate::fetcher::Fetcher;
use crate::params::{ResolverRegistry, builtin};
use crate::stack::ResolvedStack;
use crate::template::TemplateStore;

/// Entry point for loading stacks from a base directory.
///
/// # Example
///
/// ```no_run
/// use stacker_core::Engine;
///
/// let engine = Engine::new(".");
/// for stack in engine.fetch("Foo-VPC")? {
///     for param in stack.params()? {
///         println!("{} = {}", param.key, param.value);
///     }
/// }
/// # Ok::<(), stacker_core::Error>(())
/// ```
#[derive(Debug)]
pub struct Engine {
    fetcher: Fetcher,
}

impl Engine {
    /// An engine whose `Stack` resolver talks to AWS.
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self::with_cloud(base, aws_factory())
    }

    /// An engine whose `Stack` resolver uses clients from `factory`.
    pub fn with_cloud(base: impl AsRef<Path>, factory: CloudFactory) -> Self {
        let mut registry = ResolverRegistry::new();
        builtin::register(&mut registry, factory);
        Self::with_registry(base, registry)
    }

    /// An engine with exactly the resolvers in `registry`.
    pub fn with_registry(base: impl AsRef<Path>, registry: ResolverRegistry) -> Self {
        let layout = StackerLayout::discover(base);
        let fetcher = Fetcher::new(
            ConfigStore::new(layout.config_root().clone()),
            TemplateStore::new(layout.templates_root().clone()),
            Arc::new(registry),
        );
        Self { fetcher }
    }

    /// Every configured stack, sorted by name.
    pub fn fetch_all(&self) -> Result<Vec<ResolvedStack>> {
        self.fetcher.fetch_all()
    }

    /// Stacks named `name`.
    pub fn fetch(&self, name: &str) -> Result<Vec<ResolvedStack>> {
        self.fetcher.fetch(name)
    }
}
