//! Binds merged stack configuration to templates

use std::sync::Arc;

use crate::config::{StackConfig, StackConfigSource};
use crate::params::{RawParams, ResolverRegistry};
use crate::stack::ResolvedStack;
use crate::template::TemplateSource;
use crate::{Error, Result};

/// Produces [`ResolvedStack`]s from configuration and templates.
pub struct Fetcher {
    configs: Box<dyn StackConfigSource>,
    templates: Box<dyn TemplateSource>,
    registry: Arc<ResolverRegistry>,
}

impl Fetcher {
    pub fn new(
        configs: impl StackConfigSource + 'static,
        templates: impl TemplateSource + 'static,
        registry: Arc<ResolverRegistry>,
    ) -> Self {
        Self {
            configs: Box::new(configs),
            templates: Box::new(templates),
            registry,
        }
    }

    /// Every configured stack.
    pub fn fetch_all(&self) -> Result<Vec<ResolvedStack>> {
        self.bind(self.configs.fetch_all()?)
    }

    /// Stacks named `name`; empty when none is configured.
    pub fn fetch(&self, name: &str) -> Result<Vec<ResolvedStack>> {
        self.bind(self.configs.fetch(name)?)
    }

    fn bind(&self, configs: Vec<StackConfig>) -> Result<Vec<ResolvedStack>> {
        configs.into_iter().map(|config| self.bind_one(config)).collect()
    }

    fn bind_one(&self, config: StackConfig) -> Result<ResolvedStack> {
        let template_name = if config.template_name.is_empty() {
            config.name.as_str()
        } else {
            config.template_name.as_str()
        };
        let template = self
            .templates
            .fetch(template_name)
            .map_err(|e| Error::FetchTemplate {
                template: template_name.to_string(),
                source: Box::new(e),
            })?;

        let raw_parameters: RawParams = config
            .parameters
            .unwrap_or_default()
            .into_iter()
            .filter(|(key, _)| {
                let declared = template.declares(key);
                if !declared {
                    tracing::debug!(stack = %config.name, parameter = %key, "Dropping undeclared parameter");
                }
                declared
            })
            .collect();

        let capabilities = if config.capabilities.is_empty() {
            Vec::new()
        } else {
            vec![config.capabilities]
        };

        Ok(ResolvedStack {
            name: config.name,
            region: config.region,
            capabilities,
            source: config.source,
            template,
            raw_parameters,
            registry: Arc::clone(&self.registry),
        })
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
