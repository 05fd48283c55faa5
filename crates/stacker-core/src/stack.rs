//! Stacks ready for submission

use std::sync::Arc;

use stacker_cloud::{ChangeSetKind, ChangeSetRequest, ParameterValue};

use crate::Result;
use crate::params::{Param, RawParams, ResolverRegistry, StackInfo};
use crate::template::Template;

/// A configured stack bound to its template.
///
/// Parameters are resolved on demand by [`ResolvedStack::params`], which may
/// reach out to the control plane.
#[derive(Debug, Clone)]
pub struct ResolvedStack {
    pub(crate) name: String,
    pub(crate) region: String,
    pub(crate) capabilities: Vec<String>,
    pub(crate) source: String,
    pub(crate) template: Arc<Template>,
    pub(crate) raw_parameters: RawParams,
    pub(crate) registry: Arc<ResolverRegistry>,
}

impl ResolvedStack {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Empty when neither the stack nor any ancestor sets a region.
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn template_name(&self) -> &str {
        &self.template.name
    }

    pub fn template_body(&self) -> &str {
        &self.template.body
    }

    /// Logical key of the document that declared the stack.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Configured parameters the template declares, before resolution.
    pub fn raw_parameters(&self) -> &RawParams {
        &self.raw_parameters
    }

    /// Resolve every parameter.
    pub fn params(&self) -> Result<Vec<Param>> {
        self.registry.resolve(&self.raw_parameters, self)
    }

    /// Resolve parameters and build a change set request.
    pub fn change_set_request(
        &self,
        change_set_name: impl Into<String>,
        kind: ChangeSetKind,
    ) -> Result<ChangeSetRequest> {
        let parameters = self.params()?.iter().map(ParameterValue::from).collect();
        Ok(ChangeSetRequest {
            stack_name: self.name.clone(),
            change_set_name: change_set_name.into(),
            kind,
            template_body: self.template.body.clone(),
            parameters,
            capabilities: self.capabilities.clone(),
        })
    }
}

impl StackInfo for ResolvedStack {
    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> &str {
        &self.region
    }
}
