//! The control-plane interface consumed by stacker

use std::sync::Arc;

use crate::types::{
    ChangeSetInfo, ChangeSetRequest, PendingChangeSet, StackDescription, StackEvent, StackResource,
};
use crate::{AwsCloudFormation, Result};

/// Blocking access to a stack service in one region.
pub trait CloudFormation: Send + Sync {
    /// The region this client talks to (empty for the provider default).
    fn region(&self) -> &str;

    /// Describe a stack, or `None` if it does not exist.
    fn describe_stack(&self, name: &str) -> Result<Option<StackDescription>>;

    /// Create a change set and return its identifier.
    fn create_change_set(&self, request: &ChangeSetRequest) -> Result<String>;

    fn describe_change_set(&self, stack: &str, change_set: &str) -> Result<ChangeSetInfo>;

    /// Change sets that have not been executed yet.
    fn list_change_sets(&self, stack: &str) -> Result<Vec<PendingChangeSet>>;

    fn execute_change_set(&self, stack: &str, change_set: &str) -> Result<()>;

    fn delete_stack(&self, name: &str) -> Result<()>;

    fn list_stack_resources(&self, name: &str) -> Result<Vec<StackResource>>;

    /// Stack events, newest first.
    fn stack_events(&self, name: &str) -> Result<Vec<StackEvent>>;
}

/// Builds a client for a region.
pub type CloudFactory = Arc<dyn Fn(&str) -> Result<Box<dyn CloudFormation>> + Send + Sync>;

/// A factory producing AWS-backed clients.
pub fn aws_factory() -> CloudFactory {
    Arc::new(|region: &str| {
        let client = AwsCloudFormation::connect(region)?;
        Ok(Box::new(client) as Box<dyn CloudFormation>)
    })
}

/// Generate a change set name.
///
/// Names must match `[a-zA-Z][-a-zA-Z0-9]*`.
pub fn change_set_name() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("cs-{}", &id[..8])
}
