//! CloudFormation control plane for stacker
//!
//! Exposes the operations stacker needs from the remote stack service behind
//! the blocking [`CloudFormation`] trait:
//!
//! - **Stacks**: describe, delete, list resources and events
//! - **Change sets**: create, describe, list, execute
//! - **Waiting**: polling helpers that block until a change set or stack settles
//!
//! [`AwsCloudFormation`] talks to AWS; [`MockCloudFormation`] keeps everything
//! in memory and is what the test suites run against.

pub mod aws;
pub mod client;
pub mod error;
pub mod mock;
pub mod types;
pub mod wait;

pub use aws::AwsCloudFormation;
pub use client::{CloudFactory, CloudFormation, aws_factory, change_set_name};
pub use error::{Error, Result};
pub use mock::MockCloudFormation;
pub use types::{
    ChangeAction, ChangeSetInfo, ChangeSetKind, ChangeSetRequest, ParameterValue,
    PendingChangeSet, ResourceChange, StackDescription, StackEvent, StackOutput, StackParameter,
    StackResource,
};
pub use wait::{wait_for_change_set, wait_for_stack};
