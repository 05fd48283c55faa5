//! Polling helpers
//!
//! Both helpers block the calling thread, sleeping `interval` between polls.
//! They never time out; interrupting the process is always safe because no
//! local state is held.

use std::thread;
use std::time::Duration;

use crate::types::{ChangeSetInfo, StackDescription};
use crate::{CloudFormation, Result};

/// Block until a change set has finished computing.
///
/// A change set that ends `FAILED` is returned, not raised; callers decide
/// what a failed change set means (usually "no changes").
pub fn wait_for_change_set(
    client: &dyn CloudFormation,
    stack: &str,
    change_set: &str,
    interval: Duration,
) -> Result<ChangeSetInfo> {
    loop {
        let info = client.describe_change_set(stack, change_set)?;
        if !info.is_pending() {
            tracing::debug!(stack, change_set, status = %info.status, "Change set settled");
            return Ok(info);
        }
        tracing::trace!(stack, change_set, status = %info.status, "Change set pending");
        thread::sleep(interval);
    }
}

/// Block until a stack settles, calling `on_poll` with every observed state.
///
/// Returns `None` once the stack no longer exists (a completed delete).
pub fn wait_for_stack<F>(
    client: &dyn CloudFormation,
    stack: &str,
    interval: Duration,
    mut on_poll: F,
) -> Result<Option<StackDescription>>
where
    F: FnMut(&StackDescription),
{
    loop {
        let Some(description) = client.describe_stack(stack)? else {
            tracing::debug!(stack, "Stack no longer exists");
            return Ok(None);
        };
        on_poll(&description);
        if description.is_settled() {
            tracing::debug!(stack, status = %description.status, "Stack settled");
            return Ok(Some(description));
        }
        thread::sleep(interval);
    }
}
