//! The review-and-apply workflow shared by `plan`, `review`, `apply`,
//! `update` and `delete`

use chrono::Utc;
use colored::Colorize;
use stacker_cloud::types::status;
use stacker_cloud::{
    ChangeSetInfo, ChangeSetKind, CloudFormation, StackDescription, change_set_name,
    wait_for_change_set, wait_for_stack,
};
use stacker_core::ResolvedStack;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::prompt::Prompt;
use crate::render;

const DESTRUCTIVE_WARNING: &str =
    "This is a destructive action and will replace or delete stack resources!";
const MODIFY_WARNING: &str = "This action will modify or remove stack resources.";

/// Create a change set for `stack` and wait for it to be computed.
pub fn plan(ctx: &Context, client: &dyn CloudFormation, stack: &ResolvedStack) -> Result<ChangeSetInfo> {
    let kind = match client.describe_stack(stack.name())? {
        None => {
            println!("{} {}", "Creating changeset for new stack".bold(), stack.name().cyan());
            ChangeSetKind::Create
        }
        Some(current) if !current.can_update() => {
            return Err(CliError::user(format!(
                "cannot update {} at this time. stack status={}",
                stack.name(),
                current.status
            )));
        }
        Some(_) => {
            println!("{} {}", "Creating changeset to update stack".bold(), stack.name().cyan());
            ChangeSetKind::Update
        }
    };

    let request = stack.change_set_request(change_set_name(), kind)?;
    client.create_change_set(&request)?;
    println!("{}: {}", "Changeset created".bold(), request.change_set_name.cyan());
    println!(
        "{}... use ^C to exit safely",
        "Waiting for changeset to complete creation".bold()
    );

    let info = wait_for_change_set(client, stack.name(), &request.change_set_name, ctx.poll_interval())?;
    println!("{}.\n", "Changeset creation complete".bold());
    Ok(info)
}

/// Print a change set and its parameters next to the live stack's.
pub fn review(client: &dyn CloudFormation, change_set: &ChangeSetInfo) -> Result<()> {
    println!("{}", render::change_set(change_set));
    let live = client
        .describe_stack(&change_set.stack_name)?
        .map(|s| s.parameters)
        .unwrap_or_default();
    println!("{}", render::params_diff(&change_set.parameters, &live));
    Ok(())
}

/// The change set to act on: `name` if given, else the only pending one, else
/// the user's pick.
pub fn select_change_set(
    prompt: &dyn Prompt,
    client: &dyn CloudFormation,
    stack: &str,
    name: Option<&str>,
) -> Result<ChangeSetInfo> {
    if let Some(name) = name {
        return Ok(client.describe_change_set(stack, name)?);
    }

    let pending = client.list_change_sets(stack)?;
    let chosen = match pending.as_slice() {
        [] => return Err(CliError::user(format!("no changesets found for {stack}"))),
        [only] => only,
        _ => {
            println!("\n{}\n", "Select a changeset:".bold());
            let index = prompt.select("Changeset", &render::pending_labels(&pending))?;
            &pending[index]
        }
    };
    Ok(client.describe_change_set(stack, &chosen.name)?)
}

/// Ask before changes that touch existing resources.
///
/// Changes that only add resources proceed without asking.
pub fn confirm_changes(
    prompt: &dyn Prompt,
    change_set: &ChangeSetInfo,
    allow_destructive: bool,
) -> Result<bool> {
    if !change_set.has_changes() {
        return Ok(true);
    }

    let warning = if change_set.is_destructive() && !allow_destructive {
        DESTRUCTIVE_WARNING
    } else {
        MODIFY_WARNING
    };
    println!("  {}\n", warning.underline());
    let answer = prompt.input("  Proceed with changes (y/n)?")?;
    println!();
    Ok(answer.trim() == "y")
}

/// Execute a change set and stream stack events until the stack settles.
pub fn apply(ctx: &Context, client: &dyn CloudFormation, change_set: &ChangeSetInfo) -> Result<()> {
    if !change_set.can_execute() {
        return Err(CliError::user(format!(
            "change set {} cannot be applied. status={}",
            change_set.name, change_set.status
        )));
    }

    println!(
        "{} {} {} {}",
        "Applying changeset".bold(),
        change_set.name.cyan(),
        "to".bold(),
        change_set.stack_name.cyan()
    );
    let since = Utc::now();
    client.execute_change_set(&change_set.stack_name, &change_set.name)?;
    println!("{}... use ^C to exit safely\n", "Waiting for changeset to apply".bold());

    match watch(ctx, client, &change_set.stack_name, since)? {
        Some(settled) if succeeded(&settled) => Ok(()),
        Some(settled) => Err(CliError::user(format!(
            "stack {} finished with status {}",
            settled.name, settled.status
        ))),
        None => Err(CliError::user(format!(
            "stack {} disappeared while applying",
            change_set.stack_name
        ))),
    }
}

/// Delete a stack and stream events until it is gone.
pub fn delete(ctx: &Context, client: &dyn CloudFormation, stack: &str) -> Result<()> {
    println!("{} {}", "Deleting stack".bold(), stack.cyan());
    let since = Utc::now();
    client.delete_stack(stack)?;
    println!(
        "{}... use ^C to exit safely\n",
        "Waiting for stack to complete deletion".bold()
    );

    match watch(ctx, client, stack, since)? {
        None => Ok(()),
        Some(settled) if settled.status == status::DELETE_COMPLETE => Ok(()),
        Some(settled) => Err(CliError::user(format!(
            "stack {} finished with status {}",
            settled.name, settled.status
        ))),
    }
}

/// Poll the stack, printing events newer than `since` as they arrive.
fn watch(
    ctx: &Context,
    client: &dyn CloudFormation,
    stack: &str,
    since: chrono::DateTime<Utc>,
) -> Result<Option<StackDescription>> {
    let mut cursor = since;
    let settled = wait_for_stack(client, stack, ctx.poll_interval(), |_| {
        match client.stack_events(stack) {
            Ok(events) => {
                for event in events.iter().rev().filter(|e| e.timestamp >= cursor) {
                    println!("{}", render::event(event));
                }
                if let Some(newest) = events.first() {
                    // Strictly after the newest seen, so nothing prints twice.
                    cursor = cursor.max(newest.timestamp + chrono::Duration::nanoseconds(1));
                }
            }
            Err(e) => {
                tracing::warn!(stack, error = %e, "Failed to fetch stack events");
                println!("{}", "Error fetching stack events".red());
            }
        }
    })?;
    Ok(settled)
}

fn succeeded(stack: &StackDescription) -> bool {
    stack.status == status::CREATE_COMPLETE || stack.status == status::UPDATE_COMPLETE
}

/// Print how to continue from a computed change set.
pub fn print_hints(change_set: &ChangeSetInfo, review: bool) {
    if review {
        println!(
            "  {}: `{}`",
            "Review these changes with".bold(),
            format!("stacker review {} {}", change_set.stack_name, change_set.name).cyan()
        );
    }
    println!(
        "  {}: `{}`\n",
        "Apply these changes with".bold(),
        format!("stacker apply {} {}", change_set.stack_name, change_set.name).cyan()
    );
}
