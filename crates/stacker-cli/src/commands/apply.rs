//! Apply command implementation

use colored::Colorize;

use super::workflow;
use crate::context::{Context, existing_stack};
use crate::error::{CliError, Result};

/// Review, confirm and execute a pending change set.
pub fn run(ctx: &Context, name: &str, change_set: Option<&str>, allow_destructive: bool) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    existing_stack(client.as_ref(), stack.name())?;

    let change_set = workflow::select_change_set(ctx.prompt(), client.as_ref(), stack.name(), change_set)?;
    workflow::review(client.as_ref(), &change_set)?;

    if !workflow::confirm_changes(ctx.prompt(), &change_set, allow_destructive)? {
        return Err(CliError::user("aborted"));
    }
    workflow::apply(ctx, client.as_ref(), &change_set)?;

    println!(
        "{}: `{}`",
        "View stack status with".bold(),
        format!("stacker show {}", stack.name()).cyan()
    );
    Ok(())
}
