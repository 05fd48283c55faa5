//! Delete command implementation

use colored::Colorize;

use super::workflow;
use crate::context::{Context, existing_stack};
use crate::error::{CliError, Result};

/// Delete a stack after the user types its name.
pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    existing_stack(client.as_ref(), stack.name())?;

    println!(
        "  {}\n",
        "This is a destructive action and will delete the stack and all of its resources!"
            .underline()
    );
    let answer = ctx.prompt().input("  Type the stack name to confirm deletion")?;
    println!();
    if answer.trim() != stack.name() {
        return Err(CliError::user("deletion must be confirmed with stack name"));
    }

    workflow::delete(ctx, client.as_ref(), stack.name())
}
