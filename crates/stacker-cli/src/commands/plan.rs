//! Plan command implementation

use colored::Colorize;

use super::workflow;
use crate::context::Context;
use crate::error::Result;
use crate::render;

/// Create a change set for a stack and print it.
pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    let change_set = workflow::plan(ctx, client.as_ref(), &stack)?;
    println!("{}", render::change_set(&change_set));

    if change_set.can_execute() {
        workflow::print_hints(&change_set, true);
    } else {
        println!("{}", "Changeset cannot be applied.".yellow());
    }
    Ok(())
}
