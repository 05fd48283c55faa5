//! List command implementation

use colored::Colorize;

use crate::context::Context;
use crate::error::Result;
use crate::render;

/// Print every configured stack.
pub fn run(ctx: &Context) -> Result<()> {
    let stacks = ctx.engine().fetch_all()?;
    if stacks.is_empty() {
        println!("{}", "No stacks configured.".dimmed());
        return Ok(());
    }
    print!("{}", render::stack_list(&stacks));
    Ok(())
}
