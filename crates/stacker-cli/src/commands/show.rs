//! Show command implementation

use colored::Colorize;

use crate::context::{Context, existing_stack};
use crate::error::Result;
use crate::render;

/// Print a stack with its resources and recent events.
pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    let description = existing_stack(client.as_ref(), stack.name())?;
    println!("{}", render::stack(&description));

    let resources = client.list_stack_resources(stack.name())?;
    println!("{}:", "Resources".bold());
    print!("{}", render::resources(&resources));

    let events = client.stack_events(stack.name())?;
    println!("\n{}:", "Events".bold());
    print!("{}", render::events(&events));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;

    #[test]
    fn test_show_live_stack() {
        let harness = Harness::vpc().with_live_stack();
        run(&harness.context(), "Foo-VPC").unwrap();
        assert!(
            harness
                .cloud
                .calls()
                .contains(&"DescribeStackEvents:Foo-VPC".to_string())
        );
    }

    #[test]
    fn test_show_missing_stack() {
        let harness = Harness::vpc();
        let err = run(&harness.context(), "Foo-VPC").unwrap_err();
        assert_eq!(err.to_string(), "stack Foo-VPC does not exist");
    }
}
