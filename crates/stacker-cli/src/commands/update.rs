//! Update command implementation

use colored::Colorize;

use super::workflow;
use crate::context::Context;
use crate::error::{CliError, Result};

/// Plan a stack, then review, confirm and apply the result.
pub fn run(ctx: &Context, name: &str, allow_destructive: bool) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    let change_set = workflow::plan(ctx, client.as_ref(), &stack)?;

    if !change_set.can_execute() {
        println!("{}", crate::render::change_set(&change_set));
        println!("{}", "Nothing to apply.".yellow());
        return Ok(());
    }

    workflow::review(client.as_ref(), &change_set)?;
    if !workflow::confirm_changes(ctx.prompt(), &change_set, allow_destructive)? {
        workflow::print_hints(&change_set, false);
        return Err(CliError::user("aborted"));
    }
    workflow::apply(ctx, client.as_ref(), &change_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use pretty_assertions::assert_eq;
    use stacker_cloud::types::status;
    use stacker_cloud::{ChangeAction, ResourceChange};

    #[test]
    fn test_update_creates_new_stack() {
        let harness = Harness::vpc();
        harness
            .cloud
            .set_planned_changes("Foo-VPC", vec![ResourceChange::new(ChangeAction::Add, "Vpc", "AWS::EC2::VPC")]);

        run(&harness.context(), "Foo-VPC", false).unwrap();

        let stack = harness.cloud.stack("Foo-VPC").unwrap();
        assert_eq!(stack.status, status::CREATE_COMPLETE);
        assert!(stack.parameters.iter().any(|p| p.key == "Name" && p.value == "ProductionVPC"));
    }

    #[test]
    fn test_update_without_changes() {
        let harness = Harness::vpc().with_live_stack();

        run(&harness.context(), "Foo-VPC", false).unwrap();

        assert!(
            !harness
                .cloud
                .calls()
                .contains(&"ExecuteChangeSet:Foo-VPC".to_string())
        );
    }

    #[test]
    fn test_update_destructive_declined() {
        let harness = Harness::vpc().with_live_stack().answering([""]);
        harness.cloud.set_planned_changes(
            "Foo-VPC",
            vec![ResourceChange::new(ChangeAction::Modify, "Vpc", "AWS::EC2::VPC").replacing()],
        );

        let err = run(&harness.context(), "Foo-VPC", false).unwrap_err();
        assert_eq!(err.to_string(), "aborted");
        assert_eq!(
            harness.cloud.stack("Foo-VPC").map(|s| s.status),
            Some(status::CREATE_COMPLETE.to_string())
        );
    }
}
