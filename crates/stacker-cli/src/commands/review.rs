//! Review command implementation

use super::workflow;
use crate::context::{Context, existing_stack};
use crate::error::Result;

/// Print a pending change set against the live stack.
pub fn run(ctx: &Context, name: &str, change_set: Option<&str>) -> Result<()> {
    let (stack, client) = ctx.connect(name)?;
    existing_stack(client.as_ref(), stack.name())?;

    let change_set = workflow::select_change_set(ctx.prompt(), client.as_ref(), stack.name(), change_set)?;
    workflow::review(client.as_ref(), &change_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{Harness, change_set};

    #[test]
    fn test_review_missing_stack() {
        let harness = Harness::vpc();
        let err = run(&harness.context(), "Foo-VPC", None).unwrap_err();
        assert_eq!(err.to_string(), "stack Foo-VPC does not exist");
    }

    #[test]
    fn test_review_without_change_sets() {
        let harness = Harness::vpc().with_live_stack();
        let err = run(&harness.context(), "Foo-VPC", None).unwrap_err();
        assert_eq!(err.to_string(), "no changesets found for Foo-VPC");
    }

    #[test]
    fn test_review_prompts_between_change_sets() {
        let harness = Harness::vpc().with_live_stack().answering(["1"]);
        harness.cloud.insert_change_set(change_set("cs-first", vec![]));
        harness.cloud.insert_change_set(change_set("cs-second", vec![]));

        run(&harness.context(), "Foo-VPC", None).unwrap();

        assert_eq!(harness.asked(), vec!["Changeset".to_string()]);
        assert!(
            harness
                .cloud
                .calls()
                .contains(&"DescribeChangeSet:Foo-VPC".to_string())
        );
    }

    #[test]
    fn test_review_named_change_set() {
        let harness = Harness::vpc().with_live_stack();
        harness.cloud.insert_change_set(change_set("cs-first", vec![]));

        run(&harness.context(), "Foo-VPC", Some("cs-first")).unwrap();
        assert!(harness.asked().is_empty());
    }
}
