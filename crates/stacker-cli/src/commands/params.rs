//! Params command implementation

use crate::context::Context;
use crate::error::Result;
use crate::render;

/// Print the resolved parameters of a stack.
pub fn run(ctx: &Context, name: &str) -> Result<()> {
    let stack = ctx.local_stack(name)?;
    let params = stack.params()?;
    print!("{}", render::params(&params));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::error::CliError;

    #[test]
    fn test_params_for_configured_stack() {
        let harness = Harness::vpc();
        run(&harness.context(), "Foo-VPC").unwrap();
    }

    #[test]
    fn test_params_unknown_stack() {
        let harness = Harness::vpc();
        let err = run(&harness.context(), "Nope").unwrap_err();
        assert!(matches!(err, CliError::User { .. }));
        assert_eq!(err.to_string(), "no stack found for `Nope`");
    }
}
