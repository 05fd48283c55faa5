//! Built-in resolvers
//!
//! ```yaml
//! parameters:
//!   VpcId:
//!     Stack: Foo-VPC.VpcId      # output `VpcId` of stack `Foo-VPC`
//!   Certificate:
//!     File: certs/site.pem      # file contents, one trailing newline stripped
//! ```

use std::path::PathBuf;

use stacker_cloud::CloudFactory;
use stacker_fs::{NormalizedPath, io};

use super::{Param, RawValue, ResolverRegistry, StackInfo};
use crate::{Error, Result};

pub const STACK_RESOLVER: &str = "Stack";
pub const FILE_RESOLVER: &str = "File";

/// Register `Stack` (backed by `factory`) and `File`.
pub fn register(registry: &mut ResolverRegistry, factory: CloudFactory) {
    registry.register(STACK_RESOLVER, stack_resolver(factory));
    registry.register(FILE_RESOLVER, resolve_file);
}

/// Look up `<stack>.<output>` in the region of the stack being resolved.
///
/// Only the first `.` separates the stack name; output names may contain dots.
pub fn stack_resolver(
    factory: CloudFactory,
) -> impl Fn(&str, &RawValue, &dyn StackInfo) -> Result<Param> + Send + Sync + 'static {
    move |key: &str, value: &RawValue, stack: &dyn StackInfo| {
        let input = scalar_input(STACK_RESOLVER, value)?;
        let (stack_name, output) = input
            .split_once('.')
            .ok_or_else(|| Error::BadStackRef {
                input: input.clone(),
            })?;

        let client = factory(stack.region())?;
        let description = client
            .describe_stack(stack_name)
            .map_err(|e| Error::ResolverFailed {
                resolver: STACK_RESOLVER.to_string(),
                message: format!("unable to fetch stack `{stack_name}`: {e}"),
            })?
            .ok_or_else(|| Error::StackNotFound {
                stack: stack_name.to_string(),
                output: output.to_string(),
            })?;

        let value = description
            .output(output)
            .ok_or_else(|| Error::OutputNotFound {
                stack: stack_name.to_string(),
                output: output.to_string(),
            })?;
        tracing::debug!(key, stack = stack_name, output, "Resolved stack output");
        Ok(Param::new(key, value))
    }
}

/// Read a file; relative paths are taken from the working directory.
pub fn resolve_file(key: &str, value: &RawValue, _stack: &dyn StackInfo) -> Result<Param> {
    let path = PathBuf::from(scalar_input(FILE_RESOLVER, value)?);
    let content = io::read_text(&NormalizedPath::new(&path))
        .map_err(|source| Error::FileResolver { path, source })?;
    let content = content.strip_suffix('\n').unwrap_or(&content);
    Ok(Param::new(key, content))
}

fn scalar_input(resolver: &str, value: &RawValue) -> Result<String> {
    value.as_text().ok_or_else(|| Error::ResolverFailed {
        resolver: resolver.to_string(),
        message: "expected a scalar input".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::StackContext;
    use stacker_cloud::types::status;
    use stacker_cloud::{MockCloudFormation, StackDescription};
    use std::fs;
    use tempfile::TempDir;

    fn mock() -> MockCloudFormation {
        MockCloudFormation::new("us-west-2").with_stack(
            StackDescription::new("Foo-VPC", status::CREATE_COMPLETE)
                .with_output("VpcId", "vpc-123")
                .with_output("Subnet.A", "subnet-a"),
        )
    }

    fn stack() -> StackContext {
        StackContext::new("Foo-App", "us-west-2")
    }

    #[test]
    fn stack_output_is_resolved() {
        let resolver = stack_resolver(mock().factory());
        let param = resolver("VpcId", &RawValue::from("Foo-VPC.VpcId"), &stack()).unwrap();
        assert_eq!(param, Param::new("VpcId", "vpc-123"));
    }

    #[test]
    fn stack_ref_splits_on_first_dot() {
        let resolver = stack_resolver(mock().factory());
        let param = resolver("Subnet", &RawValue::from("Foo-VPC.Subnet.A"), &stack()).unwrap();
        assert_eq!(param.value, "subnet-a");
    }

    #[test]
    fn stack_ref_without_dot_is_rejected() {
        let resolver = stack_resolver(mock().factory());
        let err = resolver("VpcId", &RawValue::from("Foo-VPC"), &stack()).unwrap_err();
        assert!(matches!(err, Error::BadStackRef { input } if input == "Foo-VPC"));
    }

    #[test]
    fn missing_stack_and_output_name_both_identifiers() {
        let resolver = stack_resolver(mock().factory());

        let err = resolver("X", &RawValue::from("Bar.VpcId"), &stack()).unwrap_err();
        assert!(matches!(err, Error::StackNotFound { ref stack, ref output } if stack == "Bar" && output == "VpcId"));

        let err = resolver("X", &RawValue::from("Foo-VPC.Missing"), &stack()).unwrap_err();
        assert_eq!(err.to_string(), "unable to find output `Missing` on stack `Foo-VPC`");
    }

    #[test]
    fn stack_lookup_uses_resolving_stacks_region() {
        let mock = mock();
        let regions = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen = regions.clone();
        let inner = mock.factory();
        let factory: CloudFactory = std::sync::Arc::new(move |region: &str| {
            seen.lock().unwrap().push(region.to_string());
            inner(region)
        });

        stack_resolver(factory)("VpcId", &RawValue::from("Foo-VPC.VpcId"), &StackContext::new("App", "eu-west-1"))
            .unwrap();
        assert_eq!(*regions.lock().unwrap(), vec!["eu-west-1".to_string()]);
    }

    #[test]
    fn file_strips_one_trailing_newline() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.txt");
        fs::write(&file, "101010\n\n").unwrap();

        let param = resolve_file("Data", &RawValue::from(file.to_string_lossy().into_owned()), &stack()).unwrap();
        assert_eq!(param.value, "101010\n");
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = resolve_file("Data", &RawValue::from("/nonexistent/stacker/data.txt"), &stack())
            .unwrap_err();
        assert!(matches!(err, Error::FileResolver { .. }));
    }

    #[test]
    fn non_scalar_input_is_rejected() {
        let err = resolve_file("Data", &RawValue::from(vec!["a", "b"]), &stack()).unwrap_err();
        assert!(matches!(err, Error::ResolverFailed { .. }));
    }
}
