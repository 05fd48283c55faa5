//! Parameters and their resolution
//!
//! A stack's raw parameters are turned into flat [`Param`]s by a
//! [`ResolverRegistry`]. Scalars stringify, sequences comma-join, and a
//! single-entry mapping `{ Name: input }` calls the resolver registered as
//! `Name`.

pub mod builtin;
mod raw;
mod registry;

pub use raw::{RawParams, RawValue, Scalar};
pub use registry::{Resolver, ResolverRegistry};

use stacker_cloud::ParameterValue;

/// A resolved, ready to submit parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Param {
    pub key: String,
    pub value: String,
    /// Keep the value the stack currently has; `value` is ignored.
    pub use_previous: bool,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            use_previous: false,
        }
    }

    pub fn use_previous(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            use_previous: true,
        }
    }
}

impl From<&Param> for ParameterValue {
    fn from(param: &Param) -> Self {
        if param.use_previous {
            ParameterValue::use_previous(&param.key)
        } else {
            ParameterValue::new(&param.key, &param.value)
        }
    }
}

/// What a resolver may know about the stack it resolves for.
pub trait StackInfo {
    fn name(&self) -> &str;
    fn region(&self) -> &str;
}

/// A plain [`StackInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackContext {
    pub name: String,
    pub region: String,
}

impl StackContext {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
        }
    }
}

impl StackInfo for StackContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> &str {
        &self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_previous_submits_without_value() {
        let value = ParameterValue::from(&Param::use_previous("VpcCIDR"));
        assert!(value.use_previous);
        assert_eq!(value.value, None);
    }

    #[test]
    fn plain_param_submits_value() {
        let value = ParameterValue::from(&Param::new("Name", "SandboxVPC"));
        assert!(!value.use_previous);
        assert_eq!(value.value.as_deref(), Some("SandboxVPC"));
    }
}
