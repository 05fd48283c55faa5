//! Configuration document schema
//!
//! ```yaml
//! defaults:
//!   region: us-west-2
//!   parameters:
//!     VpcCIDR: 10.21.0.0/16
//! stacks:
//!   - name: Foo-VPC
//!     template_name: VPC
//!     capabilities: CAPABILITY_IAM
//!     parameters:
//!       Name: ProductionVPC
//! ```

use serde::{Deserialize, Deserializer};

use crate::params::RawParams;

/// One parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub defaults: Defaults,
    #[serde(deserialize_with = "null_as_default")]
    pub stacks: Vec<StackConfig>,
}

/// Values inherited by every stack at or below a document's path.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Defaults {
    #[serde(deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(deserialize_with = "null_as_default")]
    pub parameters: RawParams,
}

/// A stack declaration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StackConfig {
    pub name: String,
    /// Empty means inherit from `defaults`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    /// Empty means the template is named after the stack.
    #[serde(default, deserialize_with = "null_as_default")]
    pub template_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: String,
    #[serde(default)]
    pub parameters: Option<RawParams>,
    /// Logical key of the document that declared this stack.
    #[serde(skip)]
    pub source: String,
}

impl StackConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Treat an explicit `~` the same as an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RawValue;

    #[test]
    fn parses_full_document() {
        let doc: ConfigDocument = serde_yaml::from_str(
            r#"
defaults:
  region: us-west-2
  parameters:
    VpcCIDR: 10.21.0.0/16
stacks:
  - name: Foo-VPC
    template_name: VPC
    capabilities: CAPABILITY_IAM
    parameters:
      Name: ProductionVPC
"#,
        )
        .unwrap();

        assert_eq!(doc.defaults.region, "us-west-2");
        assert_eq!(
            doc.defaults.parameters.get("VpcCIDR"),
            Some(&RawValue::from("10.21.0.0/16"))
        );
        let stack = &doc.stacks[0];
        assert_eq!(stack.name, "Foo-VPC");
        assert_eq!(stack.template_name, "VPC");
        assert_eq!(stack.capabilities, "CAPABILITY_IAM");
        assert!(stack.region.is_empty());
        assert!(stack.source.is_empty());
    }

    #[test]
    fn null_sections_are_empty() {
        let doc: ConfigDocument =
            serde_yaml::from_str("defaults:\n  region: ~\n  parameters:\nstacks:\n").unwrap();
        assert_eq!(doc, ConfigDocument::default());
    }

    #[test]
    fn absent_stack_parameters_stay_absent() {
        let doc: ConfigDocument = serde_yaml::from_str("stacks:\n  - name: Foo\n").unwrap();
        assert_eq!(doc.stacks[0].parameters, None);
    }

    #[test]
    fn stack_name_is_required() {
        let result = serde_yaml::from_str::<ConfigDocument>("stacks:\n  - region: us-east-1\n");
        assert!(result.is_err());
    }
}
