//! AWS CloudFormation implementation
//!
//! The SDK is async; stacker is not. Each client owns a current-thread tokio
//! runtime and blocks on every request.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_cloudformation::Client;
use aws_sdk_cloudformation::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_cloudformation::primitives::DateTime as SdkDateTime;
use aws_sdk_cloudformation::types::{
    Capability, ChangeSetType, Parameter, ResourceChange as SdkResourceChange, Stack,
};
use chrono::{DateTime, Utc};
use tokio::runtime::Runtime;

use crate::types::{
    ChangeAction, ChangeSetInfo, ChangeSetKind, ChangeSetRequest, PendingChangeSet,
    ResourceChange, StackDescription, StackEvent, StackOutput, StackParameter, StackResource,
};
use crate::{CloudFormation, Error, Result};

/// CloudFormation client bound to one region.
pub struct AwsCloudFormation {
    client: Client,
    region: String,
    runtime: Runtime,
}

impl AwsCloudFormation {
    /// Build a client using the default credential chain.
    ///
    /// An empty `region` defers to the provider chain (`AWS_REGION`, profile).
    pub fn connect(region: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Client {
                region: region.to_string(),
                message: e.to_string(),
            })?;

        let shared_config = runtime.block_on(async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if !region.is_empty() {
                loader = loader.region(Region::new(region.to_string()));
            }
            loader.load().await
        });
        tracing::debug!(region, "Connected CloudFormation client");

        Ok(Self {
            client: Client::new(&shared_config),
            region: region.to_string(),
            runtime,
        })
    }
}

impl CloudFormation for AwsCloudFormation {
    fn region(&self) -> &str {
        &self.region
    }

    fn describe_stack(&self, name: &str) -> Result<Option<StackDescription>> {
        tracing::debug!(stack = name, region = %self.region, "DescribeStacks");
        let result = self
            .runtime
            .block_on(self.client.describe_stacks().stack_name(name).send());

        match result {
            Ok(output) => Ok(output
                .stacks()
                .iter()
                .find(|s| s.stack_name().text() == name)
                .map(convert_stack)),
            // The service reports a missing stack as a validation failure.
            Err(err) if error_code(&err) == Some("ValidationError") => Ok(None),
            Err(err) => Err(api_error("DescribeStacks", err)),
        }
    }

    fn create_change_set(&self, request: &ChangeSetRequest) -> Result<String> {
        tracing::debug!(
            stack = %request.stack_name,
            change_set = %request.change_set_name,
            kind = request.kind.as_str(),
            "CreateChangeSet"
        );
        let parameters: Vec<Parameter> = request
            .parameters
            .iter()
            .map(|p| {
                let builder = Parameter::builder().parameter_key(p.key.clone());
                let builder = match (&p.value, p.use_previous) {
                    (_, true) => builder.use_previous_value(true),
                    (Some(value), false) => builder.parameter_value(value.clone()),
                    (None, false) => builder,
                };
                builder.build()
            })
            .collect();
        let change_set_type = match request.kind {
            ChangeSetKind::Create => ChangeSetType::Create,
            ChangeSetKind::Update => ChangeSetType::Update,
        };

        let mut builder = self
            .client
            .create_change_set()
            .stack_name(request.stack_name.clone())
            .change_set_name(request.change_set_name.clone())
            .change_set_type(change_set_type)
            .template_body(request.template_body.clone())
            .set_parameters(Some(parameters));
        if !request.capabilities.is_empty() {
            let capabilities = request
                .capabilities
                .iter()
                .map(|c| Capability::from(c.as_str()))
                .collect();
            builder = builder.set_capabilities(Some(capabilities));
        }

        let output = self
            .runtime
            .block_on(builder.send())
            .map_err(|e| api_error("CreateChangeSet", e))?;
        Ok(output.id().text())
    }

    fn describe_change_set(&self, stack: &str, change_set: &str) -> Result<ChangeSetInfo> {
        tracing::debug!(stack, change_set, "DescribeChangeSet");
        let result = self.runtime.block_on(
            self.client
                .describe_change_set()
                .stack_name(stack)
                .change_set_name(change_set)
                .send(),
        );
        let output = match result {
            Ok(output) => output,
            Err(err) if error_code(&err) == Some("ChangeSetNotFound") => {
                return Err(Error::ChangeSetNotFound {
                    stack: stack.to_string(),
                    change_set: change_set.to_string(),
                });
            }
            Err(err) => return Err(api_error("DescribeChangeSet", err)),
        };

        Ok(ChangeSetInfo {
            id: output.change_set_id().text(),
            name: output.change_set_name().text(),
            stack_id: output.stack_id().text(),
            stack_name: output.stack_name().text(),
            status: output.status().text(),
            status_reason: output.status_reason().text_opt(),
            execution_status: output.execution_status().text(),
            creation_time: output.creation_time().time(),
            changes: output
                .changes()
                .iter()
                .filter_map(|c| c.resource_change())
                .map(convert_resource_change)
                .collect(),
            parameters: output
                .parameters()
                .iter()
                .map(|p| StackParameter {
                    key: p.parameter_key().text(),
                    value: p.parameter_value().text(),
                })
                .collect(),
        })
    }

    fn list_change_sets(&self, stack: &str) -> Result<Vec<PendingChangeSet>> {
        tracing::debug!(stack, "ListChangeSets");
        let output = self
            .runtime
            .block_on(self.client.list_change_sets().stack_name(stack).send())
            .map_err(|e| api_error("ListChangeSets", e))?;

        Ok(output
            .summaries()
            .iter()
            .map(|s| PendingChangeSet {
                id: s.change_set_id().text(),
                name: s.change_set_name().text(),
                status: s.status().text(),
                status_reason: s.status_reason().text_opt(),
                execution_status: s.execution_status().text(),
                creation_time: s.creation_time().time(),
            })
            .collect())
    }

    fn execute_change_set(&self, stack: &str, change_set: &str) -> Result<()> {
        tracing::debug!(stack, change_set, "ExecuteChangeSet");
        self.runtime
            .block_on(
                self.client
                    .execute_change_set()
                    .stack_name(stack)
                    .change_set_name(change_set)
                    .send(),
            )
            .map_err(|e| api_error("ExecuteChangeSet", e))?;
        Ok(())
    }

    fn delete_stack(&self, name: &str) -> Result<()> {
        tracing::debug!(stack = name, "DeleteStack");
        self.runtime
            .block_on(self.client.delete_stack().stack_name(name).send())
            .map_err(|e| api_error("DeleteStack", e))?;
        Ok(())
    }

    fn list_stack_resources(&self, name: &str) -> Result<Vec<StackResource>> {
        tracing::debug!(stack = name, "DescribeStackResources");
        let output = self
            .runtime
            .block_on(self.client.describe_stack_resources().stack_name(name).send())
            .map_err(|e| api_error("DescribeStackResources", e))?;

        Ok(output
            .stack_resources()
            .iter()
            .map(|r| StackResource {
                logical_id: r.logical_resource_id().text(),
                physical_id: r.physical_resource_id().text_opt(),
                resource_type: r.resource_type().text(),
                status: r.resource_status().text(),
                status_reason: r.resource_status_reason().text_opt(),
                timestamp: r.timestamp().time(),
            })
            .collect())
    }

    fn stack_events(&self, name: &str) -> Result<Vec<StackEvent>> {
        tracing::trace!(stack = name, "DescribeStackEvents");
        let output = self
            .runtime
            .block_on(self.client.describe_stack_events().stack_name(name).send())
            .map_err(|e| api_error("DescribeStackEvents", e))?;

        Ok(output
            .stack_events()
            .iter()
            .map(|e| StackEvent {
                id: e.event_id().text(),
                stack_name: e.stack_name().text(),
                logical_id: e.logical_resource_id().text(),
                physical_id: e.physical_resource_id().text_opt(),
                resource_type: e.resource_type().text(),
                status: e.resource_status().text(),
                status_reason: e.resource_status_reason().text_opt(),
                timestamp: e.timestamp().time().unwrap_or_default(),
            })
            .collect())
    }
}

fn convert_stack(stack: &Stack) -> StackDescription {
    let creation_time = stack.creation_time().time();
    StackDescription {
        id: stack.stack_id().text(),
        name: stack.stack_name().text(),
        status: stack.stack_status().text(),
        status_reason: stack.stack_status_reason().text_opt(),
        creation_time,
        last_updated_time: stack.last_updated_time().time().or(creation_time),
        parameters: stack
            .parameters()
            .iter()
            .map(|p| StackParameter {
                key: p.parameter_key().text(),
                value: p.parameter_value().text(),
            })
            .collect(),
        outputs: stack
            .outputs()
            .iter()
            .map(|o| StackOutput {
                key: o.output_key().text(),
                value: o.output_value().text(),
                description: o.description().text_opt(),
            })
            .collect(),
    }
}

fn convert_resource_change(change: &SdkResourceChange) -> ResourceChange {
    ResourceChange {
        action: ChangeAction::from(change.action().text().as_str()),
        logical_id: change.logical_resource_id().text(),
        physical_id: change.physical_resource_id().text_opt(),
        resource_type: change.resource_type().text(),
        replacement: change.replacement().text() == "True",
    }
}

fn error_code<E, R>(err: &SdkError<E, R>) -> Option<&str>
where
    E: ProvideErrorMetadata,
{
    err.as_service_error().and_then(|e| e.code())
}

fn api_error<E>(operation: &'static str, err: E) -> Error
where
    E: std::error::Error + 'static,
{
    Error::api(operation, DisplayErrorContext(&err).to_string())
}

/// Owned text from an SDK accessor.
///
/// Required members come back as `&T`, optional ones as `Option<&T>`; both
/// strings and SDK enums implement `AsRef<str>`.
trait SdkText {
    fn text(self) -> String;
    fn text_opt(self) -> Option<String>;
}

impl<T: AsRef<str> + ?Sized> SdkText for &T {
    fn text(self) -> String {
        self.as_ref().to_string()
    }

    fn text_opt(self) -> Option<String> {
        Some(self.text())
    }
}

impl<T: AsRef<str> + ?Sized> SdkText for Option<&T> {
    fn text(self) -> String {
        self.map(|v| v.as_ref().to_string()).unwrap_or_default()
    }

    fn text_opt(self) -> Option<String> {
        self.map(|v| v.as_ref().to_string())
    }
}

/// Timestamp conversion, for the same required/optional split as [`SdkText`].
trait SdkTime {
    fn time(self) -> Option<DateTime<Utc>>;
}

impl SdkTime for &SdkDateTime {
    fn time(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.secs(), self.subsec_nanos())
    }
}

impl SdkTime for Option<&SdkDateTime> {
    fn time(self) -> Option<DateTime<Utc>> {
        self.and_then(|t| t.time())
    }
}
