//! Change set lifecycle and polling against the in-memory service

use std::time::Duration;

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use stacker_cloud::types::status;
use stacker_cloud::{
    ChangeAction, ChangeSetInfo, ChangeSetKind, ChangeSetRequest, CloudFormation,
    MockCloudFormation, ParameterValue, ResourceChange, StackDescription, wait_for_change_set,
    wait_for_stack,
};

const TICK: Duration = Duration::from_millis(1);

#[fixture]
fn mock() -> MockCloudFormation {
    MockCloudFormation::new("us-east-1")
        .with_stack(StackDescription::new("Foo-VPC", status::CREATE_COMPLETE).with_output("VpcId", "vpc-1"))
}

fn update(stack: &str, name: &str) -> ChangeSetRequest {
    ChangeSetRequest {
        stack_name: stack.to_string(),
        change_set_name: name.to_string(),
        kind: ChangeSetKind::Update,
        template_body: "Resources: {}".to_string(),
        parameters: vec![
            ParameterValue::new("Name", "SandboxVPC"),
            ParameterValue::use_previous("VpcCIDR"),
        ],
        capabilities: vec!["CAPABILITY_IAM".to_string()],
    }
}

#[rstest]
fn test_execute_updates_stack(mock: MockCloudFormation) {
    mock.set_planned_changes(
        "Foo-VPC",
        vec![ResourceChange::new(ChangeAction::Modify, "Vpc", "AWS::EC2::VPC")],
    );
    mock.create_change_set(&update("Foo-VPC", "cs-aaaa0001")).unwrap();

    let info = wait_for_change_set(&mock, "Foo-VPC", "cs-aaaa0001", TICK).unwrap();
    assert!(info.can_execute());
    assert!(info.has_changes());
    assert!(!info.is_destructive());

    mock.execute_change_set("Foo-VPC", "cs-aaaa0001").unwrap();

    let mut seen = Vec::new();
    let settled = wait_for_stack(&mock, "Foo-VPC", TICK, |s| seen.push(s.status.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(settled.status, status::UPDATE_COMPLETE);
    assert_eq!(seen, vec![status::UPDATE_COMPLETE.to_string()]);
    assert!(mock.list_change_sets("Foo-VPC").unwrap().is_empty());
    assert_eq!(mock.stack_events("Foo-VPC").unwrap().len(), 1);
}

#[rstest]
fn test_use_previous_is_sent_without_value(mock: MockCloudFormation) {
    mock.create_change_set(&update("Foo-VPC", "cs-aaaa0002")).unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 1);
    let previous = &requests[0].parameters[1];
    assert!(previous.use_previous);
    assert_eq!(previous.value, None);
}

#[rstest]
fn test_wait_for_deleted_stack_returns_none(mock: MockCloudFormation) {
    mock.delete_stack("Foo-VPC").unwrap();
    let result = wait_for_stack(&mock, "Foo-VPC", TICK, |_| {}).unwrap();
    assert!(result.is_none());
}

#[rstest]
fn test_pending_change_set_is_listed(mock: MockCloudFormation) {
    let stack = mock.stack("Foo-VPC").unwrap();
    mock.insert_change_set(ChangeSetInfo {
        id: "cs-id".into(),
        name: "cs-pending".into(),
        stack_id: stack.id,
        stack_name: "Foo-VPC".into(),
        status: status::CHANGE_SET_CREATE_PENDING.into(),
        status_reason: None,
        execution_status: status::EXECUTION_UNAVAILABLE.into(),
        creation_time: None,
        changes: Vec::new(),
        parameters: Vec::new(),
    });

    let pending = mock.list_change_sets("Foo-VPC").unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].name, "cs-pending");
    assert!(mock.describe_change_set("Foo-VPC", "cs-pending").unwrap().is_pending());
}

#[rstest]
fn test_missing_change_set_is_an_error(mock: MockCloudFormation) {
    let err = mock.describe_change_set("Foo-VPC", "cs-missing").unwrap_err();
    assert!(matches!(err, stacker_cloud::Error::ChangeSetNotFound { .. }));
}
