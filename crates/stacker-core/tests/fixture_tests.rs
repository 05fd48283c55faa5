//! Golden-file tests against test-fixtures/stacker

use std::fs;

use pretty_assertions::assert_eq;
use stacker_cloud::types::status;
use stacker_cloud::{MockCloudFormation, StackDescription};
use stacker_core::{Engine, Param, RawValue};
use stacker_test_utils::fixtures::{data_file, stacker_base};

fn engine() -> Engine {
    let mock = MockCloudFormation::new("us-west-2").with_stack(
        StackDescription::new("Foo-VPC", status::CREATE_COMPLETE).with_output("VpcId", "vpc-0abc"),
    );
    Engine::with_cloud(stacker_base(), mock.factory())
}

#[test]
fn test_inheritance_merge_scenario() {
    let stacks = engine().fetch("Foo-VPC").unwrap();
    assert_eq!(stacks.len(), 1);

    let stack = &stacks[0];
    assert_eq!(stack.region(), "us-west-2");
    assert_eq!(stack.capabilities(), ["CAPABILITIES_IAM".to_string()]);
    assert_eq!(stack.template_name(), "VPC");
    assert_eq!(stack.source(), "production/vpc");
    assert_eq!(
        stack.raw_parameters().clone().into_iter().collect::<Vec<_>>(),
        vec![
            ("Name".to_string(), RawValue::from("ProductionVPC")),
            ("VpcCIDR".to_string(), RawValue::from("10.21.0.0/16")),
        ]
    );
}

#[test]
fn test_template_body_matches_disk() {
    let on_disk = fs::read_to_string(stacker_base().join("templates/VPC.yml")).unwrap();
    for stack in engine().fetch_all().unwrap() {
        if stack.template_name() == "VPC" {
            assert_eq!(stack.template_body(), on_disk);
        }
    }
}

#[test]
fn test_fetch_all_is_sorted_by_name() {
    let names: Vec<String> = engine()
        .fetch_all()
        .unwrap()
        .iter()
        .map(|s| s.name().to_string())
        .collect();
    assert_eq!(names, vec!["Foo-App", "Foo-VPC", "Sandbox-VPC"]);
}

#[test]
fn test_resolves_stack_outputs_and_lists() {
    let stacks = engine().fetch("Foo-App").unwrap();
    let params = stacks[0].params().unwrap();
    assert_eq!(
        params,
        vec![
            Param::new("AllowedPorts", "80,443"),
            Param::new("Environment", "production"),
            Param::new("VpcId", "vpc-0abc"),
        ]
    );
}

#[test]
fn test_sandbox_inherits_its_own_region() {
    let stacks = engine().fetch("Sandbox-VPC").unwrap();
    assert_eq!(stacks[0].region(), "us-east-2");
    assert!(stacks[0].capabilities().is_empty());
}

#[test]
fn test_data_file_fixture_has_trailing_newline() {
    let content = fs::read_to_string(data_file()).unwrap();
    assert_eq!(content, "101010\n");
}
