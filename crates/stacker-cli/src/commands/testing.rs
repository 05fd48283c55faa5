//! Shared setup for command tests

use std::rc::Rc;
use std::time::Duration;

use stacker_cloud::types::status;
use stacker_cloud::{ChangeSetInfo, MockCloudFormation, ResourceChange, StackDescription};
use stacker_core::Engine;
use stacker_test_utils::TestStackerDir;
use stacker_test_utils::dir::VPC_TEMPLATE;

use crate::context::Context;
use crate::error::Result;
use crate::prompt::{Prompt, ScriptedPrompt};

const VPC_CONFIG: &str = "defaults:
  region: us-west-2
  parameters:
    VpcCIDR: 10.21.0.0/16
stacks:
  - name: Foo-VPC
    template_name: VPC
    capabilities: CAPABILITY_IAM
    parameters:
      Name: ProductionVPC
";

/// A stacker base, a mock control plane and scripted answers.
pub struct Harness {
    pub dir: TestStackerDir,
    pub cloud: MockCloudFormation,
    prompt: Rc<ScriptedPrompt>,
}

/// Lets the context own the prompt while the test keeps a handle to it.
struct SharedPrompt(Rc<ScriptedPrompt>);

impl Prompt for SharedPrompt {
    fn input(&self, prompt: &str) -> Result<String> {
        self.0.input(prompt)
    }

    fn select(&self, prompt: &str, items: &[String]) -> Result<usize> {
        self.0.select(prompt, items)
    }
}

impl Harness {
    pub fn new(setup: impl FnOnce(TestStackerDir) -> TestStackerDir) -> Self {
        Self {
            dir: setup(TestStackerDir::new()),
            cloud: MockCloudFormation::new("us-west-2"),
            prompt: Rc::new(ScriptedPrompt::default()),
        }
    }

    /// One production stack `Foo-VPC` that does not exist remotely yet.
    pub fn vpc() -> Self {
        Self::new(|dir| {
            dir.config("production.yml", VPC_CONFIG)
                .template("VPC.yml", VPC_TEMPLATE)
        })
    }

    /// Make `Foo-VPC` exist remotely.
    pub fn with_live_stack(self) -> Self {
        self.cloud.add_stack(
            StackDescription::new("Foo-VPC", status::CREATE_COMPLETE)
                .with_parameter("Name", "ProductionVPC")
                .with_parameter("VpcCIDR", "10.21.0.0/16"),
        );
        self
    }

    pub fn answering<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prompt = Rc::new(ScriptedPrompt::new(answers));
        self
    }

    pub fn asked(&self) -> Vec<String> {
        self.prompt.asked()
    }

    pub fn context(&self) -> Context {
        let factory = self.cloud.factory();
        Context::with_parts(
            Engine::with_cloud(self.dir.root(), factory.clone()),
            factory,
            Box::new(SharedPrompt(Rc::clone(&self.prompt))),
            Duration::ZERO,
        )
    }
}

/// A computed, executable change set on `Foo-VPC`.
pub fn change_set(name: &str, changes: Vec<ResourceChange>) -> ChangeSetInfo {
    ChangeSetInfo {
        id: format!("arn:stacker:stack/Foo-VPC/changeSet/{name}"),
        name: name.to_string(),
        stack_id: "arn:stacker:stack/Foo-VPC".to_string(),
        stack_name: "Foo-VPC".to_string(),
        status: status::CHANGE_SET_CREATE_COMPLETE.to_string(),
        status_reason: None,
        execution_status: status::EXECUTION_AVAILABLE.to_string(),
        creation_time: None,
        changes,
        parameters: Vec::new(),
    }
}
