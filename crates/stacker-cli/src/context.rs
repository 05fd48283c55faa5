//! Shared state for command execution

use std::path::Path;
use std::time::Duration;

use stacker_cloud::{CloudFactory, CloudFormation, StackDescription, aws_factory};
use stacker_core::{Engine, ResolvedStack};

use crate::error::{CliError, Result};
use crate::prompt::{Prompt, TerminalPrompt};

/// Delay between control plane polls.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Everything a command needs: local stacks, remote clients and a prompt.
pub struct Context {
    engine: Engine,
    factory: CloudFactory,
    prompt: Box<dyn Prompt>,
    poll_interval: Duration,
}

impl Context {
    /// A context for `base` talking to AWS on the terminal.
    pub fn new(base: &Path) -> Self {
        let factory = aws_factory();
        Self::with_parts(
            Engine::with_cloud(base, factory.clone()),
            factory,
            Box::new(TerminalPrompt),
            POLL_INTERVAL,
        )
    }

    pub fn with_parts(
        engine: Engine,
        factory: CloudFactory,
        prompt: Box<dyn Prompt>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            engine,
            factory,
            prompt,
            poll_interval,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn prompt(&self) -> &dyn Prompt {
        self.prompt.as_ref()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// The single configured stack called `name`.
    pub fn local_stack(&self, name: &str) -> Result<ResolvedStack> {
        let mut stacks = self.engine.fetch(name)?;
        match stacks.len() {
            0 => Err(CliError::user(format!("no stack found for `{name}`"))),
            1 => Ok(stacks.remove(0)),
            _ => Err(CliError::user(format!("multiple stacks found for `{name}`"))),
        }
    }

    /// A control plane client for `region`.
    pub fn client(&self, region: &str) -> Result<Box<dyn CloudFormation>> {
        Ok((self.factory)(region)?)
    }

    /// The configured stack and a client in its region.
    pub fn connect(&self, name: &str) -> Result<(ResolvedStack, Box<dyn CloudFormation>)> {
        let stack = self.local_stack(name)?;
        let client = self.client(stack.region())?;
        Ok((stack, client))
    }
}

/// Describe `name`, failing if it does not exist remotely.
pub fn existing_stack(client: &dyn CloudFormation, name: &str) -> Result<StackDescription> {
    client
        .describe_stack(name)?
        .ok_or_else(|| CliError::user(format!("stack {name} does not exist")))
}
