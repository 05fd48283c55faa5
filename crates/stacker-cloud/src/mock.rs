//! In-memory CloudFormation
//!
//! Models just enough of the service for stacker's workflows: change sets are
//! computed instantly and executing one settles the stack immediately.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::types::{
    ChangeSetInfo, ChangeSetKind, ChangeSetRequest, PendingChangeSet, ResourceChange,
    StackDescription, StackEvent, StackParameter, StackResource, status,
};
use crate::{CloudFactory, CloudFormation, Error, Result};

#[derive(Debug, Default)]
struct MockState {
    stacks: BTreeMap<String, StackDescription>,
    change_sets: BTreeMap<String, Vec<ChangeSetInfo>>,
    planned: HashMap<String, Vec<ResourceChange>>,
    resources: HashMap<String, Vec<StackResource>>,
    events: HashMap<String, Vec<StackEvent>>,
    requests: Vec<ChangeSetRequest>,
    calls: Vec<String>,
}

/// A shared, cloneable in-memory stack service.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect another.
#[derive(Debug, Clone)]
pub struct MockCloudFormation {
    region: String,
    state: Arc<Mutex<MockState>>,
}

impl MockCloudFormation {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            state: Arc::default(),
        }
    }

    /// Add an existing stack (builder style).
    pub fn with_stack(self, stack: StackDescription) -> Self {
        self.add_stack(stack);
        self
    }

    pub fn add_stack(&self, stack: StackDescription) {
        self.lock().stacks.insert(stack.name.clone(), stack);
    }

    /// Resource changes the next change set on `stack` will report.
    pub fn set_planned_changes(&self, stack: &str, changes: Vec<ResourceChange>) {
        self.lock().planned.insert(stack.to_string(), changes);
    }

    pub fn set_resources(&self, stack: &str, resources: Vec<StackResource>) {
        self.lock().resources.insert(stack.to_string(), resources);
    }

    /// Record an event; later events are reported first.
    pub fn push_event(&self, event: StackEvent) {
        self.lock()
            .events
            .entry(event.stack_name.clone())
            .or_default()
            .insert(0, event);
    }

    /// Register an already computed change set.
    pub fn insert_change_set(&self, change_set: ChangeSetInfo) {
        self.lock()
            .change_sets
            .entry(change_set.stack_name.clone())
            .or_default()
            .push(change_set);
    }

    /// Operations performed so far, as `Operation:stack` strings.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Change set requests received so far.
    pub fn requests(&self) -> Vec<ChangeSetRequest> {
        self.lock().requests.clone()
    }

    /// Current state of a stack.
    pub fn stack(&self, name: &str) -> Option<StackDescription> {
        self.lock().stacks.get(name).cloned()
    }

    /// A factory handing out clones of this mock for any region.
    ///
    /// Every clone reports the region it was requested for but shares state.
    pub fn factory(&self) -> CloudFactory {
        let mock = self.clone();
        Arc::new(move |region: &str| {
            let client = MockCloudFormation {
                region: region.to_string(),
                state: Arc::clone(&mock.state),
            };
            Ok(Box::new(client) as Box<dyn CloudFormation>)
        })
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide state from the others.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, state: &mut MockState, operation: &str, stack: &str) {
        state.calls.push(format!("{operation}:{stack}"));
        tracing::trace!(region = %self.region, operation, stack, "Mock call");
    }
}

impl CloudFormation for MockCloudFormation {
    fn region(&self) -> &str {
        &self.region
    }

    fn describe_stack(&self, name: &str) -> Result<Option<StackDescription>> {
        let mut state = self.lock();
        self.record(&mut state, "DescribeStacks", name);
        Ok(state.stacks.get(name).cloned())
    }

    fn create_change_set(&self, request: &ChangeSetRequest) -> Result<String> {
        let mut state = self.lock();
        self.record(&mut state, "CreateChangeSet", &request.stack_name);
        state.requests.push(request.clone());

        let existing = state
            .stacks
            .get(&request.stack_name)
            .map(|stack| stack.id.clone());
        let stack_id = match (request.kind, existing) {
            (ChangeSetKind::Create, Some(_)) => {
                return Err(Error::api(
                    "CreateChangeSet",
                    format!("Stack [{}] already exists", request.stack_name),
                ));
            }
            (ChangeSetKind::Update, None) => {
                return Err(Error::StackNotFound {
                    name: request.stack_name.clone(),
                });
            }
            (ChangeSetKind::Update, Some(id)) => id,
            (ChangeSetKind::Create, None) => {
                let stack =
                    StackDescription::new(&request.stack_name, status::REVIEW_IN_PROGRESS);
                let id = stack.id.clone();
                state.stacks.insert(request.stack_name.clone(), stack);
                id
            }
        };

        let changes = state
            .planned
            .remove(&request.stack_name)
            .unwrap_or_default();
        let (cs_status, execution_status, reason) = if changes.is_empty() {
            (
                status::CHANGE_SET_FAILED,
                status::EXECUTION_UNAVAILABLE,
                Some("The submitted information didn't contain changes.".to_string()),
            )
        } else {
            (
                status::CHANGE_SET_CREATE_COMPLETE,
                status::EXECUTION_AVAILABLE,
                None,
            )
        };

        let id = format!("{stack_id}/changeSet/{}", request.change_set_name);
        let info = ChangeSetInfo {
            id: id.clone(),
            name: request.change_set_name.clone(),
            stack_id,
            stack_name: request.stack_name.clone(),
            status: cs_status.to_string(),
            status_reason: reason,
            execution_status: execution_status.to_string(),
            creation_time: Some(Utc::now()),
            changes,
            parameters: request
                .parameters
                .iter()
                .map(|p| StackParameter {
                    key: p.key.clone(),
                    value: p.value.clone().unwrap_or_default(),
                })
                .collect(),
        };
        state
            .change_sets
            .entry(request.stack_name.clone())
            .or_default()
            .push(info);
        Ok(id)
    }

    fn describe_change_set(&self, stack: &str, change_set: &str) -> Result<ChangeSetInfo> {
        let mut state = self.lock();
        self.record(&mut state, "DescribeChangeSet", stack);
        state
            .change_sets
            .get(stack)
            .and_then(|sets| {
                sets.iter()
                    .find(|cs| cs.name == change_set || cs.id == change_set)
            })
            .cloned()
            .ok_or_else(|| Error::ChangeSetNotFound {
                stack: stack.to_string(),
                change_set: change_set.to_string(),
            })
    }

    fn list_change_sets(&self, stack: &str) -> Result<Vec<PendingChangeSet>> {
        let mut state = self.lock();
        self.record(&mut state, "ListChangeSets", stack);
        Ok(state
            .change_sets
            .get(stack)
            .map(|sets| {
                sets.iter()
                    .map(|cs| PendingChangeSet {
                        id: cs.id.clone(),
                        name: cs.name.clone(),
                        status: cs.status.clone(),
                        status_reason: cs.status_reason.clone(),
                        execution_status: cs.execution_status.clone(),
                        creation_time: cs.creation_time,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    fn execute_change_set(&self, stack: &str, change_set: &str) -> Result<()> {
        let mut state = self.lock();
        self.record(&mut state, "ExecuteChangeSet", stack);

        let info = state
            .change_sets
            .get(stack)
            .and_then(|sets| {
                sets.iter()
                    .find(|cs| cs.name == change_set || cs.id == change_set)
            })
            .cloned()
            .ok_or_else(|| Error::ChangeSetNotFound {
                stack: stack.to_string(),
                change_set: change_set.to_string(),
            })?;
        if !info.can_execute() {
            return Err(Error::api(
                "ExecuteChangeSet",
                format!(
                    "ChangeSet [{}] cannot be executed in its current execution status of [{}]",
                    info.name, info.execution_status
                ),
            ));
        }

        let event_id = format!("{}-{}", info.name, state.calls.len());
        let Some(current) = state.stacks.get_mut(stack) else {
            return Err(Error::StackNotFound {
                name: stack.to_string(),
            });
        };
        let now = Utc::now();
        current.status = if current.status == status::REVIEW_IN_PROGRESS {
            current.creation_time = Some(now);
            status::CREATE_COMPLETE.to_string()
        } else {
            status::UPDATE_COMPLETE.to_string()
        };
        current.last_updated_time = Some(now);
        current.parameters = info.parameters.clone();

        let event = StackEvent {
            id: event_id,
            stack_name: stack.to_string(),
            logical_id: stack.to_string(),
            physical_id: Some(current.id.clone()),
            resource_type: "AWS::CloudFormation::Stack".to_string(),
            status: current.status.clone(),
            status_reason: None,
            timestamp: now,
        };
        state.change_sets.remove(stack);
        state
            .events
            .entry(stack.to_string())
            .or_default()
            .insert(0, event);
        Ok(())
    }

    fn delete_stack(&self, name: &str) -> Result<()> {
        let mut state = self.lock();
        self.record(&mut state, "DeleteStack", name);
        state.stacks.remove(name);
        state.change_sets.remove(name);
        Ok(())
    }

    fn list_stack_resources(&self, name: &str) -> Result<Vec<StackResource>> {
        let mut state = self.lock();
        self.record(&mut state, "DescribeStackResources", name);
        if !state.stacks.contains_key(name) {
            return Err(Error::StackNotFound {
                name: name.to_string(),
            });
        }
        Ok(state.resources.get(name).cloned().unwrap_or_default())
    }

    fn stack_events(&self, name: &str) -> Result<Vec<StackEvent>> {
        let mut state = self.lock();
        self.record(&mut state, "DescribeStackEvents", name);
        Ok(state.events.get(name).cloned().unwrap_or_default())
    }
}
