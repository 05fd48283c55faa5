//! Value types returned by and submitted to the control plane

use chrono::{DateTime, Utc};

/// Stack statuses stacker reasons about.
pub mod status {
    pub const CREATE_COMPLETE: &str = "CREATE_COMPLETE";
    pub const CREATE_FAILED: &str = "CREATE_FAILED";
    pub const ROLLBACK_COMPLETE: &str = "ROLLBACK_COMPLETE";
    pub const ROLLBACK_FAILED: &str = "ROLLBACK_FAILED";
    pub const DELETE_COMPLETE: &str = "DELETE_COMPLETE";
    pub const DELETE_FAILED: &str = "DELETE_FAILED";
    pub const UPDATE_COMPLETE: &str = "UPDATE_COMPLETE";
    pub const UPDATE_ROLLBACK_COMPLETE: &str = "UPDATE_ROLLBACK_COMPLETE";
    pub const UPDATE_ROLLBACK_FAILED: &str = "UPDATE_ROLLBACK_FAILED";
    pub const REVIEW_IN_PROGRESS: &str = "REVIEW_IN_PROGRESS";

    /// Change set statuses
    pub const CHANGE_SET_CREATE_PENDING: &str = "CREATE_PENDING";
    pub const CHANGE_SET_CREATE_IN_PROGRESS: &str = "CREATE_IN_PROGRESS";
    pub const CHANGE_SET_CREATE_COMPLETE: &str = "CREATE_COMPLETE";
    pub const CHANGE_SET_FAILED: &str = "FAILED";

    /// Change set execution statuses
    pub const EXECUTION_AVAILABLE: &str = "AVAILABLE";
    pub const EXECUTION_UNAVAILABLE: &str = "UNAVAILABLE";

    /// Statuses in which a stack is no longer changing.
    pub const SETTLED: &[&str] = &[
        CREATE_FAILED,
        CREATE_COMPLETE,
        ROLLBACK_FAILED,
        ROLLBACK_COMPLETE,
        DELETE_FAILED,
        DELETE_COMPLETE,
        UPDATE_COMPLETE,
        UPDATE_ROLLBACK_FAILED,
        UPDATE_ROLLBACK_COMPLETE,
    ];
}

/// A key/value pair as reported by the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackParameter {
    pub key: String,
    pub value: String,
}

/// A stack output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackOutput {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
}

/// The live state of a stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackDescription {
    pub id: String,
    pub name: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub creation_time: Option<DateTime<Utc>>,
    pub last_updated_time: Option<DateTime<Utc>>,
    pub parameters: Vec<StackParameter>,
    pub outputs: Vec<StackOutput>,
}

impl StackDescription {
    /// Create a description with only a name and status set.
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: format!("arn:stacker:stack/{name}"),
            name,
            status: status.into(),
            status_reason: None,
            creation_time: None,
            last_updated_time: None,
            parameters: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Add an output (builder style).
    pub fn with_output(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.outputs.push(StackOutput {
            key: key.into(),
            value: value.into(),
            description: None,
        });
        self
    }

    /// Add a parameter (builder style).
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(StackParameter {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Look up an output value by key.
    pub fn output(&self, key: &str) -> Option<&str> {
        self.outputs
            .iter()
            .find(|o| o.key == key)
            .map(|o| o.value.as_str())
    }

    /// Whether a change set may be created against this stack.
    pub fn can_update(&self) -> bool {
        self.status != status::REVIEW_IN_PROGRESS
    }

    /// Whether the stack has stopped changing.
    pub fn is_settled(&self) -> bool {
        status::SETTLED.contains(&self.status.as_str())
    }
}

/// A parameter submitted with a change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterValue {
    pub key: String,
    /// `None` when `use_previous` is set.
    pub value: Option<String>,
    pub use_previous: bool,
}

impl ParameterValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            use_previous: false,
        }
    }

    pub fn use_previous(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
            use_previous: true,
        }
    }
}

/// Whether a change set creates a new stack or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSetKind {
    Create,
    Update,
}

impl ChangeSetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
        }
    }
}

/// Everything needed to create a change set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSetRequest {
    pub stack_name: String,
    pub change_set_name: String,
    pub kind: ChangeSetKind,
    pub template_body: String,
    pub parameters: Vec<ParameterValue>,
    pub capabilities: Vec<String>,
}

/// Action a change set will take on a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeAction {
    Add,
    Modify,
    Remove,
    Import,
    Dynamic,
    Other(String),
}

impl ChangeAction {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Add => "Add",
            Self::Modify => "Modify",
            Self::Remove => "Remove",
            Self::Import => "Import",
            Self::Dynamic => "Dynamic",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for ChangeAction {
    fn from(action: &str) -> Self {
        match action {
            "Add" => Self::Add,
            "Modify" => Self::Modify,
            "Remove" => Self::Remove,
            "Import" => Self::Import,
            "Dynamic" => Self::Dynamic,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single resource change proposed by a change set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceChange {
    pub action: ChangeAction,
    pub logical_id: String,
    pub physical_id: Option<String>,
    pub resource_type: String,
    pub replacement: bool,
}

impl ResourceChange {
    pub fn new(
        action: ChangeAction,
        logical_id: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            action,
            logical_id: logical_id.into(),
            physical_id: None,
            resource_type: resource_type.into(),
            replacement: false,
        }
    }

    /// Mark the change as requiring replacement (builder style).
    pub fn replacing(mut self) -> Self {
        self.replacement = true;
        self
    }

    /// Whether applying the change deletes or replaces a resource.
    pub fn is_destructive(&self) -> bool {
        match self.action {
            ChangeAction::Remove => true,
            ChangeAction::Modify => self.replacement,
            _ => false,
        }
    }
}

/// A described change set.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSetInfo {
    pub id: String,
    pub name: String,
    pub stack_id: String,
    pub stack_name: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub execution_status: String,
    pub creation_time: Option<DateTime<Utc>>,
    pub changes: Vec<ResourceChange>,
    pub parameters: Vec<StackParameter>,
}

impl ChangeSetInfo {
    /// Whether the change set can be executed now.
    pub fn can_execute(&self) -> bool {
        self.execution_status == status::EXECUTION_AVAILABLE
    }

    /// Whether the change set is still being computed.
    pub fn is_pending(&self) -> bool {
        self.status == status::CHANGE_SET_CREATE_PENDING
            || self.status == status::CHANGE_SET_CREATE_IN_PROGRESS
    }

    /// Whether the change set modifies or removes existing resources.
    pub fn has_changes(&self) -> bool {
        self.changes
            .iter()
            .any(|c| matches!(c.action, ChangeAction::Modify | ChangeAction::Remove))
    }

    /// Whether any change deletes or replaces a resource.
    pub fn is_destructive(&self) -> bool {
        self.changes.iter().any(ResourceChange::is_destructive)
    }
}

/// Summary of a change set that has not been executed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChangeSet {
    pub id: String,
    pub name: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub execution_status: String,
    pub creation_time: Option<DateTime<Utc>>,
}

/// A physical resource belonging to a stack.
#[derive(Debug, Clone, PartialEq)]
pub struct StackResource {
    pub logical_id: String,
    pub physical_id: Option<String>,
    pub resource_type: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

/// A stack event; the control plane reports these newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct StackEvent {
    pub id: String,
    pub stack_name: String,
    pub logical_id: String,
    pub physical_id: Option<String>,
    pub resource_type: String,
    pub status: String,
    pub status_reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}
