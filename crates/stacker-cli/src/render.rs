//! Terminal rendering of stacks, change sets and events

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use colored::Colorize;
use stacker_cloud::types::status;
use stacker_cloud::{
    ChangeAction, ChangeSetInfo, PendingChangeSet, StackDescription, StackEvent, StackParameter,
    StackResource,
};
use stacker_core::{Param, ResolvedStack};

const NOT_SET: &str = "<notset>";

fn time(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn key_width<'a>(keys: impl Iterator<Item = &'a str>) -> usize {
    keys.map(str::len).max().unwrap_or(0)
}

/// One line per configured stack.
pub fn stack_list(stacks: &[ResolvedStack]) -> String {
    let width = key_width(stacks.iter().map(ResolvedStack::name));
    let mut out = String::new();
    for stack in stacks {
        let region = if stack.region().is_empty() {
            "<default region>"
        } else {
            stack.region()
        };
        out.push_str(&format!(
            "{}  {}  {}",
            format!("{:<width$}", stack.name()).bold(),
            region.cyan(),
            stack.template_name()
        ));
        if !stack.capabilities().is_empty() {
            out.push_str(&format!("  [{}]", stack.capabilities().join(", ").yellow()));
        }
        out.push_str(&format!("  ({})\n", stack.source().dimmed()));
    }
    out
}

/// `key = value` per resolved parameter.
pub fn params(params: &[Param]) -> String {
    let width = key_width(params.iter().map(|p| p.key.as_str()));
    params
        .iter()
        .map(|p| {
            let value = if p.use_previous {
                "<previous>".yellow()
            } else {
                p.value.cyan()
            };
            format!("{} = {}\n", format!("{:<width$}", p.key).bold(), value)
        })
        .collect()
}

pub fn change_set(cs: &ChangeSetInfo) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", "Stack".bold().underline(), cs.stack_name.cyan()));
    out.push_str(&format!("{}: {}\n", "Changeset".bold().underline(), cs.name.cyan()));

    let cs_status = if cs.status == status::CHANGE_SET_FAILED {
        cs.status.red()
    } else {
        cs.status.cyan()
    };
    out.push_str(&format!("  {}: {}\n", "Status".bold(), cs_status));
    if let Some(reason) = &cs.status_reason {
        out.push_str(&format!("  {}: {}\n", "Reason".bold(), reason.red()));
    }

    let execution = if cs.can_execute() {
        cs.execution_status.cyan()
    } else {
        cs.execution_status.red()
    };
    out.push_str(&format!("  {}: {}\n", "Execution Status".bold(), execution));
    out.push_str(&format!("  {}: {}\n", "Created At".bold(), time(cs.creation_time).cyan()));

    if !cs.changes.is_empty() {
        out.push_str(&format!("  {}\n", "Resources".bold()));
    }
    for change in &cs.changes {
        let resource_type = change.resource_type.bold().underline();
        match &change.physical_id {
            Some(id) => {
                out.push_str(&format!("    {}: {} ({})\n", resource_type, change.logical_id.cyan(), id.cyan()));
            }
            None => {
                out.push_str(&format!("    {}: {}\n", resource_type, change.logical_id.cyan()));
            }
        }
        let action = match change.action {
            ChangeAction::Add => change.action.as_str().green(),
            ChangeAction::Modify => change.action.as_str().yellow(),
            ChangeAction::Remove => change.action.as_str().red(),
            _ => change.action.as_str().normal(),
        };
        let replacement = if change.replacement {
            "true".red()
        } else {
            "false".cyan()
        };
        out.push_str(&format!("      {}: {}\n", "Action".bold(), action));
        out.push_str(&format!("      {}: {}\n", "Replacement".bold(), replacement));
    }
    out
}

/// Change set parameters next to the live stack's, differences highlighted.
pub fn params_diff(change_set: &[StackParameter], stack: &[StackParameter]) -> String {
    let mut rows: BTreeMap<&str, (&str, &str)> = BTreeMap::new();
    for p in stack {
        rows.entry(&p.key).or_insert((NOT_SET, NOT_SET)).1 = display_value(&p.value);
    }
    for p in change_set {
        rows.entry(&p.key).or_insert((NOT_SET, NOT_SET)).0 = display_value(&p.value);
    }

    let width = key_width(rows.keys().copied());
    let local_width = rows.values().map(|(l, _)| l.len()).max().unwrap_or(0).max("changeset".len());

    let mut out = String::new();
    out.push_str(&format!("{}\n", "Stack Params:".bold().underline()));
    out.push_str(&format!(
        "  {:<width$}  {}  {}\n",
        "",
        format!("{:<local_width$}", "changeset").bold(),
        "stack".bold()
    ));
    for (key, (local, remote)) in rows {
        let (local, remote) = (format!("{local:<local_width$}"), remote.to_string());
        let (local, remote) = if local.trim_end() == remote {
            (local.cyan(), remote.cyan())
        } else {
            (local.yellow(), remote.yellow())
        };
        out.push_str(&format!("  {}  {}  {}\n", format!("{key:<width$}").bold(), local, remote));
    }
    out
}

fn display_value(value: &str) -> &str {
    if value.is_empty() { NOT_SET } else { value }
}

pub fn stack(stack: &StackDescription) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", "Stack".bold().underline(), stack.name.cyan()));
    let rows = [
        ("ID", stack.id.clone()),
        ("Status", stack.status.clone()),
        ("CreationTime", time(stack.creation_time)),
        ("LastUpdatedTime", time(stack.last_updated_time)),
    ];
    for (label, value) in rows {
        out.push_str(&format!("  {}  {}\n", format!("{label:<15}").bold(), value.cyan()));
    }
    if let Some(reason) = &stack.status_reason {
        out.push_str(&format!("  {}  {}\n", format!("{:<15}", "Reason").bold(), reason.red()));
    }

    if !stack.parameters.is_empty() {
        out.push_str(&format!("{}:\n", "Parameters".bold()));
        let width = key_width(stack.parameters.iter().map(|p| p.key.as_str()));
        for p in &stack.parameters {
            out.push_str(&format!("  {}  {}\n", format!("{:<width$}", p.key).bold(), p.value.cyan()));
        }
    }
    if !stack.outputs.is_empty() {
        out.push_str(&format!("{}:\n", "Outputs".bold()));
        let width = key_width(stack.outputs.iter().map(|o| o.key.as_str()));
        for o in &stack.outputs {
            out.push_str(&format!("  {}  {}\n", format!("{:<width$}", o.key).bold(), o.value.cyan()));
        }
    }
    out
}

pub fn resources(resources: &[StackResource]) -> String {
    let width = key_width(resources.iter().map(|r| r.resource_type.as_str()));
    resources
        .iter()
        .map(|r| {
            format!(
                "  {}  {}  {}  {}  {}\n",
                format!("{:<width$}", r.resource_type).bold(),
                r.logical_id.cyan(),
                r.status.cyan(),
                r.physical_id.as_deref().unwrap_or("-").cyan(),
                time(r.timestamp).cyan()
            )
        })
        .collect()
}

pub fn events(events: &[StackEvent]) -> String {
    let width = key_width(events.iter().map(|e| e.resource_type.as_str()));
    events
        .iter()
        .map(|e| {
            format!(
                "  {}  {}  {}  {}  {}\n",
                format!("{:<width$}", e.resource_type).bold(),
                e.logical_id.cyan(),
                e.status.cyan(),
                e.status_reason.as_deref().unwrap_or("").cyan(),
                time(Some(e.timestamp)).cyan()
            )
        })
        .collect()
}

/// A single event as it streams in during an apply or delete.
pub fn event(e: &StackEvent) -> String {
    format!(
        "{} {}\n  {} {} ({})\n  {}\n",
        time(Some(e.timestamp)),
        e.status.bold(),
        e.resource_type.bold().underline(),
        e.logical_id.cyan(),
        e.physical_id.as_deref().unwrap_or("").cyan(),
        e.status_reason.as_deref().unwrap_or("").cyan()
    )
}

/// Selection labels for pending change sets.
pub fn pending_labels(pending: &[PendingChangeSet]) -> Vec<String> {
    pending
        .iter()
        .map(|p| format!("{}  {}  {}", p.name, p.status, time(p.creation_time)))
        .collect()
}
