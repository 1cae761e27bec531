// ABOUTME: Result of a finished deployment.
// ABOUTME: Serializable so it can be reported as JSON.

use serde::Serialize;

use crate::types::TaskDefinitionRef;

/// What a successful deployment did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub cluster: String,
    pub service: String,
    pub image: String,
    pub previous_task_definition: TaskDefinitionRef,
    pub task_definition: TaskDefinitionRef,
    pub revision: i32,
    /// Task-level CPU units of the registered revision.
    pub cpu: Option<String>,
    /// Task-level memory (MiB) of the registered revision.
    pub memory: Option<String>,
    pub desired_count: i32,
    pub convergence: Convergence,
}

/// Whether the rollout was observed to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Convergence {
    /// Polling was disabled.
    NotChecked,
    /// The service reported the new revision as its only deployment.
    Confirmed { polls: u32, elapsed_secs: u64 },
}
