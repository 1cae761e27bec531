// ABOUTME: Deployment state types for the type state pattern.
// ABOUTME: Each state carries exactly the data the next step needs.

use crate::ecs::{TaskDefinition, TaskDefinitionRequest};
use crate::types::TaskDefinitionRef;

use super::Convergence;

/// Initial state: configuration only, nothing read yet.
/// Available actions: `describe_service()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Service described: it has at least one active deployment.
/// Available actions: `load_task_definition()`
#[derive(Debug, Clone)]
pub struct ServiceResolved {
    pub(crate) desired_count: i32,
    pub(crate) current: TaskDefinitionRef,
}

/// Current task definition fetched.
/// Available actions: `prepare()`
#[derive(Debug, Clone)]
pub struct DefinitionLoaded {
    pub(crate) desired_count: i32,
    pub(crate) current_ref: TaskDefinitionRef,
    pub(crate) current: TaskDefinition,
}

/// Environment resolved and registration request derived.
/// Available actions: `register()`
#[derive(Debug, Clone)]
pub struct Prepared {
    pub(crate) desired_count: i32,
    pub(crate) previous: TaskDefinitionRef,
    pub(crate) request: TaskDefinitionRequest,
}

/// New revision registered.
/// Available actions: `update_service()`
#[derive(Debug, Clone)]
pub struct Registered {
    pub(crate) desired_count: i32,
    pub(crate) previous: TaskDefinitionRef,
    pub(crate) registered_ref: TaskDefinitionRef,
    pub(crate) registered: TaskDefinition,
}

/// Service points at the new revision.
/// Available actions: `await_convergence()`, `skip_convergence()`
#[derive(Debug, Clone)]
pub struct ServiceUpdated {
    pub(crate) desired_count: i32,
    pub(crate) previous: TaskDefinitionRef,
    pub(crate) registered_ref: TaskDefinitionRef,
    pub(crate) registered: TaskDefinition,
}

/// Completed: rollout triggered and, if requested, confirmed.
/// Available actions: `summary()`
#[derive(Debug, Clone)]
pub struct Completed {
    pub(crate) desired_count: i32,
    pub(crate) previous: TaskDefinitionRef,
    pub(crate) registered_ref: TaskDefinitionRef,
    pub(crate) registered: TaskDefinition,
    pub(crate) convergence: Convergence,
}
