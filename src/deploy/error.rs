// ABOUTME: Error types for the deployment pipeline.
// ABOUTME: One variant per failing step; API causes are kept as the error source.

use crate::ecs::ApiError;
use crate::environment::EnvError;
use crate::types::{ServiceName, TaskDefinitionRef};

/// Errors that abort a deployment. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    /// The container environment could not be built.
    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    /// Describing the service failed, or the service/cluster does not exist.
    #[error("failed to describe service: {0}")]
    ServiceLookup(#[source] ApiError),

    /// Describing the service's current task definition failed.
    #[error("failed to describe task definition {reference}: {source}")]
    TaskDefinitionLookup {
        reference: TaskDefinitionRef,
        #[source]
        source: ApiError,
    },

    /// Registering the new revision failed.
    #[error("failed to register task definition: {0}")]
    Registration(#[source] ApiError),

    /// Pointing the service at the new revision failed.
    ///
    /// The registered revision is left in place.
    #[error("failed to update service: {0}")]
    ServiceUpdate(#[source] ApiError),

    /// The service reports no active deployment to derive a revision from.
    #[error("service {service} has no active deployment to base the new task definition on")]
    NoActiveDeployment { service: ServiceName },

    /// The current task definition has no container definitions to rewrite.
    #[error("task definition {reference} has no container definitions")]
    NoContainerDefinitions { reference: String },

    /// The service did not converge on the new revision in time.
    ///
    /// Registration and the service update already succeeded.
    #[error(
        "deployment timeout: {task_definition} not the only active deployment after {timeout_secs}s, please check application log"
    )]
    Timeout {
        task_definition: TaskDefinitionRef,
        timeout_secs: u64,
        polls: u32,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    Env,
    ServiceLookup,
    TaskDefinitionLookup,
    Registration,
    ServiceUpdate,
    /// Service state violates a precondition (no active deployment).
    State,
    /// Task definition cannot be mutated (no container definitions).
    Mutation,
    Timeout,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Env(_) => DeployErrorKind::Env,
            DeployError::ServiceLookup(_) => DeployErrorKind::ServiceLookup,
            DeployError::TaskDefinitionLookup { .. } => DeployErrorKind::TaskDefinitionLookup,
            DeployError::Registration(_) => DeployErrorKind::Registration,
            DeployError::ServiceUpdate(_) => DeployErrorKind::ServiceUpdate,
            DeployError::NoActiveDeployment { .. } => DeployErrorKind::State,
            DeployError::NoContainerDefinitions { .. } => DeployErrorKind::Mutation,
            DeployError::Timeout { .. } => DeployErrorKind::Timeout,
        }
    }

    /// Returns the underlying API error for failed orchestration calls.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            DeployError::ServiceLookup(source)
            | DeployError::Registration(source)
            | DeployError::ServiceUpdate(source)
            | DeployError::TaskDefinitionLookup { source, .. } => Some(source),
            _ => None,
        }
    }
}
