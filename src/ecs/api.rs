// ABOUTME: Capability trait over the ECS control plane.
// ABOUTME: The deployment pipeline only talks to ECS through these four calls.

use async_trait::async_trait;

use super::error::ApiError;
use super::types::{ServiceState, ServiceUpdate, TaskDefinitionRequest};
use crate::types::{ClusterName, ServiceName, TaskDefinitionRef};
use aws_sdk_ecs::types::TaskDefinition;

/// Orchestration operations consumed by a deployment.
///
/// Every call is a single request: implementations must not retry, the
/// pipeline treats the first failure as final.
#[async_trait]
pub trait EcsApi: Send + Sync {
    /// Read the current state of one service.
    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceState, ApiError>;

    /// Fetch a registered task definition by ARN or `family:revision`.
    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ApiError>;

    /// Register a new revision; the returned definition carries its ARN.
    async fn register_task_definition(
        &self,
        request: TaskDefinitionRequest,
    ) -> Result<TaskDefinition, ApiError>;

    /// Point a service at a task definition.
    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceState, ApiError>;
}
