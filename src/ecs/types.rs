// ABOUTME: Request and response types exchanged with the orchestration API.
// ABOUTME: ServiceState, ActiveDeployment, ServiceUpdate and TaskDefinitionRequest.

// Inference accelerators are deprecated upstream but still carried by old revisions.
#[allow(deprecated)]
use aws_sdk_ecs::types::{
    Compatibility, ContainerDefinition, EphemeralStorage, InferenceAccelerator, IpcMode,
    NetworkMode, PidMode, ProxyConfiguration, RuntimePlatform, TaskDefinitionPlacementConstraint,
    Volume,
};
use nonempty::NonEmpty;

use crate::types::{ClusterName, DeploymentId, ServiceName, TaskDefinitionRef};

/// Snapshot of a service as reported by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceState {
    /// Service name as the API reports it.
    pub service_name: String,
    /// Number of tasks the service is asked to keep running.
    pub desired_count: i32,
    /// Task definition the service currently points at, if reported.
    pub task_definition: Option<TaskDefinitionRef>,
    /// Active deployments, newest first.
    pub deployments: Vec<ActiveDeployment>,
}

impl ServiceState {
    /// The service has exactly one active deployment and it runs `target`.
    ///
    /// Two or more deployments mean the old revision is still draining.
    pub fn is_converged_on(&self, target: &TaskDefinitionRef) -> bool {
        matches!(self.deployments.as_slice(), [only] if &only.task_definition == target)
    }

    /// Task definition of the first active deployment.
    pub fn primary_task_definition(&self) -> Option<&TaskDefinitionRef> {
        self.deployments.first().map(|d| &d.task_definition)
    }
}

/// One rollout record inside a service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDeployment {
    pub id: Option<DeploymentId>,
    /// `PRIMARY` for the newest rollout, `ACTIVE` for revisions still draining.
    pub status: String,
    pub task_definition: TaskDefinitionRef,
    pub running_count: i32,
    pub pending_count: i32,
}

/// Arguments for pointing a service at a new task definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUpdate {
    pub cluster: ClusterName,
    pub service: ServiceName,
    pub task_definition: TaskDefinitionRef,
    pub desired_count: i32,
}

/// Everything needed to register a new task definition revision.
///
/// Mirrors the registrable part of a `TaskDefinition`; fields the API only
/// reports (ARN, revision, status, timestamps) have no counterpart here.
#[allow(deprecated)]
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinitionRequest {
    pub family: Option<String>,
    pub container_definitions: NonEmpty<ContainerDefinition>,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    pub task_role_arn: Option<String>,
    pub execution_role_arn: Option<String>,
    pub network_mode: Option<NetworkMode>,
    pub volumes: Option<Vec<Volume>>,
    pub placement_constraints: Option<Vec<TaskDefinitionPlacementConstraint>>,
    pub requires_compatibilities: Option<Vec<Compatibility>>,
    pub pid_mode: Option<PidMode>,
    pub ipc_mode: Option<IpcMode>,
    pub proxy_configuration: Option<ProxyConfiguration>,
    pub inference_accelerators: Option<Vec<InferenceAccelerator>>,
    pub ephemeral_storage: Option<EphemeralStorage>,
    pub runtime_platform: Option<RuntimePlatform>,
    pub enable_fault_injection: Option<bool>,
}

impl TaskDefinitionRequest {
    /// The container whose image and environment a deployment rewrites.
    pub fn primary_container(&self) -> &ContainerDefinition {
        &self.container_definitions.head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment(task_definition: &str) -> ActiveDeployment {
        ActiveDeployment {
            id: None,
            status: "PRIMARY".to_string(),
            task_definition: TaskDefinitionRef::new(task_definition),
            running_count: 1,
            pending_count: 0,
        }
    }

    fn state(deployments: Vec<ActiveDeployment>) -> ServiceState {
        ServiceState {
            service_name: "web".to_string(),
            desired_count: 2,
            task_definition: None,
            deployments,
        }
    }

    #[test]
    fn converged_with_single_matching_deployment() {
        let target = TaskDefinitionRef::new("web:4");
        assert!(state(vec![deployment("web:4")]).is_converged_on(&target));
    }

    #[test]
    fn not_converged_while_old_revision_drains() {
        let target = TaskDefinitionRef::new("web:4");
        let draining = state(vec![deployment("web:4"), deployment("web:3")]);
        assert!(!draining.is_converged_on(&target));
    }

    #[test]
    fn not_converged_on_other_revision() {
        let target = TaskDefinitionRef::new("web:4");
        assert!(!state(vec![deployment("web:3")]).is_converged_on(&target));
        assert!(!state(vec![]).is_converged_on(&target));
    }

    #[test]
    fn primary_is_first_deployment() {
        let s = state(vec![deployment("web:4"), deployment("web:3")]);
        assert_eq!(s.primary_task_definition().map(|r| r.as_str()), Some("web:4"));
        assert!(state(vec![]).primary_task_definition().is_none());
    }
}
