// ABOUTME: Derives the registration request for a new task definition revision.
// ABOUTME: Rewrites image, environment and optionally CPU/memory; everything else is copied.

use nonempty::NonEmpty;

use crate::config::LimitsPolicy;
use crate::ecs::{TaskDefinition, TaskDefinitionRequest};
use crate::environment::EnvironmentSet;
use crate::types::ImageRef;

use super::error::DeployError;

/// Build the request that registers `current` with a new image and environment.
///
/// Only the first container definition is rewritten. Under
/// [`LimitsPolicy::Override`] the task-level CPU/memory become the decimal
/// strings of the limits and the first container gets the same numbers.
///
/// # Errors
///
/// Returns `DeployError::NoContainerDefinitions` if `current` has no
/// container definitions.
pub fn mutate(
    current: &TaskDefinition,
    image: &ImageRef,
    env: &EnvironmentSet,
    limits: LimitsPolicy,
) -> Result<TaskDefinitionRequest, DeployError> {
    let containers = current.container_definitions.clone().unwrap_or_default();
    let mut containers =
        NonEmpty::from_vec(containers).ok_or_else(|| DeployError::NoContainerDefinitions {
            reference: describe(current),
        })?;

    let primary = &mut containers.head;
    primary.image = Some(image.to_string());
    primary.environment = Some(env.to_key_value_pairs());

    let (cpu, memory) = match limits {
        LimitsPolicy::Inherit => (current.cpu.clone(), current.memory.clone()),
        LimitsPolicy::Override(limits) => {
            primary.cpu = limits.cpu();
            primary.memory = Some(limits.memory());
            (
                Some(limits.cpu().to_string()),
                Some(limits.memory().to_string()),
            )
        }
    };

    Ok(TaskDefinitionRequest {
        family: current.family.clone(),
        container_definitions: containers,
        cpu,
        memory,
        task_role_arn: current.task_role_arn.clone(),
        execution_role_arn: current.execution_role_arn.clone(),
        network_mode: current.network_mode.clone(),
        volumes: current.volumes.clone(),
        placement_constraints: current.placement_constraints.clone(),
        requires_compatibilities: current.requires_compatibilities.clone(),
        pid_mode: current.pid_mode.clone(),
        ipc_mode: current.ipc_mode.clone(),
        proxy_configuration: current.proxy_configuration.clone(),
        inference_accelerators: current.inference_accelerators.clone(),
        ephemeral_storage: current.ephemeral_storage.clone(),
        runtime_platform: current.runtime_platform.clone(),
        enable_fault_injection: current.enable_fault_injection,
    })
}

/// Best available name for a task definition in error messages.
fn describe(definition: &TaskDefinition) -> String {
    match (&definition.task_definition_arn, &definition.family) {
        (Some(arn), _) => arn.clone(),
        (None, Some(family)) => format!("{}:{}", family, definition.revision),
        (None, None) => "<unnamed>".to_string(),
    }
}
