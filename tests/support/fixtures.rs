// ABOUTME: Shared fixtures: the "web" service in cluster "prod" running revision 3.
// ABOUTME: Builds task definitions, service states and deploy configs for tests.

use std::io::Write;
use std::path::Path;

use ecs_deploy::config::DeployConfig;
use ecs_deploy::ecs::{
    ActiveDeployment, ContainerDefinition, KeyValuePair, ServiceState, TaskDefinition,
    TaskDefinitionRequest,
};
use ecs_deploy::types::{ClusterName, DeploymentId, ImageRef, ServiceName, TaskDefinitionRef};

#[allow(deprecated)]
use aws_sdk_ecs::types::{
    Compatibility, CpuArchitecture, EphemeralStorage, InferenceAccelerator, IpcMode, NetworkMode,
    OsFamily, PidMode, ProxyConfiguration, ProxyConfigurationType, RuntimePlatform,
    TaskDefinitionPlacementConstraint, TaskDefinitionPlacementConstraintType,
    TaskDefinitionStatus, Volume,
};

pub const REV3_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:3";
pub const REV4_ARN: &str = "arn:aws:ecs:us-east-1:123456789012:task-definition/web:4";

pub fn task_definition_arn(family: &str, revision: i32) -> String {
    format!("arn:aws:ecs:us-east-1:123456789012:task-definition/{family}:{revision}")
}

/// Revision 3 of "web": app container on app:1.0 plus a log router sidecar.
///
/// Every registrable field carries a non-default value.
#[allow(deprecated)]
pub fn web_rev3() -> TaskDefinition {
    TaskDefinition::builder()
        .task_definition_arn(REV3_ARN)
        .family("web")
        .revision(3)
        .status(TaskDefinitionStatus::Active)
        .compatibilities(Compatibility::Ec2)
        .compatibilities(Compatibility::Fargate)
        .registered_by("arn:aws:iam::123456789012:user/ci")
        .cpu("512")
        .memory("1024")
        .network_mode(NetworkMode::Awsvpc)
        .task_role_arn("arn:aws:iam::123456789012:role/web-task")
        .execution_role_arn("arn:aws:iam::123456789012:role/web-exec")
        .requires_compatibilities(Compatibility::Fargate)
        .volumes(Volume::builder().name("scratch").build())
        .placement_constraints(
            TaskDefinitionPlacementConstraint::builder()
                .r#type(TaskDefinitionPlacementConstraintType::MemberOf)
                .expression("attribute:ecs.availability-zone in [us-east-1a]")
                .build(),
        )
        .pid_mode(PidMode::Task)
        .ipc_mode(IpcMode::Task)
        .proxy_configuration(
            ProxyConfiguration::builder()
                .r#type(ProxyConfigurationType::Appmesh)
                .container_name("envoy")
                .properties(KeyValuePair::builder().name("AppPorts").value("80").build())
                .build()
                .unwrap(),
        )
        .inference_accelerators(
            InferenceAccelerator::builder()
                .device_name("gpu0")
                .device_type("eia2.medium")
                .build()
                .unwrap(),
        )
        .ephemeral_storage(EphemeralStorage::builder().size_in_gib(40).build())
        .runtime_platform(
            RuntimePlatform::builder()
                .cpu_architecture(CpuArchitecture::Arm64)
                .operating_system_family(OsFamily::Linux)
                .build(),
        )
        .enable_fault_injection(true)
        .container_definitions(
            ContainerDefinition::builder()
                .name("app")
                .image("app:1.0")
                .cpu(256)
                .memory(512)
                .environment(KeyValuePair::builder().name("PORT").value("80").build())
                .build(),
        )
        .container_definitions(
            ContainerDefinition::builder()
                .name("log-router")
                .image("fluent-bit:2")
                .build(),
        )
        .build()
}

/// The registrable part of `definition`: fields only the API reports are cleared.
pub fn registrable(definition: &TaskDefinition) -> TaskDefinition {
    let mut definition = definition.clone();
    definition.task_definition_arn = None;
    definition.revision = 0;
    definition.status = None;
    definition.requires_attributes = None;
    definition.compatibilities = None;
    definition.registered_at = None;
    definition.deregistered_at = None;
    definition.delete_requested_at = None;
    definition.registered_by = None;
    definition
}

/// The task definition a register request describes, before the API assigns
/// its ARN and revision.
#[allow(deprecated)]
pub fn request_as_definition(request: &TaskDefinitionRequest) -> TaskDefinition {
    TaskDefinition::builder()
        .set_family(request.family.clone())
        .set_container_definitions(Some(request.container_definitions.clone().into()))
        .set_cpu(request.cpu.clone())
        .set_memory(request.memory.clone())
        .set_task_role_arn(request.task_role_arn.clone())
        .set_execution_role_arn(request.execution_role_arn.clone())
        .set_network_mode(request.network_mode.clone())
        .set_volumes(request.volumes.clone())
        .set_placement_constraints(request.placement_constraints.clone())
        .set_requires_compatibilities(request.requires_compatibilities.clone())
        .set_pid_mode(request.pid_mode.clone())
        .set_ipc_mode(request.ipc_mode.clone())
        .set_proxy_configuration(request.proxy_configuration.clone())
        .set_inference_accelerators(request.inference_accelerators.clone())
        .set_ephemeral_storage(request.ephemeral_storage.clone())
        .set_runtime_platform(request.runtime_platform.clone())
        .set_enable_fault_injection(request.enable_fault_injection)
        .build()
}

pub fn deployment(task_definition: &str, status: &str) -> ActiveDeployment {
    ActiveDeployment {
        id: Some(DeploymentId::new("ecs-svc/1234567890")),
        status: status.to_string(),
        task_definition: TaskDefinitionRef::new(task_definition),
        running_count: 2,
        pending_count: 0,
    }
}

/// Service state listing the given task definitions, newest first.
pub fn service_state(task_definitions: &[&str], desired_count: i32) -> ServiceState {
    let deployments = task_definitions
        .iter()
        .enumerate()
        .map(|(i, td)| deployment(td, if i == 0 { "PRIMARY" } else { "ACTIVE" }))
        .collect();

    ServiceState {
        service_name: "web".to_string(),
        desired_count,
        task_definition: task_definitions.first().map(|td| TaskDefinitionRef::new(*td)),
        deployments,
    }
}

/// Deploy "app:2.0" to prod/web with the given env file and no polling.
pub fn deploy_config(env_path: &Path) -> DeployConfig {
    let mut config = DeployConfig::new(
        ClusterName::new("prod").unwrap(),
        ServiceName::new("web").unwrap(),
        ImageRef::parse("app:2.0").unwrap(),
    );
    config.env_path = env_path.to_path_buf();
    config
}

/// Write a dotenv file with the given lines.
pub fn env_file(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}
