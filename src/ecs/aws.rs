// ABOUTME: EcsApi implementation backed by the official AWS SDK.
// ABOUTME: Loads the default credential chain and maps SDK responses to pipeline types.

use async_trait::async_trait;
use aws_sdk_ecs::Client;
use aws_sdk_ecs::config::Region;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_ecs::types::{Service, TaskDefinition};
use snafu::OptionExt;

use super::api::EcsApi;
use super::error::{ApiError, MalformedResponseSnafu, RequestSnafu, ServiceNotFoundSnafu};
use super::types::{ActiveDeployment, ServiceState, ServiceUpdate, TaskDefinitionRequest};
use crate::types::{ClusterName, DeploymentId, ServiceName, TaskDefinitionRef};

/// Deployments in this state no longer count as active.
const INACTIVE: &str = "INACTIVE";

/// ECS client for one invocation.
#[derive(Debug, Clone)]
pub struct AwsEcs {
    client: Client,
}

impl AwsEcs {
    /// Resolve the default AWS configuration, overriding the region if given.
    pub async fn connect(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(Region::new(region.to_string()));
        }
        let sdk_config = loader.load().await;

        match sdk_config.region() {
            Some(region) => tracing::debug!(%region, "resolved AWS configuration"),
            None => tracing::warn!("no AWS region configured; ECS calls will fail"),
        }

        Self::from_client(Client::new(&sdk_config))
    }

    /// Wrap an already configured SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EcsApi for AwsEcs {
    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceState, ApiError> {
        let output = self
            .client
            .describe_services()
            .cluster(cluster.as_str())
            .services(service.as_str())
            .send()
            .await
            .map_err(|e| request_error("DescribeServices", &e))?;

        let not_found = || {
            let reason = output
                .failures()
                .first()
                .and_then(|f| f.reason())
                .unwrap_or("MISSING");
            ServiceNotFoundSnafu {
                cluster: cluster.as_str(),
                service: service.as_str(),
                reason,
            }
        };

        let found = output.services().first().context(not_found())?;
        if found.status() == Some(INACTIVE) {
            return not_found().fail();
        }

        service_state("DescribeServices", found)
    }

    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ApiError> {
        let output = self
            .client
            .describe_task_definition()
            .task_definition(reference.as_str())
            .send()
            .await
            .map_err(|e| request_error("DescribeTaskDefinition", &e))?;

        output
            .task_definition()
            .cloned()
            .context(MalformedResponseSnafu {
                operation: "DescribeTaskDefinition",
                detail: "response has no taskDefinition",
            })
    }

    // Inference accelerators are deprecated upstream; old revisions still carry them.
    #[allow(deprecated)]
    async fn register_task_definition(
        &self,
        request: TaskDefinitionRequest,
    ) -> Result<TaskDefinition, ApiError> {
        tracing::debug!(family = ?request.family, "registering task definition");

        let output = self
            .client
            .register_task_definition()
            .set_family(request.family)
            .set_container_definitions(Some(request.container_definitions.into()))
            .set_cpu(request.cpu)
            .set_memory(request.memory)
            .set_task_role_arn(request.task_role_arn)
            .set_execution_role_arn(request.execution_role_arn)
            .set_network_mode(request.network_mode)
            .set_volumes(request.volumes)
            .set_placement_constraints(request.placement_constraints)
            .set_requires_compatibilities(request.requires_compatibilities)
            .set_pid_mode(request.pid_mode)
            .set_ipc_mode(request.ipc_mode)
            .set_proxy_configuration(request.proxy_configuration)
            .set_inference_accelerators(request.inference_accelerators)
            .set_ephemeral_storage(request.ephemeral_storage)
            .set_runtime_platform(request.runtime_platform)
            .set_enable_fault_injection(request.enable_fault_injection)
            .send()
            .await
            .map_err(|e| request_error("RegisterTaskDefinition", &e))?;

        output
            .task_definition()
            .cloned()
            .context(MalformedResponseSnafu {
                operation: "RegisterTaskDefinition",
                detail: "response has no taskDefinition",
            })
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceState, ApiError> {
        let output = self
            .client
            .update_service()
            .cluster(update.cluster.as_str())
            .service(update.service.as_str())
            .task_definition(update.task_definition.as_str())
            .desired_count(update.desired_count)
            .send()
            .await
            .map_err(|e| request_error("UpdateService", &e))?;

        let service = output.service().context(MalformedResponseSnafu {
            operation: "UpdateService",
            detail: "response has no service",
        })?;
        service_state("UpdateService", service)
    }
}

// =============================================================================
// Response Mapping Helpers
// =============================================================================

fn request_error<E: std::error::Error>(operation: &'static str, err: &E) -> ApiError {
    RequestSnafu {
        operation,
        message: DisplayErrorContext(err).to_string(),
    }
    .build()
}

fn service_state(operation: &'static str, service: &Service) -> Result<ServiceState, ApiError> {
    let deployments = service
        .deployments()
        .iter()
        .filter(|d| d.status() != Some(INACTIVE))
        .map(|d| {
            let task_definition = d.task_definition().context(MalformedResponseSnafu {
                operation,
                detail: "deployment has no taskDefinition",
            })?;
            Ok(ActiveDeployment {
                id: d.id().map(DeploymentId::new),
                status: d.status().unwrap_or_default().to_string(),
                task_definition: TaskDefinitionRef::new(task_definition),
                running_count: d.running_count(),
                pending_count: d.pending_count(),
            })
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    Ok(ServiceState {
        service_name: service.service_name().unwrap_or_default().to_string(),
        desired_count: service.desired_count(),
        task_definition: service.task_definition().map(TaskDefinitionRef::new),
        deployments,
    })
}
