// ABOUTME: Orchestration API seam: the operations a deployment needs from ECS.
// ABOUTME: Exports the EcsApi trait, its request/response types and the AWS SDK adapter.

mod api;
mod aws;
mod error;
mod types;

pub use api::EcsApi;
pub use aws::AwsEcs;
pub use error::{ApiError, MalformedResponseSnafu, RequestSnafu, ServiceNotFoundSnafu};
pub use types::{ActiveDeployment, ServiceState, ServiceUpdate, TaskDefinitionRequest};

/// Task definition records are passed through as the SDK models them.
pub use aws_sdk_ecs::types::{ContainerDefinition, KeyValuePair, TaskDefinition};
