// ABOUTME: Type-safe identifiers and validated domain types.
// ABOUTME: Keeps cluster, service, image and task definition references from being swapped.

mod id;
mod image_ref;
mod resource_name;

pub use id::{DeploymentId, Id, TaskDefinitionRef};
pub use image_ref::{ImageRef, ParseImageRefError};
pub use resource_name::{ClusterName, ResourceNameError, ServiceName};
