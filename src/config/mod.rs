// ABOUTME: Immutable deployment configuration built once at the CLI boundary.
// ABOUTME: Groups target, image, environment sources, polling and resource limits.

mod limits;
mod polling;

pub use limits::{DEFAULT_CPU_LIMIT, DEFAULT_MEMORY_LIMIT, LimitsPolicy, ResourceLimits};
pub use polling::{DEFAULT_POLLING_INTERVAL_SECS, DEFAULT_POLLING_TIMEOUT_SECS, PollingConfig};

use std::collections::HashMap;
use std::path::PathBuf;

use crate::types::{ClusterName, ImageRef, ServiceName};

/// Default location of the dotenv file holding the container environment.
pub const DEFAULT_ENV_PATH: &str = ".deploy.env";

/// Everything one deployment run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub cluster: ClusterName,
    pub service: ServiceName,
    /// Overrides the region from the AWS configuration chain.
    pub region: Option<String>,
    pub image: ImageRef,
    /// Dotenv file with the base container environment.
    pub env_path: PathBuf,
    /// Extra variables; keys are upper-cased and win over the file.
    pub env_overrides: HashMap<String, String>,
    /// `None` disables waiting for convergence.
    pub polling: Option<PollingConfig>,
    pub limits: LimitsPolicy,
}

impl DeployConfig {
    /// Configuration with defaults for everything but the target and image.
    pub fn new(cluster: ClusterName, service: ServiceName, image: ImageRef) -> Self {
        DeployConfig {
            cluster,
            service,
            region: None,
            image,
            env_path: PathBuf::from(DEFAULT_ENV_PATH),
            env_overrides: HashMap::new(),
            polling: None,
            limits: LimitsPolicy::Inherit,
        }
    }
}
