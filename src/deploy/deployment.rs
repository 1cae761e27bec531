// ABOUTME: Generic deployment struct parameterized by state.
// ABOUTME: State types carry their own data for compile-time guarantees.

use crate::config::DeployConfig;
use crate::types::TaskDefinitionRef;

use super::state::{Completed, DefinitionLoaded, Initialized};
use super::summary::Summary;

/// A deployment in progress, parameterized by its current state.
///
/// The state type parameter `S` carries what earlier steps learned (current
/// revision, desired count, registered ARN), so a step can only be called once
/// the data it depends on exists.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) config: DeployConfig,
    pub(crate) state: S,
}

impl Deployment<Initialized> {
    /// Start a deployment for the given configuration.
    pub fn new(config: DeployConfig) -> Self {
        Deployment {
            config,
            state: Initialized,
        }
    }
}

impl Deployment<DefinitionLoaded> {
    pub fn current_task_definition(&self) -> &TaskDefinitionRef {
        &self.state.current_ref
    }

    /// CPU units and memory of the current revision, as the API reports them.
    pub fn current_limits(&self) -> (Option<&str>, Option<&str>) {
        (
            self.state.current.cpu.as_deref(),
            self.state.current.memory.as_deref(),
        )
    }
}

impl Deployment<Completed> {
    /// Summarize the finished deployment.
    pub fn summary(&self) -> Summary {
        Summary {
            cluster: self.config.cluster.to_string(),
            service: self.config.service.to_string(),
            image: self.config.image.to_string(),
            previous_task_definition: self.state.previous.clone(),
            task_definition: self.state.registered_ref.clone(),
            revision: self.state.registered.revision,
            cpu: self.state.registered.cpu.clone(),
            memory: self.state.registered.memory.clone(),
            desired_count: self.state.desired_count,
            convergence: self.state.convergence,
        }
    }
}
