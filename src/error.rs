// ABOUTME: Application-wide error types for ecs-deploy.
// ABOUTME: Uses thiserror; pipeline failures keep their originating DeployError.

use thiserror::Error;

use crate::deploy::DeployError;
use crate::environment::EnvError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error(transparent)]
    Deploy(#[from] DeployError),
}

pub type Result<T> = std::result::Result<T, Error>;
