// ABOUTME: Library root for ecs-deploy - exposes the deployment pipeline and its types.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod ecs;
pub mod environment;
pub mod error;
pub mod output;
pub mod types;
