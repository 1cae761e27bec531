// ABOUTME: Runs the full deployment pipeline against one service.
// ABOUTME: describe -> load -> prepare -> register -> update -> (poll), aborting on first error.

use crate::config::DeployConfig;
use crate::ecs::EcsApi;
use crate::environment::EnvLoader;
use crate::output::Output;

use super::Deployment;
use super::error::DeployError;
use super::summary::Summary;

/// Roll `config.image` and the resolved environment onto the service.
///
/// Steps run strictly in order and nothing is retried or reverted: a failure
/// after registration leaves the new revision registered.
///
/// # Errors
///
/// Returns the `DeployError` of the first step that fails.
pub async fn deploy<A, L>(
    api: &A,
    loader: &L,
    config: DeployConfig,
    output: &Output,
) -> Result<Summary, DeployError>
where
    A: EcsApi + ?Sized,
    L: EnvLoader + ?Sized,
{
    output.progress("Deploy target:");
    output.progress(&format!("Cluster: {}", config.cluster));
    output.progress(&format!("Service: {}", config.service));
    output.progress("");

    let polling = config.polling;
    let deployment = Deployment::new(config);

    let deployment = deployment.describe_service(api).await?;
    let deployment = deployment.load_task_definition(api).await?;

    let (cpu, memory) = deployment.current_limits();
    output.progress(&format!(
        "Current Task Definition ARN: {}",
        deployment.current_task_definition()
    ));
    output.progress(&format!("- CPU: {}", cpu.unwrap_or("-")));
    output.progress(&format!("- Memory: {} MiB", memory.unwrap_or("-")));

    let deployment = deployment.prepare(loader)?;
    let deployment = deployment.register(api).await?;

    output.progress("");
    output.progress("= Updating with new Task Definition...");
    let deployment = deployment.update_service(api).await?;

    let deployment = match polling {
        Some(polling) => {
            output.progress("");
            output.progress("Wait for deployment...");
            deployment.await_convergence(api, polling, output).await?
        }
        None => deployment.skip_convergence(),
    };

    Ok(deployment.summary())
}
