// ABOUTME: Convergence poller: waits until the new revision is the only active deployment.
// ABOUTME: Explicit Polling/Done state machine with an elapsed-time guard per iteration.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::PollingConfig;
use crate::ecs::EcsApi;
use crate::output::Output;
use crate::types::{ClusterName, ServiceName, TaskDefinitionRef};

use super::error::DeployError;

/// Outcome of a successful wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// Number of service descriptions issued, including the converged one.
    pub polls: u32,
    /// Time since polling began when convergence was observed.
    pub elapsed: Duration,
}

#[derive(Debug)]
enum PollState {
    Polling { polls: u32 },
    Done(Result<PollReport, DeployError>),
}

/// Poll the service until `target` is its only active deployment.
///
/// The timeout is checked at the top of every iteration, so once it has
/// passed no further describe call is made. A describe failure ends the wait
/// immediately.
///
/// # Errors
///
/// Returns `DeployError::Timeout` when the timeout elapses first, or
/// `DeployError::ServiceLookup` when describing the service fails.
pub async fn await_convergence<A: EcsApi + ?Sized>(
    api: &A,
    cluster: &ClusterName,
    service: &ServiceName,
    target: &TaskDefinitionRef,
    polling: PollingConfig,
    output: &Output,
) -> Result<PollReport, DeployError> {
    let started = Instant::now();
    let mut state = PollState::Polling { polls: 0 };

    loop {
        state = match state {
            PollState::Done(outcome) => return outcome,
            PollState::Polling { polls } => {
                let elapsed = started.elapsed();
                if elapsed > polling.timeout() {
                    tracing::warn!(%target, polls, ?elapsed, "gave up waiting for convergence");
                    output.progress("Timeout and abort.");
                    PollState::Done(Err(DeployError::Timeout {
                        task_definition: target.clone(),
                        timeout_secs: polling.timeout().as_secs(),
                        polls,
                    }))
                } else {
                    match api.describe_service(cluster, service).await {
                        Err(e) => PollState::Done(Err(DeployError::ServiceLookup(e))),
                        Ok(current) if current.is_converged_on(target) => {
                            tracing::info!(%target, polls = polls + 1, "service converged");
                            PollState::Done(Ok(PollReport {
                                polls: polls + 1,
                                elapsed,
                            }))
                        }
                        Ok(current) => {
                            if let Some(primary) = current.deployments.first() {
                                tracing::debug!(
                                    deployments = current.deployments.len(),
                                    id = ?primary.id,
                                    status = %primary.status,
                                    task_definition = %primary.task_definition,
                                    running = primary.running_count,
                                    pending = primary.pending_count,
                                    "service not converged yet"
                                );
                            }
                            tokio::time::sleep(polling.interval()).await;
                            output.progress(&format!(
                                "Time elapsed: {}s",
                                started.elapsed().as_secs()
                            ));
                            PollState::Polling { polls: polls + 1 }
                        }
                    }
                }
            }
        };
    }
}
