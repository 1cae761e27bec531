// ABOUTME: State transition methods for deployment orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::config::PollingConfig;
use crate::ecs::{EcsApi, MalformedResponseSnafu, ServiceUpdate};
use crate::environment::{EnvLoader, EnvironmentSet};
use crate::output::Output;
use crate::types::TaskDefinitionRef;

use super::Deployment;
use super::error::DeployError;
use super::mutate::mutate;
use super::poll::await_convergence;
use super::state::{
    Completed, DefinitionLoaded, Initialized, Prepared, Registered, ServiceResolved,
    ServiceUpdated,
};
use super::summary::Convergence;

impl<S> Deployment<S> {
    /// Internal helper to move to the next state.
    fn transition<T>(self, state: T) -> Deployment<T> {
        Deployment {
            config: self.config,
            state,
        }
    }
}

// =============================================================================
// Initialized -> ServiceResolved
// =============================================================================

impl Deployment<Initialized> {
    /// Read the service and pick the task definition of its first active deployment.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::ServiceLookup` if the describe call fails or the
    /// service does not exist, and `DeployError::NoActiveDeployment` if the
    /// service has no deployment to derive a revision from.
    #[must_use = "deployment state must be used"]
    pub async fn describe_service<A: EcsApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<Deployment<ServiceResolved>, DeployError> {
        let service = api
            .describe_service(&self.config.cluster, &self.config.service)
            .await
            .map_err(DeployError::ServiceLookup)?;

        let current = service.primary_task_definition().cloned().ok_or_else(|| {
            DeployError::NoActiveDeployment {
                service: self.config.service.clone(),
            }
        })?;

        tracing::info!(
            service = %service.service_name,
            desired_count = service.desired_count,
            deployments = service.deployments.len(),
            %current,
            "described service"
        );

        let desired_count = service.desired_count;
        Ok(self.transition(ServiceResolved {
            desired_count,
            current,
        }))
    }
}

// =============================================================================
// ServiceResolved -> DefinitionLoaded
// =============================================================================

impl Deployment<ServiceResolved> {
    /// Fetch the task definition the service currently runs.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::TaskDefinitionLookup` if the describe call fails.
    #[must_use = "deployment state must be used"]
    pub async fn load_task_definition<A: EcsApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<Deployment<DefinitionLoaded>, DeployError> {
        let Deployment {
            config,
            state:
                ServiceResolved {
                    desired_count,
                    current,
                },
        } = self;

        let definition = api
            .describe_task_definition(&current)
            .await
            .map_err(|source| DeployError::TaskDefinitionLookup {
                reference: current.clone(),
                source,
            })?;

        tracing::info!(
            %current,
            containers = definition.container_definitions.as_ref().map_or(0, Vec::len),
            cpu = ?definition.cpu,
            memory = ?definition.memory,
            "loaded current task definition"
        );

        Ok(Deployment {
            config,
            state: DefinitionLoaded {
                desired_count,
                current_ref: current,
                current: definition,
            },
        })
    }
}

// =============================================================================
// DefinitionLoaded -> Prepared
// =============================================================================

impl Deployment<DefinitionLoaded> {
    /// Resolve the container environment and derive the registration request.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Env` if the environment file cannot be read, and
    /// `DeployError::NoContainerDefinitions` if there is nothing to rewrite.
    #[must_use = "deployment state must be used"]
    pub fn prepare<L: EnvLoader + ?Sized>(
        self,
        loader: &L,
    ) -> Result<Deployment<Prepared>, DeployError> {
        let env = EnvironmentSet::resolve(
            loader,
            &self.config.env_path,
            &self.config.env_overrides,
        )?;

        let request = mutate(&self.state.current, &self.config.image, &env, self.config.limits)?;

        tracing::debug!(
            family = ?request.family,
            image = %self.config.image,
            env_vars = env.len(),
            cpu = ?request.cpu,
            memory = ?request.memory,
            "derived task definition request"
        );

        Ok(Deployment {
            state: Prepared {
                desired_count: self.state.desired_count,
                previous: self.state.current_ref,
                request,
            },
            config: self.config,
        })
    }
}

// =============================================================================
// Prepared -> Registered
// =============================================================================

impl Deployment<Prepared> {
    /// Register the new revision.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Registration` if the call fails or the response
    /// carries no ARN.
    #[must_use = "deployment state must be used"]
    pub async fn register<A: EcsApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<Deployment<Registered>, DeployError> {
        let Deployment {
            config,
            state:
                Prepared {
                    desired_count,
                    previous,
                    request,
                },
        } = self;

        let registered = api
            .register_task_definition(request)
            .await
            .map_err(DeployError::Registration)?;

        let registered_ref = registered
            .task_definition_arn
            .as_deref()
            .map(TaskDefinitionRef::new)
            .ok_or_else(|| {
                DeployError::Registration(
                    MalformedResponseSnafu {
                        operation: "RegisterTaskDefinition",
                        detail: "registered task definition has no ARN",
                    }
                    .build(),
                )
            })?;

        tracing::info!(%registered_ref, revision = registered.revision, "registered task definition");

        Ok(Deployment {
            config,
            state: Registered {
                desired_count,
                previous,
                registered_ref,
                registered,
            },
        })
    }
}

// =============================================================================
// Registered -> ServiceUpdated
// =============================================================================

impl Deployment<Registered> {
    /// Point the service at the registered revision, keeping its desired count.
    ///
    /// A failure here leaves the registered revision in place; it is not
    /// deregistered.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::ServiceUpdate` if the call fails.
    #[must_use = "deployment state must be used"]
    pub async fn update_service<A: EcsApi + ?Sized>(
        self,
        api: &A,
    ) -> Result<Deployment<ServiceUpdated>, DeployError> {
        let update = ServiceUpdate {
            cluster: self.config.cluster.clone(),
            service: self.config.service.clone(),
            task_definition: self.state.registered_ref.clone(),
            desired_count: self.state.desired_count,
        };

        let updated = api
            .update_service(&update)
            .await
            .map_err(DeployError::ServiceUpdate)?;

        match &updated.task_definition {
            Some(reported) if reported != &update.task_definition => tracing::warn!(
                %reported,
                expected = %update.task_definition,
                "service reports a different task definition after update"
            ),
            _ => tracing::info!(task_definition = %update.task_definition, "service updated"),
        }

        let Registered {
            desired_count,
            previous,
            registered_ref,
            registered,
        } = self.state;

        Ok(Deployment {
            config: self.config,
            state: ServiceUpdated {
                desired_count,
                previous,
                registered_ref,
                registered,
            },
        })
    }
}

// =============================================================================
// ServiceUpdated -> Completed
// =============================================================================

impl Deployment<ServiceUpdated> {
    /// Wait until the service runs only the registered revision.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Timeout` if convergence is not observed within
    /// the polling timeout, or `DeployError::ServiceLookup` if a poll fails.
    #[must_use = "deployment state must be used"]
    pub async fn await_convergence<A: EcsApi + ?Sized>(
        self,
        api: &A,
        polling: PollingConfig,
        output: &Output,
    ) -> Result<Deployment<Completed>, DeployError> {
        let report = await_convergence(
            api,
            &self.config.cluster,
            &self.config.service,
            &self.state.registered_ref,
            polling,
            output,
        )
        .await?;

        Ok(self.complete(Convergence::Confirmed {
            polls: report.polls,
            elapsed_secs: report.elapsed.as_secs(),
        }))
    }

    /// Finish without waiting for the rollout.
    pub fn skip_convergence(self) -> Deployment<Completed> {
        self.complete(Convergence::NotChecked)
    }

    fn complete(self, convergence: Convergence) -> Deployment<Completed> {
        let ServiceUpdated {
            desired_count,
            previous,
            registered_ref,
            registered,
        } = self.state;

        Deployment {
            config: self.config,
            state: Completed {
                desired_count,
                previous,
                registered_ref,
                registered,
                convergence,
            },
        }
    }
}
