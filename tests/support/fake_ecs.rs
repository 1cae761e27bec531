// ABOUTME: In-memory EcsApi fake that records every call.
// ABOUTME: Service reads are scripted; registration hands out the next revision.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use ecs_deploy::ecs::{
    ApiError, EcsApi, RequestSnafu, ServiceState, ServiceUpdate, TaskDefinition,
    TaskDefinitionRequest,
};
use ecs_deploy::types::{ClusterName, ServiceName, TaskDefinitionRef};
use parking_lot::Mutex;

use super::fixtures::{deployment, request_as_definition, task_definition_arn};

/// One recorded API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    DescribeService {
        cluster: String,
        service: String,
    },
    DescribeTaskDefinition(String),
    RegisterTaskDefinition(TaskDefinitionRequest),
    UpdateService(ServiceUpdate),
}

pub fn api_error(operation: &'static str, message: &str) -> ApiError {
    RequestSnafu { operation, message }.build()
}

/// Scripted ECS control plane.
///
/// `describe_service` answers from a queue; the last scripted answer repeats
/// once the queue is down to one entry.
pub struct FakeEcs {
    service_reads: Mutex<VecDeque<Result<ServiceState, ApiError>>>,
    task_definitions: Mutex<HashMap<String, TaskDefinition>>,
    describe_task_definition_error: Option<ApiError>,
    register_error: Option<ApiError>,
    update_error: Option<ApiError>,
    next_revision: Mutex<i32>,
    calls: Mutex<Vec<Call>>,
}

impl FakeEcs {
    pub fn new() -> Self {
        Self {
            service_reads: Mutex::new(VecDeque::new()),
            task_definitions: Mutex::new(HashMap::new()),
            describe_task_definition_error: None,
            register_error: None,
            update_error: None,
            next_revision: Mutex::new(4),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_service_reads(self, reads: Vec<Result<ServiceState, ApiError>>) -> Self {
        *self.service_reads.lock() = reads.into();
        self
    }

    pub fn with_service(self, state: ServiceState) -> Self {
        self.with_service_reads(vec![Ok(state)])
    }

    pub fn with_task_definition(self, definition: TaskDefinition) -> Self {
        let arn = definition.task_definition_arn.clone().unwrap_or_default();
        self.task_definitions.lock().insert(arn, definition);
        self
    }

    pub fn failing_describe_task_definition(mut self, err: ApiError) -> Self {
        self.describe_task_definition_error = Some(err);
        self
    }

    pub fn failing_register(mut self, err: ApiError) -> Self {
        self.register_error = Some(err);
        self
    }

    pub fn failing_update(mut self, err: ApiError) -> Self {
        self.update_error = Some(err);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn describe_service_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::DescribeService { .. }))
            .count()
    }

    pub fn registrations(&self) -> Vec<TaskDefinitionRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::RegisterTaskDefinition(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<ServiceUpdate> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UpdateService(update) => Some(update),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl EcsApi for FakeEcs {
    async fn describe_service(
        &self,
        cluster: &ClusterName,
        service: &ServiceName,
    ) -> Result<ServiceState, ApiError> {
        self.record(Call::DescribeService {
            cluster: cluster.to_string(),
            service: service.to_string(),
        });

        let mut reads = self.service_reads.lock();
        match reads.len() {
            0 => Err(ApiError::ServiceNotFound {
                cluster: cluster.to_string(),
                service: service.to_string(),
                reason: "MISSING".to_string(),
            }),
            1 => reads[0].clone(),
            _ => reads.pop_front().unwrap(),
        }
    }

    async fn describe_task_definition(
        &self,
        reference: &TaskDefinitionRef,
    ) -> Result<TaskDefinition, ApiError> {
        self.record(Call::DescribeTaskDefinition(reference.to_string()));

        if let Some(err) = &self.describe_task_definition_error {
            return Err(err.clone());
        }

        self.task_definitions
            .lock()
            .get(reference.as_str())
            .cloned()
            .ok_or_else(|| {
                api_error(
                    "DescribeTaskDefinition",
                    "ClientException: Unable to describe task definition.",
                )
            })
    }

    async fn register_task_definition(
        &self,
        request: TaskDefinitionRequest,
    ) -> Result<TaskDefinition, ApiError> {
        self.record(Call::RegisterTaskDefinition(request.clone()));

        if let Some(err) = &self.register_error {
            return Err(err.clone());
        }

        let mut next_revision = self.next_revision.lock();
        let revision = *next_revision;
        *next_revision += 1;

        let family = request.family.clone().unwrap_or_default();
        let mut registered = request_as_definition(&request);
        registered.task_definition_arn = Some(task_definition_arn(&family, revision));
        registered.revision = revision;

        self.task_definitions.lock().insert(
            task_definition_arn(&family, revision),
            registered.clone(),
        );

        Ok(registered)
    }

    async fn update_service(&self, update: &ServiceUpdate) -> Result<ServiceState, ApiError> {
        self.record(Call::UpdateService(update.clone()));

        if let Some(err) = &self.update_error {
            return Err(err.clone());
        }

        Ok(ServiceState {
            service_name: update.service.to_string(),
            desired_count: update.desired_count,
            task_definition: Some(update.task_definition.clone()),
            deployments: vec![deployment(update.task_definition.as_str(), "PRIMARY")],
        })
    }
}
