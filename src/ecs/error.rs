// ABOUTME: Error type for orchestration API calls, using the SNAFU pattern.
// ABOUTME: Carries the failing operation so the pipeline can report it verbatim.

use snafu::Snafu;

/// Failure of a single orchestration API call.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    /// The request could not be sent or the API answered with an error.
    #[snafu(display("{operation} failed: {message}"))]
    Request {
        operation: &'static str,
        message: String,
    },

    /// The service is missing from the cluster (or the cluster is missing).
    #[snafu(display("service {service} not found in cluster {cluster}: {reason}"))]
    ServiceNotFound {
        cluster: String,
        service: String,
        reason: String,
    },

    /// The API answered, but without a field the deployment depends on.
    #[snafu(display("{operation} returned a malformed response: {detail}"))]
    MalformedResponse {
        operation: &'static str,
        detail: String,
    },
}
