// ABOUTME: Validated ECS cluster and service names.
// ABOUTME: Accepts plain names (letters, digits, hyphens, underscores) or full ARNs.

use std::fmt;
use thiserror::Error;

const MAX_NAME_LEN: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceNameError {
    #[error("{0} name cannot be empty")]
    Empty(&'static str),

    #[error("{0} name exceeds maximum length of 255 characters")]
    TooLong(&'static str),

    #[error("invalid character in {0} name: '{1}'")]
    InvalidChar(&'static str, char),
}

/// Validate a resource name, returning the trimmed form.
///
/// ARNs are passed through untouched apart from a whitespace check; the API
/// is the authority on their structure.
fn validate(kind: &'static str, value: &str) -> Result<String, ResourceNameError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ResourceNameError::Empty(kind));
    }

    if value.starts_with("arn:") {
        if let Some(c) = value.chars().find(|c| c.is_whitespace()) {
            return Err(ResourceNameError::InvalidChar(kind, c));
        }
        return Ok(value.to_string());
    }

    if value.len() > MAX_NAME_LEN {
        return Err(ResourceNameError::TooLong(kind));
    }

    for c in value.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
            return Err(ResourceNameError::InvalidChar(kind, c));
        }
    }

    Ok(value.to_string())
}

/// Name or ARN of the cluster hosting the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterName(String);

impl ClusterName {
    pub fn new(value: &str) -> Result<Self, ResourceNameError> {
        validate("cluster", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name or ARN of the service being deployed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceName(String);

impl ServiceName {
    pub fn new(value: &str) -> Result<Self, ResourceNameError> {
        validate("service", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
