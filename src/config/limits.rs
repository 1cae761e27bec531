// ABOUTME: Resource limit policy for the registered task definition.
// ABOUTME: Either inherit CPU/memory from the current revision or override both.

use serde::Serialize;

use crate::error::{Error, Result};

pub const DEFAULT_CPU_LIMIT: i32 = 512;
pub const DEFAULT_MEMORY_LIMIT: i32 = 512;

/// CPU units and memory (MiB) to apply to the task and its first container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceLimits {
    cpu: i32,
    memory: i32,
}

impl ResourceLimits {
    pub fn new(cpu: i32, memory: i32) -> Result<Self> {
        if cpu <= 0 {
            return Err(Error::InvalidConfig(format!(
                "cpu limit must be positive, got {cpu}"
            )));
        }
        if memory <= 0 {
            return Err(Error::InvalidConfig(format!(
                "memory limit must be positive, got {memory}"
            )));
        }
        Ok(Self { cpu, memory })
    }

    pub fn cpu(&self) -> i32 {
        self.cpu
    }

    pub fn memory(&self) -> i32 {
        self.memory
    }
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            cpu: DEFAULT_CPU_LIMIT,
            memory: DEFAULT_MEMORY_LIMIT,
        }
    }
}

/// What to do with CPU/memory when deriving the new revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitsPolicy {
    /// Copy task and container CPU/memory from the current revision.
    #[default]
    Inherit,
    /// Set task and first-container CPU/memory to these values.
    Override(ResourceLimits),
}
