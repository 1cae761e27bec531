// ABOUTME: Convergence polling settings.
// ABOUTME: Interval must be positive and strictly shorter than the timeout.

use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_POLLING_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_POLLING_TIMEOUT_SECS: u64 = 600;

/// How often and for how long to wait for the service to converge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    interval: Duration,
    timeout: Duration,
}

impl PollingConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::InvalidConfig(
                "polling interval must be greater than zero".to_string(),
            ));
        }
        if interval >= timeout {
            return Err(Error::InvalidConfig(format!(
                "polling interval ({}s) must be shorter than polling timeout ({}s)",
                interval.as_secs(),
                timeout.as_secs()
            )));
        }
        Ok(Self { interval, timeout })
    }

    pub fn from_secs(interval: u64, timeout: u64) -> Result<Self> {
        Self::new(Duration::from_secs(interval), Duration::from_secs(timeout))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLLING_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_POLLING_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_ten_seconds_and_ten_minutes() {
        let polling = PollingConfig::default();
        assert_eq!(polling.interval(), Duration::from_secs(10));
        assert_eq!(polling.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn zero_interval_rejected() {
        let err = PollingConfig::from_secs(0, 600).unwrap_err();
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn interval_must_be_shorter_than_timeout() {
        assert!(PollingConfig::from_secs(600, 600).is_err());
        assert!(PollingConfig::from_secs(700, 600).is_err());
        assert!(PollingConfig::from_secs(599, 600).is_ok());
    }
}
