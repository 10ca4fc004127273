//! Controller configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the lifecycle controller and its reporter.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessConfig {
    /// Heartbeat cadence in seconds.
    #[serde(default = "ProcessConfig::default_heartbeat_interval")]
    pub heartbeat_interval_seconds: u64,
}

impl ProcessConfig {
    const fn default_heartbeat_interval() -> u64 {
        1
    }

    /// Get the heartbeat cadence as a `Duration`.
    #[must_use]
    pub const fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_seconds)
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval_seconds: Self::default_heartbeat_interval(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ProcessConfig::default();
        assert_eq!(config.heartbeat_interval_seconds, 1);
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(1));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ProcessConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.heartbeat_interval_seconds, 1);
    }
}
