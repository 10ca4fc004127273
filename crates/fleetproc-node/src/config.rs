//! Node configuration.
//!
//! Loaded from `FLEETPROC_*` environment variables with sensible defaults,
//! so a node can come up with nothing but a member id.

use std::time::Duration;

use fleetproc_core::ProcessIdentity;

/// Configuration for a worker node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Listen address for the HTTP control surface.
    pub listen_addr: String,
    /// Fleet member this process belongs to.
    pub member_id: String,
    /// Host the process is executing on.
    pub host_id: String,
    /// Base URL of the fleet monitor; heartbeats are dropped (with a log
    /// line) when unset.
    pub monitor_url: Option<String>,
    /// Heartbeat cadence in seconds.
    pub heartbeat_interval_seconds: u64,
    /// Cadence of the worker's own tick loop in milliseconds.
    pub tick_interval_millis: u64,
}

impl NodeConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8080".to_string()
    }

    const fn default_heartbeat_interval() -> u64 {
        1
    }

    const fn default_tick_interval() -> u64 {
        100
    }

    /// Load configuration from the environment.
    ///
    /// Variables: `FLEETPROC_LISTEN_ADDR`, `FLEETPROC_MEMBER_ID`,
    /// `FLEETPROC_HOST_ID` (falls back to `HOSTNAME`),
    /// `FLEETPROC_MONITOR_URL`, `FLEETPROC_HEARTBEAT_INTERVAL_SECONDS`,
    /// `FLEETPROC_TICK_INTERVAL_MILLIS`.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            listen_addr: std::env::var("FLEETPROC_LISTEN_ADDR")
                .unwrap_or(defaults.listen_addr),
            member_id: std::env::var("FLEETPROC_MEMBER_ID").unwrap_or(defaults.member_id),
            host_id: std::env::var("FLEETPROC_HOST_ID")
                .or_else(|_| std::env::var("HOSTNAME"))
                .unwrap_or(defaults.host_id),
            monitor_url: std::env::var("FLEETPROC_MONITOR_URL").ok(),
            heartbeat_interval_seconds: std::env::var("FLEETPROC_HEARTBEAT_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.heartbeat_interval_seconds),
            tick_interval_millis: std::env::var("FLEETPROC_TICK_INTERVAL_MILLIS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.tick_interval_millis),
        }
    }

    /// The process identity derived from this configuration.
    #[must_use]
    pub fn identity(&self) -> ProcessIdentity {
        ProcessIdentity::new(self.member_id.as_str(), self.host_id.as_str())
    }

    /// Heartbeat cadence as a `Duration`.
    #[must_use]
    pub const fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_seconds)
    }

    /// Tick-loop cadence as a `Duration`.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_millis)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            member_id: "member-0".to_string(),
            host_id: "localhost".to_string(),
            monitor_url: None,
            heartbeat_interval_seconds: Self::default_heartbeat_interval(),
            tick_interval_millis: Self::default_tick_interval(),
        }
    }
}
