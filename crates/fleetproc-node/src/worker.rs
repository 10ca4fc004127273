//! Demo worker shipped with the node binary.
//!
//! Stands in for a real fleet worker: it pretends to relay telemetry
//! frames, one per tick. Each hook shows the responsibility split the
//! controller expects: parameters in `on_setup`, resource wiring in
//! `on_start`, teardown in `on_stop`, one unit of work in `on_tick`.

use async_trait::async_trait;

use fleetproc_process::{HookError, WorkerHooks};

/// The wired "uplink" the relay talks to while started.
#[derive(Debug)]
struct Uplink {
    endpoint: String,
}

/// A worker that relays telemetry frames upstream, one per tick.
#[derive(Debug)]
pub struct TelemetryRelay {
    endpoint: String,
    uplink: Option<Uplink>,
    relayed: u64,
}

impl TelemetryRelay {
    /// Create a relay targeting the default in-process endpoint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_endpoint("mem://telemetry")
    }

    /// Create a relay targeting a specific endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            uplink: None,
            relayed: 0,
        }
    }

    /// Number of frames relayed so far.
    #[must_use]
    pub fn relayed(&self) -> u64 {
        self.relayed
    }
}

impl Default for TelemetryRelay {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkerHooks for TelemetryRelay {
    async fn on_setup(&mut self) -> Result<(), HookError> {
        if self.endpoint.is_empty() {
            return Err(HookError::msg("telemetry endpoint is not configured"));
        }
        tracing::info!(endpoint = %self.endpoint, "telemetry relay configured");
        Ok(())
    }

    async fn on_start(&mut self) -> Result<(), HookError> {
        self.uplink = Some(Uplink {
            endpoint: self.endpoint.clone(),
        });
        tracing::info!(endpoint = %self.endpoint, "telemetry uplink connected");
        Ok(())
    }

    async fn on_stop(&mut self) -> Result<(), HookError> {
        if let Some(uplink) = self.uplink.take() {
            tracing::info!(endpoint = %uplink.endpoint, "telemetry uplink disconnected");
        }
        Ok(())
    }

    async fn on_tick(&mut self) -> Result<(), HookError> {
        let uplink = self
            .uplink
            .as_ref()
            .ok_or_else(|| HookError::msg("tick without a connected uplink"))?;
        self.relayed += 1;
        tracing::trace!(
            endpoint = %uplink.endpoint,
            relayed = self.relayed,
            "telemetry frame relayed"
        );
        Ok(())
    }
}
