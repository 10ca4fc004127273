//! HTTP heartbeat publisher for the fleet monitor.
//!
//! This module provides the `HttpMonitorSink` for delivering heartbeat
//! messages to the fleet monitor's REST API, and a no-op fallback for
//! nodes running without a monitor.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use fleetproc_core::Heartbeat;
use fleetproc_process::{HeartbeatSink, PublishError};

/// HTTP sink delivering heartbeats to the fleet monitor.
#[derive(Debug, Clone)]
pub struct HttpMonitorSink {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMonitorSink {
    /// Create a new monitor sink.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the fleet monitor (e.g., "http://monitor:8080")
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Create a new monitor sink with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL of the fleet monitor.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Error response from the monitor.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[async_trait]
impl HeartbeatSink for HttpMonitorSink {
    async fn publish(&self, heartbeat: &Heartbeat) -> Result<(), PublishError> {
        let url = format!("{}/v1/heartbeats", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(heartbeat)
            .send()
            .await
            .map_err(|e| PublishError::Transport(format!("monitor request failed: {e}")))?;

        if response.status().is_success() {
            tracing::trace!(
                member_id = %heartbeat.member_id,
                state = %heartbeat.state,
                "heartbeat delivered"
            );
            Ok(())
        } else {
            let status = response.status();
            let error = response
                .json::<ErrorResponse>()
                .await
                .map(|e| e.error)
                .unwrap_or_else(|_| format!("monitor returned status {status}"));

            tracing::warn!(
                member_id = %heartbeat.member_id,
                status = %status,
                error = %error,
                "monitor rejected heartbeat"
            );

            Err(PublishError::Transport(error))
        }
    }
}

/// A no-op sink for when no fleet monitor is configured.
///
/// Heartbeats are logged and dropped so a node can run standalone.
#[derive(Debug, Clone, Default)]
pub struct NoopMonitorSink;

impl NoopMonitorSink {
    /// Create a new no-op sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HeartbeatSink for NoopMonitorSink {
    async fn publish(&self, heartbeat: &Heartbeat) -> Result<(), PublishError> {
        tracing::debug!(
            member_id = %heartbeat.member_id,
            state = %heartbeat.state,
            kind = ?heartbeat.kind,
            "NoopMonitorSink: dropping heartbeat, no monitor configured"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetproc_core::{HeartbeatKind, ProcessIdentity, ProcessState};
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_heartbeat() -> Heartbeat {
        let identity = ProcessIdentity::new("d1", "h1");
        Heartbeat::new(&identity, ProcessState::Running, HeartbeatKind::Periodic)
    }

    #[tokio::test]
    async fn publishes_heartbeat_as_json() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/heartbeats"))
            .and(body_string_contains("\"member_id\":\"d1\""))
            .and(body_string_contains("\"state\":\"running\""))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&mock_server)
            .await;

        let sink = HttpMonitorSink::new(mock_server.uri());
        sink.publish(&sample_heartbeat()).await.unwrap();
    }

    #[tokio::test]
    async fn monitor_error_body_is_surfaced() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/heartbeats"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({ "error": "monitor overloaded" })),
            )
            .mount(&mock_server)
            .await;

        let sink = HttpMonitorSink::new(mock_server.uri());
        let err = sink.publish(&sample_heartbeat()).await.unwrap_err();
        assert!(matches!(err, PublishError::Transport(_)));
        assert!(err.to_string().contains("monitor overloaded"));
    }

    #[tokio::test]
    async fn non_json_error_falls_back_to_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/heartbeats"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let sink = HttpMonitorSink::new(mock_server.uri());
        let err = sink.publish(&sample_heartbeat()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn noop_sink_always_succeeds() {
        let sink = NoopMonitorSink::new();
        sink.publish(&sample_heartbeat()).await.unwrap();
    }

    #[test]
    fn http_sink_creation() {
        let sink = HttpMonitorSink::new("http://localhost:8080");
        assert_eq!(sink.base_url(), "http://localhost:8080");
    }
}
