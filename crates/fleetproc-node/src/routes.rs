//! Router configuration for the control surface.
//!
//! # Routes
//!
//! ## Public
//! - `GET /health` - Health check
//!
//! ## Control
//! - `POST /v1/process/start` - Start the process
//! - `POST /v1/process/stop` - Stop the process
//! - `GET  /v1/process/running` - Is the process running
//! - `GET  /v1/process/state` - Full status snapshot
//!
//! Control requests carry empty payloads; the responses carry nothing but
//! success/failure (and the boolean for the running query), mirroring the
//! fleet control contract.

use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use fleetproc_process::{HeartbeatSink, ProcessService, ProcessStatus, WorkerHooks};

use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Response for the running query.
#[derive(Debug, Serialize)]
pub struct RunningResponse {
    /// True if and only if the current state is `Running`.
    pub running: bool,
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "fleetproc-node",
    })
}

async fn start_handler<H, S>(
    State(service): State<ProcessService<H, S>>,
) -> Result<StatusCode, ApiError>
where
    H: WorkerHooks + 'static,
    S: HeartbeatSink + 'static,
{
    service.handle_start().await?;
    Ok(StatusCode::OK)
}

async fn stop_handler<H, S>(
    State(service): State<ProcessService<H, S>>,
) -> Result<StatusCode, ApiError>
where
    H: WorkerHooks + 'static,
    S: HeartbeatSink + 'static,
{
    service.handle_stop().await?;
    Ok(StatusCode::OK)
}

async fn running_handler<H, S>(
    State(service): State<ProcessService<H, S>>,
) -> Json<RunningResponse>
where
    H: WorkerHooks + 'static,
    S: HeartbeatSink + 'static,
{
    Json(RunningResponse {
        running: service.handle_is_running(),
    })
}

async fn state_handler<H, S>(State(service): State<ProcessService<H, S>>) -> Json<ProcessStatus>
where
    H: WorkerHooks + 'static,
    S: HeartbeatSink + 'static,
{
    Json(service.status())
}

/// Create the control-surface router.
pub fn create_router<H, S>(service: ProcessService<H, S>) -> Router
where
    H: WorkerHooks + 'static,
    S: HeartbeatSink + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/process/start", post(start_handler::<H, S>))
        .route("/v1/process/stop", post(stop_handler::<H, S>))
        .route("/v1/process/running", get(running_handler::<H, S>))
        .route("/v1/process/state", get(state_handler::<H, S>))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(service)
}
