//! Fleetproc worker node - lifecycle-managed fleet member.
//!
//! This is the main entry point for a worker node. It embeds the lifecycle
//! controller, exposes the HTTP control surface, reports heartbeats to the
//! fleet monitor, and drives the demo worker's cooperative tick loop.

use std::sync::Arc;

use fleetproc_node::{
    create_router, HttpMonitorSink, NodeConfig, NoopMonitorSink, TelemetryRelay,
};
use fleetproc_process::{
    HeartbeatReporter, HeartbeatSink, ProcessController, ProcessService,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fleetproc=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fleetproc worker node");

    // Load configuration from environment
    let config = NodeConfig::from_env();

    match config.monitor_url.clone() {
        Some(url) => {
            tracing::info!(monitor_url = %url, "heartbeats target the fleet monitor");
            serve(config, Arc::new(HttpMonitorSink::new(url))).await
        }
        None => {
            tracing::warn!("no monitor configured, heartbeats will be dropped");
            serve(config, Arc::new(NoopMonitorSink::new())).await
        }
    }
}

async fn serve<S>(config: NodeConfig, sink: Arc<S>) -> Result<(), Box<dyn std::error::Error>>
where
    S: HeartbeatSink + 'static,
{
    let identity = config.identity();
    tracing::info!(identity = %identity, instance_id = %identity.instance_id, "process identity");

    let controller = Arc::new(ProcessController::new(
        identity,
        TelemetryRelay::new(),
        Arc::clone(&sink),
    ));

    // Background reporter, process-scoped
    let reporter = HeartbeatReporter::spawn(
        controller.internals(),
        sink,
        config.heartbeat_interval(),
    );

    controller.set_up().await?;

    // The worker's own cooperative loop: run() is a no-op until a start
    // request arrives.
    let tick_loop = {
        let controller = Arc::clone(&controller);
        let period = config.tick_interval();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                if let Err(err) = controller.run().await {
                    tracing::error!(error = %err, "tick failed");
                }
            }
        })
    };

    let service = ProcessService::new(Arc::clone(&controller));
    let app = create_router(service);

    tracing::info!(listen_addr = %config.listen_addr, "control surface listening");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    tick_loop.abort();
    reporter.shutdown().await;
    Ok(())
}
