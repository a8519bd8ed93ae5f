// SPDX-License-Identifier: MIT
use anyhow::Result;
use opentelemetry::global;
use tokio::net::TcpListener;
use tracing::info;
use weathercast::api::create_router;
use weathercast::metrics::Metrics;
use weathercast::telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = init_telemetry(TelemetryConfig::default())?;

    // Instruments are created once here and injected into request state.
    let metrics = Metrics::new(&global::meter("weathercast"));
    let app = create_router(metrics);

    let addr =
        std::env::var("WEATHERCAST_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "weathercast listening");
    info!("forecast endpoint: GET http://{addr}/weatherforecast");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutting down");
    telemetry.shutdown()?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
