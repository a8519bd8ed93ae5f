// SPDX-License-Identifier: MIT
//! HTTP surface: router, shared state and the forecast handler.
//!
//! The handler demonstrates the telemetry emission pattern end to end: a
//! scoped span around the whole invocation, a counter increment, a
//! structured log event correlated by the `endpoint` field, and a nested
//! scoped span around a simulated downstream call. Span lifetimes are guard
//! based, so every exit path (including cancellation mid-sleep) closes them.

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, Span};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::forecast::{self, WeatherForecast};
use crate::metrics::Metrics;

/// Shared state injected into request handlers.
#[derive(Clone)]
pub struct AppState {
    pub metrics: Metrics,
}

/// Build the service router.
pub fn create_router(metrics: Metrics) -> Router {
    Router::new()
        .route("/weatherforecast", get(weather_forecast))
        .with_state(AppState { metrics })
        .layer(TraceLayer::new_for_http())
}

/// `GET /weatherforecast`: five days of generated weather.
#[instrument(skip(state))]
async fn weather_forecast(State(state): State<AppState>) -> Json<Vec<WeatherForecast>> {
    state.metrics.incr_endpoint_hit();
    info!(endpoint = "weatherforecast", "serving weather forecast");

    let forecast = forecast::next_days(Utc::now());

    simulated_work().await;

    Json(forecast)
}

/// Simulated downstream call, traced as a child span of the handler.
#[instrument]
async fn simulated_work() {
    // Non-blocking wait: sibling requests keep progressing.
    tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    // Silent no-op when tracing is disabled or the span was sampled out.
    Span::current().add_event("simulated work completed", vec![]);
}
