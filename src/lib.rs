// SPDX-License-Identifier: MIT
//! Minimal weather forecast service instrumented with OpenTelemetry.
//!
//! The crate pairs a single `GET /weatherforecast` endpoint with a complete
//! telemetry pipeline built on `tracing` + OpenTelemetry:
//! * Traces and metrics always exported over OTLP (default build).
//! * Optional console logging via the `console-log` feature.
//! * Optional OTLP log export + tracing bridge via the `otlp-log` feature.
//!
//! The interesting part is the telemetry emission pattern in [`api`]: the
//! handler opens a scoped span, increments the [`metrics`] endpoint-hit
//! counter, emits a correlated structured log event and nests a second
//! scoped span around simulated downstream work.
//!
//! # Feature Flags
//! * `console-log` – add a compact console formatter (file/line/thread id).
//! * `otlp-log` – enable an OTLP log exporter and bridge tracing events into logs.
//!
//! # Quick Start
//! ```no_run
//! use weathercast::telemetry::{init_telemetry, TelemetryConfig};
//! fn main() -> anyhow::Result<()> {
//!     let handle = init_telemetry(TelemetryConfig::default())?;
//!     // business logic
//!     handle.shutdown()?;
//!     Ok(())
//! }
//! ```
pub mod api;
pub mod forecast;
pub mod metrics;
pub mod telemetry;

#[cfg(test)]
mod tests {
    use super::telemetry::{init_telemetry, TelemetryConfig};

    #[tokio::test]
    async fn telemetry_init_works() {
        let handle = init_telemetry(TelemetryConfig::default()).expect("telemetry init");
        handle.shutdown().expect("shutdown");
    }
}
