// SPDX-License-Identifier: MIT
//! Process-wide metric instruments.
//!
//! Instruments are created exactly once during startup from an injected
//! [`Meter`] and handed into request state as a cheap clonable handle. The
//! underlying aggregation is the OpenTelemetry SDK's thread-safe monotonic
//! accumulator, so handlers may increment concurrently without coordination.

use opentelemetry::metrics::{Counter, Meter};

/// Counter instruments shared across request handlers.
///
/// Cloning is cheap (instruments are internally reference counted) and every
/// clone records against the same aggregation. Recording is fire-and-forget:
/// a misconfigured or unreachable exporter is invisible to the caller.
#[derive(Clone)]
pub struct Metrics {
    endpoint_hit: Counter<u64>,
}

impl Metrics {
    /// Build the instrument set against the given meter.
    ///
    /// Call once at startup, after telemetry initialization, and pass the
    /// result into the router state.
    pub fn new(meter: &Meter) -> Self {
        let endpoint_hit = meter
            .u64_counter("endpoint-hit")
            .with_description("Requests served by the weather forecast endpoint")
            .build();
        Self { endpoint_hit }
    }

    /// Record one hit against the forecast endpoint.
    pub fn incr_endpoint_hit(&self) {
        self.endpoint_hit.add(1, &[]);
    }
}
