// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-flight request tracking.

use axum::{extract::Request, extract::State, middleware::Next, response::Response};
use prometheus::IntGauge;

use crate::server::AppState;

/// Holds one unit of the in-flight gauge until dropped
pub struct InFlightGuard {
    gauge: IntGauge,
}

impl InFlightGuard {
    pub fn acquire(gauge: &IntGauge) -> Self {
        gauge.inc();
        Self {
            gauge: gauge.clone(),
        }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}

/// Count the request as in flight for as long as its handler runs
pub async fn track_in_flight(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let _guard = InFlightGuard::acquire(&state.metrics.in_progress);
    next.run(request).await
}
