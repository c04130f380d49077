// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! HTTP surface: index page, metrics and the manual rotation trigger.

pub mod middleware;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::metrics::Metrics;
use crate::rotation::RotationJob;

#[derive(Clone)]
pub struct AppState {
    pub job: Arc<RotationJob>,
    pub metrics: Arc<Metrics>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/metrics", get(routes::metrics))
        .route("/update", post(routes::update))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_in_flight,
        ))
        .with_state(state)
}

/// Serve the router until the listener fails
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await?;
    Ok(())
}
