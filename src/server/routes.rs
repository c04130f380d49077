// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Route handlers.
//!
//! - `GET /`        : index page
//! - `GET /metrics` : Prometheus text format
//! - `POST /update` : rotate the credential now

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info};

use crate::constants::metrics::CONTENT_TYPE;
use crate::server::AppState;

const INDEX_HTML: &str = r#"<html>
<head><title>argocd-ecr-updater</title></head>
<body>
<h1>argocd-ecr-updater</h1>
<p><a href="/metrics">Metrics</a></p>
<form method="post" action="/update"><button type="submit">Manually Refresh Token</button></form>
</body>
</html>
"#;

pub async fn index(State(state): State<AppState>) -> Html<&'static str> {
    state.metrics.record_request("GET", "/");
    Html(INDEX_HTML)
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    state.metrics.record_request("GET", "/metrics");

    match state.metrics.render() {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Rotate synchronously. The outcome is only reported through metrics and logs,
/// the response is 200 either way.
pub async fn update(State(state): State<AppState>) -> StatusCode {
    state.metrics.record_request("POST", "/update");

    info!("Manual rotation requested");
    let outcome = state.job.run().await;
    info!("Manual rotation finished: {:?}", outcome);

    StatusCode::OK
}
