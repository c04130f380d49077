// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use argocd_ecr_updater::config::Config;
use argocd_ecr_updater::kubernetes::KubeSecretWriter;
use argocd_ecr_updater::metrics::Metrics;
use argocd_ecr_updater::registry::EcrTokenFetcher;
use argocd_ecr_updater::rotation::{RotationJob, Scheduler};
use argocd_ecr_updater::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting argocd-ecr-updater");

    // Load configuration, refusing to start without a target secret
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: secret={}, schedule='{}', registry={}",
        config.secret,
        config.sync_cron,
        config.registry_id.as_deref().unwrap_or("default")
    );

    let metrics = Arc::new(Metrics::new().context("Failed to register metrics")?);

    let job = Arc::new(RotationJob::new(
        Arc::new(EcrTokenFetcher::new()),
        Arc::new(KubeSecretWriter::in_cluster()),
        metrics.clone(),
        config.registry_id.clone(),
        config.secret.clone(),
    ));

    let scheduler = Scheduler::new(&config.sync_cron, job.clone())?;

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    // The scheduler gets its own task, starting with the initial rotation
    let scheduler = tokio::spawn(scheduler.run());

    tokio::try_join!(
        async { scheduler.await.context("Scheduler task panicked")? },
        server::serve(listener, AppState { job, metrics })
    )?;

    warn!("Scheduler and server stopped unexpectedly");
    Ok(())
}
