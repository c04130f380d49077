// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The rotation job: fetch a registry token, patch it into the secret.
//!
//! The scheduler and the manual trigger both call [`RotationJob::run`]. At most
//! one fetch+write is in flight at any time: a caller arriving while a run is
//! in progress joins that run and receives its outcome instead of starting
//! another one.

use crate::kubernetes::SecretWriter;
use crate::metrics::Metrics;
use crate::registry::TokenFetcher;
use crate::types::{JobOutcome, SecretReference};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, error, info, instrument};

type SharedRun = Shared<BoxFuture<'static, JobOutcome>>;

struct JobContext {
    fetcher: Arc<dyn TokenFetcher>,
    writer: Arc<dyn SecretWriter>,
    metrics: Arc<Metrics>,
    registry_id: Option<String>,
    secret: SecretReference,
}

pub struct RotationJob {
    context: Arc<JobContext>,
    in_flight: Arc<Mutex<Option<SharedRun>>>,
}

impl RotationJob {
    pub fn new(
        fetcher: Arc<dyn TokenFetcher>,
        writer: Arc<dyn SecretWriter>,
        metrics: Arc<Metrics>,
        registry_id: Option<String>,
        secret: SecretReference,
    ) -> Self {
        Self {
            context: Arc::new(JobContext {
                fetcher,
                writer,
                metrics,
                registry_id,
                secret,
            }),
            in_flight: Arc::new(Mutex::new(None)),
        }
    }

    /// Rotate the secret's password, or join the rotation already in progress.
    ///
    /// The rotation runs on its own task, so it completes even when every
    /// caller waiting on it goes away.
    pub async fn run(&self) -> JobOutcome {
        let run = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(run) => {
                    debug!("Rotation already in progress, waiting for its outcome");
                    run.clone()
                }
                None => {
                    let context = self.context.clone();
                    let release = SlotRelease(self.in_flight.clone());
                    let task = tokio::spawn(async move {
                        // Dropped on completion and on panic alike
                        let _release = release;
                        context.rotate().await
                    });

                    let metrics = self.context.metrics.clone();
                    let run = async move {
                        task.await.unwrap_or_else(|e| {
                            error!("Rotation task failed: {}", e);
                            metrics.failure.inc();
                            JobOutcome::WriteFailure
                        })
                    }
                    .boxed()
                    .shared();
                    *slot = Some(run.clone());
                    run
                }
            }
        };

        run.await
    }
}

/// Empties the in-flight slot when the rotation task ends
struct SlotRelease(Arc<Mutex<Option<SharedRun>>>);

impl Drop for SlotRelease {
    fn drop(&mut self) {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take();
    }
}

impl JobContext {
    #[instrument(skip(self), fields(secret = %self.secret))]
    async fn rotate(&self) -> JobOutcome {
        let credential = match self.fetcher.fetch(self.registry_id.as_deref()).await {
            Ok(credential) => credential,
            Err(e) => {
                error!("Failed to fetch registry credential: {}", e);
                self.metrics.credential_failure.inc();
                self.metrics.failure.inc();
                return JobOutcome::CredentialFailure;
            }
        };

        match credential.expires_at {
            Some(expires_at) => info!("New registry token expires at {}", expires_at),
            None => info!("New registry token has no expiry"),
        }

        if let Err(e) = self.writer.write(&self.secret, &credential.password).await {
            error!("Failed to update secret {}: {}", self.secret, e);
            self.metrics.failure.inc();
            return JobOutcome::WriteFailure;
        }

        self.metrics.success.inc();
        JobOutcome::Success
    }
}
