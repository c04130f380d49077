// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Process-wide Prometheus metrics.
//!
//! A single [`Metrics`] instance is created at startup and shared by `Arc`
//! between the rotation job and the HTTP server. All metrics are atomic, so
//! concurrent increments from the scheduler and request handlers never lose
//! updates.

use crate::constants::metrics as names;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

pub struct Metrics {
    registry: Registry,
    /// Fetches that failed to produce a credential
    pub credential_failure: IntCounter,
    /// Runs that patched the secret
    pub success: IntCounter,
    /// Runs that did not patch the secret, for any reason
    pub failure: IntCounter,
    /// HTTP requests currently being handled
    pub in_progress: IntGauge,
    http_requests: IntCounterVec,
}

impl Metrics {
    /// Create all metrics and register them with a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric fails to register (e.g. duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let credential_failure =
            IntCounter::new(names::CREDENTIAL_FAILURE, "Failed Aws Credentials")?;
        let success = IntCounter::new(names::SUCCESS, "Successful Updates")?;
        let failure = IntCounter::new(names::FAILURE, "Failed Updates")?;
        let in_progress = IntGauge::new(names::IN_PROGRESS, "Currently executing requests")?;
        let http_requests = IntCounterVec::new(
            Opts::new(names::HTTP_REQUESTS, "HTTP requests by method and endpoint"),
            &["method", "endpoint"],
        )?;

        registry.register(Box::new(credential_failure.clone()))?;
        registry.register(Box::new(success.clone()))?;
        registry.register(Box::new(failure.clone()))?;
        registry.register(Box::new(in_progress.clone()))?;
        registry.register(Box::new(http_requests.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            credential_failure,
            success,
            failure,
            in_progress,
            http_requests,
        })
    }

    /// Count a request against its route
    pub fn record_request(&self, method: &str, endpoint: &str) {
        self.http_requests
            .with_label_values(&[method, endpoint])
            .inc();
    }

    pub fn requests(&self, method: &str, endpoint: &str) -> u64 {
        self.http_requests
            .with_label_values(&[method, endpoint])
            .get()
    }

    /// Render every registered metric in the text exposition format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
