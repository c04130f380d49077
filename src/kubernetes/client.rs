// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! In-cluster client creation

use crate::error::WriteError;
use kube::{Client, Config as KConfig};
use tracing::{debug, instrument};

/// Create a Kubernetes client from the pod's service account.
///
/// No kubeconfig file is consulted; the updater only manages the cluster it runs in.
#[instrument]
pub fn create_in_cluster_client() -> Result<Client, WriteError> {
    let config = KConfig::incluster()
        .map_err(|e| WriteError::Client(format!("Failed to load in-cluster config: {}", e)))?;

    debug!("Using in-cluster API server {}", config.cluster_url);

    Client::try_from(config)
        .map_err(|e| WriteError::Client(format!("Failed to create client: {}", e)))
}
