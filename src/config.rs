// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::env;
use std::net::SocketAddr;

use crate::constants::{self, SECRET_NAMESPACE};
use crate::types::SecretReference;

/// Updater configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Cron expression for the rotation schedule
    pub sync_cron: String,
    /// Secret the rotated password is written to
    pub secret: SecretReference,
    /// Registry id to request a token for, the caller's default registry if unset
    pub registry_id: Option<String>,
    pub listen_addr: SocketAddr,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    /// Empty values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(secret_name) = var(constants::env::REPO_SECRET_NAME) else {
            bail!(
                "Specify name of secret in environment variable {}",
                constants::env::REPO_SECRET_NAME
            );
        };

        let sync_cron = var(constants::env::SYNC_CRON)
            .unwrap_or_else(|| constants::DEFAULT_SYNC_CRON.to_string());
        let registry_id = var(constants::env::ECR_REGISTRY);

        let listen_addr = var(constants::env::LISTEN_ADDR)
            .unwrap_or_else(|| constants::DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr.parse().with_context(|| {
            format!(
                "{} is not a valid socket address: {}",
                constants::env::LISTEN_ADDR,
                listen_addr
            )
        })?;

        Ok(Config {
            sync_cron,
            secret: SecretReference::new(secret_name, SECRET_NAMESPACE),
            registry_id,
            listen_addr,
        })
    }
}
