// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Secret password patching

use crate::constants::{FIELD_MANAGER, PASSWORD_KEY};
use crate::error::WriteError;
use crate::kubernetes::client::create_in_cluster_client;
use crate::types::SecretReference;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use k8s_openapi::api::core::v1::Secret;
use kube::{
    api::{Patch, PatchParams},
    Api, Client,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tokio::sync::OnceCell;
use tracing::{info, instrument};

/// Destination for rotated passwords
#[async_trait]
pub trait SecretWriter: Send + Sync {
    /// Replace the password field of `secret`, leaving every other field untouched
    async fn write(&self, secret: &SecretReference, password: &str) -> Result<(), WriteError>;
}

/// Merge patch body touching only the data keys it names
#[derive(Debug, Serialize)]
struct DataPatch<'a> {
    data: BTreeMap<&'a str, String>,
}

fn password_patch(password: &str) -> DataPatch<'static> {
    DataPatch {
        data: BTreeMap::from([(PASSWORD_KEY, encode_password(password))]),
    }
}

/// Encode a password the way the API server stores opaque secret data
pub fn encode_password(password: &str) -> String {
    STANDARD.encode(password.as_bytes())
}

/// Writes passwords to secrets through the Kubernetes API
pub struct KubeSecretWriter {
    client: OnceCell<Client>,
}

impl KubeSecretWriter {
    /// Writer that connects with the pod's service account on first use
    pub fn in_cluster() -> Self {
        Self {
            client: OnceCell::new(),
        }
    }

    /// Writer bound to an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client: OnceCell::new_with(Some(client)),
        }
    }

    async fn client(&self) -> Result<&Client, WriteError> {
        self.client
            .get_or_try_init(|| async { create_in_cluster_client() })
            .await
    }
}

#[async_trait]
impl SecretWriter for KubeSecretWriter {
    #[instrument(skip(self, secret, password), fields(secret = %secret))]
    async fn write(&self, secret: &SecretReference, password: &str) -> Result<(), WriteError> {
        let secrets: Api<Secret> = Api::namespaced(self.client().await?.clone(), &secret.namespace);

        info!("Updating secret {}", secret);

        let pp = PatchParams {
            field_manager: Some(FIELD_MANAGER.to_string()),
            ..Default::default()
        };

        match secrets
            .patch(&secret.name, &pp, &Patch::Merge(&password_patch(password)))
            .await
        {
            Ok(_) => {
                info!("Secret {} updated", secret);
                Ok(())
            }
            Err(kube::Error::Api(err)) if err.code == 404 => Err(WriteError::NotFound {
                namespace: secret.namespace.clone(),
                name: secret.name.clone(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
