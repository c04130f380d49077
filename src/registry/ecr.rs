// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! ECR authorization token fetcher.
//!
//! Credentials and region come from the default AWS provider chain
//! (AWS_ACCESS_KEY_ID, AWS_REGION, web identity, instance metadata, ...).
//! The chain is resolved on every fetch so rotated ambient credentials are
//! picked up without a restart.

use crate::error::CredentialError;
use crate::registry::token::{decode_authorization_token, TokenFetcher};
use crate::types::RegistryCredential;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::ProvideCredentials;
use aws_sdk_ecr::error::DisplayErrorContext;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

#[derive(Debug, Default, Clone)]
pub struct EcrTokenFetcher {
    client: Option<aws_sdk_ecr::Client>,
}

impl EcrTokenFetcher {
    /// Fetcher building its client from the ambient AWS configuration on every fetch
    pub fn new() -> Self {
        Self { client: None }
    }

    /// Fetcher bound to an existing client
    pub fn with_client(client: aws_sdk_ecr::Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    async fn client(&self) -> Result<aws_sdk_ecr::Client, CredentialError> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }

        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;

        if config.region().is_none() {
            return Err(CredentialError::MissingRegion);
        }
        let provider = config.credentials_provider().ok_or_else(|| {
            CredentialError::MissingCredentials("no credentials provider configured".to_string())
        })?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| CredentialError::MissingCredentials(DisplayErrorContext(&e).to_string()))?;

        Ok(aws_sdk_ecr::Client::new(&config))
    }
}

#[async_trait]
impl TokenFetcher for EcrTokenFetcher {
    #[instrument(skip(self))]
    async fn fetch(&self, registry_id: Option<&str>) -> Result<RegistryCredential, CredentialError> {
        let client = self.client().await?;

        debug!("Requesting ECR authorization token");
        // registryIds is deprecated upstream but still honoured, and it is the
        // only way to scope the token to a registry other than the caller's own
        #[allow(deprecated)]
        let response = client
            .get_authorization_token()
            .set_registry_ids(registry_id.map(|id| vec![id.to_string()]))
            .send()
            .await
            .map_err(|e| CredentialError::TokenRequest(DisplayErrorContext(&e).to_string()))?;

        let data = response
            .authorization_data()
            .first()
            .ok_or(CredentialError::EmptyResponse)?;
        let token = data
            .authorization_token()
            .ok_or(CredentialError::EmptyResponse)?;

        let mut credential = decode_authorization_token(token)?;

        if let Some(expires_at) = data
            .expires_at()
            .and_then(|t| DateTime::<Utc>::from_timestamp(t.secs(), t.subsec_nanos()))
        {
            credential = credential.with_expiry(expires_at);
        }

        info!(
            endpoint = data.proxy_endpoint().unwrap_or("default"),
            expires_at = ?credential.expires_at,
            "New ECR authorization token fetched"
        );

        Ok(credential)
    }
}
