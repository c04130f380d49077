// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Registry token source abstraction and token decoding

use crate::error::CredentialError;
use crate::types::RegistryCredential;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Source of fresh registry credentials
#[async_trait]
pub trait TokenFetcher: Send + Sync {
    /// Fetch a new credential, for `registry_id` if given or the default registry otherwise
    async fn fetch(&self, registry_id: Option<&str>) -> Result<RegistryCredential, CredentialError>;
}

/// Decode a base64 `username:password` authorization token.
///
/// Splits on the first colon only, so the password may itself contain colons.
pub fn decode_authorization_token(token: &str) -> Result<RegistryCredential, CredentialError> {
    let decoded = String::from_utf8(STANDARD.decode(token.trim())?)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(CredentialError::MissingSeparator)?;

    Ok(RegistryCredential::new(username, password))
}
