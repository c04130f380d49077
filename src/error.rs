// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

/// Failure to obtain a usable registry credential
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("No AWS region configured")]
    MissingRegion,

    #[error("No AWS credentials available: {0}")]
    MissingCredentials(String),

    #[error("ECR GetAuthorizationToken failed: {0}")]
    TokenRequest(String),

    #[error("ECR returned no authorization data")]
    EmptyResponse,

    #[error("Authorization token is not valid base64: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Authorization token is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Authorization token is missing the username:password separator")]
    MissingSeparator,
}

/// Failure to patch the target secret
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create in-cluster client: {0}")]
    Client(String),

    #[error("Secret {namespace}/{name} not found")]
    NotFound { namespace: String, name: String },

    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),
}
