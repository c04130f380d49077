// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read at startup
pub mod env {
    /// Cron expression driving the rotation schedule
    pub const SYNC_CRON: &str = "ARGOCD_ECR_UPDATER_SYNC_CRON";
    /// Name of the Argo CD repository secret to update (required)
    pub const REPO_SECRET_NAME: &str = "ARGOCD_REPO_SECRET_NAME";
    /// Optional ECR registry id to request a token for
    pub const ECR_REGISTRY: &str = "ARGOCD_ECR_REGISTRY";
    /// Socket address the HTTP server binds to
    pub const LISTEN_ADDR: &str = "ARGOCD_ECR_UPDATER_LISTEN_ADDR";
}

/// Every 12 hours, on the hour
pub const DEFAULT_SYNC_CRON: &str = "0 */12 * * *";

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Namespace Argo CD keeps its repository secrets in
pub const SECRET_NAMESPACE: &str = "argocd";

/// Key of the rotated field in the secret's data
pub const PASSWORD_KEY: &str = "password";

/// Field manager recorded on the secret patch
pub const FIELD_MANAGER: &str = "argocd-ecr-updater";

/// Prometheus metric names
pub mod metrics {
    pub const CREDENTIAL_FAILURE: &str = "argocd_ecr_updater_aws_cred_failure_total";
    pub const SUCCESS: &str = "argocd_ecr_updater_success_total";
    pub const FAILURE: &str = "argocd_ecr_updater_failure_total";
    pub const IN_PROGRESS: &str = "argocd_ecr_updater_inprogress_requests";
    pub const HTTP_REQUESTS: &str = "argocd_ecr_updater_http_requests_total";

    /// Content type of the text exposition format
    pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";
}
