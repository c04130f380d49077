// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for in-cluster client creation and secret patching.

pub mod client;
pub mod secret;

pub use client::create_in_cluster_client;
pub use secret::{encode_password, KubeSecretWriter, SecretWriter};
