// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Values passed between the fetch and write steps of a rotation.

pub mod credential;

pub use credential::{JobOutcome, RegistryCredential, SecretReference};
