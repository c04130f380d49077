// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Container registry credential fetching.

pub mod ecr;
pub mod token;

pub use ecr::EcrTokenFetcher;
pub use token::{decode_authorization_token, TokenFetcher};
