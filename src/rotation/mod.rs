// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Credential rotation and its recurring trigger.

pub mod job;
pub mod scheduler;

pub use job::RotationJob;
pub use scheduler::Scheduler;
