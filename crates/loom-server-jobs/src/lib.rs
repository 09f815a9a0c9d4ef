// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Server-side job execution for Loom.
//!
//! This crate provides the per-attempt [`ServerJobContext`] handed to job
//! code, the ownership-verifying cancellation token behind it, a SQLite-backed
//! job state store, and the [`JobPerformer`] that runs a job with a fresh
//! context and classifies how the attempt ended.

pub mod cancellation;
pub mod config;
pub mod context;
pub mod error;
pub mod job;
pub mod logging;
pub mod performer;
pub mod repository;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cancellation::{verify_ownership, OwnershipToken};
pub use config::{load_config, load_config_with_file, ConfigError, JobsConfig, LoggingConfig};
pub use context::{ServerJobContext, ServerJobContextBuilder};
pub use error::{JobError, Result};
pub use job::Job;
pub use logging::init_tracing;
pub use performer::JobPerformer;
pub use repository::{create_pool, SqliteJobStateStore};
pub use types::JobOutcome;

pub use loom_jobs_core::{
	AbortReason, CancellationError, ContextError, JobCancellationToken, JobStateStore,
	ProcessingState, ServerId, ShutdownSignal, StateData, StoreError, WorkerIdentity,
};
