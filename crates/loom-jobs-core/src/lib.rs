// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for Loom job execution.
//!
//! A worker that owns a job polls for cancellation at safe points inside the
//! job body. This crate holds the pieces that contract is built from:
//!
//! - [`WorkerIdentity`]: which worker, on which server, believes it owns a job
//! - [`StateData`]: the persisted state record the ownership check reads
//! - [`ShutdownSignal`]: the process-wide graceful shutdown broadcast
//! - [`JobStateStore`]: the storage seam
//! - [`JobCancellationToken`]: the capability job code depends on

pub mod cancellation;
pub mod error;
pub mod identity;
pub mod shutdown;
pub mod state;
pub mod store;

pub use cancellation::JobCancellationToken;
pub use error::{AbortReason, CancellationError, ContextError, StoreError};
pub use identity::{ServerId, WorkerIdentity};
pub use shutdown::ShutdownSignal;
pub use state::{ProcessingState, StateData, PROCESSING_STATE, SERVER_ID_KEY, WORKER_NUMBER_KEY};
pub use store::JobStateStore;
