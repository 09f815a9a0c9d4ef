// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ownership-verifying cancellation token.
//!
//! A check runs in two tiers. The shutdown signal is read first and never
//! touches storage, so shutdown stays detectable when storage is slow or
//! unreachable. Only when no shutdown is in progress is the job's persisted
//! state read back to confirm this worker still owns it.

use std::sync::Arc;

use async_trait::async_trait;
use loom_jobs_core::{
	AbortReason, CancellationError, JobCancellationToken, JobStateStore, ShutdownSignal, StateData,
	WorkerIdentity, SERVER_ID_KEY, WORKER_NUMBER_KEY,
};
use tracing::debug;

/// Cancellation token bound to one job attempt on one worker.
#[derive(Clone)]
pub struct OwnershipToken {
	job_id: String,
	store: Arc<dyn JobStateStore>,
	worker: WorkerIdentity,
	shutdown: ShutdownSignal,
}

impl OwnershipToken {
	pub(crate) fn new(
		job_id: String,
		store: Arc<dyn JobStateStore>,
		worker: WorkerIdentity,
		shutdown: ShutdownSignal,
	) -> Self {
		Self {
			job_id,
			store,
			worker,
			shutdown,
		}
	}

	pub fn job_id(&self) -> &str {
		&self.job_id
	}

	pub fn worker(&self) -> &WorkerIdentity {
		&self.worker
	}

	/// Fails with [`CancellationError::ShutdownRequested`] or
	/// [`CancellationError::JobAborted`] when the caller must stop.
	///
	/// Performs at most one storage read.
	pub async fn check(&self) -> Result<(), CancellationError> {
		if self.shutdown.is_requested() {
			debug!(job_id = %self.job_id, worker = %self.worker, "shutdown requested");
			return Err(CancellationError::ShutdownRequested);
		}

		let state = self.store.get_state_data(&self.job_id).await?;

		verify_ownership(state.as_ref(), &self.worker).map_err(|reason| {
			debug!(
				job_id = %self.job_id,
				worker = %self.worker,
				reason = reason.as_str(),
				"job ownership lost"
			);
			CancellationError::JobAborted {
				job_id: self.job_id.clone(),
				reason,
			}
		})
	}
}

#[async_trait]
impl JobCancellationToken for OwnershipToken {
	fn shutdown_signal(&self) -> &ShutdownSignal {
		&self.shutdown
	}

	async fn check_cancellation(&self) -> Result<(), CancellationError> {
		self.check().await
	}
}

impl std::fmt::Debug for OwnershipToken {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("OwnershipToken")
			.field("job_id", &self.job_id)
			.field("worker", &self.worker)
			.field("shutdown_requested", &self.shutdown.is_requested())
			.finish_non_exhaustive()
	}
}

/// Checks a persisted state record against the worker that believes it owns
/// the job. Checks run in order: presence, state name, server id, worker
/// number.
pub fn verify_ownership(
	state: Option<&StateData>,
	worker: &WorkerIdentity,
) -> Result<(), AbortReason> {
	let state = state.ok_or(AbortReason::StateMissing)?;

	if !state.is_processing() {
		return Err(AbortReason::WrongState {
			actual: state.name.clone(),
		});
	}

	let server_id = state.get(SERVER_ID_KEY);
	if server_id != Some(worker.server_id().as_str()) {
		return Err(AbortReason::ServerMismatch {
			expected: worker.server_id().to_string(),
			actual: server_id.map(str::to_string),
		});
	}

	let worker_number = state.get(WORKER_NUMBER_KEY);
	if worker_number != Some(worker.worker_number().to_string().as_str()) {
		return Err(AbortReason::WorkerMismatch {
			expected: worker.worker_number(),
			actual: worker_number.map(str::to_string),
		});
	}

	Ok(())
}
