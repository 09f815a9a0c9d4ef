// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Instant;

use loom_jobs_core::{
	CancellationError, ContextError, JobStateStore, ShutdownSignal, WorkerIdentity,
};
use tracing::{info, instrument, warn};

use crate::context::ServerJobContext;
use crate::error::JobError;
use crate::job::Job;
use crate::types::JobOutcome;

/// Runs job attempts on behalf of one worker slot.
///
/// Each call to [`perform`](Self::perform) builds a fresh context, hands it to
/// the job, and drops it when the job returns. The performer never retries
/// and never writes job state; it only reports how the attempt ended.
#[derive(Clone)]
pub struct JobPerformer {
	store: Arc<dyn JobStateStore>,
	worker: WorkerIdentity,
	shutdown: ShutdownSignal,
}

impl JobPerformer {
	pub fn new(
		store: Arc<dyn JobStateStore>,
		worker: WorkerIdentity,
		shutdown: ShutdownSignal,
	) -> Self {
		Self {
			store,
			worker,
			shutdown,
		}
	}

	pub fn worker(&self) -> &WorkerIdentity {
		&self.worker
	}

	#[instrument(skip(self, job), fields(job = job.name(), worker = %self.worker))]
	pub async fn perform(&self, job_id: &str, job: &dyn Job) -> Result<JobOutcome, ContextError> {
		let ctx = ServerJobContext::builder()
			.job_id(job_id)
			.store(Arc::clone(&self.store))
			.worker(self.worker.clone())
			.shutdown(self.shutdown.clone())
			.build()?;

		let started = Instant::now();
		let result = job.perform(&ctx).await;
		drop(ctx);
		let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

		let outcome = classify(result);
		match &outcome {
			JobOutcome::Succeeded => {
				info!(job_id, duration_ms, "Job completed successfully");
			}
			JobOutcome::Requeue => {
				info!(job_id, duration_ms, "Job stopped for shutdown");
			}
			JobOutcome::Abandoned { reason } => {
				info!(job_id, duration_ms, reason = reason.as_str(), "Job abandoned, ownership lost");
			}
			JobOutcome::Failed { message, retryable } => {
				warn!(job_id, duration_ms, retryable, error = %message, "Job failed");
			}
		}

		Ok(outcome)
	}
}

fn classify(result: Result<(), JobError>) -> JobOutcome {
	match result {
		Ok(()) => JobOutcome::Succeeded,
		Err(JobError::Cancelled(CancellationError::ShutdownRequested)) => JobOutcome::Requeue,
		Err(JobError::Cancelled(CancellationError::JobAborted { reason, .. })) => {
			JobOutcome::Abandoned { reason }
		}
		Err(JobError::Cancelled(CancellationError::Storage(e))) => JobOutcome::Failed {
			message: e.to_string(),
			retryable: true,
		},
		Err(JobError::Failed { message, retryable }) => JobOutcome::Failed { message, retryable },
	}
}
