// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loom_jobs_core::AbortReason;

/// How a single job attempt ended, from the engine's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
	Succeeded,
	/// Stopped because the server is shutting down.
	Requeue,
	/// Stopped because another worker now owns the job.
	Abandoned { reason: AbortReason },
	Failed { message: String, retryable: bool },
}

impl JobOutcome {
	pub fn as_str(&self) -> &'static str {
		match self {
			JobOutcome::Succeeded => "succeeded",
			JobOutcome::Requeue => "requeue",
			JobOutcome::Abandoned { .. } => "abandoned",
			JobOutcome::Failed { .. } => "failed",
		}
	}

	/// Whether this worker should hand the job back for another attempt.
	/// Abandoned jobs are never requeued from here: their new owner has them.
	pub fn should_requeue(&self) -> bool {
		match self {
			JobOutcome::Requeue => true,
			JobOutcome::Failed { retryable, .. } => *retryable,
			JobOutcome::Succeeded | JobOutcome::Abandoned { .. } => false,
		}
	}
}
