// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for job execution contexts.

use thiserror::Error;

/// Errors raised while constructing a job execution context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
	#[error("invalid argument: {param} is required")]
	InvalidArgument { param: &'static str },
}

/// Why a job is no longer owned by the worker that is running it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbortReason {
	#[error("job state is missing")]
	StateMissing,

	#[error("job is in state {actual:?}, expected \"Processing\"")]
	WrongState { actual: String },

	#[error("job is owned by server {actual:?}, expected {expected:?}")]
	ServerMismatch {
		expected: String,
		actual: Option<String>,
	},

	#[error("job is owned by worker {actual:?}, expected {expected}")]
	WorkerMismatch {
		expected: u32,
		actual: Option<String>,
	},
}

impl AbortReason {
	/// Short, stable label for logs and metrics.
	pub fn as_str(&self) -> &'static str {
		match self {
			AbortReason::StateMissing => "state_missing",
			AbortReason::WrongState { .. } => "wrong_state",
			AbortReason::ServerMismatch { .. } => "server_mismatch",
			AbortReason::WorkerMismatch { .. } => "worker_mismatch",
		}
	}
}

/// Errors surfaced by a [`JobStateStore`](crate::JobStateStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
	#[error("storage backend error: {0}")]
	Backend(String),

	#[error("corrupt state record for job {job_id}: {message}")]
	Corrupt { job_id: String, message: String },
}

/// Outcome of a cancellation check that tells the caller to stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CancellationError {
	/// The server is shutting down. The job should be requeued for a later attempt.
	#[error("shutdown requested")]
	ShutdownRequested,

	/// Ownership of the job has moved elsewhere. Do not requeue from here.
	#[error("job {job_id} aborted: {reason}")]
	JobAborted { job_id: String, reason: AbortReason },

	/// Ownership could not be determined because the storage read failed.
	#[error("could not verify job ownership: {0}")]
	Storage(#[from] StoreError),
}

impl CancellationError {
	pub fn is_shutdown(&self) -> bool {
		matches!(self, CancellationError::ShutdownRequested)
	}

	pub fn is_aborted(&self) -> bool {
		matches!(self, CancellationError::JobAborted { .. })
	}

	pub fn abort_reason(&self) -> Option<&AbortReason> {
		match self {
			CancellationError::JobAborted { reason, .. } => Some(reason),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_invalid_argument_names_param() {
		let err = ContextError::InvalidArgument { param: "job_id" };
		assert_eq!(err.to_string(), "invalid argument: job_id is required");
	}

	#[test]
	fn test_abort_reason_labels() {
		assert_eq!(AbortReason::StateMissing.as_str(), "state_missing");
		assert_eq!(
			AbortReason::WrongState {
				actual: "Enqueued".to_string()
			}
			.as_str(),
			"wrong_state"
		);
		assert_eq!(
			AbortReason::ServerMismatch {
				expected: "a".to_string(),
				actual: None
			}
			.as_str(),
			"server_mismatch"
		);
		assert_eq!(
			AbortReason::WorkerMismatch {
				expected: 1,
				actual: Some("2".to_string())
			}
			.as_str(),
			"worker_mismatch"
		);
	}

	#[test]
	fn test_cancellation_predicates() {
		let shutdown = CancellationError::ShutdownRequested;
		assert!(shutdown.is_shutdown());
		assert!(!shutdown.is_aborted());
		assert!(shutdown.abort_reason().is_none());

		let aborted = CancellationError::JobAborted {
			job_id: "my-job".to_string(),
			reason: AbortReason::StateMissing,
		};
		assert!(aborted.is_aborted());
		assert!(!aborted.is_shutdown());
		assert_eq!(aborted.abort_reason(), Some(&AbortReason::StateMissing));
	}

	#[test]
	fn test_storage_error_is_neither_shutdown_nor_abort() {
		let err: CancellationError = StoreError::Backend("connection reset".to_string()).into();
		assert!(!err.is_shutdown());
		assert!(!err.is_aborted());
		assert_eq!(
			err.to_string(),
			"could not verify job ownership: storage backend error: connection reset"
		);
	}

	#[test]
	fn test_job_aborted_message_includes_reason() {
		let err = CancellationError::JobAborted {
			job_id: "my-job".to_string(),
			reason: AbortReason::WorkerMismatch {
				expected: 1,
				actual: Some("999".to_string()),
			},
		};
		assert_eq!(
			err.to_string(),
			"job my-job aborted: job is owned by worker Some(\"999\"), expected 1"
		);
	}
}
