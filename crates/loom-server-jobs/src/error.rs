// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use loom_jobs_core::CancellationError;
use thiserror::Error;

/// Error returned by job code.
#[derive(Debug, Error)]
pub enum JobError {
	#[error(transparent)]
	Cancelled(#[from] CancellationError),

	#[error("job failed: {message}")]
	Failed { message: String, retryable: bool },
}

impl JobError {
	pub fn failed(message: impl Into<String>) -> Self {
		JobError::Failed {
			message: message.into(),
			retryable: false,
		}
	}

	pub fn retryable(message: impl Into<String>) -> Self {
		JobError::Failed {
			message: message.into(),
			retryable: true,
		}
	}
}

pub type Result<T> = std::result::Result<T, JobError>;
