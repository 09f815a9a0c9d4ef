// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;
use loom_jobs_core::{
	CancellationError, ContextError, JobCancellationToken, JobStateStore, ShutdownSignal,
	WorkerIdentity,
};

use crate::cancellation::OwnershipToken;

/// Per-attempt context handed to job code.
///
/// A context is built once for a single execution attempt of a single job and
/// dropped when the attempt ends. Job code polls
/// [`check_cancellation`](JobCancellationToken::check_cancellation) at safe
/// points to find out whether it should unwind.
#[derive(Debug)]
pub struct ServerJobContext {
	token: OwnershipToken,
}

impl ServerJobContext {
	pub fn builder() -> ServerJobContextBuilder {
		ServerJobContextBuilder::new()
	}

	/// Builds a context. A `None` shutdown signal behaves as one that is never
	/// triggered.
	pub fn new(
		job_id: impl Into<String>,
		store: Arc<dyn JobStateStore>,
		worker: WorkerIdentity,
		shutdown: Option<ShutdownSignal>,
	) -> Result<Self, ContextError> {
		let mut builder = Self::builder().job_id(job_id).store(store).worker(worker);
		if let Some(shutdown) = shutdown {
			builder = builder.shutdown(shutdown);
		}
		builder.build()
	}

	pub fn job_id(&self) -> &str {
		self.token.job_id()
	}

	pub fn worker(&self) -> &WorkerIdentity {
		self.token.worker()
	}

	pub fn cancellation_token(&self) -> &OwnershipToken {
		&self.token
	}
}

#[async_trait]
impl JobCancellationToken for ServerJobContext {
	fn shutdown_signal(&self) -> &ShutdownSignal {
		self.token.shutdown_signal()
	}

	async fn check_cancellation(&self) -> Result<(), CancellationError> {
		self.token.check().await
	}
}

/// Builder for [`ServerJobContext`].
///
/// `job_id`, `store` and `worker` are required; `build` reports the first one
/// missing as [`ContextError::InvalidArgument`].
#[derive(Default)]
pub struct ServerJobContextBuilder {
	job_id: Option<String>,
	store: Option<Arc<dyn JobStateStore>>,
	worker: Option<WorkerIdentity>,
	shutdown: Option<ShutdownSignal>,
}

impl ServerJobContextBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn job_id(mut self, job_id: impl Into<String>) -> Self {
		self.job_id = Some(job_id.into());
		self
	}

	pub fn store(mut self, store: Arc<dyn JobStateStore>) -> Self {
		self.store = Some(store);
		self
	}

	pub fn worker(mut self, worker: WorkerIdentity) -> Self {
		self.worker = Some(worker);
		self
	}

	pub fn shutdown(mut self, shutdown: ShutdownSignal) -> Self {
		self.shutdown = Some(shutdown);
		self
	}

	pub fn build(self) -> Result<ServerJobContext, ContextError> {
		let job_id = self
			.job_id
			.filter(|id| !id.is_empty())
			.ok_or(ContextError::InvalidArgument { param: "job_id" })?;
		let store = self
			.store
			.ok_or(ContextError::InvalidArgument { param: "storage" })?;
		let worker = self
			.worker
			.filter(|w| !w.server_id().is_empty())
			.ok_or(ContextError::InvalidArgument { param: "worker" })?;
		let shutdown = self.shutdown.unwrap_or_default();

		Ok(ServerJobContext {
			token: OwnershipToken::new(job_id, store, worker, shutdown),
		})
	}
}
