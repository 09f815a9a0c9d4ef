// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::identity::WorkerIdentity;

/// Name of the state a job is in while a worker executes it.
pub const PROCESSING_STATE: &str = "Processing";

/// Metadata key holding the owning server id of a processing job.
pub const SERVER_ID_KEY: &str = "ServerId";

/// Metadata key holding the owning worker number of a processing job.
pub const WORKER_NUMBER_KEY: &str = "WorkerNumber";

pub const STARTED_AT_KEY: &str = "StartedAt";

/// Current persisted state of a job, as read from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateData {
	pub name: String,
	pub reason: Option<String>,
	pub data: HashMap<String, String>,
}

impl StateData {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			reason: None,
			data: HashMap::new(),
		}
	}

	pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
		self.reason = Some(reason.into());
		self
	}

	pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.data.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.data.get(key).map(String::as_str)
	}

	/// State names compare ASCII case-insensitively.
	pub fn is_processing(&self) -> bool {
		self.name.eq_ignore_ascii_case(PROCESSING_STATE)
	}
}

/// The state the engine writes when it hands a job to a worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingState {
	pub worker: WorkerIdentity,
	pub started_at: DateTime<Utc>,
}

impl ProcessingState {
	pub fn new(worker: WorkerIdentity) -> Self {
		Self {
			worker,
			started_at: Utc::now(),
		}
	}

	pub fn into_state_data(self) -> StateData {
		StateData::new(PROCESSING_STATE)
			.with_entry(SERVER_ID_KEY, self.worker.server_id().as_str())
			.with_entry(WORKER_NUMBER_KEY, self.worker.worker_number().to_string())
			.with_entry(
				STARTED_AT_KEY,
				self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
			)
	}
}

impl From<ProcessingState> for StateData {
	fn from(state: ProcessingState) -> Self {
		state.into_state_data()
	}
}
