// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a running job server process.
///
/// Generated ids take the form `<server-name>:<uuid>` so that two processes on
/// the same host never share an id, even across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(String);

impl ServerId {
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	pub fn generate(server_name: &str) -> Self {
		Self(format!("{}:{}", server_name.to_lowercase(), Uuid::new_v4()))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for ServerId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ServerId {
	fn from(s: &str) -> Self {
		Self::new(s)
	}
}

impl From<String> for ServerId {
	fn from(s: String) -> Self {
		Self(s)
	}
}

/// The worker that believes it owns a job: a server id plus a worker slot number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerIdentity {
	server_id: ServerId,
	worker_number: u32,
}

impl WorkerIdentity {
	pub fn new(server_id: impl Into<ServerId>, worker_number: u32) -> Self {
		Self {
			server_id: server_id.into(),
			worker_number,
		}
	}

	pub fn server_id(&self) -> &ServerId {
		&self.server_id
	}

	pub fn worker_number(&self) -> u32 {
		self.worker_number
	}
}

impl fmt::Display for WorkerIdentity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}#{}", self.server_id, self.worker_number)
	}
}
