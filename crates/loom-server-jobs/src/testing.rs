// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Test doubles for job state storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use loom_jobs_core::{JobStateStore, StateData, StoreError};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::repository::SqliteJobStateStore;

/// In-memory [`JobStateStore`] that counts reads.
#[derive(Debug, Default)]
pub struct InMemoryJobStateStore {
	states: Mutex<HashMap<String, StateData>>,
	reads: AtomicUsize,
}

impl InMemoryJobStateStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn put(&self, job_id: &str, state: StateData) {
		self.lock().insert(job_id.to_string(), state);
	}

	pub fn remove(&self, job_id: &str) {
		self.lock().remove(job_id);
	}

	/// Applies `f` to the stored state of `job_id`, if any.
	pub fn update(&self, job_id: &str, f: impl FnOnce(&mut StateData)) {
		if let Some(state) = self.lock().get_mut(job_id) {
			f(state);
		}
	}

	pub fn read_count(&self) -> usize {
		self.reads.load(Ordering::SeqCst)
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StateData>> {
		self.states.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
	}
}

#[async_trait]
impl JobStateStore for InMemoryJobStateStore {
	async fn get_state_data(&self, job_id: &str) -> Result<Option<StateData>, StoreError> {
		self.reads.fetch_add(1, Ordering::SeqCst);
		Ok(self.lock().get(job_id).cloned())
	}
}

/// Single-connection in-memory pool. Every SQLite connection to `:memory:`
/// opens its own database, so the pool must never grow past one.
pub async fn create_test_pool() -> SqlitePool {
	SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.unwrap()
}

pub async fn create_test_store() -> SqliteJobStateStore {
	let store = SqliteJobStateStore::new(create_test_pool().await);
	store.create_schema().await.unwrap();
	store
}
