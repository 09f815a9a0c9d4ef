// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! SQLite-backed job state storage.
//!
//! One row per job holds its current state. The execution context only ever
//! reads through [`JobStateStore`]; the write methods are for the engine that
//! drives state transitions.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use loom_jobs_core::{JobStateStore, StateData, StoreError};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};

/// Create a SqlitePool with WAL mode and common settings.
///
/// # Arguments
/// * `database_url` - SQLite connection string (e.g., "sqlite:./loom-jobs.db")
#[tracing::instrument(skip(database_url))]
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StoreError> {
	let options = SqliteConnectOptions::from_str(database_url)
		.map_err(|e| StoreError::Backend(format!("invalid database URL: {e}")))?
		.journal_mode(SqliteJournalMode::Wal)
		.synchronous(SqliteSynchronous::Normal)
		.create_if_missing(true);

	let pool = SqlitePool::connect_with(options)
		.await
		.map_err(backend_error)?;

	tracing::debug!("job state pool created");
	Ok(pool)
}

#[derive(Clone)]
pub struct SqliteJobStateStore {
	pool: SqlitePool,
}

impl SqliteJobStateStore {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self))]
	pub async fn create_schema(&self) -> Result<(), StoreError> {
		sqlx::query(
			r#"
            CREATE TABLE IF NOT EXISTS job_states (
                job_id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                reason TEXT,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
		)
		.execute(&self.pool)
		.await
		.map_err(backend_error)?;

		Ok(())
	}

	#[tracing::instrument(skip(self, state), fields(state_name = %state.name))]
	pub async fn set_state(&self, job_id: &str, state: &StateData) -> Result<(), StoreError> {
		let data = serde_json::to_string(&state.data).map_err(|e| StoreError::Corrupt {
			job_id: job_id.to_string(),
			message: e.to_string(),
		})?;
		let now = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

		sqlx::query(
			r#"
            INSERT INTO job_states (job_id, name, reason, data, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(job_id) DO UPDATE SET
                name = excluded.name,
                reason = excluded.reason,
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
		)
		.bind(job_id)
		.bind(&state.name)
		.bind(&state.reason)
		.bind(data)
		.bind(now)
		.execute(&self.pool)
		.await
		.map_err(backend_error)?;

		Ok(())
	}

	/// Returns `true` if a row was removed.
	#[tracing::instrument(skip(self))]
	pub async fn delete_state(&self, job_id: &str) -> Result<bool, StoreError> {
		let result = sqlx::query("DELETE FROM job_states WHERE job_id = ?")
			.bind(job_id)
			.execute(&self.pool)
			.await
			.map_err(backend_error)?;

		Ok(result.rows_affected() > 0)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_state_data(&self, job_id: &str) -> Result<Option<StateData>, StoreError> {
		let row = sqlx::query_as::<_, (String, Option<String>, String)>(
			"SELECT name, reason, data FROM job_states WHERE job_id = ?",
		)
		.bind(job_id)
		.fetch_optional(&self.pool)
		.await
		.map_err(backend_error)?;

		row
			.map(|(name, reason, data)| {
				let data: HashMap<String, String> =
					serde_json::from_str(&data).map_err(|e| StoreError::Corrupt {
						job_id: job_id.to_string(),
						message: e.to_string(),
					})?;
				Ok(StateData { name, reason, data })
			})
			.transpose()
	}
}

#[async_trait]
impl JobStateStore for SqliteJobStateStore {
	async fn get_state_data(&self, job_id: &str) -> Result<Option<StateData>, StoreError> {
		self.get_state_data(job_id).await
	}
}

fn backend_error(e: sqlx::Error) -> StoreError {
	StoreError::Backend(e.to_string())
}
