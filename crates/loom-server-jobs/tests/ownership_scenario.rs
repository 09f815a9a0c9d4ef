// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A worker's view of one job while its persisted owner changes underneath it.

use std::sync::Arc;

use loom_server_jobs::{
	AbortReason, CancellationError, JobCancellationToken, ServerJobContext, ShutdownSignal,
	SqliteJobStateStore, StateData, WorkerIdentity,
};
use sqlx::sqlite::SqlitePoolOptions;

const JOB_ID: &str = "my-job";

async fn setup_store() -> Arc<SqliteJobStateStore> {
	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.idle_timeout(None)
		.max_lifetime(None)
		.connect("sqlite::memory:")
		.await
		.unwrap();
	let store = SqliteJobStateStore::new(pool);
	store.create_schema().await.unwrap();
	Arc::new(store)
}

fn processing(worker_number: &str, server_id: &str) -> StateData {
	StateData::new("Processing")
		.with_entry("WorkerNumber", worker_number)
		.with_entry("ServerId", server_id)
}

#[tokio::test]
async fn test_ownership_drift_and_shutdown() {
	let store = setup_store().await;
	let shutdown = ShutdownSignal::new();
	let ctx = ServerJobContext::new(
		JOB_ID,
		store.clone(),
		WorkerIdentity::new("Server", 1),
		Some(shutdown.clone()),
	)
	.unwrap();
	assert_eq!(ctx.job_id(), "my-job");

	store
		.set_state(JOB_ID, &processing("1", "Server"))
		.await
		.unwrap();
	assert_eq!(ctx.check_cancellation().await, Ok(()));
	assert_eq!(ctx.check_cancellation().await, Ok(()));

	store
		.set_state(JOB_ID, &processing("999", "Server"))
		.await
		.unwrap();
	let err = ctx.check_cancellation().await.unwrap_err();
	assert_eq!(
		err,
		CancellationError::JobAborted {
			job_id: JOB_ID.to_string(),
			reason: AbortReason::WorkerMismatch {
				expected: 1,
				actual: Some("999".to_string()),
			},
		}
	);

	store
		.set_state(JOB_ID, &processing("1", "AnotherServer"))
		.await
		.unwrap();
	let err = ctx.check_cancellation().await.unwrap_err();
	assert_eq!(
		err.abort_reason(),
		Some(&AbortReason::ServerMismatch {
			expected: "Server".to_string(),
			actual: Some("AnotherServer".to_string()),
		})
	);

	store
		.set_state(JOB_ID, &processing("1", "Server"))
		.await
		.unwrap();
	assert_eq!(ctx.check_cancellation().await, Ok(()));

	shutdown.trigger();
	assert_eq!(
		ctx.check_cancellation().await,
		Err(CancellationError::ShutdownRequested)
	);
}

#[tokio::test]
async fn test_deleted_and_requeued_jobs_are_aborted() {
	let store = setup_store().await;
	let ctx = ServerJobContext::new(JOB_ID, store.clone(), WorkerIdentity::new("Server", 1), None)
		.unwrap();

	let err = ctx.check_cancellation().await.unwrap_err();
	assert_eq!(err.abort_reason(), Some(&AbortReason::StateMissing));

	store
		.set_state(JOB_ID, &StateData::new("Enqueued").with_reason("requeued"))
		.await
		.unwrap();
	let err = ctx.check_cancellation().await.unwrap_err();
	assert_eq!(
		err.abort_reason(),
		Some(&AbortReason::WrongState {
			actual: "Enqueued".to_string()
		})
	);

	store
		.set_state(JOB_ID, &processing("1", "Server"))
		.await
		.unwrap();
	assert_eq!(ctx.check_cancellation().await, Ok(()));

	store.delete_state(JOB_ID).await.unwrap();
	assert!(ctx.check_cancellation().await.unwrap_err().is_aborted());
}

#[tokio::test]
async fn test_workers_on_one_server_see_only_their_own_jobs() {
	let store = setup_store().await;
	store
		.set_state("job-a", &processing("1", "Server"))
		.await
		.unwrap();
	store
		.set_state("job-b", &processing("2", "Server"))
		.await
		.unwrap();

	let shutdown = ShutdownSignal::new();
	let mut handles = Vec::new();
	for (job_id, worker_number) in [("job-a", 1), ("job-b", 2), ("job-a", 2)] {
		let ctx = ServerJobContext::new(
			job_id,
			store.clone(),
			WorkerIdentity::new("Server", worker_number),
			Some(shutdown.clone()),
		)
		.unwrap();
		handles.push(tokio::spawn(async move { ctx.check_cancellation().await }));
	}

	let mut results = Vec::new();
	for handle in handles {
		results.push(handle.await.unwrap());
	}

	assert_eq!(results[0], Ok(()));
	assert_eq!(results[1], Ok(()));
	assert!(matches!(
		results[2].as_ref().unwrap_err().abort_reason(),
		Some(AbortReason::WorkerMismatch { .. })
	));
}
