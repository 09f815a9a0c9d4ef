// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::StoreError;
use crate::state::StateData;

/// Read access to the persisted state of jobs.
///
/// Implementations must be safe to call concurrently from many workers and
/// must return `Ok(None)`, not an error, when no state exists for `job_id`.
#[async_trait]
pub trait JobStateStore: Send + Sync {
	async fn get_state_data(&self, job_id: &str) -> Result<Option<StateData>, StoreError>;
}
