// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::context::ServerJobContext;
use crate::error::JobError;

/// User job code run by a worker.
///
/// Long-running implementations should call
/// `ctx.check_cancellation().await?` between units of work; the `?` turns a
/// cancellation into [`JobError::Cancelled`].
#[async_trait]
pub trait Job: Send + Sync {
	fn name(&self) -> &str;

	async fn perform(&self, ctx: &ServerJobContext) -> Result<(), JobError>;
}
