// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::CancellationError;
use crate::shutdown::ShutdownSignal;

/// Something job code can ask "should I stop now?".
///
/// Cancellation is cooperative: long-running job code calls
/// [`check_cancellation`](Self::check_cancellation) at safe points and unwinds
/// on any error. Nothing interrupts job code that never calls it.
#[async_trait]
pub trait JobCancellationToken: Send + Sync {
	/// The shutdown signal this token observes.
	fn shutdown_signal(&self) -> &ShutdownSignal;

	/// Returns `Ok(())` when the job should keep running. Calling it
	/// repeatedly with no change in shutdown or storage state gives the same
	/// result each time.
	async fn check_cancellation(&self) -> Result<(), CancellationError>;
}
