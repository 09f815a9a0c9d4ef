// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

/// Process-wide graceful shutdown broadcast.
///
/// One coordinator calls [`trigger`](Self::trigger); any number of workers
/// observe it through clones of the same handle. [`is_requested`](Self::is_requested)
/// is a single atomic load and never waits on the trigger. The token only
/// backs the [`requested`](Self::requested) await form.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
	requested: Arc<AtomicBool>,
	token: CancellationToken,
}

impl ShutdownSignal {
	pub fn new() -> Self {
		Self::default()
	}

	/// Request shutdown. Idempotent.
	pub fn trigger(&self) {
		self.requested.store(true, Ordering::SeqCst);
		self.token.cancel();
	}

	pub fn is_requested(&self) -> bool {
		self.requested.load(Ordering::SeqCst)
	}

	/// Resolves once shutdown has been requested.
	pub async fn requested(&self) {
		self.token.cancelled().await;
	}
}
