// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber for a job worker process.
///
/// `RUST_LOG` wins over the configured level when set. Returns `false` if a
/// global subscriber was already installed.
pub fn init_tracing(config: &LoggingConfig) -> bool {
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

	let result = if config.json {
		tracing_subscriber::fmt()
			.with_env_filter(filter)
			.json()
			.try_init()
	} else {
		tracing_subscriber::fmt().with_env_filter(filter).try_init()
	};

	result.is_ok()
}
