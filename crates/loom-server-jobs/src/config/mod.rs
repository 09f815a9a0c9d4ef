// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Job worker configuration.
//!
//! Layered from multiple sources (defaults, TOML file, environment), with
//! environment variables named `LOOM_JOBS_*`.

pub mod sources;

use std::path::PathBuf;

use loom_jobs_core::{ServerId, WorkerIdentity};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

const DEFAULT_SERVER_NAME: &str = "loom-jobs";
const DEFAULT_DATABASE_URL: &str = "sqlite:./loom-jobs.db";
const DEFAULT_LOG_LEVEL: &str = "info";
const WORKERS_PER_CPU: usize = 5;
const MAX_DEFAULT_WORKERS: usize = 20;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobsConfigLayer {
	pub server_name: Option<String>,
	pub worker_count: Option<usize>,
	pub database_url: Option<String>,
	pub log_level: Option<String>,
	pub log_json: Option<bool>,
}

impl JobsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.server_name.is_some() {
			self.server_name = other.server_name;
		}
		if other.worker_count.is_some() {
			self.worker_count = other.worker_count;
		}
		if other.database_url.is_some() {
			self.database_url = other.database_url;
		}
		if other.log_level.is_some() {
			self.log_level = other.log_level;
		}
		if other.log_json.is_some() {
			self.log_json = other.log_json;
		}
	}

	pub fn finalize(self) -> Result<JobsConfig, ConfigError> {
		let worker_count = self.worker_count.unwrap_or_else(default_worker_count);
		if worker_count == 0 {
			return Err(ConfigError::InvalidValue {
				key: "worker_count".to_string(),
				message: "must be at least 1".to_string(),
			});
		}
		if u32::try_from(worker_count).is_err() {
			return Err(ConfigError::InvalidValue {
				key: "worker_count".to_string(),
				message: format!("must be at most {}", u32::MAX),
			});
		}

		Ok(JobsConfig {
			server_name: self
				.server_name
				.unwrap_or_else(|| DEFAULT_SERVER_NAME.to_string()),
			worker_count,
			database_url: self
				.database_url
				.unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
			logging: LoggingConfig {
				level: self
					.log_level
					.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
				json: self.log_json.unwrap_or(false),
			},
		})
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobsConfig {
	pub server_name: String,
	pub worker_count: usize,
	pub database_url: String,
	pub logging: LoggingConfig,
}

impl Default for JobsConfig {
	fn default() -> Self {
		Self {
			server_name: DEFAULT_SERVER_NAME.to_string(),
			worker_count: default_worker_count(),
			database_url: DEFAULT_DATABASE_URL.to_string(),
			logging: LoggingConfig::default(),
		}
	}
}

impl JobsConfig {
	/// One identity per worker slot, numbered from 1.
	pub fn worker_identities(&self, server_id: &ServerId) -> Vec<WorkerIdentity> {
		let count = u32::try_from(self.worker_count).unwrap_or(u32::MAX);
		(1..=count)
			.map(|number| WorkerIdentity::new(server_id.clone(), number))
			.collect()
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
	pub level: String,
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: DEFAULT_LOG_LEVEL.to_string(),
			json: false,
		}
	}
}

fn default_worker_count() -> usize {
	let cpus = std::thread::available_parallelism()
		.map(|n| n.get())
		.unwrap_or(1);
	(cpus * WORKERS_PER_CPU).min(MAX_DEFAULT_WORKERS)
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`LOOM_JOBS_*`)
/// 2. Config file (`/etc/loom/jobs.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<JobsConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<JobsConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<JobsConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = JobsConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	let config = merged.finalize()?;
	info!(
		server_name = %config.server_name,
		worker_count = config.worker_count,
		database = %config.database_url,
		"job worker configuration loaded"
	);
	Ok(config)
}
