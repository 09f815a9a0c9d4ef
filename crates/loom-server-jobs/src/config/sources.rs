// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use super::{ConfigError, JobsConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<JobsConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<JobsConfigLayer, ConfigError> {
		Ok(JobsConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/loom/jobs.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<JobsConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(JobsConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: JobsConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: LOOM_JOBS_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<JobsConfigLayer, ConfigError> {
		load_from_lookup(|name| std::env::var(name).ok())
	}
}

fn load_from_lookup(
	lookup: impl Fn(&str) -> Option<String>,
) -> Result<JobsConfigLayer, ConfigError> {
	let var = |name: &str| lookup(name).filter(|s| !s.is_empty());

	let worker_count = match var("LOOM_JOBS_WORKER_COUNT") {
		Some(v) => Some(v.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
			key: "LOOM_JOBS_WORKER_COUNT".to_string(),
			message: format!("invalid usize value '{v}'"),
		})?),
		None => None,
	};

	Ok(JobsConfigLayer {
		server_name: var("LOOM_JOBS_SERVER_NAME"),
		worker_count,
		database_url: var("LOOM_JOBS_DATABASE_URL"),
		log_level: var("LOOM_JOBS_LOG_LEVEL"),
		log_json: var("LOOM_JOBS_LOG_JSON").map(|v| v.eq_ignore_ascii_case("true") || v == "1"),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		move |name| vars.get(name).cloned()
	}

	#[test]
	fn test_precedence_order() {
		assert!(Precedence::Defaults < Precedence::ConfigFile);
		assert!(Precedence::ConfigFile < Precedence::Environment);
	}

	#[test]
	fn test_env_layer_reads_all_fields() {
		let layer = load_from_lookup(lookup(&[
			("LOOM_JOBS_SERVER_NAME", "reports"),
			("LOOM_JOBS_WORKER_COUNT", "7"),
			("LOOM_JOBS_DATABASE_URL", "sqlite::memory:"),
			("LOOM_JOBS_LOG_LEVEL", "debug"),
			("LOOM_JOBS_LOG_JSON", "TRUE"),
		]))
		.unwrap();

		assert_eq!(layer.server_name.as_deref(), Some("reports"));
		assert_eq!(layer.worker_count, Some(7));
		assert_eq!(layer.database_url.as_deref(), Some("sqlite::memory:"));
		assert_eq!(layer.log_level.as_deref(), Some("debug"));
		assert_eq!(layer.log_json, Some(true));
	}

	#[test]
	fn test_env_layer_ignores_empty_values() {
		let layer = load_from_lookup(lookup(&[("LOOM_JOBS_SERVER_NAME", "")])).unwrap();
		assert_eq!(layer, JobsConfigLayer::default());
	}

	#[test]
	fn test_env_layer_rejects_bad_worker_count() {
		let err = load_from_lookup(lookup(&[("LOOM_JOBS_WORKER_COUNT", "lots")])).unwrap_err();
		assert!(
			matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "LOOM_JOBS_WORKER_COUNT")
		);
	}
}
