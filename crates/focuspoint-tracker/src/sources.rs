// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, TOML files, environment variables and
//! explicit overrides.

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::config::{TrackerConfigLayer, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::error::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
	CommandLine = 100,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<TrackerConfigLayer, ConfigError>;
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

	fn load(&self) -> Result<TrackerConfigLayer, ConfigError> {
		Ok(TrackerConfigLayer {
			verbose: Some(false),
			request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
			..Default::default()
		})
	}
}

/// TOML file configuration source. A missing file contributes nothing.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<TrackerConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(TrackerConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: TrackerConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Environment variable source.
///
/// Convention: `FOCUSPOINT_<FIELD>`, for example `FOCUSPOINT_TRACKING_CODE`.
pub struct EnvSource {
	lookup: EnvLookup,
}

impl EnvSource {
	/// Reads the process environment.
	pub fn new() -> Self {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads variables through `lookup` instead of the process environment.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String> + Send + Sync + 'static,
	{
		Self {
			lookup: Box::new(lookup),
		}
	}

	fn var(&self, name: &str) -> Option<String> {
		(self.lookup)(name).filter(|s| !s.is_empty())
	}

	fn flag(&self, name: &str) -> Result<Option<bool>, ConfigError> {
		match self.var(name) {
			Some(v) => parse_flag(&v).map(Some).ok_or_else(|| {
				ConfigError::invalid_value(name, format!("invalid boolean value '{v}'"))
			}),
			None => Ok(None),
		}
	}

	fn number(&self, name: &str) -> Result<Option<u64>, ConfigError> {
		match self.var(name) {
			Some(v) => v
				.parse()
				.map(Some)
				.map_err(|_| ConfigError::invalid_value(name, format!("invalid u64 value '{v}'"))),
			None => Ok(None),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<TrackerConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(TrackerConfigLayer {
			app_name: self.var("FOCUSPOINT_APP_NAME"),
			app_version: self.var("FOCUSPOINT_APP_VERSION"),
			tracking_code: self.var("FOCUSPOINT_TRACKING_CODE"),
			verbose: self.flag("FOCUSPOINT_VERBOSE")?,
			request_timeout_secs: self.number("FOCUSPOINT_REQUEST_TIMEOUT_SECS")?,
			endpoint: self.var("FOCUSPOINT_ENDPOINT"),
			referer: self.var("FOCUSPOINT_REFERER"),
			user_agent: self.var("FOCUSPOINT_USER_AGENT"),
		})
	}
}

/// Accepts `true`/`false`, `1`/`0`, `yes`/`no` and `on`/`off`, ignoring case.
fn parse_flag(value: &str) -> Option<bool> {
	match value.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Some(true),
		"false" | "0" | "no" | "off" => Some(false),
		_ => None,
	}
}

/// A fixed layer, typically built from command line flags.
pub struct LayerSource {
	layer: TrackerConfigLayer,
	precedence: Precedence,
}

impl LayerSource {
	pub fn command_line(layer: TrackerConfigLayer) -> Self {
		Self {
			layer,
			precedence: Precedence::CommandLine,
		}
	}
}

impl ConfigSource for LayerSource {
	fn name(&self) -> &'static str {
		"command-line"
	}

	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<TrackerConfigLayer, ConfigError> {
		Ok(self.layer.clone())
	}
}

/// Merges `sources` from lowest to highest precedence.
pub fn load_layers(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<TrackerConfigLayer, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = TrackerConfigLayer::default();
	for source in &sources {
		trace!(source = source.name(), "merging config source");
		merged.merge(source.load()?);
	}
	Ok(merged)
}

/// Loads defaults, the optional TOML file at `path`, the process environment
/// and finally `overrides`.
pub fn load_config(
	path: Option<&Path>,
	overrides: TrackerConfigLayer,
) -> Result<TrackerConfigLayer, ConfigError> {
	load_config_with_env(path, EnvSource::new(), overrides)
}

/// [`load_config`] with an explicit environment source.
pub fn load_config_with_env(
	path: Option<&Path>,
	env: EnvSource,
	overrides: TrackerConfigLayer,
) -> Result<TrackerConfigLayer, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource)];
	if let Some(path) = path {
		sources.push(Box::new(TomlSource::new(path)));
	}
	sources.push(Box::new(env));
	sources.push(Box::new(LayerSource::command_line(overrides)));
	load_layers(sources)
}
