// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tracker configuration.
//!
//! Configuration is assembled from layers (defaults, a TOML file, environment
//! variables, command line flags). Every field of a [`TrackerConfigLayer`] is
//! optional; layers are merged in precedence order and the result is
//! finalized into [`TrackerSettings`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Default request timeout, in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TrackerConfigLayer {
	pub app_name: Option<String>,
	pub app_version: Option<String>,
	pub tracking_code: Option<String>,
	pub verbose: Option<bool>,
	pub request_timeout_secs: Option<u64>,
	pub endpoint: Option<String>,
	pub referer: Option<String>,
	pub user_agent: Option<String>,
}

impl TrackerConfigLayer {
	/// Overlays `other` on top of `self`; fields set in `other` win.
	pub fn merge(&mut self, other: Self) {
		if other.app_name.is_some() {
			self.app_name = other.app_name;
		}
		if other.app_version.is_some() {
			self.app_version = other.app_version;
		}
		if other.tracking_code.is_some() {
			self.tracking_code = other.tracking_code;
		}
		if other.verbose.is_some() {
			self.verbose = other.verbose;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.endpoint.is_some() {
			self.endpoint = other.endpoint;
		}
		if other.referer.is_some() {
			self.referer = other.referer;
		}
		if other.user_agent.is_some() {
			self.user_agent = other.user_agent;
		}
	}

	pub fn finalize(self) -> Result<TrackerSettings, ConfigError> {
		let app_name = self
			.app_name
			.filter(|s| !s.trim().is_empty())
			.ok_or(ConfigError::MissingField("app_name"))?;
		let tracking_code = self
			.tracking_code
			.filter(|s| !s.trim().is_empty())
			.ok_or(ConfigError::MissingField("tracking_code"))?;

		let endpoint = self
			.endpoint
			.map(|raw| {
				Url::parse(&raw).map_err(|e| ConfigError::invalid_value("endpoint", e.to_string()))
			})
			.transpose()?;

		let request_timeout_secs = self
			.request_timeout_secs
			.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
		if request_timeout_secs == 0 {
			return Err(ConfigError::invalid_value(
				"request_timeout_secs",
				"must be greater than zero",
			));
		}

		Ok(TrackerSettings {
			app_name,
			app_version: self.app_version.filter(|s| !s.trim().is_empty()),
			tracking_code,
			verbose: self.verbose.unwrap_or(false),
			request_timeout: Duration::from_secs(request_timeout_secs),
			endpoint,
			referer: self.referer,
			user_agent: self.user_agent,
		})
	}
}

/// Validated tracker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
	pub app_name: String,
	pub app_version: Option<String>,
	pub tracking_code: String,
	pub verbose: bool,
	pub request_timeout: Duration,
	pub endpoint: Option<Url>,
	pub referer: Option<String>,
	pub user_agent: Option<String>,
}
