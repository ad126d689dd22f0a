// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static tracker identity.

use crate::error::ConfigurationError;

/// The application and analytics account a tracker reports for.
///
/// Validated once at construction and immutable afterwards, so strategies can
/// rely on the application name and tracking code being present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerIdentity {
	app_name: String,
	app_version: Option<String>,
	tracking_code: String,
}

impl TrackerIdentity {
	/// Creates a validated identity.
	///
	/// Surrounding whitespace is trimmed. An empty version is treated as absent.
	pub fn new(
		app_name: impl Into<String>,
		app_version: Option<String>,
		tracking_code: impl Into<String>,
	) -> Result<Self, ConfigurationError> {
		let app_name = app_name.into().trim().to_string();
		if app_name.is_empty() {
			return Err(ConfigurationError::MissingAppName);
		}

		let tracking_code = tracking_code.into().trim().to_string();
		if tracking_code.is_empty() {
			return Err(ConfigurationError::MissingTrackingCode);
		}

		let app_version = app_version
			.map(|v| v.trim().to_string())
			.filter(|v| !v.is_empty());

		Ok(Self {
			app_name,
			app_version,
			tracking_code,
		})
	}

	pub fn app_name(&self) -> &str {
		&self.app_name
	}

	pub fn app_version(&self) -> Option<&str> {
		self.app_version.as_deref()
	}

	pub fn tracking_code(&self) -> &str {
		&self.tracking_code
	}

	/// Path segments that root every focus point reported under this identity:
	/// the application name, then the version when present.
	pub fn root_segments(&self) -> Vec<&str> {
		let mut segments = vec![self.app_name.as_str()];
		if let Some(version) = self.app_version() {
			segments.push(version);
		}
		segments
	}
}
