// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the tracker.

use std::path::PathBuf;

use focuspoint_core::{ConfigurationError, InvalidEventError};
use thiserror::Error;

/// Errors a tracker surfaces to its caller.
///
/// Transport failures never leave the transport and have no variant here.
#[derive(Debug, Error)]
pub enum TrackerError {
	/// Tracker identity is incomplete.
	#[error("invalid tracker configuration: {0}")]
	Configuration(#[from] ConfigurationError),

	/// The active strategy could not encode the focus point.
	#[error("invalid focus point: {0}")]
	InvalidEvent(#[from] InvalidEventError),

	/// The HTTP client could not be constructed.
	#[error("failed to build HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),

	/// Layered configuration could not be loaded or finalized.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

impl TrackerError {
	/// Returns true for errors caused by incomplete or invalid configuration.
	pub fn is_configuration(&self) -> bool {
		matches!(
			self,
			TrackerError::Configuration(_) | TrackerError::Config(_)
		)
	}
}

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Why a request did not reach the collection endpoint.
///
/// Produced and consumed inside transports; callers only ever see it rendered
/// into a [`SendOutcome`](crate::SendOutcome).
#[derive(Debug, Error)]
pub enum TransportError {
	/// DNS, connect, TLS or timeout failure.
	#[error("request failed: {0}")]
	Request(#[from] reqwest::Error),

	/// The endpoint answered with a non-success status.
	#[error("unexpected status {0}")]
	Status(u16),
}

/// Errors raised while loading tracker configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Config file could not be read.
	#[error("failed to read {path}: {source}")]
	FileRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Config file is not valid TOML for the tracker layer.
	#[error("TOML parse error in {path}: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	/// A required field is absent from every layer.
	#[error("missing required field: {0}")]
	MissingField(&'static str),

	/// A field is present but unusable.
	#[error("invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

impl ConfigError {
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
