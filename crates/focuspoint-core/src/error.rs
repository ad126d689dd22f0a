// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for identity validation and URL building.

use thiserror::Error;

/// Tracker identity is missing a required field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
	/// Application name is empty.
	#[error("application name must not be empty")]
	MissingAppName,

	/// Tracking code is empty.
	#[error("tracking code must not be empty")]
	MissingTrackingCode,
}

/// A URL building strategy could not encode a focus point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidEventError {
	/// The focus point, or one of its parents, has an empty name.
	#[error("focus point name must not be empty")]
	EmptyName,

	/// The focus point carries more custom variables than the protocol allows.
	#[error("too many custom variables: {count} (maximum {max})")]
	TooManyCustomVariables { count: usize, max: usize },

	/// A custom variable has an empty name.
	#[error("custom variable names must not be empty")]
	EmptyCustomVariableName,

	/// Strategy-specific rejection.
	#[error("unsupported focus point: {0}")]
	Unsupported(String),
}
