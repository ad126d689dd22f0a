// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Request timeout applied by [`new_client`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Creates a new HTTP client with the standard User-Agent and [`DEFAULT_TIMEOUT`].
pub fn new_client() -> reqwest::Result<Client> {
	new_client_with_timeout(DEFAULT_TIMEOUT)
}

/// Client builder preset with the standard User-Agent header.
///
/// # Example
/// ```ignore
/// let client = focuspoint_common_http::builder()
///     .connect_timeout(Duration::from_secs(2))
///     .redirect(reqwest::redirect::Policy::limited(3))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Creates a new HTTP client builder with a custom User-Agent header.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	Client::builder().user_agent(user_agent.into())
}

/// Creates a new HTTP client with a custom timeout and the standard User-Agent.
pub fn new_client_with_timeout(timeout: Duration) -> reqwest::Result<Client> {
	builder().timeout(timeout).build()
}

/// Returns the standard User-Agent string.
///
/// Format: `focuspoint/{version} ({os}; {arch})`
pub fn user_agent() -> String {
	format!(
		"focuspoint/{} ({}; {})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
