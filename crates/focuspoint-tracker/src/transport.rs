// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Request transports.
//!
//! A transport performs the network call for a [`RequestDescriptor`] and
//! reports what happened as a [`SendOutcome`]. Transports never return errors:
//! tracking must not be able to break or slow the host application, so every
//! failure is folded into the outcome and, in verbose mode, logged at `debug`
//! with transport detail. The tracker logs the outcome itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use focuspoint_core::RequestDescriptor;
use reqwest::Client;
use tracing::debug;

use crate::error::{Result, TrackerError, TransportError};

/// What happened to a single tracking request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
	/// The endpoint accepted the request.
	Delivered { status: u16 },
	/// The request did not reach the endpoint, or was rejected.
	Failed { reason: String },
}

impl SendOutcome {
	pub fn is_delivered(&self) -> bool {
		matches!(self, SendOutcome::Delivered { .. })
	}
}

/// Performs the network call for a tracking request.
#[async_trait]
pub trait RequestTransport: Send + Sync + 'static {
	/// Sends the request. Implementations must swallow every failure.
	async fn send(&self, request: &RequestDescriptor) -> SendOutcome;

	/// Enables or disables diagnostic logging of outcomes.
	fn set_verbose_mode(&self, _verbose: bool) {}
}

/// Type alias for a shared request transport.
pub type SharedRequestTransport = Arc<dyn RequestTransport>;

/// Transport issuing plain HTTP requests with `reqwest`.
///
/// Redirects are followed. Any non-2xx status counts as a failure.
pub struct HttpGetTransport {
	client: Client,
	verbose: AtomicBool,
}

impl HttpGetTransport {
	/// Creates a transport with the shared client defaults.
	pub fn new() -> Result<Self> {
		Self::with_timeout(focuspoint_common_http::DEFAULT_TIMEOUT)
	}

	/// Creates a transport whose requests give up after `timeout`.
	pub fn with_timeout(timeout: Duration) -> Result<Self> {
		let client = focuspoint_common_http::new_client_with_timeout(timeout)
			.map_err(TrackerError::HttpClient)?;
		Ok(Self::with_client(client))
	}

	/// Creates a transport announcing itself as `user_agent`.
	pub fn with_user_agent(user_agent: impl Into<String>, timeout: Duration) -> Result<Self> {
		let client = focuspoint_common_http::builder_with_user_agent(user_agent)
			.timeout(timeout)
			.build()
			.map_err(TrackerError::HttpClient)?;
		Ok(Self::with_client(client))
	}

	/// Wraps an existing client.
	pub fn with_client(client: Client) -> Self {
		Self {
			client,
			verbose: AtomicBool::new(false),
		}
	}

	pub fn is_verbose(&self) -> bool {
		self.verbose.load(Ordering::Relaxed)
	}

	async fn execute(&self, request: &RequestDescriptor) -> std::result::Result<u16, TransportError> {
		let response = self
			.client
			.request(request.method().clone(), request.url().clone())
			.send()
			.await?;

		let status = response.status();
		if !status.is_success() {
			return Err(TransportError::Status(status.as_u16()));
		}

		Ok(status.as_u16())
	}
}

#[async_trait]
impl RequestTransport for HttpGetTransport {
	async fn send(&self, request: &RequestDescriptor) -> SendOutcome {
		match self.execute(request).await {
			Ok(status) => {
				if self.is_verbose() {
					debug!(url = %request.url(), status, "tracking request delivered");
				}
				SendOutcome::Delivered { status }
			}
			Err(e) => {
				if self.is_verbose() {
					debug!(url = %request.url(), error = %e, "tracking request failed");
				}
				SendOutcome::Failed {
					reason: e.to_string(),
				}
			}
		}
	}

	fn set_verbose_mode(&self, verbose: bool) {
		self.verbose.store(verbose, Ordering::Relaxed);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use url::Url;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	fn request_to(url: &str) -> RequestDescriptor {
		RequestDescriptor::get(Url::parse(url).unwrap())
	}

	#[test]
	fn test_verbose_mode_toggles() {
		let transport = HttpGetTransport::new().unwrap();
		assert!(!transport.is_verbose());

		transport.set_verbose_mode(true);
		assert!(transport.is_verbose());

		transport.set_verbose_mode(false);
		assert!(!transport.is_verbose());
	}

	#[test]
	fn test_outcome_is_delivered() {
		assert!(SendOutcome::Delivered { status: 200 }.is_delivered());
		assert!(!SendOutcome::Failed {
			reason: "boom".to_string()
		}
		.is_delivered());
	}

	#[tokio::test]
	async fn test_send_success() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path("/__utm.gif"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let transport = HttpGetTransport::new().unwrap();
		let outcome = transport
			.send(&request_to(&format!("{}/__utm.gif?utmwv=1", server.uri())))
			.await;

		assert_eq!(outcome, SendOutcome::Delivered { status: 200 });
	}

	#[tokio::test]
	async fn test_send_non_success_status_is_failure() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(503))
			.mount(&server)
			.await;

		let transport = HttpGetTransport::new().unwrap();
		let outcome = transport.send(&request_to(&server.uri())).await;

		assert_eq!(
			outcome,
			SendOutcome::Failed {
				reason: "unexpected status 503".to_string()
			}
		);
	}

	#[tokio::test]
	async fn test_send_connection_refused_is_failure() {
		let transport = HttpGetTransport::with_timeout(Duration::from_secs(2)).unwrap();
		let outcome = transport.send(&request_to("http://127.0.0.1:1/__utm.gif")).await;

		assert!(matches!(outcome, SendOutcome::Failed { .. }));
	}

	#[tokio::test]
	async fn test_custom_user_agent_is_sent() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(wiremock::matchers::header("user-agent", "tracker-test/1.0"))
			.respond_with(ResponseTemplate::new(200))
			.expect(1)
			.mount(&server)
			.await;

		let transport =
			HttpGetTransport::with_user_agent("tracker-test/1.0", Duration::from_secs(5)).unwrap();
		let outcome = transport.send(&request_to(&server.uri())).await;

		assert!(outcome.is_delivered());
	}
}
