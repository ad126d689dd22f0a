// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The tracker façade.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use focuspoint_core::{
	FocusPoint, GoogleAnalyticsV1Strategy, InvalidEventError, RequestDescriptor,
	SharedUrlBuildingStrategy, TrackerIdentity,
};
use tracing::{debug, info, warn};

use crate::config::TrackerSettings;
use crate::dispatch::DispatchUnit;
use crate::error::{Result, TrackerError};
use crate::hook::{NoOpOutcomeHook, SharedOutcomeHook};
use crate::transport::{HttpGetTransport, SendOutcome, SharedRequestTransport};

/// Builder for constructing a [`Tracker`].
pub struct TrackerBuilder {
	app_name: Option<String>,
	app_version: Option<String>,
	tracking_code: Option<String>,
	strategy: Option<SharedUrlBuildingStrategy>,
	transport: Option<SharedRequestTransport>,
	hook: Option<SharedOutcomeHook>,
	verbose: bool,
	request_timeout: Duration,
	user_agent: Option<String>,
}

impl TrackerBuilder {
	/// Creates a new builder with default settings.
	pub fn new() -> Self {
		Self {
			app_name: None,
			app_version: None,
			tracking_code: None,
			strategy: None,
			transport: None,
			hook: None,
			verbose: false,
			request_timeout: focuspoint_common_http::DEFAULT_TIMEOUT,
			user_agent: None,
		}
	}

	/// Sets the application name (for example `LibraryFinder`). Required.
	pub fn app_name(mut self, name: impl Into<String>) -> Self {
		self.app_name = Some(name.into());
		self
	}

	/// Sets the application version (for example `1.3.1`).
	pub fn app_version(mut self, version: impl Into<String>) -> Self {
		self.app_version = Some(version.into());
		self
	}

	/// Sets the analytics tracking code (for example `UA-2184000-1`). Required.
	pub fn tracking_code(mut self, code: impl Into<String>) -> Self {
		self.tracking_code = Some(code.into());
		self
	}

	/// Replaces the default [`GoogleAnalyticsV1Strategy`].
	pub fn url_building_strategy(mut self, strategy: SharedUrlBuildingStrategy) -> Self {
		self.strategy = Some(strategy);
		self
	}

	/// Replaces the default [`HttpGetTransport`].
	///
	/// `request_timeout` and `user_agent` only configure the default transport.
	pub fn transport(mut self, transport: SharedRequestTransport) -> Self {
		self.transport = Some(transport);
		self
	}

	/// Observes the outcome of every tracking request.
	pub fn outcome_hook(mut self, hook: SharedOutcomeHook) -> Self {
		self.hook = Some(hook);
		self
	}

	/// Starts the tracker in verbose mode.
	pub fn verbose(mut self, verbose: bool) -> Self {
		self.verbose = verbose;
		self
	}

	/// Sets the HTTP request timeout of the default transport.
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Sets the User-Agent of the default transport.
	pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
		self.user_agent = Some(user_agent.into());
		self
	}

	/// Builds the tracker.
	///
	/// # Errors
	///
	/// Fails with [`TrackerError::Configuration`] when the application name or
	/// tracking code is missing or blank.
	pub fn build(self) -> Result<Tracker> {
		let identity = TrackerIdentity::new(
			self.app_name.unwrap_or_default(),
			self.app_version,
			self.tracking_code.unwrap_or_default(),
		)?;

		let transport: SharedRequestTransport = match self.transport {
			Some(transport) => transport,
			None => Arc::new(match self.user_agent {
				Some(user_agent) => HttpGetTransport::with_user_agent(user_agent, self.request_timeout)?,
				None => HttpGetTransport::with_timeout(self.request_timeout)?,
			}),
		};
		transport.set_verbose_mode(self.verbose);

		let strategy = self
			.strategy
			.unwrap_or_else(|| Arc::new(GoogleAnalyticsV1Strategy::new()));

		debug!(
			app_name = %identity.app_name(),
			tracking_code = %identity.tracking_code(),
			protocol = %strategy.protocol_version(),
			"Tracker initialized"
		);

		Ok(Tracker {
			inner: Arc::new(TrackerInner {
				identity,
				strategy: RwLock::new(strategy),
				transport,
				hook: self.hook.unwrap_or_else(|| Arc::new(NoOpOutcomeHook)),
				verbose: AtomicBool::new(self.verbose),
			}),
		})
	}
}

impl Default for TrackerBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// State shared by a tracker and its in-flight dispatch units.
pub(crate) struct TrackerInner {
	identity: TrackerIdentity,
	strategy: RwLock<SharedUrlBuildingStrategy>,
	transport: SharedRequestTransport,
	hook: SharedOutcomeHook,
	verbose: AtomicBool,
}

impl TrackerInner {
	pub(crate) fn identity(&self) -> &TrackerIdentity {
		&self.identity
	}

	pub(crate) fn hook(&self) -> &SharedOutcomeHook {
		&self.hook
	}

	pub(crate) fn is_verbose(&self) -> bool {
		self.verbose.load(Ordering::Relaxed)
	}

	fn current_strategy(&self) -> SharedUrlBuildingStrategy {
		Arc::clone(&self.strategy.read().unwrap_or_else(PoisonError::into_inner))
	}

	/// Sends through the transport, then reports the outcome. In verbose mode
	/// the tracker records every outcome itself, whatever the transport logs.
	pub(crate) async fn send(&self, request: &RequestDescriptor) -> SendOutcome {
		let outcome = self.transport.send(request).await;
		if self.is_verbose() {
			match &outcome {
				SendOutcome::Delivered { status } => {
					info!(url = %request.url(), status, "tracking outcome: delivered");
				}
				SendOutcome::Failed { reason } => {
					warn!(url = %request.url(), reason = %reason, "tracking outcome: failed");
				}
			}
		}
		self.hook.on_send(request, &outcome);
		outcome
	}

	pub(crate) fn log_invalid_event(&self, focus_point: &FocusPoint, error: &InvalidEventError) {
		if self.is_verbose() {
			warn!(
				focus_point = %focus_point.name(),
				error = %error,
				"focus point could not be encoded"
			);
		}
	}
}

/// Tracks focus points of an application against an analytics account.
///
/// Cloning a tracker is cheap; clones share configuration.
///
/// # Example
///
/// ```ignore
/// use focuspoint_tracker::{FocusPoint, Tracker};
///
/// let tracker = Tracker::with_app_version("LibraryFinder", "1.3.1", "UA-2184000-1")?;
/// tracker.set_verbose_mode(true);
///
/// // Returns immediately; the request is sent in the background.
/// tracker.track_asynchronously(FocusPoint::new("Search"));
///
/// // Waits for the request to complete or fail.
/// tracker.track_synchronously(&FocusPoint::new("Exit")).await?;
/// ```
#[derive(Clone)]
pub struct Tracker {
	inner: Arc<TrackerInner>,
}

impl Tracker {
	/// Creates a new builder for constructing a Tracker.
	pub fn builder() -> TrackerBuilder {
		TrackerBuilder::new()
	}

	/// Creates a tracker for `app_name` reporting to `tracking_code`.
	pub fn new(app_name: impl Into<String>, tracking_code: impl Into<String>) -> Result<Self> {
		Self::builder()
			.app_name(app_name)
			.tracking_code(tracking_code)
			.build()
	}

	/// Creates a tracker that also reports the application version.
	pub fn with_app_version(
		app_name: impl Into<String>,
		app_version: impl Into<String>,
		tracking_code: impl Into<String>,
	) -> Result<Self> {
		Self::builder()
			.app_name(app_name)
			.app_version(app_version)
			.tracking_code(tracking_code)
			.build()
	}

	/// Creates a tracker from finalized configuration.
	pub fn from_settings(settings: &TrackerSettings) -> Result<Self> {
		let mut strategy = GoogleAnalyticsV1Strategy::new();
		if let Some(endpoint) = &settings.endpoint {
			strategy = strategy.with_endpoint(endpoint.clone());
		}
		if let Some(referer) = &settings.referer {
			strategy = strategy.with_referer(referer.clone());
		}

		let mut builder = Self::builder()
			.app_name(settings.app_name.clone())
			.tracking_code(settings.tracking_code.clone())
			.url_building_strategy(Arc::new(strategy))
			.verbose(settings.verbose)
			.request_timeout(settings.request_timeout);
		if let Some(version) = &settings.app_version {
			builder = builder.app_version(version.clone());
		}
		if let Some(user_agent) = &settings.user_agent {
			builder = builder.user_agent(user_agent.clone());
		}
		builder.build()
	}

	pub fn identity(&self) -> &TrackerIdentity {
		&self.inner.identity
	}

	/// Replaces the URL building strategy for subsequent tracking calls.
	///
	/// Dispatch units already spawned keep the strategy they captured.
	pub fn set_url_building_strategy(&self, strategy: SharedUrlBuildingStrategy) {
		info!(protocol = %strategy.protocol_version(), "URL building strategy replaced");
		*self
			.inner
			.strategy
			.write()
			.unwrap_or_else(PoisonError::into_inner) = strategy;
	}

	/// Returns the strategy the next tracking call will use.
	pub fn url_building_strategy(&self) -> SharedUrlBuildingStrategy {
		self.inner.current_strategy()
	}

	/// Runs the tracker in verbose mode, logging the success or failure of
	/// every request. Takes effect immediately, including for dispatch units
	/// already in flight.
	pub fn set_verbose_mode(&self, verbose: bool) {
		self.inner.verbose.store(verbose, Ordering::Relaxed);
		self.inner.transport.set_verbose_mode(verbose);
	}

	pub fn is_verbose(&self) -> bool {
		self.inner.is_verbose()
	}

	/// Builds the request the next tracking call would send for `focus_point`,
	/// without sending it.
	pub fn build_request(&self, focus_point: &FocusPoint) -> Result<RequestDescriptor> {
		self
			.inner
			.current_strategy()
			.build(focus_point, &self.inner.identity)
			.map_err(TrackerError::from)
	}

	/// Tracks `focus_point`, waiting for the request to complete or fail.
	///
	/// The caller absorbs the full network latency; prefer
	/// [`track_asynchronously`](Self::track_asynchronously) unless the request
	/// must have been attempted before continuing (for example on exit).
	///
	/// # Errors
	///
	/// Returns [`TrackerError::InvalidEvent`] when the strategy cannot encode
	/// the focus point. Transport failures are never returned.
	pub async fn track_synchronously(&self, focus_point: &FocusPoint) -> Result<()> {
		let request = match self
			.inner
			.current_strategy()
			.build(focus_point, &self.inner.identity)
		{
			Ok(request) => request,
			Err(e) => {
				self.inner.log_invalid_event(focus_point, &e);
				return Err(e.into());
			}
		};
		self.inner.send(&request).await;
		Ok(())
	}

	/// Tracks `focus_point` in the background and returns immediately.
	///
	/// The current strategy is captured now; the outcome is never reported to
	/// the caller.
	pub fn track_asynchronously(&self, focus_point: FocusPoint) {
		DispatchUnit::new(
			Arc::clone(&self.inner),
			self.inner.current_strategy(),
			focus_point,
		)
		.spawn();
	}
}

impl fmt::Debug for Tracker {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Tracker")
			.field("identity", &self.inner.identity)
			.field("protocol", &self.inner.current_strategy().protocol_version())
			.field("verbose", &self.is_verbose())
			.finish()
	}
}
