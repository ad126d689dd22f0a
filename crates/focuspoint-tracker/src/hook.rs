// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Observing tracking outcomes.
//!
//! Tracking is fire-and-forget: callers never learn whether a request reached
//! the collection endpoint. An [`OutcomeHook`] is the one place that does. The
//! tracker invokes it after every send, on both the synchronous and the
//! asynchronous path, and for focus points a background dispatch unit could
//! not encode.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use focuspoint_tracker::{OutcomeCounters, Tracker};
//!
//! let counters = Arc::new(OutcomeCounters::default());
//! let tracker = Tracker::builder()
//!     .app_name("LibraryFinder")
//!     .tracking_code("UA-2184000-1")
//!     .outcome_hook(counters.clone())
//!     .build()?;
//!
//! assert_eq!(counters.failed(), 0);
//! # Ok::<(), focuspoint_tracker::TrackerError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use focuspoint_core::{FocusPoint, InvalidEventError, RequestDescriptor};

use crate::transport::SendOutcome;

/// Receives the outcome of every tracking request.
///
/// Hooks run on the tracking path, inside dispatch units or inline with
/// synchronous calls. Keep them fast and never panic.
pub trait OutcomeHook: Send + Sync + 'static {
	/// Called after a transport finished sending `request`.
	fn on_send(&self, request: &RequestDescriptor, outcome: &SendOutcome);

	/// Called when a dispatch unit could not encode `focus_point`.
	///
	/// Synchronous tracking returns the error to the caller instead.
	fn on_invalid_event(&self, _focus_point: &FocusPoint, _error: &InvalidEventError) {}
}

/// Type alias for a shared outcome hook.
pub type SharedOutcomeHook = Arc<dyn OutcomeHook>;

/// A hook that discards all outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpOutcomeHook;

impl OutcomeHook for NoOpOutcomeHook {
	fn on_send(&self, _request: &RequestDescriptor, _outcome: &SendOutcome) {}
}

/// A hook that counts outcomes, for exposing as metrics.
#[derive(Debug, Default)]
pub struct OutcomeCounters {
	delivered: AtomicU64,
	failed: AtomicU64,
	invalid: AtomicU64,
}

impl OutcomeCounters {
	pub fn delivered(&self) -> u64 {
		self.delivered.load(Ordering::SeqCst)
	}

	pub fn failed(&self) -> u64 {
		self.failed.load(Ordering::SeqCst)
	}

	pub fn invalid(&self) -> u64 {
		self.invalid.load(Ordering::SeqCst)
	}

	/// Total number of tracking calls that reached a conclusion.
	pub fn total(&self) -> u64 {
		self.delivered() + self.failed() + self.invalid()
	}
}

impl OutcomeHook for OutcomeCounters {
	fn on_send(&self, _request: &RequestDescriptor, outcome: &SendOutcome) {
		match outcome {
			SendOutcome::Delivered { .. } => self.delivered.fetch_add(1, Ordering::SeqCst),
			SendOutcome::Failed { .. } => self.failed.fetch_add(1, Ordering::SeqCst),
		};
	}

	fn on_invalid_event(&self, _focus_point: &FocusPoint, _error: &InvalidEventError) {
		self.invalid.fetch_add(1, Ordering::SeqCst);
	}
}
