// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fire-and-forget focus point tracking.
//!
//! This crate sends application focus points (page views, module loads, user
//! actions) to an analytics collection endpoint without getting in the way of
//! the application that emits them.
//!
//! # Features
//!
//! - **Asynchronous tracking**: one detached background unit per call, the
//!   caller never waits
//! - **Synchronous tracking**: for the rare call that must complete first
//! - **Pluggable URL building**: swap the [`UrlBuildingStrategy`] on a live
//!   tracker
//! - **Failure isolation**: transport failures never reach the caller; verbose
//!   mode logs them
//! - **Outcome hooks**: count or export delivery outcomes
//!
//! # Example
//!
//! ```ignore
//! use focuspoint_tracker::{FocusPoint, Tracker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tracker = Tracker::with_app_version("LibraryFinder", "1.3.1", "UA-2184000-1")?;
//!     tracker.set_verbose_mode(true);
//!
//!     tracker.track_asynchronously(FocusPoint::new("Startup"));
//!
//!     let search = FocusPoint::new("Search").with_parent(FocusPoint::new("Catalog"));
//!     tracker.track_asynchronously(search);
//!
//!     tracker.track_synchronously(&FocusPoint::new("Exit")).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod dispatch;
mod error;
mod hook;
pub mod sources;
mod tracker;
mod transport;

pub use config::{TrackerConfigLayer, TrackerSettings};
pub use error::{ConfigError, Result, TrackerError, TransportError};
pub use hook::{NoOpOutcomeHook, OutcomeCounters, OutcomeHook, SharedOutcomeHook};
pub use sources::{load_config, load_config_with_env};
pub use tracker::{Tracker, TrackerBuilder};
pub use transport::{HttpGetTransport, RequestTransport, SendOutcome, SharedRequestTransport};

// Re-export core types for convenience
pub use focuspoint_core::{
	ConfigurationError, FocusPoint, GoogleAnalyticsV1Strategy, InvalidEventError,
	RequestDescriptor, SharedUrlBuildingStrategy, TrackerIdentity, UrlBuildingStrategy,
};
