// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types for focus point tracking.
//!
//! This crate holds everything that turns an application event into a request
//! descriptor, without performing any I/O:
//!
//! - [`FocusPoint`]: an immutable description of something worth tracking
//! - [`TrackerIdentity`]: the validated application name, version and tracking code
//! - [`UrlBuildingStrategy`]: the pluggable capability that encodes a focus point
//!   for one collection protocol
//! - [`GoogleAnalyticsV1Strategy`]: the default strategy, speaking the classic
//!   `__utm.gif` protocol
//!
//! # Example
//!
//! ```
//! use focuspoint_core::{FocusPoint, GoogleAnalyticsV1Strategy, TrackerIdentity, UrlBuildingStrategy};
//!
//! let identity = TrackerIdentity::new("LibraryFinder", Some("1.3.1".to_string()), "UA-2184000-1")?;
//! let focus_point = FocusPoint::new("Search").with_parent(FocusPoint::new("Catalog"));
//!
//! let request = GoogleAnalyticsV1Strategy::new().build(&focus_point, &identity)?;
//! assert!(request.url().as_str().contains("UA-2184000-1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod event;
mod ga_v1;
mod identity;
mod request;
mod strategy;

pub use error::{ConfigurationError, InvalidEventError};
pub use event::{FocusPoint, MAX_CUSTOM_VARIABLES};
pub use ga_v1::{GoogleAnalyticsV1Strategy, DEFAULT_ENDPOINT, DEFAULT_REFERER};
pub use identity::TrackerIdentity;
pub use request::RequestDescriptor;
pub use strategy::{SharedUrlBuildingStrategy, UrlBuildingStrategy};
