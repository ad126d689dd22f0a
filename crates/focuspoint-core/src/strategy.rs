// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The pluggable URL building capability.
//!
//! A [`UrlBuildingStrategy`] turns a [`FocusPoint`] plus the tracker's
//! [`TrackerIdentity`] into a [`RequestDescriptor`] for one collection protocol.
//! Swapping the strategy on a tracker is the way to speak a different protocol
//! version or a different vendor entirely.
//!
//! # Example
//!
//! ```
//! use focuspoint_core::{
//!     FocusPoint, InvalidEventError, RequestDescriptor, TrackerIdentity, UrlBuildingStrategy,
//! };
//! use url::Url;
//!
//! struct PathStrategy;
//!
//! impl UrlBuildingStrategy for PathStrategy {
//!     fn protocol_version(&self) -> &str {
//!         "path-v1"
//!     }
//!
//!     fn build(
//!         &self,
//!         focus_point: &FocusPoint,
//!         identity: &TrackerIdentity,
//!     ) -> Result<RequestDescriptor, InvalidEventError> {
//!         focus_point.validate()?;
//!         let mut url = Url::parse("https://collector.example.com/")
//!             .map_err(|e| InvalidEventError::Unsupported(e.to_string()))?;
//!         url.path_segments_mut()
//!             .map_err(|_| InvalidEventError::Unsupported("cannot-be-a-base URL".into()))?
//!             .pop_if_empty()
//!             .push(identity.tracking_code())
//!             .extend(focus_point.path_segments());
//!         Ok(RequestDescriptor::get(url))
//!     }
//! }
//! ```

use std::sync::Arc;

use crate::error::InvalidEventError;
use crate::event::FocusPoint;
use crate::identity::TrackerIdentity;
use crate::request::RequestDescriptor;

/// Builds the request for a focus point.
///
/// Implementations must be pure apart from drawing random numbers: no I/O, no
/// shared mutable state. Trackers call `build` from arbitrary threads and from
/// background dispatch units.
pub trait UrlBuildingStrategy: Send + Sync + 'static {
	/// Identifies the protocol and version this strategy speaks.
	fn protocol_version(&self) -> &str {
		"custom"
	}

	/// Encodes `focus_point` into a complete request with no placeholders.
	///
	/// # Errors
	///
	/// Returns [`InvalidEventError`] when the focus point cannot be encoded.
	/// Strategies must fail rather than emit a malformed request.
	fn build(
		&self,
		focus_point: &FocusPoint,
		identity: &TrackerIdentity,
	) -> Result<RequestDescriptor, InvalidEventError>;
}

/// Type alias for a shared URL building strategy.
pub type SharedUrlBuildingStrategy = Arc<dyn UrlBuildingStrategy>;
