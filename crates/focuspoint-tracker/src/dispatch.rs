// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Background dispatch of asynchronous tracking calls.
//!
//! Each call to [`Tracker::track_asynchronously`](crate::Tracker::track_asynchronously)
//! creates one [`DispatchUnit`]. The unit builds and sends exactly one request,
//! then ends. There is no pool, no queue, no retry and no way to observe or
//! cancel a unit once spawned.
//!
//! Inside a tokio runtime the unit is detached onto that runtime and yields
//! once before doing any work, so every task that was already ready runs
//! first. Outside a runtime it gets a dedicated background thread driving a
//! single-threaded runtime.

use std::sync::Arc;

use focuspoint_core::{FocusPoint, SharedUrlBuildingStrategy};
use tokio::runtime::{Builder, Handle};
use tracing::warn;

use crate::tracker::TrackerInner;

const DISPATCH_THREAD_NAME: &str = "focuspoint-dispatch";

pub(crate) struct DispatchUnit {
	tracker: Arc<TrackerInner>,
	strategy: SharedUrlBuildingStrategy,
	focus_point: FocusPoint,
}

impl DispatchUnit {
	/// `strategy` is the snapshot taken at call time; later swaps on the
	/// tracker do not reach this unit.
	pub(crate) fn new(
		tracker: Arc<TrackerInner>,
		strategy: SharedUrlBuildingStrategy,
		focus_point: FocusPoint,
	) -> Self {
		Self {
			tracker,
			strategy,
			focus_point,
		}
	}

	pub(crate) fn spawn(self) {
		match Handle::try_current() {
			Ok(handle) => {
				handle.spawn(async move {
					tokio::task::yield_now().await;
					self.run().await;
				});
			}
			Err(_) => self.spawn_thread(),
		}
	}

	fn spawn_thread(self) {
		let tracker = Arc::clone(&self.tracker);
		let spawned = std::thread::Builder::new()
			.name(DISPATCH_THREAD_NAME.to_string())
			.spawn(move || match Builder::new_current_thread().enable_all().build() {
				Ok(runtime) => runtime.block_on(self.run()),
				Err(e) => {
					if self.tracker.is_verbose() {
						warn!(error = %e, "failed to start dispatch runtime");
					}
				}
			});

		if let Err(e) = spawned {
			if tracker.is_verbose() {
				warn!(error = %e, "failed to spawn dispatch thread");
			}
		}
	}

	async fn run(self) {
		match self.strategy.build(&self.focus_point, self.tracker.identity()) {
			Ok(request) => {
				self.tracker.send(&request).await;
			}
			Err(e) => {
				self.tracker.log_invalid_event(&self.focus_point, &e);
				self.tracker.hook().on_invalid_event(&self.focus_point, &e);
			}
		}
	}
}
