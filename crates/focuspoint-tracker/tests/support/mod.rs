// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared stubs for tracker integration tests.

#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use focuspoint_tracker::{
	FocusPoint, InvalidEventError, RequestDescriptor, RequestTransport, SendOutcome,
	TrackerIdentity, UrlBuildingStrategy,
};
use tracing_subscriber::fmt::MakeWriter;
use url::Url;

/// Transport that records every URL it is asked to send, optionally after a delay.
#[derive(Default)]
pub struct RecordingTransport {
	delay: Duration,
	urls: Mutex<Vec<String>>,
	sent: AtomicUsize,
}

impl RecordingTransport {
	pub fn with_delay(delay: Duration) -> Self {
		Self {
			delay,
			..Default::default()
		}
	}

	pub fn sent(&self) -> usize {
		self.sent.load(Ordering::SeqCst)
	}

	pub fn urls(&self) -> Vec<String> {
		self.urls.lock().unwrap().clone()
	}
}

#[async_trait]
impl RequestTransport for RecordingTransport {
	async fn send(&self, request: &RequestDescriptor) -> SendOutcome {
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}
		self.urls.lock().unwrap().push(request.url().to_string());
		self.sent.fetch_add(1, Ordering::SeqCst);
		SendOutcome::Delivered { status: 200 }
	}
}

/// Strategy producing `http://<label>.test/<name>`.
pub struct LabelStrategy(pub &'static str);

impl UrlBuildingStrategy for LabelStrategy {
	fn protocol_version(&self) -> &str {
		self.0
	}

	fn build(
		&self,
		focus_point: &FocusPoint,
		_identity: &TrackerIdentity,
	) -> Result<RequestDescriptor, InvalidEventError> {
		focus_point.validate()?;
		let url = Url::parse(&format!("http://{}.test/{}", self.0, focus_point.name()))
			.map_err(|e| InvalidEventError::Unsupported(e.to_string()))?;
		Ok(RequestDescriptor::get(url))
	}
}

/// Polls `condition` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, condition: impl Fn() -> bool) -> bool {
	let deadline = Instant::now() + timeout;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		tokio::time::sleep(Duration::from_millis(10)).await;
	}
	condition()
}

/// Blocking variant of [`wait_until`] for tests without a runtime.
pub fn wait_until_blocking(timeout: Duration, condition: impl Fn() -> bool) -> bool {
	let deadline = Instant::now() + timeout;
	while Instant::now() < deadline {
		if condition() {
			return true;
		}
		std::thread::sleep(Duration::from_millis(10));
	}
	condition()
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
	}

	/// Number of captured lines containing `needle`.
	pub fn count(&self, needle: &str) -> usize {
		self.contents().lines().filter(|l| l.contains(needle)).count()
	}
}

impl io::Write for CapturedLogs {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl<'a> MakeWriter<'a> for CapturedLogs {
	type Writer = CapturedLogs;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

/// Installs a subscriber capturing tracker logs on the current thread.
pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
	let logs = CapturedLogs::default();
	let subscriber = tracing_subscriber::fmt()
		.with_env_filter("focuspoint_tracker=trace")
		.with_writer(logs.clone())
		.with_ansi(false)
		.finish();
	let guard = tracing::subscriber::set_default(subscriber);
	(logs, guard)
}
