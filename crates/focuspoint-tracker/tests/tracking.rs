// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-to-end tracking against a mock collection endpoint.

mod support;

use std::sync::Arc;
use std::time::Duration;

use focuspoint_tracker::{
	FocusPoint, GoogleAnalyticsV1Strategy, OutcomeCounters, Tracker, TrackerError,
};
use support::{capture_logs, wait_until, LabelStrategy, RecordingTransport};
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn strategy_for(server: &MockServer) -> Arc<GoogleAnalyticsV1Strategy> {
	let endpoint = Url::parse(&format!("{}/__utm.gif", server.uri())).unwrap();
	Arc::new(GoogleAnalyticsV1Strategy::new().with_endpoint(endpoint))
}

fn tracker_for(server: &MockServer, counters: Arc<OutcomeCounters>) -> Tracker {
	Tracker::builder()
		.app_name("MyApp")
		.app_version("1.0")
		.tracking_code("UA-123-1")
		.url_building_strategy(strategy_for(server))
		.outcome_hook(counters)
		.request_timeout(Duration::from_secs(2))
		.build()
		.unwrap()
}

#[tokio::test]
async fn test_synchronous_tracking_sends_one_get() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/__utm.gif"))
		.and(query_param("utmac", "UA-123-1"))
		.and(query_param("utmp", "/MyApp/1.0/home"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());

	tracker
		.track_synchronously(&FocusPoint::new("home"))
		.await
		.unwrap();

	assert_eq!(counters.delivered(), 1);
	assert_eq!(counters.failed(), 0);
}

#[tokio::test]
async fn test_pageview_with_slashed_name_sends_one_get() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/__utm.gif"))
		.and(query_param("utmp", "/MyApp/1.0/%2Fhome"))
		.and(query_param("utmdt", "MyApp-1.0-/home"))
		.and(query_param("utmac", "UA-123-1"))
		.and(query_param("utme", "5(pageview*/home)"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());
	let pageview = FocusPoint::new("/home").with_category("pageview");

	tracker.track_synchronously(&pageview).await.unwrap();

	assert_eq!(counters.delivered(), 1);
	let requests = server.received_requests().await.unwrap();
	assert_eq!(requests.len(), 1);
	let url = requests[0].url.as_str();
	assert!(url.contains("MyApp"));
	assert!(url.contains("1.0"));
	assert!(url.contains("UA-123-1"));
}

#[tokio::test]
async fn test_nested_focus_point_path_reaches_server() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(query_param("utmp", "/MyApp/1.0/Catalog/Search"))
		.and(query_param("utmdt", "MyApp-1.0-Catalog-Search"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let tracker = tracker_for(&server, Arc::new(OutcomeCounters::default()));
	let search = FocusPoint::new("Search").with_parent(FocusPoint::new("Catalog"));

	tracker.track_synchronously(&search).await.unwrap();
}

#[tokio::test]
async fn test_asynchronous_tracking_reaches_server() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.and(path("/__utm.gif"))
		.respond_with(ResponseTemplate::new(200))
		.expect(1)
		.mount(&server)
		.await;

	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());

	tracker.track_asynchronously(FocusPoint::new("home"));

	assert!(wait_until(Duration::from_secs(5), || counters.total() == 1).await);
	assert_eq!(counters.delivered(), 1);
}

#[tokio::test]
async fn test_missing_app_name_sends_nothing() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let result = Tracker::builder()
		.app_name("")
		.tracking_code("UA-123-1")
		.url_building_strategy(strategy_for(&server))
		.build();

	assert!(matches!(result, Err(TrackerError::Configuration(_))));
}

#[tokio::test]
async fn test_server_error_is_not_reported_to_caller() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(500))
		.expect(1)
		.mount(&server)
		.await;

	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());

	let result = tracker.track_synchronously(&FocusPoint::new("home")).await;

	assert!(result.is_ok());
	assert_eq!(counters.failed(), 1);
	assert_eq!(counters.delivered(), 0);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_not_reported_to_caller() {
	let counters = Arc::new(OutcomeCounters::default());
	let strategy = GoogleAnalyticsV1Strategy::new()
		.with_endpoint(Url::parse("http://127.0.0.1:1/__utm.gif").unwrap());
	let tracker = Tracker::builder()
		.app_name("MyApp")
		.tracking_code("UA-123-1")
		.url_building_strategy(Arc::new(strategy))
		.outcome_hook(counters.clone())
		.request_timeout(Duration::from_secs(2))
		.build()
		.unwrap();

	tracker
		.track_synchronously(&FocusPoint::new("home"))
		.await
		.unwrap();
	tracker.track_asynchronously(FocusPoint::new("home"));

	assert!(wait_until(Duration::from_secs(5), || counters.failed() == 2).await);
}

#[tokio::test]
async fn test_invalid_focus_point_fails_synchronously_without_request() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let tracker = tracker_for(&server, Arc::new(OutcomeCounters::default()));
	let result = tracker.track_synchronously(&FocusPoint::new("  ")).await;

	assert!(matches!(result, Err(TrackerError::InvalidEvent(_))));
}

#[tokio::test]
async fn test_verbose_mode_logs_each_outcome() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(200))
		.mount(&server)
		.await;

	let (logs, _guard) = capture_logs();
	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());
	tracker.set_verbose_mode(true);

	tracker
		.track_synchronously(&FocusPoint::new("first"))
		.await
		.unwrap();
	tracker.track_asynchronously(FocusPoint::new("second"));
	assert!(wait_until(Duration::from_secs(5), || counters.total() == 2).await);

	assert_eq!(logs.count("tracking request delivered"), 2);
	assert_eq!(logs.count("tracking outcome: delivered"), 2);
}

#[tokio::test]
async fn test_verbose_mode_logs_failures() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(503))
		.mount(&server)
		.await;

	let (logs, _guard) = capture_logs();
	let tracker = tracker_for(&server, Arc::new(OutcomeCounters::default()));
	tracker.set_verbose_mode(true);

	tracker
		.track_synchronously(&FocusPoint::new("home"))
		.await
		.unwrap();

	assert_eq!(logs.count("tracking request failed"), 1);
	assert_eq!(logs.count("tracking outcome: failed"), 1);
}

#[tokio::test]
async fn test_quiet_mode_logs_no_outcomes() {
	let server = MockServer::start().await;
	Mock::given(method("GET"))
		.respond_with(ResponseTemplate::new(500))
		.mount(&server)
		.await;

	let (logs, _guard) = capture_logs();
	let counters = Arc::new(OutcomeCounters::default());
	let tracker = tracker_for(&server, counters.clone());

	tracker
		.track_synchronously(&FocusPoint::new("first"))
		.await
		.unwrap();
	tracker.track_asynchronously(FocusPoint::new("second"));
	assert!(wait_until(Duration::from_secs(5), || counters.total() == 2).await);

	assert_eq!(logs.count("tracking request"), 0);
	assert_eq!(logs.count("tracking outcome"), 0);
}

#[tokio::test]
async fn test_verbose_mode_logs_outcomes_of_injected_transport() {
	let (logs, _guard) = capture_logs();
	let transport = Arc::new(RecordingTransport::default());
	let tracker = Tracker::builder()
		.app_name("MyApp")
		.tracking_code("UA-123-1")
		.url_building_strategy(Arc::new(LabelStrategy("stub")))
		.transport(transport.clone())
		.verbose(true)
		.build()
		.unwrap();

	tracker
		.track_synchronously(&FocusPoint::new("first"))
		.await
		.unwrap();
	tracker.track_asynchronously(FocusPoint::new("second"));
	assert!(wait_until(Duration::from_secs(5), || transport.sent() == 2).await);
	assert!(wait_until(Duration::from_secs(5), || {
		logs.count("tracking outcome: delivered") == 2
	})
	.await);
}

#[tokio::test]
async fn test_verbose_mode_logs_invalid_synchronous_event() {
	let (logs, _guard) = capture_logs();
	let transport = Arc::new(RecordingTransport::default());
	let tracker = Tracker::builder()
		.app_name("MyApp")
		.tracking_code("UA-123-1")
		.url_building_strategy(Arc::new(LabelStrategy("stub")))
		.transport(transport.clone())
		.build()
		.unwrap();

	let quiet = tracker.track_synchronously(&FocusPoint::new(" ")).await;
	assert!(matches!(quiet, Err(TrackerError::InvalidEvent(_))));
	assert_eq!(logs.count("could not be encoded"), 0);

	tracker.set_verbose_mode(true);
	let verbose = tracker.track_synchronously(&FocusPoint::new(" ")).await;
	assert!(matches!(verbose, Err(TrackerError::InvalidEvent(_))));
	assert_eq!(logs.count("could not be encoded"), 1);
	assert_eq!(transport.sent(), 0);
}
