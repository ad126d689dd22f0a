// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Analytics `__utm.gif` protocol, version 1.
//!
//! Every focus point becomes a single GET against the collection endpoint. The
//! application name and version root the content path, so a focus point
//! `Search` tracked by `LibraryFinder 1.3.1` is reported as the page
//! `/LibraryFinder/1.3.1/Search` titled `LibraryFinder-1.3.1-Search`.
//!
//! | Parameter | Value |
//! |-----------|-------|
//! | `utmwv` | Protocol version (`1`) |
//! | `utmn` | Random cache buster |
//! | `utmdt` | Content title |
//! | `utmhn` | Local host name |
//! | `utmr` | Referer |
//! | `utmp` | Content path |
//! | `utmac` | Tracking code |
//! | `utmcc` | Synthetic campaign cookie |
//! | `utmt`, `utme` | Event hit and extensible parameters (categorised or custom variables only) |

use chrono::Utc;
use url::Url;

use crate::error::InvalidEventError;
use crate::event::FocusPoint;
use crate::identity::TrackerIdentity;
use crate::request::RequestDescriptor;
use crate::strategy::UrlBuildingStrategy;

/// Default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://www.google-analytics.com/__utm.gif";

/// Referer reported when none is configured.
pub const DEFAULT_REFERER: &str = "-";

const PROTOCOL_VERSION: &str = "1";
const FALLBACK_HOST_NAME: &str = "localhost";
const URI_SEPARATOR: &str = "/";
const TITLE_SEPARATOR: &str = "-";

/// URL building strategy for the classic Google Analytics GET protocol.
#[derive(Debug, Clone)]
pub struct GoogleAnalyticsV1Strategy {
	endpoint: Url,
	host_name: String,
	referer: String,
	screen_resolution: String,
	colour_depth: String,
	language: String,
	flash_version: String,
}

impl GoogleAnalyticsV1Strategy {
	/// Creates a strategy targeting [`DEFAULT_ENDPOINT`].
	///
	/// The local host name is resolved once here and reused for every request.
	pub fn new() -> Self {
		Self {
			endpoint: default_endpoint(),
			host_name: local_host_name(),
			referer: DEFAULT_REFERER.to_string(),
			screen_resolution: "1440x900".to_string(),
			colour_depth: "32-bit".to_string(),
			language: "en-us".to_string(),
			flash_version: "9.0  r28".to_string(),
		}
	}

	/// Sends requests to `endpoint` instead of the default collector.
	pub fn with_endpoint(mut self, endpoint: Url) -> Self {
		self.endpoint = endpoint;
		self
	}

	pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
		self.referer = referer.into();
		self
	}

	pub fn with_host_name(mut self, host_name: impl Into<String>) -> Self {
		self.host_name = host_name.into();
		self
	}

	pub fn with_screen_resolution(mut self, resolution: impl Into<String>) -> Self {
		self.screen_resolution = resolution.into();
		self
	}

	pub fn with_colour_depth(mut self, depth: impl Into<String>) -> Self {
		self.colour_depth = depth.into();
		self
	}

	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();
		self
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	pub fn host_name(&self) -> &str {
		&self.host_name
	}

	pub fn referer(&self) -> &str {
		&self.referer
	}
}

impl Default for GoogleAnalyticsV1Strategy {
	fn default() -> Self {
		Self::new()
	}
}

impl UrlBuildingStrategy for GoogleAnalyticsV1Strategy {
	fn protocol_version(&self) -> &str {
		"google-analytics-v1"
	}

	fn build(
		&self,
		focus_point: &FocusPoint,
		identity: &TrackerIdentity,
	) -> Result<RequestDescriptor, InvalidEventError> {
		focus_point.validate()?;

		let mut segments = identity.root_segments();
		segments.extend(focus_point.path_segments());

		let content_path = segments
			.iter()
			.map(|segment| format!("{URI_SEPARATOR}{}", escape_path_segment(segment)))
			.collect::<String>();
		let content_title = segments.join(TITLE_SEPARATOR);
		let extensible = extensible_parameters(focus_point);

		let mut url = self.endpoint.clone();
		{
			let mut query = url.query_pairs_mut();
			query
				.append_pair("utmwv", PROTOCOL_VERSION)
				.append_pair("utmn", &fastrand::u32(..).to_string())
				.append_pair("utmcs", "UTF-8")
				.append_pair("utmsr", &self.screen_resolution)
				.append_pair("utmsc", &self.colour_depth)
				.append_pair("utmul", &self.language)
				.append_pair("utmje", "1")
				.append_pair("utmfl", &self.flash_version)
				.append_pair("utmcr", "1")
				.append_pair("utmdt", &content_title)
				.append_pair("utmhn", &self.host_name)
				.append_pair("utmr", &self.referer)
				.append_pair("utmp", &content_path)
				.append_pair("utmac", identity.tracking_code())
				.append_pair("utmcc", &campaign_cookie());

			if focus_point.category().is_some() {
				query.append_pair("utmt", "event");
			}
			if let Some(utme) = &extensible {
				query.append_pair("utme", utme);
			}
		}

		Ok(RequestDescriptor::get(url))
	}
}

fn default_endpoint() -> Url {
	Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL")
}

fn local_host_name() -> String {
	hostname::get()
		.ok()
		.and_then(|name| name.into_string().ok())
		.filter(|name| !name.is_empty())
		.unwrap_or_else(|| FALLBACK_HOST_NAME.to_string())
}

/// A fresh first-visit cookie: every hit looks like a direct visit.
fn campaign_cookie() -> String {
	let cookie = fastrand::u32(..);
	let visitor = fastrand::u32(..i32::MAX as u32);
	let now = Utc::now().timestamp();
	format!(
		"__utma={cookie}.{visitor}.{now}.{now}.{now}.2;+__utmb={cookie};+__utmc={cookie};\
		 +__utmz={cookie}.{now}.2.2.utmccn=(direct)|utmcsr=(direct)|utmcmd=(none);+__utmv={cookie};"
	)
}

/// Builds the `utme` value: object 5 for event hits, objects 8 and 9 for
/// custom variable names and values.
fn extensible_parameters(focus_point: &FocusPoint) -> Option<String> {
	let mut utme = String::new();

	if let Some(category) = focus_point.category() {
		utme.push_str(&format!(
			"5({}*{})",
			escape_extensible(category),
			escape_extensible(focus_point.name())
		));
	}

	let variables = focus_point.custom_variables();
	if !variables.is_empty() {
		let names: Vec<String> = variables.keys().map(|k| escape_extensible(k)).collect();
		let values: Vec<String> = variables.values().map(|v| escape_extensible(v)).collect();
		utme.push_str(&format!("8({})9({})", names.join("*"), values.join("*")));
	}

	(!utme.is_empty()).then_some(utme)
}

/// Keeps every segment a single path component: `/` inside a name must not
/// read as nesting.
fn escape_path_segment(segment: &str) -> String {
	segment.replace('%', "%25").replace('/', "%2F")
}

fn escape_extensible(value: &str) -> String {
	value
		.replace('\'', "'0")
		.replace(')', "'1")
		.replace('*', "'2")
		.replace('!', "'3")
}
