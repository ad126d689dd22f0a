// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use http::Method;
use url::Url;

/// A fully formed tracking request, ready for a transport to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
	method: Method,
	url: Url,
}

impl RequestDescriptor {
	/// Creates a GET request for `url`.
	pub fn get(url: Url) -> Self {
		Self {
			method: Method::GET,
			url,
		}
	}

	/// Creates a request with an explicit method, for strategies that do not
	/// use GET.
	pub fn new(method: Method, url: Url) -> Self {
		Self { method, url }
	}

	pub fn method(&self) -> &Method {
		&self.method
	}

	pub fn url(&self) -> &Url {
		&self.url
	}

	/// Consumes the descriptor, returning the target URL.
	pub fn into_url(self) -> Url {
		self.url
	}
}

impl fmt::Display for RequestDescriptor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {}", self.method, self.url)
	}
}
