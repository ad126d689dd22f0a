// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for focuspoint.
//!
//! Every client built here carries the same User-Agent so collection
//! endpoints can tell tracker traffic apart.

mod client;

pub use client::{
	builder, builder_with_user_agent, new_client, new_client_with_timeout, user_agent,
	DEFAULT_TIMEOUT,
};
