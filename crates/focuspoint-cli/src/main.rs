// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! focuspoint command line tool.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use focuspoint_tracker::{
	load_config, FocusPoint, Tracker, TrackerConfigLayer, TrackerSettings,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// focuspoint - send application focus points to an analytics endpoint.
#[derive(Parser, Debug)]
#[command(name = "focuspoint", about = "Track application focus points", version)]
struct Args {
	/// TOML configuration file
	#[arg(long, global = true, env = "FOCUSPOINT_CONFIG")]
	config: Option<PathBuf>,

	/// Application name reported with every focus point
	#[arg(long, global = true)]
	app_name: Option<String>,

	/// Application version reported with every focus point
	#[arg(long, global = true)]
	app_version: Option<String>,

	/// Analytics account tracking code, e.g. UA-2184000-1
	#[arg(long, global = true)]
	tracking_code: Option<String>,

	/// Log the outcome of every tracking request
	#[arg(long, global = true)]
	verbose: bool,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Track a single focus point
	Track {
		#[command(flatten)]
		focus_point: FocusPointArgs,

		/// Dispatch in the background instead of waiting for the request
		#[arg(long = "async")]
		asynchronous: bool,

		/// How long to keep the process alive after a background dispatch
		#[arg(long, default_value_t = 2000)]
		wait_ms: u64,
	},
	/// Print the URL that would be requested for a focus point
	Url {
		#[command(flatten)]
		focus_point: FocusPointArgs,
	},
}

#[derive(clap::Args, Debug)]
struct FocusPointArgs {
	/// Focus point name
	name: String,

	/// Enclosing focus point, outermost first; may be repeated
	#[arg(long = "parent")]
	parents: Vec<String>,

	/// Event category
	#[arg(long)]
	category: Option<String>,
}

impl FocusPointArgs {
	fn to_focus_point(&self) -> FocusPoint {
		let parent = self
			.parents
			.iter()
			.fold(None, |outer: Option<FocusPoint>, name| {
				let focus_point = FocusPoint::new(name.as_str());
				Some(match outer {
					Some(outer) => focus_point.with_parent(outer),
					None => focus_point,
				})
			});

		let mut focus_point = FocusPoint::new(self.name.as_str());
		if let Some(parent) = parent {
			focus_point = focus_point.with_parent(parent);
		}
		if let Some(category) = &self.category {
			focus_point = focus_point.with_category(category.as_str());
		}
		focus_point
	}
}

impl Args {
	fn overrides(&self) -> TrackerConfigLayer {
		TrackerConfigLayer {
			app_name: self.app_name.clone(),
			app_version: self.app_version.clone(),
			tracking_code: self.tracking_code.clone(),
			verbose: self.verbose.then_some(true),
			..Default::default()
		}
	}
}

fn load_settings(args: &Args) -> anyhow::Result<TrackerSettings> {
	load_config(args.config.as_deref(), args.overrides())
		.and_then(TrackerConfigLayer::finalize)
		.context("invalid tracker configuration")
}

/// Log level used when `RUST_LOG` is unset: verbose mode shows every outcome.
fn default_log_level(settings: &TrackerSettings) -> &'static str {
	if settings.verbose {
		"info"
	} else {
		"warn"
	}
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	// Load .env file if present
	dotenvy::dotenv().ok();

	let args = Args::parse();

	let settings = load_settings(&args)?;

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| default_log_level(&settings).into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	tracing::debug!(
		app_name = %settings.app_name,
		tracking_code = %settings.tracking_code,
		verbose = settings.verbose,
		"configuration loaded"
	);

	let tracker = Tracker::from_settings(&settings).context("failed to create tracker")?;

	match &args.command {
		Command::Track {
			focus_point,
			asynchronous,
			wait_ms,
		} => {
			let focus_point = focus_point.to_focus_point();
			tracing::info!(
				focus_point = %focus_point.name(),
				asynchronous = *asynchronous,
				"tracking focus point"
			);
			if *asynchronous {
				tracker.track_asynchronously(focus_point);
				tokio::time::sleep(Duration::from_millis(*wait_ms)).await;
				tracing::debug!(wait_ms = *wait_ms, "background dispatch window elapsed");
			} else {
				tracker
					.track_synchronously(&focus_point)
					.await
					.context("failed to track focus point")?;
			}
		}
		Command::Url { focus_point } => {
			let request = tracker
				.build_request(&focus_point.to_focus_point())
				.context("failed to build tracking request")?;
			println!("{}", request.url());
		}
	}

	Ok(())
}
