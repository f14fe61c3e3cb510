// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! matrix-tools - init-container helpers for Matrix deployments.

use std::ffi::OsString;

use clap::{Parser, Subcommand};

mod commands;
mod logging;

use commands::GenerateSecretsArgs;
use logging::LogFormat;

/// matrix-tools - init-container helpers for Matrix deployments.
#[derive(Parser, Debug)]
#[command(name = "matrix-tools", about = "Init-container helpers for Matrix deployments", version)]
struct Args {
	/// Log level filter, overridden by RUST_LOG
	#[arg(long, global = true, env = "MATRIX_TOOLS_LOG_LEVEL", default_value = "info")]
	log_level: String,

	/// Log output format
	#[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Create missing keys in K8s Secrets, leaving existing keys untouched
	GenerateSecrets(GenerateSecretsArgs),
}

/// Long flags that existing manifests pass with a single dash.
const SINGLE_DASH_FLAGS: &[&str] = &["secrets", "labels", "namespace", "log-level", "log-format"];

/// Rewrites `-secrets x` and `-secrets=x` to their `--` form so clap accepts
/// the argv shape of older init-container manifests.
fn normalize_single_dash_flags<I>(argv: I) -> Vec<OsString>
where
	I: IntoIterator,
	I::Item: Into<OsString>,
{
	argv
		.into_iter()
		.map(|arg| {
			let arg: OsString = arg.into();
			let Some(text) = arg.to_str() else {
				return arg;
			};
			let Some(rest) = text.strip_prefix('-').filter(|r| !r.starts_with('-')) else {
				return arg;
			};
			let name = rest.split_once('=').map_or(rest, |(name, _)| name);
			if SINGLE_DASH_FLAGS.contains(&name) {
				OsString::from(format!("-{text}"))
			} else {
				arg
			}
		})
		.collect()
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
	let args = Args::parse_from(normalize_single_dash_flags(std::env::args_os()));
	logging::init(&args.log_level, args.log_format);

	let result = match args.command {
		Command::GenerateSecrets(args) => commands::handle_generate_secrets(args).await,
	};

	if let Err(e) = result {
		tracing::error!("{e:#}");
		std::process::exit(1);
	}
}
