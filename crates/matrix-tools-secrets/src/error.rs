// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret generation error types.

use std::path::PathBuf;

use matrix_tools_k8s::K8sError;

/// Result type alias for secret generation.
pub type SecretsResult<T> = Result<T, SecretsError>;

/// Errors that can occur while parsing, generating or persisting secrets.
#[derive(Debug, thiserror::Error)]
pub enum SecretsError {
	/// The backing store could not be read
	#[error("failed to fetch secret {name}")]
	Client {
		name: String,
		#[source]
		source: K8sError,
	},

	/// Existing secret is not managed by this tool
	#[error(
		"secret {name} is not managed by {expected} (managed-by: {})",
		.found.as_deref().unwrap_or("<none>")
	)]
	Ownership {
		name: String,
		expected: &'static str,
		found: Option<String>,
	},

	/// Unknown secret type tag
	#[error("unsupported secret type: {0}")]
	UnsupportedType(String),

	/// Unknown sub-format for a secret type
	#[error("{0} key format unsupported")]
	UnsupportedFormat(String),

	/// Wrong arity or malformed generator arguments
	#[error("invalid arguments for {secret_type}: {reason}")]
	InvalidArguments {
		secret_type: &'static str,
		reason: String,
	},

	/// Malformed `name:key:type[:args]` request
	#[error("invalid secret request '{0}', expected name:key:type[:args]")]
	InvalidRequest(String),

	/// Malformed `key=value` label
	#[error("invalid label '{0}', expected key=value")]
	InvalidLabel(String),

	/// Registration template could not be read
	#[error("failed to read template {}", .path.display())]
	TemplateRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Key generation or encoding failed
	#[error("generator failed: {0}")]
	Generator(String),

	/// Create/update of the secret failed
	#[error("failed to persist secret {name}")]
	Persist {
		name: String,
		#[source]
		source: K8sError,
	},

	/// Any of the above, tagged with the request that caused it
	#[error("error generating secret: {request}")]
	Request {
		request: String,
		#[source]
		source: Box<SecretsError>,
	},
}

impl SecretsError {
	/// Strip request context, returning the underlying error.
	pub fn root(&self) -> &SecretsError {
		match self {
			SecretsError::Request { source, .. } => source.root(),
			other => other,
		}
	}
}
