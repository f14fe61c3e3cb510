// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Parsing of `name:key:type[:arg...]` secret requests.

use std::fmt;
use std::str::FromStr;

use crate::error::{SecretsError, SecretsResult};
use crate::generator::{Generator, SecretType};

/// A request to ensure `key` in secret `name` holds a value of some type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRequest {
	/// The request exactly as written, used in error messages.
	pub raw: String,
	pub name: String,
	pub key: String,
	pub generator: Generator,
}

impl SecretRequest {
	pub fn new(name: impl Into<String>, key: impl Into<String>, generator: Generator) -> Self {
		let name = name.into();
		let key = key.into();
		let raw = std::iter::once(format!("{name}:{key}:{}", generator.secret_type()))
			.chain(generator.args())
			.collect::<Vec<_>>()
			.join(":");
		Self {
			raw,
			name,
			key,
			generator,
		}
	}

	pub fn secret_type(&self) -> SecretType {
		self.generator.secret_type()
	}
}

impl FromStr for SecretRequest {
	type Err = SecretsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let mut parts = s.split(':');
		let (Some(name), Some(key), Some(tag)) = (parts.next(), parts.next(), parts.next()) else {
			return Err(SecretsError::InvalidRequest(s.to_string()));
		};
		if name.is_empty() || key.is_empty() {
			return Err(SecretsError::InvalidRequest(s.to_string()));
		}

		let args: Vec<String> = parts.map(str::to_string).collect();
		let generator = Generator::from_tag(tag, &args)?;

		Ok(Self {
			raw: s.to_string(),
			name: name.to_string(),
			key: key.to_string(),
			generator,
		})
	}
}

impl fmt::Display for SecretRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.raw)
	}
}

/// Parse a comma-separated list of requests.
pub fn parse_requests(list: &str) -> SecretsResult<Vec<SecretRequest>> {
	if list.trim().is_empty() {
		return Err(SecretsError::InvalidRequest(list.to_string()));
	}
	list
		.split(',')
		.map(|element| {
			element
				.parse::<SecretRequest>()
				.map_err(|source| SecretsError::Request {
					request: element.to_string(),
					source: Box::new(source),
				})
		})
		.collect()
}
