// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appservice registration documents.
//!
//! A registration template is an arbitrary file in which the literal
//! placeholders `${AS_TOKEN}` and `${HS_TOKEN}` are replaced with freshly
//! generated tokens. Everything else is passed through byte for byte.

use std::path::Path;

use regex::bytes::{NoExpand, Regex};
use tracing::debug;

use crate::error::{SecretsError, SecretsResult};
use crate::keys::{random_string, RANDOM_STRING_LEN};

pub const AS_TOKEN_PLACEHOLDER: &str = "${AS_TOKEN}";
pub const HS_TOKEN_PLACEHOLDER: &str = "${HS_TOKEN}";

/// Read the template at `path` and fill in both tokens.
pub fn generate_registration(path: &Path) -> SecretsResult<Vec<u8>> {
	let template = std::fs::read(path).map_err(|source| SecretsError::TemplateRead {
		path: path.to_path_buf(),
		source,
	})?;
	debug!(path = %path.display(), bytes = template.len(), "rendering registration template");

	let as_token = random_string(RANDOM_STRING_LEN);
	let hs_token = random_string(RANDOM_STRING_LEN);
	render_registration(&template, &as_token, &hs_token)
}

/// Substitute every occurrence of the placeholders in `template`.
pub fn render_registration(template: &[u8], as_token: &str, hs_token: &str) -> SecretsResult<Vec<u8>> {
	let rendered = replace_literal(template, AS_TOKEN_PLACEHOLDER, as_token)?;
	replace_literal(&rendered, HS_TOKEN_PLACEHOLDER, hs_token)
}

fn replace_literal(haystack: &[u8], placeholder: &str, value: &str) -> SecretsResult<Vec<u8>> {
	let pattern = Regex::new(&regex::escape(placeholder))
		.map_err(|e| SecretsError::Generator(format!("invalid placeholder {placeholder}: {e}")))?;
	Ok(pattern
		.replace_all(haystack, NoExpand(value.as_bytes()))
		.into_owned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const TEMPLATE: &str = "id: bridge\nstatic: values\nas_token: ${AS_TOKEN}\nhs_token: ${HS_TOKEN}\n";

	fn write_template(contents: &[u8]) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(contents).unwrap();
		file
	}

	#[test]
	fn render_replaces_every_occurrence() {
		let rendered = render_registration(
			b"${AS_TOKEN} ${HS_TOKEN} ${AS_TOKEN}",
			"aaaa",
			"bbbb",
		)
		.unwrap();
		assert_eq!(rendered, b"aaaa bbbb aaaa");
	}

	#[test]
	fn render_leaves_other_content_untouched() {
		let template = b"$AS_TOKEN ${OTHER} \xff\xfe $1";
		let rendered = render_registration(template, "x", "y").unwrap();
		assert_eq!(rendered, template.to_vec());
	}

	#[test]
	fn generated_registration_parses_as_yaml() {
		let file = write_template(TEMPLATE.as_bytes());
		let rendered = generate_registration(file.path()).unwrap();

		let doc: serde_yaml::Value = serde_yaml::from_slice(&rendered).unwrap();
		assert_eq!(doc["static"].as_str(), Some("values"));

		let as_token = doc["as_token"].as_str().unwrap();
		let hs_token = doc["hs_token"].as_str().unwrap();
		assert_eq!(as_token.len(), 32);
		assert_eq!(hs_token.len(), 32);
		assert_ne!(as_token, hs_token);
	}

	#[test]
	fn missing_template_is_a_read_error() {
		let dir = tempfile::tempdir().unwrap();
		let err = generate_registration(&dir.path().join("absent.yaml")).unwrap_err();
		assert!(matches!(err, SecretsError::TemplateRead { .. }));
	}
}
