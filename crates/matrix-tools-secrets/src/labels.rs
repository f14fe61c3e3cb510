// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Label sets applied to generated secrets.

use std::collections::BTreeMap;

use crate::error::{SecretsError, SecretsResult};
use crate::ownership::{MANAGED_BY_LABEL, MANAGED_BY_VALUE};

/// Labels written to every reconciled secret, replacing whatever was there.
pub type LabelSet = BTreeMap<String, String>;

/// Parse comma-separated `key=value` pairs. Empty input yields no labels.
pub fn parse_labels(list: &str) -> SecretsResult<LabelSet> {
	let mut labels = LabelSet::new();
	if list.trim().is_empty() {
		return Ok(labels);
	}

	for pair in list.split(',') {
		let Some((key, value)) = pair.split_once('=') else {
			return Err(SecretsError::InvalidLabel(pair.to_string()));
		};
		if key.is_empty() {
			return Err(SecretsError::InvalidLabel(pair.to_string()));
		}
		labels.insert(key.to_string(), value.to_string());
	}
	Ok(labels)
}

/// Add the ownership label, overriding any caller-supplied value.
pub fn with_managed_by(mut labels: LabelSet) -> LabelSet {
	labels.insert(MANAGED_BY_LABEL.to_string(), MANAGED_BY_VALUE.to_string());
	labels
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_pairs() {
		let labels = parse_labels("mykey=myval,app.kubernetes.io/name=synapse").unwrap();
		assert_eq!(labels.len(), 2);
		assert_eq!(labels["mykey"], "myval");
		assert_eq!(labels["app.kubernetes.io/name"], "synapse");
	}

	#[test]
	fn empty_value_is_allowed() {
		let labels = parse_labels("flag=").unwrap();
		assert_eq!(labels["flag"], "");
	}

	#[test]
	fn empty_input_is_empty_set() {
		assert!(parse_labels("").unwrap().is_empty());
	}

	#[test]
	fn malformed_pairs_are_rejected() {
		assert!(matches!(
			parse_labels("novalue").unwrap_err(),
			SecretsError::InvalidLabel(_)
		));
		assert!(matches!(
			parse_labels("=value").unwrap_err(),
			SecretsError::InvalidLabel(_)
		));
	}

	#[test]
	fn managed_by_is_injected_and_wins() {
		let labels = with_managed_by(parse_labels("mykey=myval").unwrap());
		assert_eq!(labels[MANAGED_BY_LABEL], MANAGED_BY_VALUE);
		assert_eq!(labels["mykey"], "myval");

		let labels =
			with_managed_by(parse_labels("app.kubernetes.io/managed-by=helm").unwrap());
		assert_eq!(labels[MANAGED_BY_LABEL], MANAGED_BY_VALUE);
	}
}
