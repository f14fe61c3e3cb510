// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ownership check for pre-existing secrets.

use matrix_tools_k8s::Secret;

use crate::error::{SecretsError, SecretsResult};

/// Label that marks a secret as owned by the secret generator.
pub const MANAGED_BY_LABEL: &str = "app.kubernetes.io/managed-by";

/// Expected value of [`MANAGED_BY_LABEL`].
pub const MANAGED_BY_VALUE: &str = "matrix-tools-init-secrets";

/// Outcome of [`check_ownership`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
	/// The secret does not exist yet and may be created.
	Absent,
	/// The secret exists and carries our managed-by label.
	Owned,
	/// The secret exists and belongs to someone else.
	Foreign { managed_by: Option<String> },
}

impl Ownership {
	pub fn allows_mutation(&self) -> bool {
		!matches!(self, Ownership::Foreign { .. })
	}
}

/// Decide whether an existing (or absent) secret may be written.
pub fn check_ownership(existing: Option<&Secret>) -> Ownership {
	let Some(secret) = existing else {
		return Ownership::Absent;
	};

	let managed_by = secret
		.metadata
		.labels
		.as_ref()
		.and_then(|labels| labels.get(MANAGED_BY_LABEL));

	match managed_by {
		Some(value) if value == MANAGED_BY_VALUE => Ownership::Owned,
		other => Ownership::Foreign {
			managed_by: other.cloned(),
		},
	}
}

/// Like [`check_ownership`], but turns a foreign secret into an error.
pub fn ensure_owned(name: &str, existing: Option<&Secret>) -> SecretsResult<Ownership> {
	match check_ownership(existing) {
		Ownership::Foreign { managed_by } => Err(SecretsError::Ownership {
			name: name.to_string(),
			expected: MANAGED_BY_VALUE,
			found: managed_by,
		}),
		ownership => Ok(ownership),
	}
}
