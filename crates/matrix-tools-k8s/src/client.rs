// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;

use crate::error::K8sError;
use crate::types::Secret;

/// Trait for the K8s Secret operations needed by the secret generator.
///
/// This abstraction allows the reconciler to run against an in-memory store
/// in tests while the binary talks to a real API server.
#[async_trait]
pub trait K8sClient: Send + Sync {
	/// Get a secret by name, returning `None` when it does not exist.
	async fn get_secret(&self, name: &str, namespace: &str) -> Result<Option<Secret>, K8sError>;

	/// Create a new secret in the specified namespace.
	async fn create_secret(&self, namespace: &str, secret: Secret) -> Result<Secret, K8sError>;

	/// Replace an existing secret.
	///
	/// The `resourceVersion` carried in `secret.metadata` is sent as-is, so a
	/// secret modified since it was read is rejected with
	/// [`K8sError::Conflict`].
	async fn replace_secret(
		&self,
		name: &str,
		namespace: &str,
		secret: Secret,
	) -> Result<Secret, K8sError>;
}
