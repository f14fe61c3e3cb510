// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Get-or-create reconciliation of requested secret keys.
//!
//! For each [`SecretRequest`] the reconciler fetches the target secret,
//! refuses to touch secrets it does not own, generates a value only when the
//! key is missing, and writes the secret back with the configured labels.
//! Existing keys are never overwritten, so re-running a batch is safe.

use std::collections::BTreeMap;
use std::sync::Arc;

use matrix_tools_k8s::{ByteString, K8sClient, ObjectMeta, Secret};
use tracing::{debug, info, instrument};

use crate::error::{SecretsError, SecretsResult};
use crate::labels::LabelSet;
use crate::ownership::ensure_owned;
use crate::request::SecretRequest;

/// Per-run settings for the reconciler.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
	/// Namespace every secret is read from and written to.
	pub namespace: String,
	/// Labels applied verbatim to every reconciled secret.
	pub labels: LabelSet,
}

/// What a single reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
	/// The secret did not exist and was created with the generated key.
	Created,
	/// The secret existed and the missing key was generated.
	KeyGenerated,
	/// The key was already populated; only labels were rewritten.
	KeyPresent,
}

/// Counts of outcomes across a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
	pub created: usize,
	pub generated: usize,
	pub unchanged: usize,
}

impl BatchSummary {
	fn record(&mut self, outcome: ReconcileOutcome) {
		match outcome {
			ReconcileOutcome::Created => self.created += 1,
			ReconcileOutcome::KeyGenerated => self.generated += 1,
			ReconcileOutcome::KeyPresent => self.unchanged += 1,
		}
	}

	pub fn total(&self) -> usize {
		self.created + self.generated + self.unchanged
	}
}

/// Materialises requested secret keys in a single namespace.
pub struct SecretReconciler {
	client: Arc<dyn K8sClient>,
	config: ReconcilerConfig,
}

impl SecretReconciler {
	pub fn new(client: Arc<dyn K8sClient>, config: ReconcilerConfig) -> Self {
		Self { client, config }
	}

	/// Ensure the key named by `request` exists.
	///
	/// There is no retry: any failure aborts the request and leaves the
	/// secret as it was before the call.
	#[instrument(
		skip(self, request),
		fields(
			namespace = %self.config.namespace,
			secret = %request.name,
			key = %request.key,
			secret_type = %request.secret_type()
		)
	)]
	pub async fn reconcile(&self, request: &SecretRequest) -> SecretsResult<ReconcileOutcome> {
		let namespace = self.config.namespace.as_str();

		let existing = self
			.client
			.get_secret(&request.name, namespace)
			.await
			.map_err(|source| SecretsError::Client {
				name: request.name.clone(),
				source,
			})?;
		ensure_owned(&request.name, existing.as_ref())?;

		let exists = existing.is_some();
		let mut secret = existing.unwrap_or_else(|| Secret {
			metadata: ObjectMeta {
				name: Some(request.name.clone()),
				namespace: Some(namespace.to_string()),
				..Default::default()
			},
			..Default::default()
		});

		let data = secret.data.get_or_insert_with(BTreeMap::new);
		let key_present = data.contains_key(&request.key);
		if key_present {
			debug!("key already populated, keeping existing value");
		} else {
			let value = request.generator.generate()?;
			data.insert(request.key.clone(), ByteString(value.into_bytes()));
		}
		secret.metadata.labels = Some(self.config.labels.clone());

		let persisted = if exists {
			self
				.client
				.replace_secret(&request.name, namespace, secret)
				.await
		} else {
			self.client.create_secret(namespace, secret).await
		};
		persisted.map_err(|source| SecretsError::Persist {
			name: request.name.clone(),
			source,
		})?;

		let outcome = match (exists, key_present) {
			(false, _) => ReconcileOutcome::Created,
			(true, false) => ReconcileOutcome::KeyGenerated,
			(true, true) => ReconcileOutcome::KeyPresent,
		};
		debug!(?outcome, "secret reconciled");
		Ok(outcome)
	}

	/// Reconcile `requests` in order, stopping at the first failure.
	///
	/// Requests applied before the failure stay applied.
	pub async fn run_batch(&self, requests: &[SecretRequest]) -> SecretsResult<BatchSummary> {
		let mut summary = BatchSummary::default();
		for request in requests {
			let outcome =
				self
					.reconcile(request)
					.await
					.map_err(|source| SecretsError::Request {
						request: request.raw.clone(),
						source: Box::new(source),
					})?;
			info!(request = %request, ?outcome, "secret request satisfied");
			summary.record(outcome);
		}
		Ok(summary)
	}
}
