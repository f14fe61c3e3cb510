// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory [`K8sClient`] for exercising secret reconciliation without a
//! cluster.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::client::K8sClient;
use crate::error::K8sError;
use crate::types::Secret;

type SecretKey = (String, String);

/// Mock K8s client backed by a map of `(namespace, name)` to secret.
///
/// Mirrors the API server behaviour the generator relies on: `create` fails
/// for existing objects, `replace` fails for missing objects, and a stale
/// `resourceVersion` on replace is rejected with [`K8sError::Conflict`].
#[derive(Default)]
pub struct MockK8sClient {
	secrets: Mutex<HashMap<SecretKey, Secret>>,
	next_version: AtomicUsize,
	writes: AtomicUsize,
	fail_writes: AtomicBool,
	fail_reads: AtomicBool,
}

impl MockK8sClient {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seed the store with a secret, bypassing write accounting.
	pub fn insert(&self, namespace: &str, mut secret: Secret) {
		let name = secret.metadata.name.clone().unwrap_or_default();
		secret.metadata.namespace = Some(namespace.to_string());
		secret.metadata.resource_version = Some(self.bump_version());
		self.store().insert((namespace.to_string(), name), secret);
	}

	/// Snapshot of a stored secret.
	pub fn secret(&self, namespace: &str, name: &str) -> Option<Secret> {
		self
			.store()
			.get(&(namespace.to_string(), name.to_string()))
			.cloned()
	}

	/// Number of successful create/replace calls.
	pub fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	/// Make every subsequent create/replace fail with an API error.
	pub fn fail_writes(&self, fail: bool) {
		self.fail_writes.store(fail, Ordering::SeqCst);
	}

	/// Make every subsequent get fail with an API error.
	pub fn fail_reads(&self, fail: bool) {
		self.fail_reads.store(fail, Ordering::SeqCst);
	}

	fn store(&self) -> MutexGuard<'_, HashMap<SecretKey, Secret>> {
		self.secrets.lock().unwrap_or_else(|e| e.into_inner())
	}

	fn bump_version(&self) -> String {
		(self.next_version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
	}

	fn check_writable(&self) -> Result<(), K8sError> {
		if self.fail_writes.load(Ordering::SeqCst) {
			return Err(K8sError::ApiError {
				message: "injected write failure".to_string(),
			});
		}
		Ok(())
	}
}

#[async_trait]
impl K8sClient for MockK8sClient {
	async fn get_secret(&self, name: &str, namespace: &str) -> Result<Option<Secret>, K8sError> {
		if self.fail_reads.load(Ordering::SeqCst) {
			return Err(K8sError::ApiError {
				message: "injected read failure".to_string(),
			});
		}
		Ok(self.secret(namespace, name))
	}

	async fn create_secret(&self, namespace: &str, mut secret: Secret) -> Result<Secret, K8sError> {
		self.check_writable()?;
		let name = secret.metadata.name.clone().unwrap_or_default();
		let key = (namespace.to_string(), name.clone());

		let mut store = self.store();
		if store.contains_key(&key) {
			return Err(K8sError::SecretAlreadyExists { name });
		}
		secret.metadata.namespace = Some(namespace.to_string());
		secret.metadata.resource_version = Some(self.bump_version());
		store.insert(key, secret.clone());
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(secret)
	}

	async fn replace_secret(
		&self,
		name: &str,
		namespace: &str,
		mut secret: Secret,
	) -> Result<Secret, K8sError> {
		self.check_writable()?;
		let key = (namespace.to_string(), name.to_string());

		let mut store = self.store();
		let current = store.get(&key).ok_or_else(|| K8sError::SecretNotFound {
			name: name.to_string(),
		})?;
		if let Some(version) = secret.metadata.resource_version.as_ref() {
			if current.metadata.resource_version.as_ref() != Some(version) {
				return Err(K8sError::Conflict {
					name: name.to_string(),
				});
			}
		}
		secret.metadata.namespace = Some(namespace.to_string());
		secret.metadata.resource_version = Some(self.bump_version());
		store.insert(key, secret.clone());
		self.writes.fetch_add(1, Ordering::SeqCst);
		Ok(secret)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::ObjectMeta;

	fn secret(name: &str) -> Secret {
		Secret {
			metadata: ObjectMeta {
				name: Some(name.to_string()),
				..Default::default()
			},
			..Default::default()
		}
	}

	#[tokio::test]
	async fn get_missing_secret_returns_none() {
		let client = MockK8sClient::new();
		let result = client.get_secret("absent", "ns").await.unwrap();
		assert!(result.is_none());
	}

	#[tokio::test]
	async fn create_then_get() {
		let client = MockK8sClient::new();
		client.create_secret("ns", secret("s1")).await.unwrap();

		let fetched = client.get_secret("s1", "ns").await.unwrap().unwrap();
		assert_eq!(fetched.metadata.namespace.as_deref(), Some("ns"));
		assert!(fetched.metadata.resource_version.is_some());
		assert_eq!(client.writes(), 1);
	}

	#[tokio::test]
	async fn secrets_are_scoped_by_namespace() {
		let client = MockK8sClient::new();
		client.create_secret("ns-a", secret("s1")).await.unwrap();
		assert!(client.get_secret("s1", "ns-b").await.unwrap().is_none());
	}

	#[tokio::test]
	async fn create_existing_secret_fails() {
		let client = MockK8sClient::new();
		client.create_secret("ns", secret("s1")).await.unwrap();

		let err = client.create_secret("ns", secret("s1")).await.unwrap_err();
		assert!(matches!(err, K8sError::SecretAlreadyExists { .. }));
	}

	#[tokio::test]
	async fn replace_missing_secret_fails() {
		let client = MockK8sClient::new();
		let err = client
			.replace_secret("s1", "ns", secret("s1"))
			.await
			.unwrap_err();
		assert!(matches!(err, K8sError::SecretNotFound { .. }));
	}

	#[tokio::test]
	async fn replace_with_stale_version_conflicts() {
		let client = MockK8sClient::new();
		client.insert("ns", secret("s1"));

		let first = client.get_secret("s1", "ns").await.unwrap().unwrap();
		let second = first.clone();

		client.replace_secret("s1", "ns", first).await.unwrap();
		let err = client.replace_secret("s1", "ns", second).await.unwrap_err();
		assert!(matches!(err, K8sError::Conflict { .. }));
	}

	#[tokio::test]
	async fn injected_failures() {
		let client = MockK8sClient::new();
		client.fail_writes(true);
		assert!(client.create_secret("ns", secret("s1")).await.is_err());
		assert_eq!(client.writes(), 0);

		client.fail_reads(true);
		assert!(client.get_secret("s1", "ns").await.is_err());
	}
}
