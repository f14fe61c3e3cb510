// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Secret;
use kube::{
	api::{Api, PostParams},
	Client,
};
use tracing::{debug, instrument};

use crate::client::K8sClient;
use crate::error::K8sError;

/// Production K8s client implementation using the kube crate.
pub struct KubeClient {
	client: Client,
}

impl KubeClient {
	/// Create a new KubeClient that auto-discovers cluster configuration.
	///
	/// This will attempt to load config from:
	/// 1. In-cluster service account (when running in K8s)
	/// 2. KUBECONFIG environment variable
	/// 3. ~/.kube/config
	pub async fn new() -> Result<Self, K8sError> {
		let client = Client::try_default()
			.await
			.map_err(|e| K8sError::ClientInit {
				message: e.to_string(),
			})?;
		debug!("K8s client initialized");
		Ok(Self { client })
	}

	fn secrets(&self, namespace: &str) -> Api<Secret> {
		Api::namespaced(self.client.clone(), namespace)
	}
}

#[async_trait]
impl K8sClient for KubeClient {
	#[instrument(skip(self))]
	async fn get_secret(&self, name: &str, namespace: &str) -> Result<Option<Secret>, K8sError> {
		let secret = self.secrets(namespace).get_opt(name).await?;
		Ok(secret)
	}

	#[instrument(skip(self, secret), fields(name = ?secret.metadata.name))]
	async fn create_secret(&self, namespace: &str, secret: Secret) -> Result<Secret, K8sError> {
		let name = secret.metadata.name.clone().unwrap_or_default();
		match self
			.secrets(namespace)
			.create(&PostParams::default(), &secret)
			.await
		{
			Ok(created) => Ok(created),
			Err(kube::Error::Api(err)) if err.code == 409 => {
				Err(K8sError::SecretAlreadyExists { name })
			}
			Err(e) => Err(e.into()),
		}
	}

	#[instrument(skip(self, secret))]
	async fn replace_secret(
		&self,
		name: &str,
		namespace: &str,
		secret: Secret,
	) -> Result<Secret, K8sError> {
		match self
			.secrets(namespace)
			.replace(name, &PostParams::default(), &secret)
			.await
		{
			Ok(replaced) => Ok(replaced),
			Err(kube::Error::Api(err)) if err.code == 404 => {
				Err(K8sError::SecretNotFound { name: name.into() })
			}
			Err(kube::Error::Api(err)) if err.code == 409 => {
				Err(K8sError::Conflict { name: name.into() })
			}
			Err(e) => Err(e.into()),
		}
	}
}
