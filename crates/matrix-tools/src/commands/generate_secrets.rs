// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use matrix_tools_k8s::{K8sClient, KubeClient};
use matrix_tools_secrets::{
	parse_labels, parse_requests, with_managed_by, ReconcilerConfig, SecretReconciler,
	SecretRequest,
};
use tracing::{info, instrument};

#[derive(Debug, Clone, Args)]
pub struct GenerateSecretsArgs {
	/// Comma-separated secrets to generate, each as name:key:type[:args]
	#[arg(long)]
	pub secrets: String,

	/// Comma-separated key=value labels to apply to generated secrets
	#[arg(long, default_value = "")]
	pub labels: String,

	/// Namespace the secrets live in
	#[arg(long, env = "NAMESPACE")]
	pub namespace: Option<String>,
}

/// A fully validated generate-secrets invocation.
#[derive(Debug)]
pub struct GenerateSecretsPlan {
	pub requests: Vec<SecretRequest>,
	pub config: ReconcilerConfig,
}

impl GenerateSecretsArgs {
	/// Parse and validate everything that can be checked without a cluster.
	pub fn plan(&self) -> anyhow::Result<GenerateSecretsPlan> {
		let namespace = self
			.namespace
			.as_deref()
			.filter(|ns| !ns.is_empty())
			.context("namespace is not set, pass --namespace or set $NAMESPACE")?
			.to_string();
		let requests = parse_requests(&self.secrets)?;
		let labels = with_managed_by(parse_labels(&self.labels)?);

		Ok(GenerateSecretsPlan {
			requests,
			config: ReconcilerConfig { namespace, labels },
		})
	}
}

#[instrument(skip_all)]
pub async fn handle_generate_secrets(args: GenerateSecretsArgs) -> anyhow::Result<()> {
	let plan = args.plan()?;
	let client: Arc<dyn K8sClient> = Arc::new(
		KubeClient::new()
			.await
			.context("error getting Kubernetes client")?,
	);
	run_plan(client, plan).await
}

async fn run_plan(client: Arc<dyn K8sClient>, plan: GenerateSecretsPlan) -> anyhow::Result<()> {
	info!(
		namespace = %plan.config.namespace,
		requests = plan.requests.len(),
		"generating secrets"
	);

	let reconciler = SecretReconciler::new(client, plan.config);
	let summary = reconciler.run_batch(&plan.requests).await?;

	info!(
		created = summary.created,
		generated = summary.generated,
		unchanged = summary.unchanged,
		"secrets up to date"
	);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use matrix_tools_k8s::MockK8sClient;
	use matrix_tools_secrets::{Generator, SecretsError, MANAGED_BY_LABEL, MANAGED_BY_VALUE};

	fn args(secrets: &str, labels: &str, namespace: Option<&str>) -> GenerateSecretsArgs {
		GenerateSecretsArgs {
			secrets: secrets.to_string(),
			labels: labels.to_string(),
			namespace: namespace.map(str::to_string),
		}
	}

	#[test]
	fn plan_injects_managed_by_label() {
		let plan = args("secret1:value1:rand32", "mykey=myval", Some("ess"))
			.plan()
			.unwrap();

		assert_eq!(plan.config.namespace, "ess");
		assert_eq!(plan.config.labels.len(), 2);
		assert_eq!(plan.config.labels[MANAGED_BY_LABEL], MANAGED_BY_VALUE);
		assert_eq!(plan.config.labels["mykey"], "myval");
		assert_eq!(plan.requests[0].generator, Generator::Rand32);
	}

	#[test]
	fn plan_requires_namespace() {
		assert!(args("secret1:value1:rand32", "", None).plan().is_err());
		assert!(args("secret1:value1:rand32", "", Some("")).plan().is_err());
	}

	#[test]
	fn plan_rejects_unknown_type_before_any_io() {
		let err = args("secret1:value1:unknown", "", Some("ess"))
			.plan()
			.unwrap_err();
		let err = err.downcast_ref::<SecretsError>().unwrap();
		assert!(matches!(err.root(), SecretsError::UnsupportedType(t) if t == "unknown"));
		assert!(err.to_string().contains("secret1:value1:unknown"));
	}

	#[tokio::test]
	async fn run_plan_creates_secrets() {
		let client = Arc::new(MockK8sClient::new());
		let plan = args(
			"secret1:value1:rand32,secret2:value2:signingkey",
			"",
			Some("ess"),
		)
		.plan()
		.unwrap();

		run_plan(client.clone(), plan).await.unwrap();

		let secret = client.secret("ess", "secret1").unwrap();
		assert_eq!(
			secret.metadata.labels.unwrap()[MANAGED_BY_LABEL],
			MANAGED_BY_VALUE
		);
		assert!(client.secret("ess", "secret2").is_some());
	}

	#[tokio::test]
	async fn run_plan_reports_failing_request() {
		let client = Arc::new(MockK8sClient::new());
		client.fail_writes(true);
		let plan = args("secret1:value1:rand32", "", Some("ess")).plan().unwrap();

		let err = run_plan(client, plan).await.unwrap_err();
		assert!(format!("{err:#}").contains("secret1:value1:rand32"));
	}
}
