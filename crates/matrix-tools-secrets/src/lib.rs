// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Idempotent generation of K8s Secrets for Matrix deployments.
//!
//! This crate runs as an init step before application containers start. It
//! ensures each requested `(secret, key)` pair holds a value, generating one
//! only when the key is missing:
//!
//! - [`SecretRequest`]: parsed `name:key:type[:args]` instruction
//! - [`Generator`]: validated secret type plus arguments (random tokens,
//!   Ed25519 signing keys, RSA/ECDSA private keys, appservice registrations)
//! - [`check_ownership`]: refuses to modify secrets managed by anything else
//! - [`SecretReconciler`]: fetch, check, generate, persist
//!
//! Existing keys are never rewritten, so re-running after a partial failure
//! is safe.

pub mod error;
pub mod generator;
pub mod keys;
pub mod labels;
pub mod ownership;
pub mod reconciler;
pub mod registration;
pub mod request;
pub mod value;

pub use error::{SecretsError, SecretsResult};
pub use generator::{Generator, SecretType};
pub use keys::RsaFormat;
pub use labels::{parse_labels, with_managed_by, LabelSet};
pub use ownership::{check_ownership, Ownership, MANAGED_BY_LABEL, MANAGED_BY_VALUE};
pub use reconciler::{BatchSummary, ReconcileOutcome, ReconcilerConfig, SecretReconciler};
pub use request::{parse_requests, SecretRequest};
pub use value::GeneratedValue;
