// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! K8s client abstraction for matrix-tools secret generation.
//!
//! This crate provides:
//! - A trait-based client for the Secret operations the generator needs
//! - Production implementation using the kube crate
//! - An in-memory implementation for tests

mod client;
mod error;
mod kube_client;
mod mock;
mod types;

pub use client::K8sClient;
pub use error::{K8sError, K8sResult};
pub use kube_client::KubeClient;
pub use mock::MockK8sClient;
pub use types::{ByteString, ObjectMeta, Secret};
