// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

pub mod generate_secrets;

pub use generate_secrets::{handle_generate_secrets, GenerateSecretsArgs};
