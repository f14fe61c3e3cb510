// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Random values and private keys, in the encodings Matrix components expect.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use ed25519_dalek::SigningKey;
use p256::pkcs8::EncodePrivateKey as _;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::Rng;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::pkcs8::EncodePrivateKey;
use rsa::RsaPrivateKey;
use zeroize::Zeroizing;

use crate::error::{SecretsError, SecretsResult};

/// Length of generated random strings.
pub const RANDOM_STRING_LEN: usize = 32;

/// Algorithm and version prefix of Synapse-style signing keys.
pub const SIGNING_KEY_ALGORITHM: &str = "ed25519";
pub const SIGNING_KEY_VERSION: &str = "0";

/// PEM label used for PKCS#1 RSA private keys.
pub const RSA_PEM_LABEL: &str = "RSA PRIVATE KEY";

/// Encoding of a generated RSA private key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsaFormat {
	/// PKCS#1 in a `RSA PRIVATE KEY` PEM block.
	Pem,
	/// Raw PKCS#8 DER.
	Der,
}

impl FromStr for RsaFormat {
	type Err = SecretsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"pem" => Ok(RsaFormat::Pem),
			"der" => Ok(RsaFormat::Der),
			other => Err(SecretsError::UnsupportedFormat(other.to_string())),
		}
	}
}

impl fmt::Display for RsaFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RsaFormat::Pem => f.write_str("pem"),
			RsaFormat::Der => f.write_str("der"),
		}
	}
}

/// Generate an alphanumeric string from the OS CSPRNG.
pub fn random_string(len: usize) -> String {
	OsRng
		.sample_iter(&Alphanumeric)
		.take(len)
		.map(char::from)
		.collect()
}

/// Generate an Ed25519 signing key as `ed25519 0 <unpadded base64 seed>`.
///
/// Seeds whose encoding contains `+` or `/` are redrawn so the key stays
/// within `[A-Za-z0-9]`.
pub fn signing_key() -> String {
	loop {
		let key = SigningKey::generate(&mut OsRng);
		let seed = Zeroizing::new(STANDARD_NO_PAD.encode(key.to_bytes()));
		if seed.bytes().all(|b| b.is_ascii_alphanumeric()) {
			return format!("{SIGNING_KEY_ALGORITHM} {SIGNING_KEY_VERSION} {}", seed.as_str());
		}
	}
}

/// Generate an RSA private key of `bits` length in the requested encoding.
pub fn rsa_private_key(bits: usize, format: RsaFormat) -> SecretsResult<Vec<u8>> {
	let key = RsaPrivateKey::new(&mut OsRng, bits)
		.map_err(|e| SecretsError::Generator(format!("RSA key generation failed: {e}")))?;

	match format {
		RsaFormat::Pem => {
			let pem = key
				.to_pkcs1_pem(LineEnding::LF)
				.map_err(|e| SecretsError::Generator(format!("PKCS#1 encoding failed: {e}")))?;
			Ok(pem.as_bytes().to_vec())
		}
		RsaFormat::Der => {
			let der = key
				.to_pkcs8_der()
				.map_err(|e| SecretsError::Generator(format!("PKCS#8 encoding failed: {e}")))?;
			Ok(der.as_bytes().to_vec())
		}
	}
}

/// Generate a P-256 ECDSA private key as PKCS#8 DER.
pub fn ecdsa_p256_private_key() -> SecretsResult<Vec<u8>> {
	let key = p256::SecretKey::random(&mut OsRng);
	let der = key
		.to_pkcs8_der()
		.map_err(|e| SecretsError::Generator(format!("PKCS#8 encoding failed: {e}")))?;
	Ok(der.as_bytes().to_vec())
}
