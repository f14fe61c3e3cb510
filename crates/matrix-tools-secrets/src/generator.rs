// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret types and the generators behind them.
//!
//! A [`SecretType`] is the tag written in a request (`rand32`, `rsa`, ...).
//! Combined with its arguments it becomes a [`Generator`], which has already
//! validated arity and formats so that generation itself cannot fail on bad
//! input.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::debug;

use crate::error::{SecretsError, SecretsResult};
use crate::keys::{self, RsaFormat, RANDOM_STRING_LEN};
use crate::registration::generate_registration;
use crate::value::GeneratedValue;

/// Closed set of secret type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretType {
	Rand32,
	SigningKey,
	Rsa,
	Registration,
	EcdsaP256,
}

impl SecretType {
	pub const ALL: [SecretType; 5] = [
		SecretType::Rand32,
		SecretType::SigningKey,
		SecretType::Rsa,
		SecretType::Registration,
		SecretType::EcdsaP256,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			SecretType::Rand32 => "rand32",
			SecretType::SigningKey => "signingkey",
			SecretType::Rsa => "rsa",
			SecretType::Registration => "registration",
			SecretType::EcdsaP256 => "ecdsa-p256",
		}
	}
}

impl FromStr for SecretType {
	type Err = SecretsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		SecretType::ALL
			.into_iter()
			.find(|t| t.as_str() == s)
			.ok_or_else(|| SecretsError::UnsupportedType(s.to_string()))
	}
}

impl fmt::Display for SecretType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A secret type bound to validated arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generator {
	/// 32 alphanumeric characters.
	Rand32,
	/// `ed25519 0 <base64 seed>`.
	SigningKey,
	/// RSA private key of `bits` length.
	Rsa { bits: usize, format: RsaFormat },
	/// Registration template with `${AS_TOKEN}`/`${HS_TOKEN}` filled in.
	Registration { template: PathBuf },
	/// P-256 ECDSA private key, PKCS#8 DER.
	EcdsaP256,
}

impl Generator {
	/// Bind `args` to `secret_type`, rejecting wrong arity or bad values.
	pub fn new(secret_type: SecretType, args: &[String]) -> SecretsResult<Self> {
		match secret_type {
			SecretType::Rand32 => {
				expect_arity(secret_type, args, 0)?;
				Ok(Generator::Rand32)
			}
			SecretType::SigningKey => {
				expect_arity(secret_type, args, 0)?;
				Ok(Generator::SigningKey)
			}
			SecretType::EcdsaP256 => {
				expect_arity(secret_type, args, 0)?;
				Ok(Generator::EcdsaP256)
			}
			SecretType::Rsa => {
				expect_arity(secret_type, args, 2)?;
				let bits = args[0]
					.parse::<usize>()
					.ok()
					.filter(|bits| *bits > 0)
					.ok_or_else(|| SecretsError::InvalidArguments {
						secret_type: secret_type.as_str(),
						reason: format!("key size '{}' is not a positive integer", args[0]),
					})?;
				let format = args[1].parse::<RsaFormat>()?;
				Ok(Generator::Rsa { bits, format })
			}
			SecretType::Registration => {
				expect_arity(secret_type, args, 1)?;
				if args[0].is_empty() {
					return Err(SecretsError::InvalidArguments {
						secret_type: secret_type.as_str(),
						reason: "template path is empty".to_string(),
					});
				}
				Ok(Generator::Registration {
					template: PathBuf::from(&args[0]),
				})
			}
		}
	}

	/// Parse a type tag and its arguments in one step.
	pub fn from_tag(tag: &str, args: &[String]) -> SecretsResult<Self> {
		Generator::new(tag.parse()?, args)
	}

	/// Arguments in request order, as they would be written after the type tag.
	pub fn args(&self) -> Vec<String> {
		match self {
			Generator::Rsa { bits, format } => vec![bits.to_string(), format.to_string()],
			Generator::Registration { template } => vec![template.display().to_string()],
			Generator::Rand32 | Generator::SigningKey | Generator::EcdsaP256 => Vec::new(),
		}
	}

	pub fn secret_type(&self) -> SecretType {
		match self {
			Generator::Rand32 => SecretType::Rand32,
			Generator::SigningKey => SecretType::SigningKey,
			Generator::Rsa { .. } => SecretType::Rsa,
			Generator::Registration { .. } => SecretType::Registration,
			Generator::EcdsaP256 => SecretType::EcdsaP256,
		}
	}

	/// Produce a fresh value.
	pub fn generate(&self) -> SecretsResult<GeneratedValue> {
		debug!(secret_type = %self.secret_type(), "generating value");
		let value: GeneratedValue = match self {
			Generator::Rand32 => keys::random_string(RANDOM_STRING_LEN).into(),
			Generator::SigningKey => keys::signing_key().into(),
			Generator::Rsa { bits, format } => keys::rsa_private_key(*bits, *format)?.into(),
			Generator::Registration { template } => generate_registration(template)?.into(),
			Generator::EcdsaP256 => keys::ecdsa_p256_private_key()?.into(),
		};
		Ok(value)
	}
}

fn expect_arity(secret_type: SecretType, args: &[String], expected: usize) -> SecretsResult<()> {
	if args.len() != expected {
		return Err(SecretsError::InvalidArguments {
			secret_type: secret_type.as_str(),
			reason: format!("expected {expected} argument(s), got {}", args.len()),
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(values: &[&str]) -> Vec<String> {
		values.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn type_tags_roundtrip() {
		for secret_type in SecretType::ALL {
			assert_eq!(secret_type.as_str().parse::<SecretType>().unwrap(), secret_type);
		}
	}

	#[test]
	fn unknown_type_is_rejected() {
		let err = "unknown".parse::<SecretType>().unwrap_err();
		assert!(matches!(err, SecretsError::UnsupportedType(t) if t == "unknown"));

		let err = Generator::from_tag("RAND32", &[]).unwrap_err();
		assert!(matches!(err, SecretsError::UnsupportedType(_)));
	}

	#[test]
	fn rsa_arguments_are_validated() {
		assert_eq!(
			Generator::from_tag("rsa", &args(&["4096", "der"])).unwrap(),
			Generator::Rsa {
				bits: 4096,
				format: RsaFormat::Der
			}
		);

		let err = Generator::from_tag("rsa", &args(&["2048", "xml"])).unwrap_err();
		assert!(matches!(err, SecretsError::UnsupportedFormat(f) if f == "xml"));

		let err = Generator::from_tag("rsa", &args(&["big", "pem"])).unwrap_err();
		assert!(matches!(err, SecretsError::InvalidArguments { .. }));

		let err = Generator::from_tag("rsa", &args(&["0", "pem"])).unwrap_err();
		assert!(matches!(err, SecretsError::InvalidArguments { .. }));

		let err = Generator::from_tag("rsa", &args(&["2048"])).unwrap_err();
		assert!(matches!(err, SecretsError::InvalidArguments { .. }));
	}

	#[test]
	fn argument_free_types_reject_arguments() {
		for tag in ["rand32", "signingkey", "ecdsa-p256"] {
			assert!(Generator::from_tag(tag, &[]).is_ok());
			let err = Generator::from_tag(tag, &args(&["extra"])).unwrap_err();
			assert!(matches!(err, SecretsError::InvalidArguments { .. }), "{tag}");
		}
	}

	#[test]
	fn registration_needs_a_path() {
		assert_eq!(
			Generator::from_tag("registration", &args(&["/t/registration.yaml"])).unwrap(),
			Generator::Registration {
				template: PathBuf::from("/t/registration.yaml")
			}
		);
		assert!(Generator::from_tag("registration", &[]).is_err());
		assert!(Generator::from_tag("registration", &args(&[""])).is_err());
	}

	#[test]
	fn rand32_generates_32_chars() {
		let value = Generator::Rand32.generate().unwrap();
		assert_eq!(value.expose().len(), 32);
	}

	#[test]
	fn signing_key_generates_prefixed_value() {
		let value = Generator::SigningKey.generate().unwrap();
		assert!(value.expose().starts_with(b"ed25519 0 "));
	}

	#[test]
	fn registration_with_missing_template_fails() {
		let generator = Generator::Registration {
			template: PathBuf::from("/nonexistent/registration.yaml"),
		};
		assert!(matches!(
			generator.generate().unwrap_err(),
			SecretsError::TemplateRead { .. }
		));
	}
}
