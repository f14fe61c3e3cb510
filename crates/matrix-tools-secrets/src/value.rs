// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use zeroize::Zeroizing;

const REDACTED: &str = "[REDACTED]";

/// Bytes produced by a generator, on their way into a K8s Secret.
///
/// Debug and Display never print the payload, and the buffer is zeroed on
/// drop. Call [`GeneratedValue::expose`] or [`GeneratedValue::into_bytes`] to
/// get at the contents.
pub struct GeneratedValue {
	inner: Zeroizing<Vec<u8>>,
}

impl GeneratedValue {
	pub fn new(bytes: Vec<u8>) -> Self {
		Self {
			inner: Zeroizing::new(bytes),
		}
	}

	pub fn expose(&self) -> &[u8] {
		&self.inner
	}

	/// Move the payload out. The returned buffer is no longer zeroed on drop.
	pub fn into_bytes(mut self) -> Vec<u8> {
		std::mem::take(&mut *self.inner)
	}
}

impl From<String> for GeneratedValue {
	fn from(value: String) -> Self {
		Self::new(value.into_bytes())
	}
}

impl From<Vec<u8>> for GeneratedValue {
	fn from(value: Vec<u8>) -> Self {
		Self::new(value)
	}
}

impl fmt::Debug for GeneratedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("GeneratedValue").field(&REDACTED).finish()
	}
}

impl fmt::Display for GeneratedValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}
