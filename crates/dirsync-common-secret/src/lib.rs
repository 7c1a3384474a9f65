// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacting wrapper for the sensitive values a directory connector handles.
//!
//! Three kinds of values pass through a connector that must never reach a log
//! line or a config dump:
//!
//! - the service-account private key decoded from connector properties
//! - the password generated for every newly created directory account
//! - the short-lived access token attached to directory requests
//!
//! All of them are held as [`Secret<T>`]. The wrapper prints `[REDACTED]`,
//! serializes as `"[REDACTED]"`, zeroes its memory on drop and only hands out
//! the inner value through an explicit [`Secret::expose`] call.
//!
//! ```
//! use dirsync_common_secret::SecretString;
//!
//! let password = SecretString::new("Xk9!pQ2#mL7@vR4$".to_string());
//! assert_eq!(format!("{password}"), "[REDACTED]");
//! assert_eq!(password.expose(), "Xk9!pQ2#mL7@vR4$");
//! ```

use std::fmt;
use zeroize::Zeroize;

/// The placeholder written wherever a secret would otherwise be printed.
pub const REDACTED: &str = "[REDACTED]";

/// A value that must not be logged, printed or serialized in the clear.
///
/// There is deliberately no `Deref`; call sites opt in with [`Secret::expose`].
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct Secret<T>
where
	T: Zeroize,
{
	inner: T,
}

/// Passwords, tokens and textual key material.
pub type SecretString = Secret<String>;

/// Binary key material, e.g. a decoded service-account key.
pub type SecretBytes = Secret<Vec<u8>>;

impl<T> Secret<T>
where
	T: Zeroize,
{
	pub fn new(inner: T) -> Self {
		Self { inner }
	}

	/// Borrow the protected value.
	pub fn expose(&self) -> &T {
		&self.inner
	}
}

impl SecretBytes {
	/// Reinterpret binary key material as UTF-8 text without leaving an
	/// unprotected copy behind.
	///
	/// Returns `None` when the bytes are not valid UTF-8.
	pub fn to_secret_string(&self) -> Option<SecretString> {
		std::str::from_utf8(&self.inner)
			.ok()
			.map(|text| SecretString::new(text.to_string()))
	}
}

impl<T> Clone for Secret<T>
where
	T: Zeroize + Clone,
{
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
		}
	}
}

impl<T> fmt::Debug for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Secret").field(&REDACTED).finish()
	}
}

impl<T> fmt::Display for Secret<T>
where
	T: Zeroize,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl<T> PartialEq for Secret<T>
where
	T: Zeroize + PartialEq,
{
	fn eq(&self, other: &Self) -> bool {
		self.inner == other.inner
	}
}

impl<T> Eq for Secret<T> where T: Zeroize + Eq {}

// `tracing::Value` is sealed. Structured fields go through Display (`%secret`)
// or Debug (`?secret`), and both are redacted above.

#[cfg(feature = "serde")]
mod serde_impl {
	use super::{Secret, REDACTED};
	use serde::{Deserialize, Deserializer, Serialize, Serializer};
	use zeroize::Zeroize;

	impl<T> Serialize for Secret<T>
	where
		T: Serialize + Zeroize,
	{
		fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
		where
			S: Serializer,
		{
			serializer.serialize_str(REDACTED)
		}
	}

	impl<'de, T> Deserialize<'de> for Secret<T>
	where
		T: Deserialize<'de> + Zeroize,
	{
		fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
		where
			D: Deserializer<'de>,
		{
			T::deserialize(deserializer).map(Secret::new)
		}
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		/// No printable value survives Debug or Display formatting.
		#[test]
		fn formatting_never_leaks(inner in "[a-zA-Z0-9!@#$%^&*_+=;:,.<>?/-]{3,50}") {
			prop_assume!(!inner.contains("REDACTED"));
			prop_assume!(!inner.contains("Secret"));

			let secret = SecretString::new(inner.clone());
			let debug = format!("{secret:?}");
			let display = format!("{secret}");
			prop_assert!(!debug.contains(&inner));
			prop_assert!(!display.contains(&inner));
		}

		#[test]
		fn expose_roundtrips(inner in ".*") {
			let secret = SecretString::new(inner.clone());
			prop_assert_eq!(secret.expose(), &inner);
		}
	}
}
