// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Initial passwords for newly created directory accounts.
//!
//! Accounts created by the connector sign in through federation, so the
//! password is never shown to anyone. It only has to satisfy the directory's
//! complexity policy and be unguessable.

use dirsync_common_secret::SecretString;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Length of every generated password.
pub const PASSWORD_LENGTH: usize = 16;

const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*-_=+";

/// Generates a [`PASSWORD_LENGTH`] password from the OS random source with at
/// least one upper-case letter, lower-case letter, digit and symbol.
pub fn generate_password() -> SecretString {
	let mut rng = OsRng;
	let classes = [UPPER, LOWER, DIGITS, SYMBOLS];
	let all: Vec<u8> = classes.concat();

	let mut chars: Vec<u8> = classes
		.iter()
		.map(|class| class[rng.gen_range(0..class.len())])
		.collect();
	while chars.len() < PASSWORD_LENGTH {
		chars.push(all[rng.gen_range(0..all.len())]);
	}
	chars.shuffle(&mut rng);

	let password = chars.iter().map(|&b| char::from(b)).collect::<String>();
	chars.iter_mut().for_each(|b| *b = 0);
	SecretString::new(password)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn has_fixed_length_and_every_class() {
		for _ in 0..200 {
			let password = generate_password();
			let p = password.expose();
			assert_eq!(p.len(), PASSWORD_LENGTH);
			assert!(p.bytes().any(|b| UPPER.contains(&b)), "no upper: {p}");
			assert!(p.bytes().any(|b| LOWER.contains(&b)), "no lower: {p}");
			assert!(p.bytes().any(|b| DIGITS.contains(&b)), "no digit: {p}");
			assert!(p.bytes().any(|b| SYMBOLS.contains(&b)), "no symbol: {p}");
		}
	}

	#[test]
	fn passwords_differ() {
		let a = generate_password();
		let b = generate_password();
		assert_ne!(a.expose(), b.expose());
	}

	#[test]
	fn password_is_redacted() {
		let password = generate_password();
		assert!(!format!("{password:?}").contains(password.expose().as_str()));
	}
}
