// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

/// One marker in an identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdPatternToken {
	/// `UD`: user-store domain of the entity.
	UserDomain,
	/// `UN`: bare username.
	Username,
	/// `TD`: tenant domain.
	TenantDomain,
	/// `IDP`: identity provider name.
	IdentityProvider,
	/// Anything else. Kept so a misconfigured pattern can be reported, but
	/// contributes nothing to an identifier.
	Unknown(String),
}

impl IdPatternToken {
	/// Parses a single marker. Matching is case-insensitive.
	pub fn parse(raw: &str) -> Self {
		let raw = raw.trim();
		match raw.to_ascii_uppercase().as_str() {
			"UD" => Self::UserDomain,
			"UN" => Self::Username,
			"TD" => Self::TenantDomain,
			"IDP" => Self::IdentityProvider,
			_ => Self::Unknown(raw.to_string()),
		}
	}

	pub fn is_known(&self) -> bool {
		!matches!(self, Self::Unknown(_))
	}
}

impl fmt::Display for IdPatternToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UserDomain => write!(f, "UD"),
			Self::Username => write!(f, "UN"),
			Self::TenantDomain => write!(f, "TD"),
			Self::IdentityProvider => write!(f, "IDP"),
			Self::Unknown(raw) => write!(f, "{raw}"),
		}
	}
}

/// Ordered list of pattern markers, e.g. `{UD, UN, TD, IDP}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdPattern {
	tokens: Vec<IdPatternToken>,
}

impl IdPattern {
	/// Parses `{A, B, C}`. Braces are optional, blank entries are dropped.
	pub fn parse(raw: &str) -> Self {
		let inner = raw.trim();
		let inner = inner.strip_prefix('{').unwrap_or(inner);
		let inner = inner.strip_suffix('}').unwrap_or(inner);

		let tokens = inner
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(IdPatternToken::parse)
			.collect();

		Self { tokens }
	}

	pub fn tokens(&self) -> &[IdPatternToken] {
		&self.tokens
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

impl From<Vec<IdPatternToken>> for IdPattern {
	fn from(tokens: Vec<IdPatternToken>) -> Self {
		Self { tokens }
	}
}
