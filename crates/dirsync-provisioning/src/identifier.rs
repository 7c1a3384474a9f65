// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirsync_connector_config::{ConnectorConfig, IdPattern, IdPatternToken};

/// Builds the local-part of a directory account address from an identifier
/// pattern.
#[derive(Debug, Clone, Copy)]
pub struct IdentifierBuilder<'a> {
	pattern: &'a IdPattern,
	separator: &'a str,
	identity_provider: &'a str,
}

impl<'a> IdentifierBuilder<'a> {
	pub fn new(pattern: &'a IdPattern, separator: &'a str, identity_provider: &'a str) -> Self {
		Self {
			pattern,
			separator,
			identity_provider,
		}
	}

	pub fn from_config(config: &'a ConnectorConfig) -> Self {
		Self::new(
			config.id_pattern(),
			config.separator(),
			config.identity_provider(),
		)
	}

	pub fn has_pattern(&self) -> bool {
		!self.pattern.is_empty()
	}

	/// Joins the values of the pattern's tokens with the separator.
	///
	/// An empty pattern yields `username` unchanged. Unknown tokens and blank
	/// values contribute nothing, so a pattern of only unknown tokens yields an
	/// empty string.
	pub fn build_user_id(&self, user_domain: &str, username: &str, tenant_domain: &str) -> String {
		if self.pattern.is_empty() {
			return username.to_string();
		}

		let mut segments: Vec<&str> = Vec::with_capacity(self.pattern.tokens().len());
		for token in self.pattern.tokens() {
			let value = match token {
				IdPatternToken::UserDomain => user_domain,
				IdPatternToken::Username => username,
				IdPatternToken::TenantDomain => tenant_domain,
				IdPatternToken::IdentityProvider => self.identity_provider,
				IdPatternToken::Unknown(_) => continue,
			};
			if !value.is_empty() {
				segments.push(value);
			}
		}

		segments.join(self.separator)
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		/// With non-empty values the id is exactly the separator-joined values.
		#[test]
		fn join_matches_pattern_values(
			user_domain in "[A-Z]{1,8}",
			username in "[a-z0-9.]{1,12}",
			tenant in "[a-z]{1,8}\\.com",
			separator in "[_.+-]{0,2}",
		) {
			let pattern = IdPattern::parse("{UD, UN, TD}");
			let id = IdentifierBuilder::new(&pattern, &separator, "")
				.build_user_id(&user_domain, &username, &tenant);
			prop_assert_eq!(id, [user_domain.as_str(), username.as_str(), tenant.as_str()].join(&separator));
		}

		/// The result never starts or ends with a non-empty separator.
		#[test]
		fn no_leading_or_trailing_separator(
			username in "[a-z]{0,6}",
			tenant in "[a-z]{0,6}",
			idp in "[a-z]{0,6}",
		) {
			let pattern = IdPattern::parse("{IDP, UN, TD}");
			let id = IdentifierBuilder::new(&pattern, "_", &idp)
				.build_user_id("", &username, &tenant);
			prop_assert!(!id.starts_with('_'));
			prop_assert!(!id.ends_with('_'));
		}
	}
}
