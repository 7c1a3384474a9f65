// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::{BTreeMap, BTreeSet};

use dirsync_common_secret::SecretString;
use tracing::{debug, warn};

use crate::keys;
use crate::pattern::IdPattern;

/// Claim used as the user identifier when neither [`keys::USER_ID_CLAIM`] nor
/// the legacy primary-email property is configured.
pub const DEFAULT_USER_ID_CLAIM: &str = "http://wso2.org/claims/streetaddress";

/// Connector settings resolved from the provisioning property bag.
///
/// Built once by [`ConnectorConfig::build`] and read-only afterwards. Missing
/// optional properties resolve to empty strings or empty collections; whether
/// that is acceptable is decided by the caller before any remote operation.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
	domain_name: String,
	email_claim: String,
	given_name_claim: String,
	family_name_claim: String,
	service_account_email: String,
	private_key: Option<SecretString>,
	admin_email: String,
	application_name: String,
	id_pattern: IdPattern,
	separator: String,
	default_given_name: String,
	default_family_name: String,
	required_attribute_names: BTreeSet<String>,
	user_id_claim: String,
	jit_provisioning_enabled: bool,
	tenant_domain: String,
	identity_provider: String,
	properties: BTreeMap<String, String>,
}

impl ConnectorConfig {
	/// Resolves a property bag. Never fails.
	pub fn build<I, K, V>(properties: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let mut properties: BTreeMap<String, String> = properties
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();

		let private_key = properties
			.remove(keys::PRIVATE_KEY)
			.filter(|v| !v.trim().is_empty())
			.map(SecretString::new);
		properties.retain(|k, _| !keys::SENSITIVE.contains(&k.as_str()));

		let get = |key: &str| properties.get(key).cloned().unwrap_or_default();

		let config = Self {
			domain_name: get(keys::DOMAIN_NAME).trim().to_string(),
			email_claim: get(keys::EMAIL_CLAIM),
			given_name_claim: get(keys::GIVEN_NAME_CLAIM),
			family_name_claim: get(keys::FAMILY_NAME_CLAIM),
			service_account_email: get(keys::SERVICE_ACCOUNT_EMAIL),
			private_key,
			admin_email: get(keys::ADMIN_EMAIL),
			application_name: get(keys::APPLICATION_NAME),
			id_pattern: IdPattern::parse(&get(keys::PROVISIONING_PATTERN)),
			separator: get(keys::PROVISIONING_SEPARATOR),
			default_given_name: get(keys::DEFAULT_GIVEN_NAME),
			default_family_name: get(keys::DEFAULT_FAMILY_NAME),
			required_attribute_names: parse_required_attributes(
				properties.get(keys::REQUIRED_FIELDS).map(String::as_str),
			),
			user_id_claim: resolve_user_id_claim(&properties),
			jit_provisioning_enabled: parse_flag(
				properties
					.get(keys::JIT_PROVISIONING_ENABLED)
					.map(String::as_str),
			),
			tenant_domain: get(keys::TENANT_DOMAIN),
			identity_provider: get(keys::IDENTITY_PROVIDER_NAME),
			properties,
		};

		debug!(
			domain = %config.domain_name,
			pattern_tokens = config.id_pattern.tokens().len(),
			jit_enabled = config.jit_provisioning_enabled,
			has_private_key = config.private_key.is_some(),
			"resolved connector configuration"
		);

		config
	}

	/// Raw lookup of any non-sensitive property.
	///
	/// The private key is only reachable through [`Self::private_key`].
	pub fn value(&self, name: &str) -> Option<&str> {
		self.properties.get(name).map(String::as_str)
	}

	/// Attribute names the connector needs from the framework, parsed from the
	/// comma separated required-fields property.
	pub fn required_attribute_names(&self) -> &BTreeSet<String> {
		&self.required_attribute_names
	}

	/// Claim identifying the user, resolved at build time from
	/// [`keys::USER_ID_CLAIM`], then the legacy primary-email property, then
	/// [`DEFAULT_USER_ID_CLAIM`].
	pub fn user_id_claim(&self) -> &str {
		&self.user_id_claim
	}

	pub fn domain_name(&self) -> &str {
		&self.domain_name
	}

	pub fn email_claim(&self) -> &str {
		&self.email_claim
	}

	pub fn given_name_claim(&self) -> &str {
		&self.given_name_claim
	}

	pub fn family_name_claim(&self) -> &str {
		&self.family_name_claim
	}

	pub fn service_account_email(&self) -> &str {
		&self.service_account_email
	}

	pub fn private_key(&self) -> Option<&SecretString> {
		self.private_key.as_ref()
	}

	pub fn admin_email(&self) -> &str {
		&self.admin_email
	}

	pub fn application_name(&self) -> &str {
		&self.application_name
	}

	pub fn id_pattern(&self) -> &IdPattern {
		&self.id_pattern
	}

	pub fn separator(&self) -> &str {
		&self.separator
	}

	pub fn default_given_name(&self) -> &str {
		&self.default_given_name
	}

	pub fn default_family_name(&self) -> &str {
		&self.default_family_name
	}

	pub fn jit_provisioning_enabled(&self) -> bool {
		self.jit_provisioning_enabled
	}

	pub fn tenant_domain(&self) -> &str {
		&self.tenant_domain
	}

	pub fn identity_provider(&self) -> &str {
		&self.identity_provider
	}
}

fn parse_required_attributes(raw: Option<&str>) -> BTreeSet<String> {
	raw
		.map(|raw| {
			raw
				.split(',')
				.map(str::trim)
				.filter(|s| !s.is_empty())
				.map(str::to_string)
				.collect()
		})
		.unwrap_or_default()
}

fn resolve_user_id_claim(properties: &BTreeMap<String, String>) -> String {
	if let Some(claim) = properties.get(keys::USER_ID_CLAIM) {
		return claim.clone();
	}

	if let Some(claim) = properties.get(keys::LEGACY_PRIMARY_EMAIL_ATTRIBUTE) {
		warn!(
			legacy = keys::LEGACY_PRIMARY_EMAIL_ATTRIBUTE,
			replacement = keys::USER_ID_CLAIM,
			"legacy primary email attribute property is deprecated"
		);
		return claim.clone();
	}

	DEFAULT_USER_ID_CLAIM.to_string()
}

fn parse_flag(raw: Option<&str>) -> bool {
	raw
		.map(str::trim)
		.map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
		.unwrap_or(false)
}
