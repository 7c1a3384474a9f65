// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Claim the framework uses to carry the bare username of an entity.
pub const USERNAME_CLAIM_URI: &str = "org:wso2:carbon:identity:provisioning:claim:username";

/// User-store domain assumed for entity names without a `DOMAIN/` prefix.
pub const PRIMARY_USER_STORE_DOMAIN: &str = "PRIMARY";

/// Kind of entity a provisioning event describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
	User,
	Group,
}

impl fmt::Display for EntityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::User => write!(f, "USER"),
			Self::Group => write!(f, "GROUP"),
		}
	}
}

/// Lifecycle operation requested by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProvisioningOperation {
	/// Create.
	Post,
	/// Replace.
	Put,
	Patch,
	Delete,
}

impl fmt::Display for ProvisioningOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Post => write!(f, "POST"),
			Self::Put => write!(f, "PUT"),
			Self::Patch => write!(f, "PATCH"),
			Self::Delete => write!(f, "DELETE"),
		}
	}
}

/// Pairing of the framework's local claim with the remote claim it maps to.
///
/// Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClaimMapping {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub local_claim: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub remote_claim: Option<String>,
}

impl ClaimMapping {
	pub fn local(uri: impl Into<String>) -> Self {
		Self {
			local_claim: Some(uri.into()),
			remote_claim: None,
		}
	}

	pub fn remote(uri: impl Into<String>) -> Self {
		Self {
			local_claim: None,
			remote_claim: Some(uri.into()),
		}
	}

	pub fn new(local: impl Into<String>, remote: impl Into<String>) -> Self {
		Self {
			local_claim: Some(local.into()),
			remote_claim: Some(remote.into()),
		}
	}
}

/// One claim and its values, as written in entity JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimAttribute {
	#[serde(flatten)]
	pub mapping: ClaimMapping,
	#[serde(default)]
	pub values: Vec<String>,
}

/// Claim-to-values attribute set of an entity. Keys are unique; order is not
/// significant. Claims are multi-valued but connectors read the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ClaimAttribute>", into = "Vec<ClaimAttribute>")]
pub struct ClaimAttributes {
	entries: HashMap<ClaimMapping, Vec<String>>,
}

impl ClaimAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds or replaces the values for a claim mapping.
	pub fn insert(&mut self, mapping: ClaimMapping, values: Vec<String>) {
		self.entries.insert(mapping, values);
	}

	pub fn with(mut self, mapping: ClaimMapping, values: Vec<String>) -> Self {
		self.insert(mapping, values);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&ClaimMapping, &[String])> {
		self.entries.iter().map(|(k, v)| (k, v.as_slice()))
	}

	/// First value of the entry whose local claim is `uri`.
	pub fn first_local_value(&self, uri: &str) -> Option<&str> {
		self.first_value_by(uri, |m| m.local_claim.as_deref())
	}

	/// First value of the entry whose remote claim is `uri`.
	pub fn first_remote_value(&self, uri: &str) -> Option<&str> {
		self.first_value_by(uri, |m| m.remote_claim.as_deref())
	}

	fn first_value_by<F>(&self, uri: &str, side: F) -> Option<&str>
	where
		F: Fn(&ClaimMapping) -> Option<&str>,
	{
		if uri.is_empty() {
			return None;
		}
		self
			.entries
			.iter()
			.find(|(mapping, _)| side(mapping) == Some(uri))
			.and_then(|(_, values)| values.first())
			.map(String::as_str)
	}
}

impl From<Vec<ClaimAttribute>> for ClaimAttributes {
	fn from(attributes: Vec<ClaimAttribute>) -> Self {
		Self {
			entries: attributes
				.into_iter()
				.map(|a| (a.mapping, a.values))
				.collect(),
		}
	}
}

impl From<ClaimAttributes> for Vec<ClaimAttribute> {
	fn from(attributes: ClaimAttributes) -> Self {
		attributes
			.entries
			.into_iter()
			.map(|(mapping, values)| ClaimAttribute { mapping, values })
			.collect()
	}
}

/// Identifier the remote directory assigned to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedIdentifier {
	pub identifier: String,
}

impl ProvisionedIdentifier {
	pub fn new(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
		}
	}
}

impl fmt::Display for ProvisionedIdentifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.identifier)
	}
}

/// One user or group lifecycle event from the upstream framework.
///
/// Built and owned by the framework; connectors only read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningEntity {
	pub entity_type: EntityType,
	pub operation: ProvisioningOperation,
	/// Local name, optionally qualified as `DOMAIN/name`.
	#[serde(default)]
	pub entity_name: String,
	#[serde(default)]
	pub attributes: ClaimAttributes,
	/// Identifier assigned by an earlier create.
	#[serde(default)]
	pub identifier: Option<ProvisionedIdentifier>,
	/// Set when the event comes from just-in-time provisioning.
	#[serde(default)]
	pub jit_provisioning: bool,
}

impl ProvisioningEntity {
	pub fn new(entity_type: EntityType, operation: ProvisioningOperation) -> Self {
		Self {
			entity_type,
			operation,
			entity_name: String::new(),
			attributes: ClaimAttributes::default(),
			identifier: None,
			jit_provisioning: false,
		}
	}

	pub fn with_entity_name(mut self, name: impl Into<String>) -> Self {
		self.entity_name = name.into();
		self
	}

	pub fn with_attributes(mut self, attributes: ClaimAttributes) -> Self {
		self.attributes = attributes;
		self
	}

	pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
		self.identifier = Some(ProvisionedIdentifier::new(identifier));
		self
	}

	pub fn with_jit_provisioning(mut self, jit: bool) -> Self {
		self.jit_provisioning = jit;
		self
	}

	/// Previously assigned identifier, ignoring blank values.
	pub fn assigned_identifier(&self) -> Option<&str> {
		self
			.identifier
			.as_ref()
			.map(|id| id.identifier.as_str())
			.filter(|id| !id.trim().is_empty())
	}

	/// User-store domain and bare name of [`Self::entity_name`].
	///
	/// `SALES/alice` yields `("SALES", "alice")`; `alice` yields
	/// `("PRIMARY", "alice")`.
	pub fn split_entity_name(&self) -> (&str, &str) {
		match self.entity_name.split_once('/') {
			Some((domain, name)) if !domain.is_empty() => (domain, name),
			_ => (PRIMARY_USER_STORE_DOMAIN, self.entity_name.as_str()),
		}
	}

	/// Username carried by the framework's username claim, falling back to
	/// the bare entity name.
	pub fn username(&self) -> &str {
		self
			.attributes
			.first_local_value(USERNAME_CLAIM_URI)
			.filter(|v| !v.trim().is_empty())
			.unwrap_or_else(|| self.split_entity_name().1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_deserializes_from_json() {
		let json = r#"{
			"entity_type": "USER",
			"operation": "POST",
			"entity_name": "SALES/alice",
			"attributes": [
				{"local_claim": "http://wso2.org/claims/givenname", "values": ["Alice"]},
				{"remote_claim": "givenName", "values": ["Ally", "Al"]}
			],
			"jit_provisioning": true
		}"#;

		let entity: ProvisioningEntity = serde_json::from_str(json).unwrap();
		assert_eq!(entity.entity_type, EntityType::User);
		assert_eq!(entity.operation, ProvisioningOperation::Post);
		assert!(entity.jit_provisioning);
		assert!(entity.identifier.is_none());
		assert_eq!(entity.attributes.len(), 2);
		assert_eq!(
			entity
				.attributes
				.first_local_value("http://wso2.org/claims/givenname"),
			Some("Alice")
		);
		assert_eq!(entity.attributes.first_remote_value("givenName"), Some("Ally"));
	}

	#[test]
	fn local_and_remote_lookups_do_not_cross() {
		let attributes = ClaimAttributes::new()
			.with(ClaimMapping::local("claim:a"), vec!["local".to_string()])
			.with(ClaimMapping::remote("claim:b"), vec!["remote".to_string()]);

		assert_eq!(attributes.first_local_value("claim:a"), Some("local"));
		assert_eq!(attributes.first_remote_value("claim:a"), None);
		assert_eq!(attributes.first_remote_value("claim:b"), Some("remote"));
		assert_eq!(attributes.first_local_value("claim:b"), None);
	}

	#[test]
	fn empty_claim_uri_never_matches() {
		let attributes = ClaimAttributes::new().with(
			ClaimMapping::new("", ""),
			vec!["value".to_string()],
		);
		assert_eq!(attributes.first_local_value(""), None);
		assert_eq!(attributes.first_remote_value(""), None);
	}

	#[test]
	fn claim_without_values_has_no_first_value() {
		let attributes = ClaimAttributes::new().with(ClaimMapping::local("claim:a"), vec![]);
		assert_eq!(attributes.first_local_value("claim:a"), None);
	}

	#[test]
	fn split_entity_name_handles_qualified_and_bare_names() {
		let qualified = ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Post)
			.with_entity_name("SALES/alice");
		assert_eq!(qualified.split_entity_name(), ("SALES", "alice"));

		let bare = ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Post)
			.with_entity_name("alice");
		assert_eq!(bare.split_entity_name(), (PRIMARY_USER_STORE_DOMAIN, "alice"));
	}

	#[test]
	fn username_prefers_username_claim() {
		let entity = ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Post)
			.with_entity_name("entityname")
			.with_attributes(ClaimAttributes::new().with(
				ClaimMapping::local(USERNAME_CLAIM_URI),
				vec!["testuser".to_string()],
			));
		assert_eq!(entity.username(), "testuser");

		let without_claim =
			ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Post)
				.with_entity_name("PRIMARY/entityname");
		assert_eq!(without_claim.username(), "entityname");
	}

	#[test]
	fn blank_identifier_is_not_assigned() {
		let entity = ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Delete)
			.with_identifier("  ");
		assert_eq!(entity.assigned_identifier(), None);

		let entity = entity.with_identifier("alice@example.com");
		assert_eq!(entity.assigned_identifier(), Some("alice@example.com"));
	}

	#[test]
	fn attributes_serialize_as_list() {
		let attributes = ClaimAttributes::new().with(
			ClaimMapping::local("claim:a"),
			vec!["1".to_string()],
		);
		let json = serde_json::to_value(&attributes).unwrap();
		assert_eq!(json[0]["local_claim"], "claim:a");
		assert_eq!(json[0]["values"][0], "1");
		assert!(json[0].get("remote_claim").is_none());
	}
}
