// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use dirsync_connector_config::ConnectorConfig;
use tracing::debug;

use crate::entity::ProvisioningEntity;
use crate::error::RemoteOperationError;
use crate::identifier::IdentifierBuilder;
use crate::password::generate_password;
use crate::remote::{RemoteUser, RemoteUserName};

/// Maps provisioning entities onto directory user records.
///
/// Create reads names from the *local* half of each claim mapping; update
/// reads the *remote* half. The two paths are intentionally kept apart.
#[derive(Debug, Clone, Copy)]
pub struct RemoteUserMapper<'a> {
	config: &'a ConnectorConfig,
}

impl<'a> RemoteUserMapper<'a> {
	pub fn new(config: &'a ConnectorConfig) -> Self {
		Self { config }
	}

	/// Record for a new account: address, names and a fresh password.
	///
	/// Fails only when no account name can be derived for the entity.
	pub fn build_remote_user(
		&self,
		entity: &ProvisioningEntity,
	) -> Result<RemoteUser, RemoteOperationError> {
		let primary_email = self.primary_email(entity)?;
		let username = entity.username();

		let given_name = entity
			.attributes
			.first_local_value(self.config.given_name_claim())
			.unwrap_or(username)
			.to_string();
		let family_name = entity
			.attributes
			.first_local_value(self.config.family_name_claim())
			.unwrap_or(username)
			.to_string();

		debug!(
			entity = %entity.entity_name,
			primary_email = %primary_email,
			"mapped entity to new directory user"
		);

		Ok(RemoteUser {
			primary_email: Some(primary_email),
			name: Some(RemoteUserName {
				given_name,
				family_name,
			}),
			password: Some(generate_password()),
			custom_schemas: None,
		})
	}

	/// Record for an existing account, or `None` when the entity carries no
	/// attributes and there is nothing to change.
	pub fn build_updated_remote_user(&self, entity: &ProvisioningEntity) -> Option<RemoteUser> {
		if entity.attributes.is_empty() {
			return None;
		}

		let given_name = entity
			.attributes
			.first_remote_value(self.config.given_name_claim())
			.unwrap_or(self.config.default_given_name())
			.to_string();
		let family_name = entity
			.attributes
			.first_remote_value(self.config.family_name_claim())
			.unwrap_or(self.config.default_family_name())
			.to_string();

		Some(RemoteUser {
			name: Some(RemoteUserName {
				given_name,
				family_name,
			}),
			..Default::default()
		})
	}

	/// Address of the account to create.
	///
	/// The local-part is the identifier pattern's output when it is non-empty,
	/// else the bare entity name. Whitespace is stripped, and the configured
	/// domain is appended unless the local-part already holds an address.
	pub fn primary_email(&self, entity: &ProvisioningEntity) -> Result<String, RemoteOperationError> {
		let (user_domain, bare_name) = entity.split_entity_name();

		let builder = IdentifierBuilder::from_config(self.config);
		let from_pattern = if builder.has_pattern() {
			builder.build_user_id(user_domain, entity.username(), self.config.tenant_domain())
		} else {
			String::new()
		};

		let local_part: String = if from_pattern.is_empty() {
			bare_name
		} else {
			from_pattern.as_str()
		}
		.chars()
		.filter(|c| !c.is_whitespace())
		.collect();

		if local_part.is_empty() {
			return Err(RemoteOperationError::EmptyUserId {
				entity: entity.entity_name.clone(),
			});
		}

		let domain = self.config.domain_name();
		if domain.is_empty() || local_part.contains('@') {
			Ok(local_part)
		} else {
			Ok(format!("{local_part}@{domain}"))
		}
	}
}
