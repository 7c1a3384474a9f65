// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use dirsync_connector_config::ConnectorConfig;
use tracing::{debug, info};

use crate::directory::{DeleteOutcome, DirectoryClient, DirectoryError};
use crate::entity::{EntityType, ProvisionedIdentifier, ProvisioningEntity, ProvisioningOperation};
use crate::error::{RemoteOperation, RemoteOperationError};
use crate::mapper::RemoteUserMapper;
use crate::Result;

/// Why an entity was not pushed to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
	NoEntity,
	JitProvisioningDisabled,
	NotAUser,
	UnsupportedOperation,
}

impl fmt::Display for SkipReason {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NoEntity => write!(f, "no entity"),
			Self::JitProvisioningDisabled => write!(f, "JIT provisioning disabled"),
			Self::NotAUser => write!(f, "not a user entity"),
			Self::UnsupportedOperation => write!(f, "unsupported operation"),
		}
	}
}

/// What [`Connector::provision`] does with an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
	Skip(SkipReason),
	Create,
	Update,
	Delete,
}

impl Dispatch {
	/// Pure decision for one event. Gating is checked in order: missing
	/// entity, JIT suppression, entity type, then operation.
	pub fn decide(entity: Option<&ProvisioningEntity>, jit_enabled: bool) -> Self {
		let Some(entity) = entity else {
			return Self::Skip(SkipReason::NoEntity);
		};
		if entity.jit_provisioning && !jit_enabled {
			return Self::Skip(SkipReason::JitProvisioningDisabled);
		}
		if entity.entity_type != EntityType::User {
			return Self::Skip(SkipReason::NotAUser);
		}
		match entity.operation {
			ProvisioningOperation::Delete => Self::Delete,
			ProvisioningOperation::Post => Self::Create,
			ProvisioningOperation::Put => Self::Update,
			ProvisioningOperation::Patch => Self::Skip(SkipReason::UnsupportedOperation),
		}
	}
}

/// Outbound provisioning connector for one directory.
///
/// Holds no mutable state; a single instance may serve concurrent calls as
/// long as `D` does.
pub struct Connector<D> {
	config: ConnectorConfig,
	directory: D,
}

impl<D> fmt::Debug for Connector<D> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Connector")
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}

impl<D: DirectoryClient> Connector<D> {
	pub fn new(config: ConnectorConfig, directory: D) -> Self {
		Self { config, directory }
	}

	pub fn config(&self) -> &ConnectorConfig {
		&self.config
	}

	pub fn directory(&self) -> &D {
		&self.directory
	}

	/// Entities use the local claim dialect directly.
	pub fn claim_dialect_uri(&self) -> Option<&str> {
		None
	}

	pub fn mapper(&self) -> RemoteUserMapper<'_> {
		RemoteUserMapper::new(&self.config)
	}

	/// Mirrors one provisioning event to the directory.
	///
	/// Only a create reports an identifier. Skipped events return `Ok(None)`;
	/// only precondition and directory failures are errors.
	pub async fn provision(
		&self,
		entity: Option<&ProvisioningEntity>,
	) -> Result<Option<ProvisionedIdentifier>> {
		let dispatch = Dispatch::decide(entity, self.config.jit_provisioning_enabled());

		let entity = match (dispatch, entity) {
			(Dispatch::Skip(reason), entity) => {
				debug!(
					entity = entity.map(|e| e.entity_name.as_str()).unwrap_or_default(),
					reason = %reason,
					"skipping provisioning event"
				);
				return Ok(None);
			}
			(_, Some(entity)) => entity,
			(_, None) => return Ok(None),
		};

		match dispatch {
			Dispatch::Create => {
				let identifier = self.create_user(entity).await?;
				Ok(Some(ProvisionedIdentifier::new(identifier)))
			}
			Dispatch::Update => {
				self.update_user(entity).await?;
				Ok(None)
			}
			Dispatch::Delete => {
				self.delete_user(entity).await?;
				Ok(None)
			}
			Dispatch::Skip(_) => Ok(None),
		}
	}

	/// Creates the directory account and returns the address the directory
	/// reports, which may differ from the one requested.
	#[tracing::instrument(skip(self, entity), fields(entity = %entity.entity_name))]
	pub async fn create_user(&self, entity: &ProvisioningEntity) -> Result<String> {
		let user = self.mapper().build_remote_user(entity)?;
		let requested = user.primary_email.clone().unwrap_or_default();

		let created = self
			.directory
			.insert(&user)
			.await
			.and_then(|created| {
				created.primary_email.ok_or_else(|| {
					DirectoryError::Decode("insert response has no primary email".to_string())
				})
			})
			.map_err(|source| RemoteOperationError::Directory {
				operation: RemoteOperation::Create,
				identifier: requested.clone(),
				source,
			})?;

		info!(requested = %requested, identifier = %created, "created directory user");
		Ok(created)
	}

	/// Updates the names of an already provisioned account. An entity with
	/// no attributes is a no-op.
	#[tracing::instrument(skip(self, entity), fields(entity = %entity.entity_name))]
	pub async fn update_user(&self, entity: &ProvisioningEntity) -> Result<()> {
		let identifier = require_identifier(entity, RemoteOperation::Update)?;

		let Some(user) = self.mapper().build_updated_remote_user(entity) else {
			debug!(identifier = %identifier, "no attributes to update");
			return Ok(());
		};

		self
			.directory
			.update(identifier, &user)
			.await
			.map_err(|source| RemoteOperationError::Directory {
				operation: RemoteOperation::Update,
				identifier: identifier.to_string(),
				source,
			})?;

		info!(identifier = %identifier, "updated directory user");
		Ok(())
	}

	/// Deletes a provisioned account. An account the directory no longer
	/// knows counts as deleted.
	#[tracing::instrument(skip(self, entity), fields(entity = %entity.entity_name))]
	pub async fn delete_user(&self, entity: &ProvisioningEntity) -> Result<()> {
		let identifier = require_identifier(entity, RemoteOperation::Delete)?;

		let outcome = DeleteOutcome::classify(self.directory.delete(identifier).await);
		match &outcome {
			DeleteOutcome::Deleted => info!(identifier = %identifier, "deleted directory user"),
			DeleteOutcome::NotFoundTolerated => {
				info!(identifier = %identifier, "directory user already absent")
			}
			DeleteOutcome::Failed(_) => {}
		}

		outcome
			.into_result()
			.map_err(|source| RemoteOperationError::Directory {
				operation: RemoteOperation::Delete,
				identifier: identifier.to_string(),
				source,
			})?;
		Ok(())
	}
}

fn require_identifier(
	entity: &ProvisioningEntity,
	operation: RemoteOperation,
) -> std::result::Result<&str, RemoteOperationError> {
	entity
		.assigned_identifier()
		.ok_or_else(|| RemoteOperationError::MissingIdentifier {
			operation,
			entity: entity.entity_name.clone(),
		})
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	fn any_operation() -> impl Strategy<Value = ProvisioningOperation> {
		prop_oneof![
			Just(ProvisioningOperation::Post),
			Just(ProvisioningOperation::Put),
			Just(ProvisioningOperation::Patch),
			Just(ProvisioningOperation::Delete),
		]
	}

	proptest! {
		#[test]
		fn groups_are_never_dispatched(operation in any_operation(), jit in any::<bool>(), enabled in any::<bool>()) {
			let e = ProvisioningEntity::new(EntityType::Group, operation).with_jit_provisioning(jit);
			prop_assert!(matches!(Dispatch::decide(Some(&e), enabled), Dispatch::Skip(_)));
		}

		#[test]
		fn suppressed_jit_is_never_dispatched(
			operation in any_operation(),
			is_user in any::<bool>(),
		) {
			let entity_type = if is_user { EntityType::User } else { EntityType::Group };
			let e = ProvisioningEntity::new(entity_type, operation).with_jit_provisioning(true);
			prop_assert_eq!(
				Dispatch::decide(Some(&e), false),
				Dispatch::Skip(SkipReason::JitProvisioningDisabled)
			);
		}
	}
}
