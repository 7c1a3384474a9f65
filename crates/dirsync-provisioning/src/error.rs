// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fmt;

use crate::directory::DirectoryError;

/// Directory write a connector performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOperation {
	Create,
	Update,
	Delete,
}

impl fmt::Display for RemoteOperation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Create => write!(f, "create"),
			Self::Update => write!(f, "update"),
			Self::Delete => write!(f, "delete"),
		}
	}
}

/// Errors raised while initializing a connector.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
	/// The private-key property is neither JSON nor base64 encoded JSON.
	#[error("invalid private key material: {0}")]
	InvalidPrivateKey(String),

	/// The key decoded but is not a usable service-account key.
	#[error("invalid service account key: {0}")]
	InvalidServiceAccountKey(String),

	#[error("failed to initialize directory credentials: {0}")]
	Credentials(String),

	#[error("failed to build directory client: {0}")]
	Client(String),
}

/// Errors raised by create, update and delete.
#[derive(Debug, thiserror::Error)]
pub enum RemoteOperationError {
	/// Update or delete of an entity that was never assigned an identifier.
	/// Raised before any directory call.
	#[error("cannot {operation} user {entity:?}: no provisioned identifier")]
	MissingIdentifier {
		operation: RemoteOperation,
		entity: String,
	},

	/// Neither the identifier pattern nor the entity name produced an account
	/// name. Raised before any directory call.
	#[error("cannot derive a directory user id for entity {entity:?}")]
	EmptyUserId { entity: String },

	/// The directory call itself failed.
	#[error("failed to {operation} directory user {identifier:?}: {source}")]
	Directory {
		operation: RemoteOperation,
		identifier: String,
		#[source]
		source: DirectoryError,
	},
}

impl RemoteOperationError {
	/// True for failures detected before contacting the directory.
	pub fn is_precondition(&self) -> bool {
		matches!(
			self,
			Self::MissingIdentifier { .. } | Self::EmptyUserId { .. }
		)
	}

	/// The underlying directory failure, if the directory was contacted.
	pub fn directory_error(&self) -> Option<&DirectoryError> {
		match self {
			Self::Directory { source, .. } => Some(source),
			_ => None,
		}
	}
}

/// Errors surfaced to the provisioning framework.
#[derive(Debug, thiserror::Error)]
pub enum ProvisioningError {
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	#[error(transparent)]
	RemoteOperation(#[from] RemoteOperationError),
}

impl ProvisioningError {
	pub fn as_remote_operation(&self) -> Option<&RemoteOperationError> {
		match self {
			Self::RemoteOperation(e) => Some(e),
			Self::Configuration(_) => None,
		}
	}

	pub fn is_precondition(&self) -> bool {
		self
			.as_remote_operation()
			.is_some_and(RemoteOperationError::is_precondition)
	}
}
