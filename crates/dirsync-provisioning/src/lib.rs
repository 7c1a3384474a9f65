// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound user provisioning into an external directory.
//!
//! A [`Connector`] receives one [`ProvisioningEntity`] at a time from the
//! upstream identity framework and decides whether and how to mirror it into
//! the remote directory:
//!
//! - [`IdentifierBuilder`] derives the directory account local-part from the
//!   configured identifier pattern
//! - [`RemoteUserMapper`] turns the entity's claims into a [`RemoteUser`]
//! - the [`DirectoryClient`] trait is the only contact with the remote service
//!
//! The connector holds no mutable state. Each call is a function of the
//! configuration and a single entity, and issues at most one directory request.

mod connector;
mod directory;
mod entity;
mod error;
mod identifier;
mod mapper;
mod password;
mod remote;

pub use connector::{Connector, Dispatch, SkipReason};
pub use directory::{DeleteOutcome, DirectoryClient, DirectoryError};
pub use entity::{
	ClaimAttribute, ClaimAttributes, ClaimMapping, EntityType, ProvisionedIdentifier,
	ProvisioningEntity, ProvisioningOperation, PRIMARY_USER_STORE_DOMAIN, USERNAME_CLAIM_URI,
};
pub use error::{ConfigurationError, ProvisioningError, RemoteOperation, RemoteOperationError};
pub use identifier::IdentifierBuilder;
pub use mapper::RemoteUserMapper;
pub use password::{generate_password, PASSWORD_LENGTH};
pub use remote::{RemoteUser, RemoteUserName};

/// Result type for connector operations.
pub type Result<T> = std::result::Result<T, ProvisioningError>;
