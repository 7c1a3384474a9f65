// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use async_trait::async_trait;

use crate::remote::RemoteUser;

const NOT_FOUND: u16 = 404;

/// Failure reported by a [`DirectoryClient`].
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
	/// The directory answered with an error status.
	#[error("directory API error {status}: {message}")]
	Api { status: u16, message: String },

	/// The request never produced a response (network, TLS, timeout).
	#[error("directory request failed: {0}")]
	Transport(String),

	/// No access token could be obtained for the request.
	#[error("directory authentication failed: {0}")]
	Authentication(String),

	/// The directory answered successfully but the body was unusable.
	#[error("unexpected directory response: {0}")]
	Decode(String),
}

impl DirectoryError {
	/// HTTP status of the directory's answer, if there was one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub fn is_not_found(&self) -> bool {
		self.status() == Some(NOT_FOUND)
	}
}

/// User CRUD surface of a remote directory.
///
/// Implementations issue exactly one request per call and do not retry.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
	/// Creates a user and returns the record as stored by the directory.
	async fn insert(&self, user: &RemoteUser) -> Result<RemoteUser, DirectoryError>;

	/// Replaces the mutable fields of the user addressed by `identifier`.
	async fn update(&self, identifier: &str, user: &RemoteUser)
		-> Result<RemoteUser, DirectoryError>;

	async fn delete(&self, identifier: &str) -> Result<(), DirectoryError>;
}

#[async_trait]
impl<T> DirectoryClient for Arc<T>
where
	T: DirectoryClient + ?Sized,
{
	async fn insert(&self, user: &RemoteUser) -> Result<RemoteUser, DirectoryError> {
		(**self).insert(user).await
	}

	async fn update(
		&self,
		identifier: &str,
		user: &RemoteUser,
	) -> Result<RemoteUser, DirectoryError> {
		(**self).update(identifier, user).await
	}

	async fn delete(&self, identifier: &str) -> Result<(), DirectoryError> {
		(**self).delete(identifier).await
	}
}

/// Classified result of a directory delete.
///
/// Delete is the one operation where a failure can mean success: a user the
/// directory no longer knows is already deleted.
#[derive(Debug)]
pub enum DeleteOutcome {
	Deleted,
	NotFoundTolerated,
	Failed(DirectoryError),
}

impl DeleteOutcome {
	pub fn classify(result: Result<(), DirectoryError>) -> Self {
		match result {
			Ok(()) => Self::Deleted,
			Err(e) if e.is_not_found() => Self::NotFoundTolerated,
			Err(e) => Self::Failed(e),
		}
	}

	/// Collapses the outcome, keeping only hard failures as errors.
	pub fn into_result(self) -> Result<(), DirectoryError> {
		match self {
			Self::Deleted | Self::NotFoundTolerated => Ok(()),
			Self::Failed(e) => Err(e),
		}
	}
}
