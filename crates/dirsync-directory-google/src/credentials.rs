// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access tokens for the Directory API.
//!
//! The service-account key arrives through connector properties, either as
//! the JSON key file content or its base64 encoding. It is decoded and held in
//! memory only; every connector instance owns its own token source.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use dirsync_common_secret::{SecretBytes, SecretString};
use dirsync_connector_config::ConnectorConfig;
use dirsync_provisioning::{ConfigurationError, DirectoryError};
use gcp_auth::{CustomServiceAccount, TokenProvider};
use serde::Deserialize;
use tracing::{debug, error, warn};

/// OAuth scope for Directory API user management.
pub const DIRECTORY_USER_SCOPE: &str = "https://www.googleapis.com/auth/admin.directory.user";

/// Supplies bearer tokens for directory requests.
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
	async fn access_token(&self) -> Result<SecretString, DirectoryError>;
}

/// Fields of a service-account key checked before handing it to the token
/// provider.
#[derive(Deserialize)]
struct ServiceAccountKeyFields {
	#[serde(rename = "type", default)]
	key_type: Option<String>,
	#[serde(default)]
	client_email: String,
	#[serde(default)]
	private_key: Option<SecretString>,
}

/// Decodes the private-key property into service-account key JSON.
///
/// Raw JSON is accepted as is; anything else must be base64 encoded JSON.
pub fn decode_service_account_key(raw: &SecretString) -> Result<SecretString, ConfigurationError> {
	let trimmed = raw.expose().trim();
	let json = if trimmed.starts_with('{') {
		SecretString::new(trimmed.to_string())
	} else {
		let compact = SecretString::new(trimmed.split_whitespace().collect());
		let bytes = base64::engine::general_purpose::STANDARD
			.decode(compact.expose())
			.map(SecretBytes::new)
			.map_err(|e| ConfigurationError::InvalidPrivateKey(format!("not JSON or base64: {e}")))?;
		bytes.to_secret_string().ok_or_else(|| {
			ConfigurationError::InvalidPrivateKey("decoded key is not UTF-8".to_string())
		})?
	};

	let fields: ServiceAccountKeyFields = serde_json::from_str(json.expose())
		.map_err(|e| ConfigurationError::InvalidServiceAccountKey(e.to_string()))?;

	if let Some(key_type) = fields.key_type.as_deref() {
		if key_type != "service_account" {
			return Err(ConfigurationError::InvalidServiceAccountKey(format!(
				"unexpected key type {key_type:?}"
			)));
		}
	}
	if fields.client_email.trim().is_empty() {
		return Err(ConfigurationError::InvalidServiceAccountKey(
			"missing client_email".to_string(),
		));
	}
	if fields
		.private_key
		.as_ref()
		.map_or(true, |k| k.expose().trim().is_empty())
	{
		return Err(ConfigurationError::InvalidServiceAccountKey(
			"missing private_key".to_string(),
		));
	}

	Ok(json)
}

/// Tokens minted from a service-account key, delegated to the directory
/// administrator.
pub struct ServiceAccountTokenSource {
	provider: Arc<CustomServiceAccount>,
	client_email: String,
}

impl std::fmt::Debug for ServiceAccountTokenSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ServiceAccountTokenSource")
			.field("client_email", &self.client_email)
			.finish_non_exhaustive()
	}
}

impl ServiceAccountTokenSource {
	/// Builds a token source from encoded key material. `subject` is the
	/// administrator the service account acts for; blank means none.
	pub fn from_key(raw: &SecretString, subject: &str) -> Result<Self, ConfigurationError> {
		let json = decode_service_account_key(raw)?;

		let mut provider = CustomServiceAccount::from_json(json.expose())
			.map_err(|e| ConfigurationError::Credentials(e.to_string()))?;
		let subject = subject.trim();
		if !subject.is_empty() {
			provider = provider.with_subject(subject.to_string());
		}

		let client_email = serde_json::from_str::<ServiceAccountKeyFields>(json.expose())
			.map(|fields| fields.client_email)
			.unwrap_or_default();

		debug!(client_email = %client_email, delegated = !subject.is_empty(), "loaded service account key");

		Ok(Self {
			provider: Arc::new(provider),
			client_email,
		})
	}

	/// Reads the key and administrator from connector configuration.
	///
	/// Returns `Ok(None)` when no key is configured.
	pub fn from_config(config: &ConnectorConfig) -> Result<Option<Self>, ConfigurationError> {
		let Some(raw) = config.private_key() else {
			return Ok(None);
		};
		let source = Self::from_key(raw, config.admin_email())?;

		let expected = config.service_account_email().trim();
		if !expected.is_empty() && !expected.eq_ignore_ascii_case(&source.client_email) {
			warn!(
				configured = %expected,
				key = %source.client_email,
				"service account email does not match the private key"
			);
		}

		Ok(Some(source))
	}

	pub fn client_email(&self) -> &str {
		&self.client_email
	}
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
	async fn access_token(&self) -> Result<SecretString, DirectoryError> {
		let token = self
			.provider
			.token(&[DIRECTORY_USER_SCOPE])
			.await
			.map_err(|e| {
				error!(error = %e, client_email = %self.client_email, "failed to obtain access token");
				DirectoryError::Authentication(e.to_string())
			})?;
		Ok(SecretString::new(token.as_str().to_string()))
	}
}

/// A fixed bearer token, e.g. one minted out of band.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
	token: SecretString,
}

impl StaticTokenSource {
	pub fn new(token: SecretString) -> Self {
		Self { token }
	}
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
	async fn access_token(&self) -> Result<SecretString, DirectoryError> {
		Ok(self.token.clone())
	}
}

/// Used when no key is configured. Every request fails with an
/// authentication error.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredTokenSource;

#[async_trait]
impl AccessTokenSource for UnconfiguredTokenSource {
	async fn access_token(&self) -> Result<SecretString, DirectoryError> {
		Err(DirectoryError::Authentication(
			"no service account private key configured".to_string(),
		))
	}
}
