// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use dirsync_connector_config::ConnectorConfig;
use dirsync_provisioning::{Connector, ConfigurationError};
use tracing::{info, warn};

use crate::client::{GoogleDirectoryClient, DEFAULT_BASE_URL};
use crate::credentials::{AccessTokenSource, ServiceAccountTokenSource, UnconfiguredTokenSource};

/// Name the provisioning framework registers this connector under.
pub const CONNECTOR_TYPE: &str = "googleapps";

pub type GoogleConnector = Connector<GoogleDirectoryClient>;

/// Builds Google connectors from property bags.
#[derive(Clone)]
pub struct GoogleConnectorFactory {
	base_url: String,
	tokens: Option<Arc<dyn AccessTokenSource>>,
}

impl std::fmt::Debug for GoogleConnectorFactory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GoogleConnectorFactory")
			.field("base_url", &self.base_url)
			.field("token_source_override", &self.tokens.is_some())
			.finish()
	}
}

impl Default for GoogleConnectorFactory {
	fn default() -> Self {
		Self::new()
	}
}

impl GoogleConnectorFactory {
	pub fn new() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			tokens: None,
		}
	}

	/// Sends directory requests to `base_url` instead of the Google endpoint.
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Uses `tokens` for every connector instead of the configured key.
	pub fn with_token_source(mut self, tokens: Arc<dyn AccessTokenSource>) -> Self {
		self.tokens = Some(tokens);
		self
	}

	pub fn connector_type(&self) -> &'static str {
		CONNECTOR_TYPE
	}

	/// Resolves the properties and initializes a connector.
	///
	/// Fails when the configured key material cannot be decoded. A missing
	/// key is not an error here; directory calls fail with an authentication
	/// error instead.
	pub fn build_connector<I, K, V>(&self, properties: I) -> Result<GoogleConnector, ConfigurationError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let config = ConnectorConfig::build(properties);

		let tokens: Arc<dyn AccessTokenSource> = match &self.tokens {
			Some(tokens) => tokens.clone(),
			None => match ServiceAccountTokenSource::from_config(&config)? {
				Some(source) => Arc::new(source),
				None => {
					warn!("no service account private key configured; directory calls will fail");
					Arc::new(UnconfiguredTokenSource)
				}
			},
		};

		let client = GoogleDirectoryClient::new(&self.base_url, config.application_name(), tokens)?;

		info!(
			connector_type = CONNECTOR_TYPE,
			domain = %config.domain_name(),
			admin = %config.admin_email(),
			jit_enabled = config.jit_provisioning_enabled(),
			"initialized directory connector"
		);

		Ok(Connector::new(config, client))
	}
}

/// Initializes a Google connector against the production endpoint.
pub fn init<I, K, V>(properties: I) -> Result<GoogleConnector, ConfigurationError>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<String>,
	V: Into<String>,
{
	GoogleConnectorFactory::new().build_connector(properties)
}
