// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dirsync_provisioning::{ConfigurationError, DirectoryClient, DirectoryError, RemoteUser};
use reqwest::{Client, Method, Response};
use tracing::{debug, error, instrument};
use url::Url;

use crate::credentials::AccessTokenSource;
use crate::wire::{ErrorResponse, UserRequest, UserResponse};

/// Production Directory API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://admin.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USERS_PATH: [&str; 4] = ["admin", "directory", "v1", "users"];

/// [`DirectoryClient`] over the Admin SDK Directory API.
///
/// One HTTP request per call, no retries. Users are addressed by primary
/// email or immutable id (`userKey`).
#[derive(Clone)]
pub struct GoogleDirectoryClient {
	http_client: Client,
	base_url: Url,
	tokens: Arc<dyn AccessTokenSource>,
}

impl std::fmt::Debug for GoogleDirectoryClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("GoogleDirectoryClient")
			.field("base_url", &self.base_url.as_str())
			.finish_non_exhaustive()
	}
}

impl GoogleDirectoryClient {
	pub fn new(
		base_url: &str,
		application_name: &str,
		tokens: Arc<dyn AccessTokenSource>,
	) -> Result<Self, ConfigurationError> {
		let base_url = Url::parse(base_url)
			.map_err(|e| ConfigurationError::Client(format!("invalid base URL {base_url:?}: {e}")))?;
		if base_url.cannot_be_a_base() {
			return Err(ConfigurationError::Client(format!(
				"base URL {base_url} cannot carry a path"
			)));
		}

		let http_client = dirsync_common_http::builder(application_name)
			.timeout(REQUEST_TIMEOUT)
			.build()
			.map_err(|e| ConfigurationError::Client(format!("failed to create HTTP client: {e}")))?;

		Ok(Self {
			http_client,
			base_url,
			tokens,
		})
	}

	fn users_url(&self, user_key: Option<&str>) -> Result<Url, DirectoryError> {
		// Dot segments would be dropped and address the collection instead.
		if let Some(key @ ("" | "." | "..")) = user_key {
			return Err(DirectoryError::Transport(format!("invalid user key {key:?}")));
		}

		let mut url = self.base_url.clone();
		{
			let mut segments = url
				.path_segments_mut()
				.map_err(|_| DirectoryError::Transport(format!("invalid base URL {}", self.base_url)))?;
			segments.pop_if_empty().extend(USERS_PATH);
			if let Some(key) = user_key {
				segments.push(key);
			}
		}
		Ok(url)
	}

	async fn send(
		&self,
		method: Method,
		url: Url,
		body: Option<&RemoteUser>,
	) -> Result<Response, DirectoryError> {
		let token = self.tokens.access_token().await?;

		debug!(method = %method, url = %url, "sending directory request");
		let mut request = self
			.http_client
			.request(method, url)
			.bearer_auth(token.expose());
		if let Some(user) = body {
			request = request.json(&UserRequest::from(user));
		}

		let response = request.send().await.map_err(|e| {
			error!(error = %e, "directory request failed");
			DirectoryError::Transport(e.to_string())
		})?;

		let status = response.status();
		debug!(status = %status, "received directory response");
		if status.is_success() {
			return Ok(response);
		}

		let body = response.text().await.unwrap_or_default();
		let message = serde_json::from_str::<ErrorResponse>(&body)
			.map(|e| e.error.message)
			.ok()
			.filter(|m| !m.is_empty())
			.or_else(|| status.canonical_reason().map(str::to_string))
			.unwrap_or_else(|| body.clone());
		error!(status = %status, message = %message, "directory API error");

		Err(DirectoryError::Api {
			status: status.as_u16(),
			message,
		})
	}

	async fn read_user(response: Response) -> Result<RemoteUser, DirectoryError> {
		let body = response
			.text()
			.await
			.map_err(|e| DirectoryError::Transport(e.to_string()))?;
		serde_json::from_str::<UserResponse>(&body)
			.map(RemoteUser::from)
			.map_err(|e| {
				error!(error = %e, "failed to parse directory user");
				DirectoryError::Decode(e.to_string())
			})
	}
}

#[async_trait]
impl DirectoryClient for GoogleDirectoryClient {
	#[instrument(skip(self, user), fields(primary_email = user.primary_email.as_deref().unwrap_or_default()))]
	async fn insert(&self, user: &RemoteUser) -> Result<RemoteUser, DirectoryError> {
		let url = self.users_url(None)?;
		let response = self.send(Method::POST, url, Some(user)).await?;
		Self::read_user(response).await
	}

	#[instrument(skip(self, user))]
	async fn update(&self, identifier: &str, user: &RemoteUser) -> Result<RemoteUser, DirectoryError> {
		let url = self.users_url(Some(identifier))?;
		let response = self.send(Method::PUT, url, Some(user)).await?;
		Self::read_user(response).await
	}

	#[instrument(skip(self))]
	async fn delete(&self, identifier: &str) -> Result<(), DirectoryError> {
		let url = self.users_url(Some(identifier))?;
		self.send(Method::DELETE, url, None).await?;
		Ok(())
	}
}
