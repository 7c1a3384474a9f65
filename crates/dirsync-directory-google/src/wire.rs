// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin SDK Directory API payloads.

use std::collections::BTreeMap;

use dirsync_provisioning::{RemoteUser, RemoteUserName};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserRequest<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub primary_email: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<NameRequest<'a>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub custom_schemas: Option<&'a BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NameRequest<'a> {
	pub given_name: &'a str,
	pub family_name: &'a str,
}

impl<'a> From<&'a RemoteUser> for UserRequest<'a> {
	fn from(user: &'a RemoteUser) -> Self {
		Self {
			primary_email: user.primary_email.as_deref(),
			name: user.name.as_ref().map(|n| NameRequest {
				given_name: &n.given_name,
				family_name: &n.family_name,
			}),
			password: user.password.as_ref().map(|p| p.expose().as_str()),
			custom_schemas: user.custom_schemas.as_ref(),
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserResponse {
	#[serde(default)]
	pub primary_email: Option<String>,
	#[serde(default)]
	pub name: Option<NameResponse>,
	#[serde(default)]
	pub custom_schemas: Option<BTreeMap<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NameResponse {
	#[serde(default)]
	pub given_name: String,
	#[serde(default)]
	pub family_name: String,
}

impl From<UserResponse> for RemoteUser {
	fn from(user: UserResponse) -> Self {
		Self {
			primary_email: user.primary_email,
			name: user.name.map(|n| RemoteUserName {
				given_name: n.given_name,
				family_name: n.family_name,
			}),
			password: None,
			custom_schemas: user.custom_schemas,
		}
	}
}

/// `{"error": {"code": 404, "message": "..."}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
	pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
	#[serde(default)]
	pub message: String,
}
