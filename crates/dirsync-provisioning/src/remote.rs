// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;

use dirsync_common_secret::SecretString;
use serde::Serialize;

/// Structured name of a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUserName {
	pub given_name: String,
	pub family_name: String,
}

/// Directory-side user record sent on create and update, and returned by the
/// directory after a write.
///
/// Fields left as `None` are not sent. Update records never carry an address
/// or password; the account is addressed by its assigned identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub primary_email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<RemoteUserName>,
	/// Serialized as `[REDACTED]`; transports must expose it explicitly.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub password: Option<SecretString>,
	/// Directory-defined custom fields, keyed by schema name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub custom_schemas: Option<BTreeMap<String, serde_json::Value>>,
}

impl RemoteUser {
	pub fn given_name(&self) -> Option<&str> {
		self.name.as_ref().map(|n| n.given_name.as_str())
	}

	pub fn family_name(&self) -> Option<&str> {
		self.name.as_ref().map(|n| n.family_name.as_str())
	}
}
