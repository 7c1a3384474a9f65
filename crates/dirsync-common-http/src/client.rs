// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

use reqwest::{Client, ClientBuilder};

const PRODUCT: &str = "dirsync";

/// Creates a client builder whose `User-Agent` names the configured
/// application.
///
/// Timeouts and connection pooling are left to the caller.
///
/// # Example
/// ```ignore
/// let client = dirsync_common_http::builder("acme-provisioner")
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder(application_name: &str) -> ClientBuilder {
	Client::builder().user_agent(user_agent(application_name))
}

/// Returns the `User-Agent` string for an application.
///
/// Format: `{application}/dirsync/{version}`, or `dirsync/{version}` when no
/// application name is configured.
pub fn user_agent(application_name: &str) -> String {
	let application_name = application_name.trim();
	let version = env!("CARGO_PKG_VERSION");
	if application_name.is_empty() {
		format!("{PRODUCT}/{version}")
	} else {
		format!("{application_name}/{PRODUCT}/{version}")
	}
}
