// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google Workspace directory connector.
//!
//! Provisions users through the Admin SDK Directory API
//! (`/admin/directory/v1/users`). Requests are authorized with a
//! service-account key held in memory and delegated to the configured
//! administrator.
//!
//! # Example
//!
//! ```no_run
//! use dirsync_directory_google::GoogleConnectorFactory;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = GoogleConnectorFactory::new().build_connector([
//! 	("google_prov_domain_name", "example.com"),
//! 	("google_prov_admin_email", "admin@example.com"),
//! 	("google_prov_service_acc_email", "provisioner@example.iam.gserviceaccount.com"),
//! ])?;
//! let _ = connector.provision(None).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod credentials;
mod factory;
mod wire;

pub use client::{GoogleDirectoryClient, DEFAULT_BASE_URL};
pub use credentials::{
	decode_service_account_key, AccessTokenSource, ServiceAccountTokenSource, StaticTokenSource,
	UnconfiguredTokenSource, DIRECTORY_USER_SCOPE,
};
pub use factory::{init, GoogleConnector, GoogleConnectorFactory, CONNECTOR_TYPE};
