// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connector configuration for outbound directory provisioning.
//!
//! The provisioning framework hands every connector a flat bag of string
//! properties. [`ConnectorConfig::build`] resolves that bag once into typed
//! fields; nothing re-reads the bag afterwards.
//!
//! # Example
//!
//! ```
//! use dirsync_connector_config::{keys, ConnectorConfig, IdPatternToken};
//!
//! let config = ConnectorConfig::build([
//! 	(keys::DOMAIN_NAME, "example.com"),
//! 	(keys::PROVISIONING_PATTERN, "{UN, TD}"),
//! 	(keys::PROVISIONING_SEPARATOR, "_"),
//! ]);
//!
//! assert_eq!(config.domain_name(), "example.com");
//! assert_eq!(
//! 	config.id_pattern().tokens(),
//! 	&[IdPatternToken::Username, IdPatternToken::TenantDomain]
//! );
//! ```

mod config;
pub mod keys;
mod pattern;

pub use config::{ConnectorConfig, DEFAULT_USER_ID_CLAIM};
pub use pattern::{IdPattern, IdPatternToken};
