// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Connector property files.
//!
//! ```toml
//! [properties]
//! google_prov_domain_name = "example.com"
//! google_prov_pattern = "{UN, TD}"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct PropertiesFile {
	#[serde(default)]
	properties: BTreeMap<String, String>,
}

/// Reads the `[properties]` table of a TOML file.
pub fn load(path: &Path) -> Result<BTreeMap<String, String>> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("failed to read properties from {}", path.display()))?;
	let file: PropertiesFile = toml::from_str(&content)
		.with_context(|| format!("failed to parse properties in {}", path.display()))?;
	debug!(path = %path.display(), count = file.properties.len(), "loaded connector properties");
	Ok(file.properties)
}

/// Parses one `KEY=VALUE` override. The value may contain `=`.
pub fn parse_override(raw: &str) -> Result<(String, String)> {
	let Some((key, value)) = raw.split_once('=') else {
		bail!("invalid override {raw:?}: expected KEY=VALUE");
	};
	let key = key.trim();
	if key.is_empty() {
		bail!("invalid override {raw:?}: empty key");
	}
	Ok((key.to_string(), value.to_string()))
}

/// Properties from an optional file with overrides applied in order.
pub fn resolve(path: Option<&Path>, overrides: &[String]) -> Result<BTreeMap<String, String>> {
	let mut properties = match path {
		Some(path) => load(path)?,
		None => BTreeMap::new(),
	};
	for raw in overrides {
		let (key, value) = parse_override(raw)?;
		properties.insert(key, value);
	}
	Ok(properties)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	fn write_file(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[test]
	fn loads_properties_table() {
		let file = write_file(
			r#"
[properties]
google_prov_domain_name = "example.com"
google_prov_pattern = "{UN, TD}"
jitProvisioningEnabled = "1"
"#,
		);
		let properties = load(file.path()).unwrap();
		assert_eq!(properties.len(), 3);
		assert_eq!(properties["google_prov_pattern"], "{UN, TD}");
	}

	#[test]
	fn missing_table_is_empty() {
		let file = write_file("# nothing configured\n");
		assert!(load(file.path()).unwrap().is_empty());
	}

	#[test]
	fn non_string_values_are_rejected() {
		let file = write_file("[properties]\njitProvisioningEnabled = 1\n");
		assert!(load(file.path()).is_err());
	}

	#[test]
	fn missing_file_names_the_path() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("absent.toml");
		let err = load(&path).unwrap_err();
		assert!(format!("{err:#}").contains("absent.toml"));
	}

	#[test]
	fn overrides_replace_file_values() {
		let file = write_file("[properties]\ngoogle_prov_separator = \"_\"\n");
		let properties = resolve(
			Some(file.path()),
			&[
				"google_prov_separator=.".to_string(),
				"google_prov_required_fields=a,b=c".to_string(),
			],
		)
		.unwrap();
		assert_eq!(properties["google_prov_separator"], ".");
		assert_eq!(properties["google_prov_required_fields"], "a,b=c");
	}

	#[test]
	fn malformed_override_is_rejected() {
		assert!(parse_override("no-equals").is_err());
		assert!(parse_override("=value").is_err());
		assert_eq!(
			parse_override("key=").unwrap(),
			("key".to_string(), String::new())
		);
	}
}
