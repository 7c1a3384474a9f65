// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! dirsync - drive a directory provisioning connector from the shell.
//!
//! Loads connector properties from a TOML file, reads a provisioning entity
//! as JSON and either previews the directory record it maps to or provisions
//! it.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dirsync_common_secret::SecretString;
use dirsync_directory_google::{GoogleConnector, GoogleConnectorFactory, StaticTokenSource};
use dirsync_provisioning::{Dispatch, ProvisioningEntity};
use serde_json::json;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod properties;

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum LogFormat {
	#[default]
	Pretty,
	Compact,
	Json,
}

/// dirsync - outbound directory provisioning
#[derive(Parser, Debug)]
#[command(name = "dirsync", version, about, long_about = None)]
struct Args {
	/// TOML file with a [properties] table of connector properties
	#[arg(short, long, env = "DIRSYNC_CONFIG")]
	config: Option<PathBuf>,

	/// Property override (repeatable: --set KEY=VALUE)
	#[arg(long = "set", value_name = "KEY=VALUE")]
	overrides: Vec<String>,

	/// Directory API base URL
	#[arg(long, env = "DIRSYNC_BASE_URL")]
	base_url: Option<String>,

	/// Bearer token to use instead of the configured service-account key
	#[arg(long, env = "DIRSYNC_ACCESS_TOKEN", hide_env_values = true)]
	access_token: Option<String>,

	/// Log output format
	#[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
	log_format: LogFormat,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show the resolved connector configuration
	Config,
	/// Show what provisioning an entity would do, without calling the directory
	Preview {
		/// Entity JSON file, or - for stdin
		entity: PathBuf,
	},
	/// Provision an entity and print the resulting identifier
	Provision {
		/// Entity JSON file, or - for stdin
		entity: PathBuf,
	},
}

fn init_tracing(format: LogFormat) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	let writer = std::io::stderr;

	match format {
		LogFormat::Json => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().json().with_writer(writer))
				.init();
		}
		LogFormat::Compact => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().compact().with_writer(writer))
				.init();
		}
		LogFormat::Pretty => {
			tracing_subscriber::registry()
				.with(filter)
				.with(fmt::layer().with_writer(writer))
				.init();
		}
	}
}

fn read_entity(path: &Path) -> Result<ProvisioningEntity> {
	let content = if path == Path::new("-") {
		let mut buf = String::new();
		std::io::stdin()
			.read_to_string(&mut buf)
			.context("failed to read entity from stdin")?;
		buf
	} else {
		std::fs::read_to_string(path)
			.with_context(|| format!("failed to read entity from {}", path.display()))?
	};
	serde_json::from_str(&content).context("failed to parse provisioning entity")
}

fn build_connector(args: &Args) -> Result<GoogleConnector> {
	let properties = properties::resolve(args.config.as_deref(), &args.overrides)?;

	let mut factory = GoogleConnectorFactory::new();
	if let Some(base_url) = &args.base_url {
		factory = factory.with_base_url(base_url.clone());
	}
	if let Some(token) = &args.access_token {
		factory = factory.with_token_source(Arc::new(StaticTokenSource::new(SecretString::new(
			token.clone(),
		))));
	}

	factory
		.build_connector(properties)
		.context("failed to initialize connector")
}

fn print_json(value: &serde_json::Value) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn show_config(connector: &GoogleConnector) -> Result<()> {
	let config = connector.config();
	print_json(&json!({
		"connector_type": dirsync_directory_google::CONNECTOR_TYPE,
		"domain_name": config.domain_name(),
		"admin_email": config.admin_email(),
		"service_account_email": config.service_account_email(),
		"has_private_key": config.private_key().is_some(),
		"application_name": config.application_name(),
		"id_pattern": config.id_pattern().tokens().iter().map(ToString::to_string).collect::<Vec<_>>(),
		"separator": config.separator(),
		"user_id_claim": config.user_id_claim(),
		"email_claim": config.email_claim(),
		"given_name_claim": config.given_name_claim(),
		"family_name_claim": config.family_name_claim(),
		"required_attribute_names": config.required_attribute_names(),
		"jit_provisioning_enabled": config.jit_provisioning_enabled(),
		"claim_dialect_uri": connector.claim_dialect_uri(),
	}))
}

fn preview(connector: &GoogleConnector, entity: &ProvisioningEntity) -> Result<()> {
	let dispatch = Dispatch::decide(Some(entity), connector.config().jit_provisioning_enabled());
	let mapper = connector.mapper();

	let (action, user) = match dispatch {
		Dispatch::Skip(reason) => (format!("skip ({reason})"), None),
		Dispatch::Create => ("create".to_string(), Some(mapper.build_remote_user(entity)?)),
		Dispatch::Update => ("update".to_string(), mapper.build_updated_remote_user(entity)),
		Dispatch::Delete => ("delete".to_string(), None),
	};

	print_json(&json!({
		"action": action,
		"identifier": entity.assigned_identifier(),
		"user": user,
	}))
}

async fn provision(connector: &GoogleConnector, entity: &ProvisioningEntity) -> Result<()> {
	let identifier = connector
		.provision(Some(entity))
		.await
		.with_context(|| format!("failed to provision {:?}", entity.entity_name))?;

	info!(
		entity = %entity.entity_name,
		operation = %entity.operation,
		identifier = identifier.as_ref().map(|id| id.identifier.as_str()).unwrap_or_default(),
		"provisioning event handled"
	);
	print_json(&json!({ "identifier": identifier }))
}

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();
	init_tracing(args.log_format);

	let connector = build_connector(&args)?;

	match &args.command {
		Command::Config => show_config(&connector),
		Command::Preview { entity } => preview(&connector, &read_entity(entity)?),
		Command::Provision { entity } => provision(&connector, &read_entity(entity)?).await,
	}
}
