// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Google connector against a mock Directory API.

use std::sync::Arc;

use dirsync_common_secret::SecretString;
use dirsync_connector_config::keys;
use dirsync_directory_google::{
	GoogleConnector, GoogleConnectorFactory, StaticTokenSource,
};
use dirsync_provisioning::{
	ClaimAttributes, ClaimMapping, DirectoryError, EntityType, ProvisioningEntity,
	ProvisioningOperation,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERS: &str = "/admin/directory/v1/users";
const GIVEN: &str = "http://wso2.org/claims/givenname";
const FAMILY: &str = "http://wso2.org/claims/lastname";

fn connector(server: &MockServer) -> GoogleConnector {
	GoogleConnectorFactory::new()
		.with_base_url(server.uri())
		.with_token_source(Arc::new(StaticTokenSource::new(SecretString::new(
			"ya29.test".to_string(),
		))))
		.build_connector([
			(keys::DOMAIN_NAME, "example.com"),
			(keys::GIVEN_NAME_CLAIM, GIVEN),
			(keys::FAMILY_NAME_CLAIM, FAMILY),
			(keys::DEFAULT_GIVEN_NAME, "Unknown"),
			(keys::DEFAULT_FAMILY_NAME, "User"),
			(keys::APPLICATION_NAME, "acme-provisioner"),
		])
		.unwrap()
}

fn alice(operation: ProvisioningOperation) -> ProvisioningEntity {
	ProvisioningEntity::new(EntityType::User, operation)
		.with_entity_name("alice")
		.with_attributes(
			ClaimAttributes::new()
				.with(ClaimMapping::local(GIVEN), vec!["Alice".into()])
				.with(ClaimMapping::local(FAMILY), vec!["Liddell".into()]),
		)
}

fn api_error(code: u16, message: &str) -> ResponseTemplate {
	ResponseTemplate::new(code).set_body_json(json!({
		"error": {"code": code, "message": message, "errors": []}
	}))
}

#[tokio::test]
async fn create_posts_user_and_returns_assigned_address() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(USERS))
		.and(header("authorization", "Bearer ya29.test"))
		.and(body_partial_json(json!({
			"primaryEmail": "alice@example.com",
			"name": {"givenName": "Alice", "familyName": "Liddell"}
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"kind": "admin#directory#user",
			"id": "104563892749",
			"primaryEmail": "alice.liddell@example.com",
			"name": {"givenName": "Alice", "familyName": "Liddell"}
		})))
		.expect(1)
		.mount(&server)
		.await;

	let id = connector(&server)
		.provision(Some(&alice(ProvisioningOperation::Post)))
		.await
		.unwrap()
		.unwrap();
	assert_eq!(id.identifier, "alice.liddell@example.com");
}

#[tokio::test]
async fn create_sends_generated_password_and_user_agent() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(USERS))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"primaryEmail": "alice@example.com"
		})))
		.mount(&server)
		.await;

	connector(&server)
		.create_user(&alice(ProvisioningOperation::Post))
		.await
		.unwrap();

	let requests = server.received_requests().await.unwrap();
	assert_eq!(requests.len(), 1);
	let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
	let password = body["password"].as_str().unwrap();
	assert_eq!(password.len(), 16);
	assert_ne!(password, "[REDACTED]");

	let user_agent = requests[0]
		.headers
		.get("user-agent")
		.and_then(|v| v.to_str().ok())
		.unwrap();
	assert!(user_agent.starts_with("acme-provisioner/dirsync/"));
}

#[tokio::test]
async fn create_conflict_is_surfaced_with_status() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(USERS))
		.respond_with(api_error(409, "Entity already exists."))
		.mount(&server)
		.await;

	let err = connector(&server)
		.provision(Some(&alice(ProvisioningOperation::Post)))
		.await
		.unwrap_err();
	let directory = err
		.as_remote_operation()
		.and_then(|e| e.directory_error())
		.unwrap();
	assert_eq!(directory.status(), Some(409));
	assert!(directory.to_string().contains("Entity already exists."));
}

#[tokio::test]
async fn create_with_unreadable_body_is_a_decode_error() {
	let server = MockServer::start().await;
	Mock::given(method("POST"))
		.and(path(USERS))
		.respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
		.mount(&server)
		.await;

	let err = connector(&server)
		.create_user(&alice(ProvisioningOperation::Post))
		.await
		.unwrap_err();
	assert!(matches!(
		err.as_remote_operation().and_then(|e| e.directory_error()),
		Some(DirectoryError::Decode(_))
	));
}

#[tokio::test]
async fn update_puts_names_to_user_key() {
	let server = MockServer::start().await;
	Mock::given(method("PUT"))
		.and(path(format!("{USERS}/alice@example.com")))
		.and(body_partial_json(json!({
			"name": {"givenName": "Alicia", "familyName": "User"}
		})))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({
			"primaryEmail": "alice@example.com"
		})))
		.expect(1)
		.mount(&server)
		.await;

	let entity = ProvisioningEntity::new(EntityType::User, ProvisioningOperation::Put)
		.with_entity_name("alice")
		.with_identifier("alice@example.com")
		.with_attributes(
			ClaimAttributes::new().with(ClaimMapping::remote(GIVEN), vec!["Alicia".into()]),
		);

	let id = connector(&server).provision(Some(&entity)).await.unwrap();
	assert!(id.is_none());

	let requests = server.received_requests().await.unwrap();
	let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
	assert!(body.get("password").is_none());
	assert!(body.get("primaryEmail").is_none());
}

#[tokio::test]
async fn delete_removes_user() {
	let server = MockServer::start().await;
	Mock::given(method("DELETE"))
		.and(path(format!("{USERS}/alice@example.com")))
		.respond_with(ResponseTemplate::new(204))
		.expect(1)
		.mount(&server)
		.await;

	let entity = alice(ProvisioningOperation::Delete).with_identifier("alice@example.com");
	assert!(connector(&server)
		.provision(Some(&entity))
		.await
		.unwrap()
		.is_none());
}

#[tokio::test]
async fn repeated_delete_tolerates_not_found() {
	let server = MockServer::start().await;
	Mock::given(method("DELETE"))
		.and(path(format!("{USERS}/alice@example.com")))
		.respond_with(ResponseTemplate::new(204))
		.up_to_n_times(1)
		.mount(&server)
		.await;
	Mock::given(method("DELETE"))
		.and(path(format!("{USERS}/alice@example.com")))
		.respond_with(api_error(404, "Resource Not Found: userKey"))
		.mount(&server)
		.await;

	let connector = connector(&server);
	let entity = alice(ProvisioningOperation::Delete).with_identifier("alice@example.com");
	connector.delete_user(&entity).await.unwrap();
	connector.delete_user(&entity).await.unwrap();
	assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn delete_forbidden_is_an_error() {
	let server = MockServer::start().await;
	Mock::given(method("DELETE"))
		.respond_with(api_error(403, "Not Authorized to access this resource/api"))
		.mount(&server)
		.await;

	let entity = alice(ProvisioningOperation::Delete).with_identifier("alice@example.com");
	let err = connector(&server).provision(Some(&entity)).await.unwrap_err();
	assert!(!err.is_precondition());
}

#[tokio::test]
async fn missing_identifier_never_reaches_the_api() {
	let server = MockServer::start().await;
	let connector = connector(&server);

	for operation in [ProvisioningOperation::Put, ProvisioningOperation::Delete] {
		let err = connector
			.provision(Some(&alice(operation)))
			.await
			.unwrap_err();
		assert!(err.is_precondition());
	}
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn group_events_never_reach_the_api() {
	let server = MockServer::start().await;
	let entity = ProvisioningEntity::new(EntityType::Group, ProvisioningOperation::Post)
		.with_entity_name("admins");

	assert!(connector(&server)
		.provision(Some(&entity))
		.await
		.unwrap()
		.is_none());
	assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_key_fails_with_authentication_error() {
	let server = MockServer::start().await;
	let connector = GoogleConnectorFactory::new()
		.with_base_url(server.uri())
		.build_connector([(keys::DOMAIN_NAME, "example.com")])
		.unwrap();

	let err = connector
		.provision(Some(&alice(ProvisioningOperation::Post)))
		.await
		.unwrap_err();
	assert!(matches!(
		err.as_remote_operation().and_then(|e| e.directory_error()),
		Some(DirectoryError::Authentication(_))
	));
	assert!(server.received_requests().await.unwrap().is_empty());
}
