// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Property names understood by [`ConnectorConfig`](crate::ConnectorConfig).

/// Directory domain new accounts are created under, e.g. `example.com`.
pub const DOMAIN_NAME: &str = "google_prov_domain_name";
/// Claim holding the primary email address.
pub const EMAIL_CLAIM: &str = "google_prov_email_claim_dropdown";
/// Claim holding the given name.
pub const GIVEN_NAME_CLAIM: &str = "google_prov_givenname_claim_dropdown";
/// Claim holding the family name.
pub const FAMILY_NAME_CLAIM: &str = "google_prov_familyname_claim_dropdown";
pub const SERVICE_ACCOUNT_EMAIL: &str = "google_prov_service_acc_email";
/// Service-account key, raw JSON or base64 encoded.
pub const PRIVATE_KEY: &str = "google_prov_private_key";
/// Administrator impersonated by the service account.
pub const ADMIN_EMAIL: &str = "google_prov_admin_email";
pub const APPLICATION_NAME: &str = "google_prov_application_name";
/// Identifier pattern, e.g. `{UD, UN, TD, IDP}`.
pub const PROVISIONING_PATTERN: &str = "google_prov_pattern";
pub const PROVISIONING_SEPARATOR: &str = "google_prov_separator";
/// Comma separated attribute names the connector needs from the framework.
pub const REQUIRED_FIELDS: &str = "google_prov_required_fields";
/// Given name used on update when no given-name claim is supplied.
pub const DEFAULT_GIVEN_NAME: &str = "google_prov_givenname";
/// Family name used on update when no family-name claim is supplied.
pub const DEFAULT_FAMILY_NAME: &str = "google_prov_familyname";
pub const USER_ID_CLAIM: &str = "UserIdClaimURI";
/// Superseded by [`USER_ID_CLAIM`].
pub const LEGACY_PRIMARY_EMAIL_ATTRIBUTE: &str = "google_prov_primary_email_attribute";
pub const JIT_PROVISIONING_ENABLED: &str = "jitProvisioningEnabled";
/// Value of the `TD` pattern token.
pub const TENANT_DOMAIN: &str = "google_prov_tenant_domain";
/// Value of the `IDP` pattern token.
pub const IDENTITY_PROVIDER_NAME: &str = "google_prov_idp_name";

/// Properties that are never exposed through
/// [`ConnectorConfig::value`](crate::ConnectorConfig::value).
pub(crate) const SENSITIVE: &[&str] = &[PRIVATE_KEY];
