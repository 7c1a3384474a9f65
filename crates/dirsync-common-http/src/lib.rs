// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client construction for directory connectors.
//!
//! Every outbound directory request carries a `User-Agent` naming the
//! application configured on the connector, so requests can be told apart in
//! the directory's audit log.

mod client;

pub use client::{builder, user_agent};
