// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Keyrack credential vault.
//!
//! Maps the JSON API onto [`keyrack_service::CredentialService`] use cases.
//! This layer owns status-code mapping and nothing else: validation,
//! uniqueness, and the crypto boundary all live below it.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
