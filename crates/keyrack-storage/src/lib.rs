// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Keyrack credential vault.
//!
//! Provides WAL-mode SQLite with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, and typed CRUD operations for
//! user accounts and vault secret records. This layer performs no
//! encryption: the ciphertext/nonce/tag triple arrives and leaves as
//! opaque strings. Uniqueness is enforced here by unique indexes; the
//! service layer's probe-before-insert is only a fast path.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use models::{NewSecretRecord, SecretRecordPatch, UpdateOutcome};
