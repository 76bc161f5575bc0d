// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `keyrack serve` command implementation.
//!
//! Wires the cipher, the store, and the service together and runs the
//! gateway until a shutdown signal arrives. Construction order matters:
//! the master key is validated before the database is touched, and the
//! store connection is released after the server stops.

use std::sync::Arc;

use keyrack_config::KeyrackConfig;
use keyrack_core::KeyrackError;
use keyrack_gateway::{GatewayState, ServerConfig, start_server};
use keyrack_service::CredentialService;
use keyrack_storage::Database;
use keyrack_vault::SecretCipher;
use tracing::info;

/// Runs the `keyrack serve` command.
pub async fn run_serve(config: KeyrackConfig) -> Result<(), KeyrackError> {
    init_tracing(&config.server.log_level);

    info!("starting keyrack serve");

    // The single process-wide symmetric key, loaded once. Refusing to start
    // without it beats serving a vault that cannot decrypt anything.
    let key_hex = config.vault.master_key.as_deref().ok_or_else(|| {
        KeyrackError::Config(
            "vault.master_key must be set (keyrack.toml or KEYRACK_VAULT_MASTER_KEY)".to_string(),
        )
    })?;
    let cipher = SecretCipher::from_hex(key_hex)?;

    let db = Database::open(&config.storage.database_path).await?;
    let service = Arc::new(CredentialService::new(db.clone(), cipher));

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let result = start_server(&server_config, GatewayState { service }).await;

    // Release the store connection before exiting, whatever the server's
    // fate was.
    db.close().await?;
    info!("keyrack stopped");

    result
}

fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
