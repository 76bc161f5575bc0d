// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use keyrack_core::KeyrackError;
use keyrack_service::CredentialService;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The credential service all handlers delegate to.
    pub service: Arc<CredentialService>,
}

/// Gateway server configuration (mirrors the `[server]` config section).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
///
/// Routes (status codes are part of the API contract):
/// - POST   /register/user        register an account
/// - POST   /login/user           authenticate
/// - POST   /user/password        add a vault secret
/// - GET    /user/password/{id}   list an owner's secrets (id = owner)
/// - PUT    /user/password/{id}   update a secret (id = record)
/// - DELETE /user/password/{id}   delete a secret (id = record)
///
/// CORS is permissive: the API fronts a browser client.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/register/user", post(handlers::register_user))
        .route("/login/user", post(handlers::login_user))
        .route("/user/password", post(handlers::add_secret))
        .route(
            "/user/password/{id}",
            get(handlers::list_secrets)
                .put(handlers::update_secret)
                .delete(handlers::delete_secret),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until a shutdown signal arrives.
///
/// The caller still owns the database handle and closes it after this
/// returns, so the store connection is released before process exit.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), KeyrackError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| KeyrackError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| KeyrackError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install shutdown signal handler");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
        assert!(debug.contains("5000"));
    }
}
