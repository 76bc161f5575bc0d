// SPDX-FileCopyrightText: 2026 Keyrack Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the credential vault API.
//!
//! Request bodies deserialize with optional fields so that missing-field
//! validation happens in the service layer (and surfaces as a 400, not an
//! extractor rejection). Internal failure detail goes to the log; clients
//! get a generic 500 body.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use keyrack_core::{KeyrackError, UserProfile};
use keyrack_service::{DecryptedSecret, SecretUpdateFields};

use crate::server::GatewayState;

/// Request body for POST /register/user.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response body for POST /register/user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: String,
}

/// Request body for POST /login/user.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response body for POST /login/user.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub profile: UserProfile,
}

/// Request body for POST /user/password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSecretRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Login identity for the site, not the account email.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response body for POST /user/password.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSecretResponse {
    pub message: String,
    pub password_id: String,
}

/// Response body for GET /user/password/{id}.
#[derive(Debug, Serialize)]
pub struct ListSecretsResponse {
    pub message: String,
    pub count: usize,
    pub data: Vec<DecryptedSecret>,
}

/// Request body for PUT /user/password/{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateSecretRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response body for PUT /user/password/{id}.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecretResponse {
    pub message: String,
    pub modified_count: usize,
}

/// Response body for DELETE /user/password/{id}.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSecretResponse {
    pub message: String,
    pub deleted_count: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /register/user
pub async fn register_user(
    State(state): State<GatewayState>,
    Json(body): Json<RegisterRequest>,
) -> Response {
    match state.service.register_account(body.email, body.password).await {
        Ok(user_id) => (
            StatusCode::CREATED,
            Json(RegisterResponse {
                message: "user registered".to_string(),
                user_id,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /login/user
pub async fn login_user(
    State(state): State<GatewayState>,
    Json(body): Json<LoginRequest>,
) -> Response {
    match state.service.authenticate(body.email, body.password).await {
        Ok(profile) => (
            StatusCode::OK,
            Json(LoginResponse {
                message: "login successful".to_string(),
                profile,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /user/password
pub async fn add_secret(
    State(state): State<GatewayState>,
    Json(body): Json<AddSecretRequest>,
) -> Response {
    match state
        .service
        .add_secret(body.user_id, body.site, body.email, body.password, body.description)
        .await
    {
        Ok(password_id) => (
            StatusCode::CREATED,
            Json(AddSecretResponse {
                message: "password stored".to_string(),
                password_id,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /user/password/{id} (id = owner)
pub async fn list_secrets(
    State(state): State<GatewayState>,
    Path(user_id): Path<String>,
) -> Response {
    match state.service.list_secrets(&user_id).await {
        Ok(data) => (
            StatusCode::OK,
            Json(ListSecretsResponse {
                message: "passwords retrieved".to_string(),
                count: data.len(),
                data,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /user/password/{id} (id = record)
pub async fn update_secret(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateSecretRequest>,
) -> Response {
    let fields = SecretUpdateFields {
        site: body.site,
        login_email: body.email,
        secret: body.password,
        description: body.description,
    };
    match state.service.update_secret(&id, fields).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(UpdateSecretResponse {
                message: "password updated".to_string(),
                modified_count: outcome.modified,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /user/password/{id} (id = record)
pub async fn delete_secret(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    match state.service.delete_secret(&id).await {
        Ok(deleted_count) => (
            StatusCode::OK,
            Json(DeleteSecretResponse {
                message: "password deleted".to_string(),
                deleted_count,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Map a service error to its contractual status code.
///
/// Client-fixable errors echo their message; everything else becomes a
/// uniform 500 with the detail logged only.
fn error_response(err: KeyrackError) -> Response {
    let (status, message) = match &err {
        KeyrackError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
        KeyrackError::Conflict(m) => (StatusCode::BAD_REQUEST, m.clone()),
        KeyrackError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
        KeyrackError::Authentication(m) => (StatusCode::UNAUTHORIZED, m.clone()),
        _ => {
            tracing::error!(error = %err, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_contract_status_codes() {
        let cases = [
            (KeyrackError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (KeyrackError::Conflict("x".into()), StatusCode::BAD_REQUEST),
            (KeyrackError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                KeyrackError::Authentication("x".into()),
                StatusCode::UNAUTHORIZED,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(error_response(err).status(), expected);
        }
    }

    #[test]
    fn internal_errors_are_uniform_500s() {
        for err in [
            KeyrackError::Internal("rng".into()),
            KeyrackError::MalformedRecord("bad triple".into()),
            KeyrackError::Config("bad key".into()),
            KeyrackError::Storage {
                source: Box::new(std::io::Error::other("disk")),
            },
        ] {
            let response = error_response(err);
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn request_bodies_tolerate_missing_fields() {
        // Missing fields must reach the service as None, not fail extraction.
        let body: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(body.email.is_none());
        assert!(body.password.is_none());

        let body: AddSecretRequest = serde_json::from_str(r#"{"userId":"u1"}"#).unwrap();
        assert_eq!(body.user_id.as_deref(), Some("u1"));
        assert!(body.site.is_none());
    }
}
