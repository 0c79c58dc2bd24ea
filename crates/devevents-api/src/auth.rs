//! Bearer authentication: the request extractor and the auth endpoints.
//!
//! Protected handlers take an [`Authenticated`] argument. Extraction reads
//! `Authorization: Bearer <token>` and asks the [`TokenService`] to validate
//! it; any failure short-circuits the request with a 401 before the handler
//! body (or the request body) is touched.
//!
//! [`TokenService`]: devevents_auth::TokenService

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequestParts, State};
use axum::http::header;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use validator::Validate;

use crate::error::ApiError;
use crate::handlers::json_body;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// The caller behind a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    /// Token subject.
    pub subject: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl FromRequestParts<Arc<AppState>> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            debug!("Missing or malformed Authorization header");
            ApiError::Unauthenticated
        })?;

        let claims = state.tokens.validate(token)?;
        let expires_at = claims.expires_at().ok_or(ApiError::Unauthenticated)?;

        Ok(Self {
            subject: claims.sub,
            expires_at,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

// ---------------------------------------------------------------------------
// POST /api/auth/login
// ---------------------------------------------------------------------------

/// Body of the login request.
#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LoginRequest {
    /// Identity to embed in the token.
    #[validate(length(min = 1))]
    pub subject: String,
}

/// A freshly issued bearer token.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LoginResponse {
    /// Compact signed token.
    pub token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Issue a token for the given subject.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let request = json_body(payload)?;
    request
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let issued = state.tokens.issue(&request.subject)?;
    info!(subject = %issued.subject, expires_at = %issued.expires_at, "Issued token");

    Ok(Json(LoginResponse {
        token: issued.token,
        token_type: BEARER_PREFIX.trim_end().to_owned(),
        expires_at: issued.expires_at,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/auth/logged
// ---------------------------------------------------------------------------

/// Confirmation that the presented token is valid.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct LoggedResponse {
    /// Token subject.
    pub subject: String,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
}

/// Echo the caller's identity back.
pub async fn logged(auth: Authenticated) -> Json<LoggedResponse> {
    Json(LoggedResponse {
        subject: auth.subject,
        expires_at: auth.expires_at,
    })
}
