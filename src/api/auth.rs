// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication endpoints.
//!
//! `POST /auth/login` exchanges a signed Nostr event for a session token.
//! `GET /auth/profile` and `POST /auth/verify` sit behind the session guard.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::{SignedEvent, Session},
    error::ApiError,
    state::AppState,
};

/// Message returned by the profile endpoint.
pub const PROFILE_MESSAGE: &str = "Authentication successful";

/// Response after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer session token
    pub access_token: String,
    /// Authenticated public key (hex)
    pub pubkey: String,
    /// Same key in NIP-19 `npub` form, when it could be encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npub: Option<String>,
}

/// Identity of the session holder.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionUser {
    pub pubkey: String,
    pub sub: String,
}

/// Response for GET /auth/profile
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: SessionUser,
    /// Server time (unix seconds)
    pub timestamp: i64,
}

/// Response for POST /auth/verify
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
    pub pubkey: String,
}

/// Reject events with empty required fields before they reach verification.
fn check_required_fields(event: &SignedEvent) -> Result<(), ApiError> {
    for (name, value) in [
        ("id", &event.id),
        ("pubkey", &event.pubkey),
        ("content", &event.content),
        ("sig", &event.sig),
    ] {
        if value.is_empty() {
            return Err(ApiError::empty_field(name));
        }
    }
    Ok(())
}

/// Log in with a signed Nostr event.
///
/// The event acts as the credential: its signature proves control of
/// `pubkey`, and it must have been created within the freshness window.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = SignedEvent,
    responses(
        (status = 200, description = "User authenticated successfully", body = LoginResponse),
        (status = 400, description = "Invalid Nostr event structure"),
        (status = 401, description = "Invalid signature or authentication failed")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<SignedEvent>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError> {
    let Json(event) = payload?;
    check_required_fields(&event)?;

    let outcome = state.auth.login(&event, Utc::now().timestamp())?;

    Ok(Json(LoginResponse {
        access_token: outcome.session.access_token,
        pubkey: outcome.identity.pubkey,
        npub: outcome.npub,
    }))
}

/// Get the profile of the session holder.
#[utoipa::path(
    get,
    path = "/auth/profile",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile retrieved successfully", body = ProfileResponse),
        (status = 401, description = "Unauthorized - invalid or missing token")
    )
)]
pub async fn profile(Session(identity): Session) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: PROFILE_MESSAGE.to_string(),
        user: SessionUser {
            sub: identity.pubkey.clone(),
            pubkey: identity.pubkey,
        },
        timestamp: Utc::now().timestamp(),
    })
}

/// Check that the presented session token is valid.
#[utoipa::path(
    post,
    path = "/auth/verify",
    tag = "Auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Token is invalid or expired")
    )
)]
pub async fn verify(Session(identity): Session) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        pubkey: identity.pubkey,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::testing::{signed_event, TEST_SECRET};

    #[test]
    fn empty_required_fields_are_bad_requests() {
        let event = signed_event(&TEST_SECRET, 1_700_000_000, "Auth request");
        assert!(check_required_fields(&event).is_ok());

        for field in ["id", "pubkey", "content", "sig"] {
            let mut broken = event.clone();
            match field {
                "id" => broken.id.clear(),
                "pubkey" => broken.pubkey.clear(),
                "content" => broken.content.clear(),
                _ => broken.sig.clear(),
            }
            let err = check_required_fields(&broken).unwrap_err();
            assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
            assert_eq!(err.message, format!("{field} should not be empty"));
        }
    }

    #[test]
    fn login_response_omits_missing_npub() {
        let response = LoginResponse {
            access_token: "t".to_string(),
            pubkey: "p".to_string(),
            npub: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("npub").is_none());
    }
}
