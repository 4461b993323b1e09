// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Message returned to clients for every rejected credential.
///
/// The specific failure is only recorded in server-side logs.
pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed";

/// Authentication error type.
///
/// Covers both halves of the flow: verifying a signed login event and
/// validating the session token presented on later requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Declared event id does not match the hash of the event content
    #[error("Event id does not match its content")]
    IntegrityError,
    /// Event signature does not verify against the declared public key
    #[error("Event signature is invalid")]
    InvalidSignature,
    /// Event is older than the freshness window
    #[error("Event has expired ({age_secs}s old)")]
    EventExpired { age_secs: i64 },
    /// Event timestamp is too far ahead of server time
    #[error("Event is from the future ({skew_secs}s ahead)")]
    EventFromFuture { skew_secs: i64 },
    /// No bearer credential on the request
    #[error("Bearer credential is required")]
    MissingCredential,
    /// Token failed to decode or its signature does not match
    #[error("Session token is invalid")]
    TokenTampered,
    /// Token is past its expiry
    #[error("Session token has expired")]
    TokenExpired,
    /// Token is authentic but its claims are unusable
    #[error("Session token claims are malformed")]
    MalformedClaims,
    /// Event could not be canonically serialized
    #[error("Event could not be encoded: {0}")]
    EncodingError(String),
    /// Session signing key is missing or unusable
    #[error("Session signing key is unavailable")]
    SigningKeyUnavailable,
}

impl AuthError {
    /// Get the error code for this error.
    ///
    /// Used in structured log entries; never sent to clients.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::IntegrityError => "integrity_error",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::EventExpired { .. } => "event_expired",
            AuthError::EventFromFuture { .. } => "event_from_future",
            AuthError::MissingCredential => "missing_credential",
            AuthError::TokenTampered => "token_tampered",
            AuthError::TokenExpired => "token_expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::EncodingError(_) => "encoding_error",
            AuthError::SigningKeyUnavailable => "signing_key_unavailable",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::SigningKeyUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn rejections_do_not_reveal_the_failed_check() {
        for err in [
            AuthError::InvalidSignature,
            AuthError::EventExpired { age_secs: 301 },
            AuthError::TokenExpired,
            AuthError::MissingCredential,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            assert_eq!(body["error"], AUTH_FAILED_MESSAGE);
            assert_eq!(body["error_code"], "unauthorized");
        }
    }

    #[tokio::test]
    async fn signing_key_unavailable_returns_500() {
        let response = AuthError::SigningKeyUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_codes_are_distinct_for_logging() {
        assert_eq!(AuthError::IntegrityError.error_code(), "integrity_error");
        assert_eq!(
            AuthError::EventFromFuture { skew_secs: 61 }.error_code(),
            "event_from_future"
        );
        assert_eq!(AuthError::MalformedClaims.error_code(), "malformed_claims");
    }
}
