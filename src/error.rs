// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Errors rendered at the HTTP boundary.
//!
//! Handlers return [`ApiError`] and let `?` convert body rejections and
//! [`AuthError`]s into it. Authentication failures keep the generic body so
//! clients never learn which check failed.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::{AuthError, AUTH_FAILED_MESSAGE};

const AUTH_UNAVAILABLE_MESSAGE: &str = "Authentication is temporarily unavailable";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Coarse client-facing code, only set for authentication failures
    pub code: Option<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<&'static str>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// A required login event field was present but empty.
    pub fn empty_field(name: &str) -> Self {
        Self::bad_request(format!("{name} should not be empty"))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = err.status_code();
        let (message, code) = if status == StatusCode::UNAUTHORIZED {
            (AUTH_FAILED_MESSAGE, "unauthorized")
        } else {
            (AUTH_UNAVAILABLE_MESSAGE, "internal_error")
        };
        Self {
            status,
            message: message.to_string(),
            code: Some(code),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.code,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_string(err: ApiError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn empty_field_is_a_bad_request_without_code() {
        let (status, body) = body_string(ApiError::empty_field("sig")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"sig should not be empty"}"#);
    }

    #[tokio::test]
    async fn auth_rejections_render_the_generic_body() {
        let (status, body) = body_string(AuthError::EventExpired { age_secs: 301 }.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(
            body,
            r#"{"error":"Authentication failed","error_code":"unauthorized"}"#
        );
    }

    #[test]
    fn unusable_signing_key_is_internal() {
        let err = ApiError::from(AuthError::SigningKeyUnavailable);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, Some("internal_error"));
        assert_eq!(err.message, AUTH_UNAVAILABLE_MESSAGE);
    }

    #[test]
    fn not_found_keeps_message() {
        let err = ApiError::not_found("Not found");
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Not found");
        assert!(err.code.is_none());
    }
}
