// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session guard for protected routes.
//!
//! [`require_session`] is applied as a layer to every protected router: it
//! rejects the request before the handler runs unless a valid bearer token
//! is present, and stores the [`VerifiedIdentity`] in request extensions.
//!
//! Handlers read the identity with the [`Session`] extractor:
//!
//! ```rust,ignore
//! async fn my_handler(Session(identity): Session) -> impl IntoResponse {
//!     // identity.pubkey is the authenticated key
//! }
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use super::{AuthError, VerifiedIdentity};
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively; anything else counts as no
/// credential at all.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingCredential)?
        .to_str()
        .map_err(|_| AuthError::MissingCredential)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthError::MissingCredential)?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::MissingCredential);
    }

    Ok(token)
}

fn authenticate_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<VerifiedIdentity, AuthError> {
    let token = bearer_token(headers)?;
    state.auth.authenticate(token, Utc::now().timestamp())
}

/// Middleware that fails closed on any missing or invalid session token.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate_headers(request.headers(), &state) {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                error_code = e.error_code(),
                "Request rejected by session guard"
            );
            e.into_response()
        }
    }
}

/// Extractor for the authenticated identity.
///
/// Uses the identity stored by [`require_session`] when present, and
/// otherwise validates the bearer token itself.
pub struct Session(pub VerifiedIdentity);

impl FromRequestParts<AppState> for Session {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(identity) = parts.extensions.get::<VerifiedIdentity>().cloned() {
            return Ok(Session(identity));
        }

        let identity = authenticate_headers(&parts.headers, state)?;
        parts.extensions.insert(identity.clone());
        Ok(Session(identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::TokenIssuer;
    use crate::config::Config;
    use axum::http::{HeaderValue, Request};

    fn test_state() -> AppState {
        AppState::new(&Config::for_tests())
    }

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/test");
        if let Some(value) = value {
            builder = builder.header("Authorization", value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    fn issue_token(identity: &VerifiedIdentity) -> String {
        let config = Config::for_tests();
        TokenIssuer::new(&config.signing_secret, config.session_ttl_secs)
            .issue(identity)
            .unwrap()
            .access_token
    }

    #[test]
    fn bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingCredential));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Ok("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer abc"));
        assert_eq!(bearer_token(&headers), Ok("abc"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingCredential));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingCredential));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer"));
        assert_eq!(bearer_token(&headers), Err(AuthError::MissingCredential));
    }

    #[tokio::test]
    async fn session_requires_auth_header() {
        let state = test_state();
        let mut parts = parts_with_auth(None);

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingCredential)));
    }

    #[tokio::test]
    async fn session_accepts_issued_token() {
        let state = test_state();
        let identity = VerifiedIdentity::new("ab".repeat(32));
        let header = format!("Bearer {}", issue_token(&identity));
        let mut parts = parts_with_auth(Some(header.as_str()));

        let Session(found) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(found, identity);
        assert_eq!(parts.extensions.get::<VerifiedIdentity>(), Some(&identity));
    }

    #[tokio::test]
    async fn session_rejects_tampered_token() {
        let state = test_state();
        let identity = VerifiedIdentity::new("ab".repeat(32));
        let mut token = issue_token(&identity);
        token.pop();
        let header = format!("Bearer {token}");
        let mut parts = parts_with_auth(Some(header.as_str()));

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::TokenTampered)));
    }

    #[tokio::test]
    async fn session_prefers_extensions() {
        let state = test_state();
        let mut parts = parts_with_auth(None);
        let identity = VerifiedIdentity::new("cd".repeat(32));
        parts.extensions.insert(identity.clone());

        let Session(found) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(found, identity);
    }
}
