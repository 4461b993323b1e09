// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session token issuance and validation.
//!
//! Tokens are compact HS256 JWTs carrying [`SessionClaims`]. Issuer and
//! validator are built from the same [`SigningSecret`]; the server keeps no
//! session state, so a token is valid exactly while its signature holds and
//! `now <= exp`.

use chrono::Utc;
use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};

use super::claims::{PresentedClaims, SessionClaims};
use super::{AuthError, VerifiedIdentity};

/// Default session lifetime (24 hours).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 24 * 60 * 60;

/// Symmetric key shared by [`TokenIssuer`] and [`TokenValidator`].
#[derive(Clone)]
pub struct SigningSecret(Vec<u8>);

impl SigningSecret {
    /// Wrap raw secret bytes. An empty secret is unusable.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AuthError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(AuthError::SigningKeyUnavailable);
        }
        Ok(Self(bytes))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret([REDACTED])")
    }
}

/// A freshly minted session token and the claims inside it.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub access_token: String,
    pub claims: SessionClaims,
}

/// Mints session tokens for verified identities.
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl_secs: i64,
}

impl TokenIssuer {
    pub fn new(secret: &SigningSecret, ttl_secs: i64) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    /// Issue a token valid from the current time.
    pub fn issue(&self, identity: &VerifiedIdentity) -> Result<SessionToken, AuthError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token valid from `now`.
    pub fn issue_at(
        &self,
        identity: &VerifiedIdentity,
        now: i64,
    ) -> Result<SessionToken, AuthError> {
        let claims = SessionClaims::for_identity(identity, now, self.ttl_secs);
        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|_| AuthError::SigningKeyUnavailable)?;

        Ok(SessionToken {
            access_token,
            claims,
        })
    }
}

/// Checks presented session tokens.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &SigningSecret) -> Self {
        // Expiry is checked against the caller's clock below, not the
        // library's, and only HS256 is accepted.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate `token` at time `now` and return the identity it carries.
    pub fn validate(&self, token: &str, now: i64) -> Result<VerifiedIdentity, AuthError> {
        decode_header(token).map_err(|_| AuthError::TokenTampered)?;

        // The header parsed, so a JSON error here can only come from the
        // claims segment, which is read after the signature is checked.
        let token_data = decode::<PresentedClaims>(token, &self.key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::Json(_) => AuthError::MalformedClaims,
                _ => AuthError::TokenTampered,
            })?;
        let claims = token_data.claims;

        let exp = claims.exp.ok_or(AuthError::MalformedClaims)?;
        if now > exp {
            return Err(AuthError::TokenExpired);
        }

        let pubkey = claims
            .pubkey
            .filter(|p| !p.is_empty())
            .ok_or(AuthError::MalformedClaims)?;
        if claims.sub.as_deref() != Some(pubkey.as_str()) {
            return Err(AuthError::MalformedClaims);
        }

        Ok(VerifiedIdentity::new(pubkey))
    }
}
