// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login orchestration: verify, check freshness, issue.

use tracing::{info, warn};

use super::event::SignedEvent;
use super::freshness::FreshnessPolicy;
use super::npub::encode_npub;
use super::token::{SessionToken, SigningSecret, TokenIssuer, TokenValidator};
use super::verifier::EventVerifier;
use super::{AuthError, VerifiedIdentity};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: VerifiedIdentity,
    pub session: SessionToken,
    /// Display encoding of the key, when it could be produced
    pub npub: Option<String>,
}

/// Shared authentication service held in application state.
///
/// Immutable after construction, so it is shared across requests
/// behind an `Arc` without locking.
#[derive(Clone)]
pub struct AuthService {
    verifier: EventVerifier,
    freshness: FreshnessPolicy,
    issuer: TokenIssuer,
    validator: TokenValidator,
}

impl AuthService {
    pub fn new(secret: &SigningSecret, session_ttl_secs: i64, freshness: FreshnessPolicy) -> Self {
        Self {
            verifier: EventVerifier::default(),
            freshness,
            issuer: TokenIssuer::new(secret, session_ttl_secs),
            validator: TokenValidator::new(secret),
        }
    }

    /// Exchange a signed login event for a session token.
    ///
    /// The signature is checked before freshness so a forged event is never
    /// reported as merely stale.
    pub fn login(&self, event: &SignedEvent, now: i64) -> Result<LoginOutcome, AuthError> {
        let identity = self
            .verifier
            .verify(event)
            .map_err(|e| log_rejection(&event.pubkey, e))?;

        self.freshness
            .check(event.created_at, now)
            .map_err(|e| log_rejection(&event.pubkey, e))?;

        let session = self.issuer.issue_at(&identity, now).map_err(|e| {
            tracing::error!(error_code = e.error_code(), "Session token could not be signed");
            e
        })?;

        let npub = encode_npub(&identity.pubkey);
        if npub.is_none() {
            warn!(pubkey = %identity.pubkey, "Could not encode pubkey as npub");
        }

        info!(pubkey = %identity.pubkey, expires_at = session.claims.exp, "User authenticated");

        Ok(LoginOutcome {
            identity,
            session,
            npub,
        })
    }

    /// Validate a presented session token.
    pub fn authenticate(&self, token: &str, now: i64) -> Result<VerifiedIdentity, AuthError> {
        self.validator.validate(token, now).map_err(|e| {
            warn!(error_code = e.error_code(), "Session token rejected");
            e
        })
    }
}

fn log_rejection(pubkey: &str, err: AuthError) -> AuthError {
    warn!(pubkey, error_code = err.error_code(), reason = %err, "Login rejected");
    err
}
