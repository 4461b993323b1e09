// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session claims and the verified identity they carry.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A public key proven by a verified login event or session token.
///
/// This is the primary type used throughout the application to represent
/// the authenticated caller. Downstream code must treat `pubkey` as the
/// trusted identifier and never re-derive it from request input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct VerifiedIdentity {
    /// Lowercase hex x-only public key
    pub pubkey: String,
}

impl VerifiedIdentity {
    pub fn new(pubkey: impl Into<String>) -> Self {
        Self {
            pubkey: pubkey.into(),
        }
    }
}

/// Claims encoded into a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject, always equal to `pubkey`
    pub sub: String,
    /// Authenticated public key
    pub pubkey: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for `identity` valid from `now` for `ttl_secs`.
    pub fn for_identity(identity: &VerifiedIdentity, now: i64, ttl_secs: i64) -> Self {
        Self {
            sub: identity.pubkey.clone(),
            pubkey: identity.pubkey.clone(),
            iat: now,
            exp: now.saturating_add(ttl_secs),
        }
    }
}

/// Claims as read back from a token whose signature already checked out.
///
/// Every field is optional so a missing claim surfaces as malformed claims
/// rather than as a decoding failure.
#[derive(Debug, Deserialize)]
pub(crate) struct PresentedClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub pubkey: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}
