// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login event verification.
//!
//! Two independent checks, both mandatory:
//!
//! 1. the declared `id` equals the hash of the canonical encoding
//! 2. `sig` is a valid signature over that hash by `pubkey`

use super::crypto::{EventCrypto, Secp256k1Schnorr};
use super::event::{event_digest, SignedEvent};
use super::{AuthError, VerifiedIdentity};

/// Verifies signed login events.
#[derive(Debug, Clone, Default)]
pub struct EventVerifier<C = Secp256k1Schnorr> {
    crypto: C,
}

impl<C: EventCrypto> EventVerifier<C> {
    pub fn new(crypto: C) -> Self {
        Self { crypto }
    }

    /// Verify `event` and return the proven public key.
    pub fn verify(&self, event: &SignedEvent) -> Result<VerifiedIdentity, AuthError> {
        let digest = event_digest(&self.crypto, &event.unsigned())?;

        if hex::encode(digest) != event.id {
            return Err(AuthError::IntegrityError);
        }

        let public_key = hex::decode(&event.pubkey).map_err(|_| AuthError::InvalidSignature)?;
        let signature = hex::decode(&event.sig).map_err(|_| AuthError::InvalidSignature)?;

        self.crypto
            .verify(&public_key, &digest, &signature)
            .map_err(|_| AuthError::InvalidSignature)?;

        Ok(VerifiedIdentity::new(hex::encode(public_key)))
    }
}
