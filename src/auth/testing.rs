// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Client-side event signing for tests.

use super::crypto::{EventCrypto, Secp256k1Schnorr};
use super::event::{event_digest, SignedEvent, UnsignedEvent};

/// Fixed test key; any non-zero scalar below the curve order works.
pub const TEST_SECRET: [u8; 32] = [0x11; 32];

/// NIP-42 client authentication kind.
pub const AUTH_KIND: u32 = 22242;

/// Build and sign an auth event the way a Nostr client would.
pub fn signed_event(secret: &[u8; 32], created_at: i64, content: &str) -> SignedEvent {
    let crypto = Secp256k1Schnorr;
    let pubkey = hex::encode(crypto.public_key(secret).unwrap());
    let unsigned = UnsignedEvent {
        pubkey: pubkey.clone(),
        created_at,
        kind: AUTH_KIND,
        tags: vec![],
        content: content.to_string(),
    };
    let digest = event_digest(&crypto, &unsigned).unwrap();
    let sig = crypto.sign(secret, &digest).unwrap();

    SignedEvent {
        id: hex::encode(digest),
        pubkey,
        created_at,
        kind: AUTH_KIND,
        tags: vec![],
        content: content.to_string(),
        sig: hex::encode(sig),
    }
}
