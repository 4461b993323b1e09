// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nostr login events and their canonical encoding.
//!
//! An event id is the SHA-256 of the JSON array
//! `[0, pubkey, created_at, kind, tags, content]` serialized without
//! whitespace (NIP-01). The leading `0` is the encoding version tag.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::crypto::EventCrypto;
use super::AuthError;

/// Version tag placed first in the canonical array.
const CANONICAL_VERSION: u8 = 0;

/// Event fields covered by the id hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedEvent {
    pub pubkey: String,
    pub created_at: i64,
    pub kind: u32,
    pub tags: Vec<Vec<String>>,
    pub content: String,
}

/// A signed Nostr event submitted as login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SignedEvent {
    /// Hex SHA-256 of the canonical encoding
    pub id: String,
    /// Hex x-only secp256k1 public key (32 bytes)
    pub pubkey: String,
    /// Unix timestamp in seconds
    pub created_at: i64,
    /// Event kind (22242 for client authentication)
    pub kind: u32,
    /// Event tags
    pub tags: Vec<Vec<String>>,
    /// Event content
    pub content: String,
    /// Hex BIP-340 Schnorr signature over `id` (64 bytes)
    pub sig: String,
}

impl SignedEvent {
    /// Copy the hashed fields out as an unsigned event.
    pub fn unsigned(&self) -> UnsignedEvent {
        UnsignedEvent {
            pubkey: self.pubkey.clone(),
            created_at: self.created_at,
            kind: self.kind,
            tags: self.tags.clone(),
            content: self.content.clone(),
        }
    }
}

/// Canonical byte encoding of an unsigned event.
pub fn canonical_bytes(event: &UnsignedEvent) -> Result<Vec<u8>, AuthError> {
    serde_json::to_vec(&(
        CANONICAL_VERSION,
        &event.pubkey,
        event.created_at,
        event.kind,
        &event.tags,
        &event.content,
    ))
    .map_err(|e| AuthError::EncodingError(e.to_string()))
}

/// Hash of the canonical encoding, i.e. the raw event id.
pub fn event_digest<C: EventCrypto>(
    crypto: &C,
    event: &UnsignedEvent,
) -> Result<[u8; 32], AuthError> {
    Ok(crypto.hash(&canonical_bytes(event)?))
}

/// Lowercase hex event id.
pub fn event_id<C: EventCrypto>(crypto: &C, event: &UnsignedEvent) -> Result<String, AuthError> {
    event_digest(crypto, event).map(hex::encode)
}
