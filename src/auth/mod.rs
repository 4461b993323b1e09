// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module provides Nostr signed-event login and stateless session
//! tokens for the API.
//!
//! ## Auth Flow
//!
//! 1. Client signs a NIP-01 event (kind 22242) with its private key
//! 2. Client sends the event to `POST /auth/login`
//! 3. Server:
//!    - Recomputes the event id and checks it against the declared id
//!    - Verifies the Schnorr signature against the declared pubkey
//!    - Rejects events older than 5 minutes or more than 60s ahead
//!    - Issues an HS256 session token with `sub` = `pubkey`
//! 4. Client sends `Authorization: Bearer <token>` on protected routes
//!
//! ## Security
//!
//! - Sessions are stateless and expire only by time (24h default)
//! - The signing secret is injected at startup and never logged
//! - Clients only ever see "Authentication failed"; the specific check
//!   that failed is logged server-side

pub mod claims;
pub mod crypto;
pub mod error;
pub mod event;
pub mod freshness;
pub mod guard;
pub mod npub;
pub mod service;
pub mod token;
pub mod verifier;

#[cfg(test)]
pub(crate) mod testing;

pub use claims::{SessionClaims, VerifiedIdentity};
pub use error::{AuthError, AUTH_FAILED_MESSAGE};
pub use event::SignedEvent;
pub use guard::Session;
pub use service::{AuthService, LoginOutcome};
pub use token::{SessionToken, SigningSecret, TokenIssuer, TokenValidator};
