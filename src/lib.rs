// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Nostr Login Server - Signed-Event Authentication Service
//!
//! Users prove control of a Nostr key by signing a short-lived event; the
//! server verifies it and hands back a bearer session token.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Event verification, session tokens, session guard
//! - `config` - Environment-driven settings

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod state;
