// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::AuthService;
use crate::config::{Config, Environment};

/// Shared request state.
///
/// Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub environment: Environment,
    pub insecure_secret: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            auth: Arc::new(AuthService::new(
                &config.signing_secret,
                config.session_ttl_secs,
                config.freshness,
            )),
            environment: config.environment,
            insecure_secret: config.insecure_secret,
        }
    }
}
