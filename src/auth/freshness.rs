// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Replay window for login events.

use super::AuthError;

/// Default maximum event age (5 minutes).
pub const DEFAULT_MAX_AGE_SECS: i64 = 300;

/// Default tolerance for events stamped ahead of server time.
pub const DEFAULT_MAX_FUTURE_SKEW_SECS: i64 = 60;

/// Accepts events whose `created_at` lies within the window around `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessPolicy {
    pub max_age_secs: i64,
    pub max_future_skew_secs: i64,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_MAX_AGE_SECS,
            max_future_skew_secs: DEFAULT_MAX_FUTURE_SKEW_SECS,
        }
    }
}

impl FreshnessPolicy {
    pub fn new(max_age_secs: i64, max_future_skew_secs: i64) -> Self {
        Self {
            max_age_secs,
            max_future_skew_secs,
        }
    }

    /// Check an event timestamp against `now` (both unix seconds).
    pub fn check(&self, created_at: i64, now: i64) -> Result<(), AuthError> {
        let age_secs = now.saturating_sub(created_at);
        if age_secs > self.max_age_secs {
            return Err(AuthError::EventExpired { age_secs });
        }

        let skew_secs = created_at.saturating_sub(now);
        if skew_secs > self.max_future_skew_secs {
            return Err(AuthError::EventFromFuture { skew_secs });
        }

        Ok(())
    }
}
