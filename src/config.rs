// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names, default values, and the
//! [`Config`] loaded from them once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `APP_ENV` | `development` or `production` | `production` |
//! | `JWT_SECRET` | Session token signing secret | Required for production |
//! | `SESSION_TTL_SECS` | Session token lifetime | `86400` |
//! | `EVENT_MAX_AGE_SECS` | Oldest accepted login event | `300` |
//! | `EVENT_MAX_FUTURE_SKEW_SECS` | Furthest-ahead accepted login event | `60` |
//! | `CORS_ALLOWED_ORIGINS` | Comma-separated allowed origins | `http://localhost:3000,http://localhost:8081` |
//! | `TLS_CERT_PATH` | PEM certificate chain (HTTPS when set with key) | Optional |
//! | `TLS_KEY_PATH` | PEM private key | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::auth::freshness::{
    FreshnessPolicy, DEFAULT_MAX_AGE_SECS, DEFAULT_MAX_FUTURE_SKEW_SECS,
};
use crate::auth::token::{SigningSecret, DEFAULT_SESSION_TTL_SECS};

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const APP_ENV_ENV: &str = "APP_ENV";

/// Environment variable name for the session signing secret.
///
/// Never logged. Outside development the service refuses to start
/// without it.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

pub const SESSION_TTL_ENV: &str = "SESSION_TTL_SECS";
pub const EVENT_MAX_AGE_ENV: &str = "EVENT_MAX_AGE_SECS";
pub const EVENT_MAX_FUTURE_SKEW_ENV: &str = "EVENT_MAX_FUTURE_SKEW_SECS";
pub const CORS_ALLOWED_ORIGINS_ENV: &str = "CORS_ALLOWED_ORIGINS";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8081";
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Publicly known fallback secret, only ever accepted in development.
pub const INSECURE_DEV_SECRET: &str = "insecure-development-secret-change-me";

/// Configuration errors. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{} must be set outside development", JWT_SECRET_ENV)]
    MissingSigningSecret,
    #[error("{} must not be the development fallback outside development", JWT_SECRET_ENV)]
    InsecureSigningSecret,
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),
    #[error("{} and {} must be set together", TLS_CERT_PATH_ENV, TLS_KEY_PATH_ENV)]
    IncompleteTls,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// PEM files for serving HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: PathBuf,
    pub key: PathBuf,
}

/// Service configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub signing_secret: SigningSecret,
    /// True when running on [`INSECURE_DEV_SECRET`]
    pub insecure_secret: bool,
    pub session_ttl_secs: i64,
    pub freshness: FreshnessPolicy,
    pub cors_allowed_origins: Vec<String>,
    pub tls: Option<TlsPaths>,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup(APP_ENV_ENV).as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("development") || v.eq_ignore_ascii_case("dev") => {
                Environment::Development
            }
            _ => Environment::Production,
        };

        let secret = lookup(JWT_SECRET_ENV).filter(|s| !s.is_empty());
        let (signing_secret, insecure_secret) = match secret {
            Some(secret) if secret == INSECURE_DEV_SECRET && !environment.is_development() => {
                return Err(ConfigError::InsecureSigningSecret);
            }
            Some(secret) => {
                let insecure = secret == INSECURE_DEV_SECRET;
                (secret, insecure)
            }
            None if environment.is_development() => (INSECURE_DEV_SECRET.to_string(), true),
            None => return Err(ConfigError::MissingSigningSecret),
        };
        let signing_secret = SigningSecret::new(signing_secret.into_bytes())
            .map_err(|_| ConfigError::MissingSigningSecret)?;

        let host = lookup(HOST_ENV).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, PORT_ENV, DEFAULT_PORT)?;
        let bind_addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddress(format!("{host}:{port}")))?;

        let session_ttl_secs = positive_or(&lookup, SESSION_TTL_ENV, DEFAULT_SESSION_TTL_SECS)?;
        let freshness = FreshnessPolicy::new(
            positive_or(&lookup, EVENT_MAX_AGE_ENV, DEFAULT_MAX_AGE_SECS)?,
            non_negative_or(&lookup, EVENT_MAX_FUTURE_SKEW_ENV, DEFAULT_MAX_FUTURE_SKEW_SECS)?,
        );

        let cors_allowed_origins = lookup(CORS_ALLOWED_ORIGINS_ENV)
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        let tls = match (lookup(TLS_CERT_PATH_ENV), lookup(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err(ConfigError::IncompleteTls),
        };

        let log_format = match lookup(LOG_FORMAT_ENV).as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            bind_addr,
            environment,
            signing_secret,
            insecure_secret,
            session_ttl_secs,
            freshness,
            cors_allowed_origins,
            tls,
            log_format,
        })
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::from_lookup(|name| match name {
            APP_ENV_ENV => Some("development".to_string()),
            JWT_SECRET_ENV => Some("unit-test-signing-secret".to_string()),
            _ => None,
        })
        .expect("test configuration is valid")
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn non_negative_or<F>(lookup: &F, name: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = parse_or(lookup, name, default)?;
    if value < 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn positive_or<F>(lookup: &F, name: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = non_negative_or(lookup, name, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn production_requires_secret() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingSigningSecret)));
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "")]),
            Err(ConfigError::MissingSigningSecret)
        ));
    }

    #[test]
    fn production_rejects_fallback_secret() {
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, INSECURE_DEV_SECRET)]),
            Err(ConfigError::InsecureSigningSecret)
        ));
    }

    #[test]
    fn development_falls_back_to_flagged_secret() {
        let config = load(&[(APP_ENV_ENV, "development")]).unwrap();
        assert!(config.environment.is_development());
        assert!(config.insecure_secret);
    }

    #[test]
    fn defaults() {
        let config = load(&[(JWT_SECRET_ENV, "s3cret")]).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert!(!config.insecure_secret);
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.session_ttl_secs, 86_400);
        assert_eq!(config.freshness, FreshnessPolicy::new(300, 60));
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:3000", "http://localhost:8081"]
        );
        assert!(config.tls.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn overrides() {
        let config = load(&[
            (JWT_SECRET_ENV, "s3cret"),
            (HOST_ENV, "127.0.0.1"),
            (PORT_ENV, "8443"),
            (SESSION_TTL_ENV, "3600"),
            (EVENT_MAX_AGE_ENV, "120"),
            (EVENT_MAX_FUTURE_SKEW_ENV, "0"),
            (CORS_ALLOWED_ORIGINS_ENV, "https://pos.example.com, "),
            (TLS_CERT_PATH_ENV, "/certs/cert.pem"),
            (TLS_KEY_PATH_ENV, "/certs/key.pem"),
            (LOG_FORMAT_ENV, "json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8443".parse().unwrap());
        assert_eq!(config.session_ttl_secs, 3600);
        assert_eq!(config.freshness, FreshnessPolicy::new(120, 0));
        assert_eq!(config.cors_allowed_origins, vec!["https://pos.example.com"]);
        assert_eq!(
            config.tls,
            Some(TlsPaths {
                cert: "/certs/cert.pem".into(),
                key: "/certs/key.pem".into(),
            })
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "s"), (SESSION_TTL_ENV, "soon")]),
            Err(ConfigError::InvalidValue { name: SESSION_TTL_ENV, .. })
        ));
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "s"), (SESSION_TTL_ENV, "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "s"), (EVENT_MAX_AGE_ENV, "-5")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn tls_paths_must_come_in_pairs() {
        assert!(matches!(
            load(&[(JWT_SECRET_ENV, "s"), (TLS_CERT_PATH_ENV, "/c.pem")]),
            Err(ConfigError::IncompleteTls)
        ));
    }
}
