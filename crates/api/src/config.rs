//! Gateway configuration, read from the environment at startup.
//!
//! Missing or malformed settings are startup errors: the process refuses to
//! start rather than serving requests it cannot fulfil.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DOWNSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Where product reads and writes go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Forward to a remote product API.
    Downstream { base_url: String, timeout: Duration },
    /// Keep products in process memory.
    InMemory,
}

impl BackendConfig {
    pub fn kind(&self) -> &'static str {
        match self {
            BackendConfig::Downstream { .. } => "downstream",
            BackendConfig::InMemory => "in-memory",
        }
    }
}

/// Whether requests must carry a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthConfig {
    Disabled,
    Enforced { jwt_secret: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
}

impl GatewayConfig {
    /// Read the process environment.
    ///
    /// - `PRODUCTS_BACKEND`: `downstream` (default) or `in-memory`
    /// - `DOWNSTREAM_BASE_URL`: required for `downstream`
    /// - `DOWNSTREAM_TIMEOUT_SECS`: default 30
    /// - `BIND_ADDR`: default `0.0.0.0:8080`
    /// - `AUTH_ENFORCED`: default `false`
    /// - `JWT_SECRET`: required when `AUTH_ENFORCED=true`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GatewayConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_raw = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid("BIND_ADDR", &bind_raw, e.to_string()))?;

        let backend = match var("PRODUCTS_BACKEND").as_deref().map(str::trim) {
            None | Some("downstream") => {
                let base_url = var("DOWNSTREAM_BASE_URL")
                    .ok_or(ConfigError::Missing("DOWNSTREAM_BASE_URL"))?;
                let base_url = parse_base_url(base_url.trim())?;

                let timeout = match var("DOWNSTREAM_TIMEOUT_SECS") {
                    None => DEFAULT_DOWNSTREAM_TIMEOUT,
                    Some(raw) => match raw.trim().parse::<u64>() {
                        Ok(secs) if secs > 0 => Duration::from_secs(secs),
                        _ => {
                            return Err(ConfigError::invalid(
                                "DOWNSTREAM_TIMEOUT_SECS",
                                &raw,
                                "expected a positive number of seconds",
                            ));
                        }
                    },
                };

                BackendConfig::Downstream { base_url, timeout }
            }
            Some("in-memory") => BackendConfig::InMemory,
            Some(other) => {
                return Err(ConfigError::invalid(
                    "PRODUCTS_BACKEND",
                    other,
                    "expected `downstream` or `in-memory`",
                ));
            }
        };

        let enforced = match var("AUTH_ENFORCED") {
            None => false,
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::invalid("AUTH_ENFORCED", &raw, "expected true or false"))?,
        };
        let auth = if enforced {
            let jwt_secret = var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
            AuthConfig::Enforced { jwt_secret }
        } else {
            AuthConfig::Disabled
        };

        Ok(Self {
            bind_addr,
            backend,
            auth,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let Some((scheme, rest)) = raw.split_once("://") else {
        return Err(ConfigError::invalid(
            "DOWNSTREAM_BASE_URL",
            raw,
            "expected an absolute http(s) URL",
        ));
    };
    if !matches!(scheme, "http" | "https") || rest.trim_matches('/').is_empty() {
        return Err(ConfigError::invalid(
            "DOWNSTREAM_BASE_URL",
            raw,
            "expected an absolute http(s) URL",
        ));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
