//! Session credential seam.
//!
//! The network's session-signature protocol is not implemented here; callers
//! inject a `SessionAuthenticator` and treat its output as an opaque bundle.

use std::env;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use spendgate_core::error::{Result, SpendGateError};

use crate::config::SessionSection;

/// Environment variable holding the caller's signing key.
pub const SIGNING_KEY_ENV: &str = "EVM_PRIVATE_KEY";

/// Hex-encoded secp256k1 private key. Never printed.
#[derive(Clone)]
pub struct SigningKey(String);

impl SigningKey {
    /// Accepts 64 hex digits, with or without `0x`.
    pub fn parse(s: &str) -> Result<Self> {
        let digits = s.trim().strip_prefix("0x").unwrap_or(s.trim());
        if digits.len() != 64 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err(SpendGateError::BadConfig(
                "signing key must be 32 bytes of hex".into(),
            ));
        }
        Ok(Self(format!("0x{}", digits.to_ascii_lowercase())))
    }

    pub fn from_env() -> Result<Self> {
        let raw = env::var(SIGNING_KEY_ENV).map_err(|_| {
            SpendGateError::BadConfig(format!("{SIGNING_KEY_ENV} not found in environment"))
        })?;
        Self::parse(&raw)
    }

    /// `0x`-prefixed key, for handing to an authenticator only.
    pub fn expose_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LitResource {
    pub resource: String,
    pub resource_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAbilityRequest {
    pub resource: LitResource,
    pub ability: String,
}

/// Capabilities requested for a time-bounded session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub chain: String,
    /// UTC, `%Y-%m-%dT%H:%M:%SZ`.
    pub expiration: String,
    pub resource_ability_requests: Vec<ResourceAbilityRequest>,
}

impl SessionRequest {
    pub fn from_config(cfg: &SessionSection, now: DateTime<Utc>) -> Self {
        let expires = now + Duration::minutes(i64::from(cfg.expiration_minutes));
        Self {
            chain: cfg.chain.clone(),
            expiration: expires.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            resource_ability_requests: vec![ResourceAbilityRequest {
                resource: LitResource {
                    resource: cfg.resource.clone(),
                    resource_prefix: cfg.resource_prefix.clone(),
                },
                ability: cfg.ability.clone(),
            }],
        }
    }
}

/// Opaque credential bundle returned by the authenticator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionSigs(pub Value);

/// Obtains session credentials for a signing key.
#[async_trait]
pub trait SessionAuthenticator: Send + Sync {
    async fn session_sigs(&self, key: &SigningKey, req: &SessionRequest) -> Result<SessionSigs>;
}
