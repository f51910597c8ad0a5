//! Engine configuration.
//!
//! Supports configuration via environment variables:
//!
//! ```bash
//! # How long a registration verification token stays valid (seconds).
//! AGORA_REGISTRATION_TOKEN_TTL_SECS=86400
//! ```

use chrono::Duration;
use thiserror::Error;

/// Default verification-token lifetime: 24 hours.
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Governance engine configuration.
#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    /// How long a registration verification token stays valid.
    pub token_ttl: Duration,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid AGORA_REGISTRATION_TOKEN_TTL_SECS value '{0}': expected seconds")]
    InvalidTokenTtl(String),
}

impl GovernanceConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token_ttl = match std::env::var("AGORA_REGISTRATION_TOKEN_TTL_SECS") {
            Ok(v) => {
                let secs: i64 = v.parse().map_err(|_| ConfigError::InvalidTokenTtl(v))?;
                Duration::seconds(secs)
            }
            Err(_) => Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        };
        Ok(Self { token_ttl })
    }
}
