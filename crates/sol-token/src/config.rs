use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// Decimals given to every mint created by this crate unless configured.
pub const DEFAULT_DECIMALS: u8 = 10;

/// Largest precision whose scale factor (10^19) still fits in a u64.
pub const MAX_DECIMALS: u8 = 19;

/// Token manager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Decimal precision of minted tokens and of transfer amounts.
    pub decimals: u8,
    /// How often the confirmation poller queries the chain.
    pub poll_interval_ms: u64,
    /// How long a transfer waits for its mint to become visible.
    pub confirmation_timeout_ms: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            poll_interval_ms: 500,
            confirmation_timeout_ms: 30_000,
        }
    }
}

impl TokenConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TokenError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TokenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TokenError> {
        if self.decimals > MAX_DECIMALS {
            return Err(TokenError::Config(format!(
                "decimals {} exceeds {MAX_DECIMALS}",
                self.decimals
            )));
        }
        if self.poll_interval_ms == 0 {
            return Err(TokenError::Config("poll interval must be > 0".into()));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn confirmation_timeout(&self) -> Duration {
        Duration::from_millis(self.confirmation_timeout_ms)
    }
}
