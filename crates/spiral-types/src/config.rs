//! Token configuration.

use serde::{Deserialize, Serialize};

use crate::{AccountRef, Amount, LedgerId, Result, SpiralError, constants};

/// Deployment configuration for one Spiral ledger instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Token name (e.g., "Spiral").
    pub name: String,
    /// Ticker symbol (e.g., "SPRL").
    pub symbol: String,
    /// Number of decimals in one whole token.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Hard cap on total supply, in base units.
    #[serde(default = "default_max_supply")]
    pub max_supply: Amount,
    /// Supply credited to the owner at genesis, in base units.
    #[serde(default = "default_initial_supply")]
    pub initial_supply: Amount,
    /// This ledger's own identifier.
    pub local_ledger: LedgerId,
    /// Initial holder of the owner capability.
    pub owner: AccountRef,
    /// The transport endpoint allowed to deliver inbound messages.
    pub endpoint: AccountRef,
}

fn default_decimals() -> u8 {
    constants::DEFAULT_DECIMALS
}

fn default_max_supply() -> Amount {
    constants::DEFAULT_MAX_SUPPLY
}

fn default_initial_supply() -> Amount {
    constants::DEFAULT_INITIAL_SUPPLY
}

impl TokenConfig {
    /// Config with the default cap, decimals and genesis supply.
    #[must_use]
    pub fn new(local_ledger: LedgerId, owner: AccountRef, endpoint: AccountRef) -> Self {
        Self {
            name: constants::ENGINE_NAME.to_string(),
            symbol: "SPRL".to_string(),
            decimals: constants::DEFAULT_DECIMALS,
            max_supply: constants::DEFAULT_MAX_SUPPLY,
            initial_supply: constants::DEFAULT_INITIAL_SUPPLY,
            local_ledger,
            owner,
            endpoint,
        }
    }

    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the config for values no deployment should start with.
    pub fn validate(&self) -> Result<()> {
        if self.initial_supply > self.max_supply {
            return Err(SpiralError::Configuration(format!(
                "initial supply {} exceeds max supply {}",
                self.initial_supply, self.max_supply
            )));
        }
        if self.owner.is_zero() {
            return Err(SpiralError::Configuration("owner is the zero account".into()));
        }
        if self.endpoint.is_zero() {
            return Err(SpiralError::Configuration(
                "endpoint is the zero account".into(),
            ));
        }
        if self.decimals > constants::MAX_DECIMALS {
            return Err(SpiralError::Configuration(format!(
                "decimals {} above {}",
                self.decimals,
                constants::MAX_DECIMALS
            )));
        }
        Ok(())
    }
}
