//! Supply conservation invariant checker.
//!
//! Invariant enforced by [`crate::LedgerState::verify_supply`]:
//! ```text
//! Σ balances == total_supply == genesis + Σ mints − Σ burns ≤ max_supply
//! ```
//!
//! If this ever breaks, tokens were created or destroyed outside the
//! burn/mint paths.

use spiral_types::{Amount, Result, SpiralError};

/// Running totals since genesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplyConservation {
    genesis: Amount,
    minted: Amount,
    burned: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new(genesis: Amount) -> Self {
        Self {
            genesis,
            minted: 0,
            burned: 0,
        }
    }

    /// Record a mint.
    pub fn record_mint(&mut self, amount: Amount) {
        self.minted = self.minted.saturating_add(amount);
    }

    /// Record a burn.
    pub fn record_burn(&mut self, amount: Amount) {
        self.burned = self.burned.saturating_add(amount);
    }

    pub(crate) fn unrecord_mint(&mut self, amount: Amount) {
        self.minted = self.minted.saturating_sub(amount);
    }

    pub(crate) fn unrecord_burn(&mut self, amount: Amount) {
        self.burned = self.burned.saturating_sub(amount);
    }

    /// Expected total supply: genesis + mints − burns.
    ///
    /// `None` if burns exceed everything ever issued.
    #[must_use]
    pub fn expected_supply(&self) -> Option<Amount> {
        self.genesis
            .checked_add(self.minted)?
            .checked_sub(self.burned)
    }

    /// Verify that `actual_supply` matches the running totals.
    ///
    /// # Errors
    /// Returns [`SpiralError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Amount) -> Result<()> {
        let expected = self.expected_supply();
        if expected != Some(actual_supply) {
            return Err(SpiralError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected:?} \
                     (genesis={}, minted={}, burned={})",
                    self.genesis, self.minted, self.burned
                ),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn genesis(&self) -> Amount {
        self.genesis
    }

    #[must_use]
    pub fn total_minted(&self) -> Amount {
        self.minted
    }

    #[must_use]
    pub fn total_burned(&self) -> Amount {
        self.burned
    }
}
