//! Balances, total supply and the supply cap.
//!
//! Every account starts implicitly at zero. Only burns and mints change
//! balances, and each one moves the total supply by the same amount, so
//! `Σ balances == total_supply` holds after every call.

use std::collections::HashMap;

use spiral_types::{AccountRef, Amount, Result, SpiralError};

use crate::supply::SupplyConservation;

/// The token's balance sheet.
#[derive(Debug, Clone)]
pub struct LedgerState {
    balances: HashMap<AccountRef, Amount>,
    total_supply: Amount,
    max_supply: Amount,
    supply: SupplyConservation,
}

impl LedgerState {
    /// Create the ledger with `initial_supply` credited to `holder`.
    ///
    /// # Errors
    /// Returns [`SpiralError::Configuration`] if the genesis supply is above
    /// the cap.
    pub fn genesis(max_supply: Amount, holder: AccountRef, initial_supply: Amount) -> Result<Self> {
        if initial_supply > max_supply {
            return Err(SpiralError::Configuration(format!(
                "initial supply {initial_supply} exceeds max supply {max_supply}"
            )));
        }
        let mut balances = HashMap::new();
        if initial_supply > 0 {
            balances.insert(holder, initial_supply);
        }
        Ok(Self {
            balances,
            total_supply: initial_supply,
            max_supply,
            supply: SupplyConservation::new(initial_supply),
        })
    }

    /// Balance of `account` (zero if never credited).
    #[must_use]
    pub fn balance(&self, account: &AccountRef) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    #[must_use]
    pub fn max_supply(&self) -> Amount {
        self.max_supply
    }

    /// How much can still be minted before hitting the cap.
    #[must_use]
    pub fn headroom(&self) -> Amount {
        self.max_supply.saturating_sub(self.total_supply)
    }

    /// Number of accounts with a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| **b > 0).count()
    }

    /// Running mint/burn totals.
    #[must_use]
    pub fn conservation(&self) -> &SupplyConservation {
        &self.supply
    }

    /// Destroy `amount` from `account`.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if the account holds less than `amount`.
    pub fn burn(&mut self, account: &AccountRef, amount: Amount) -> Result<()> {
        let available = self.balance(account);
        if available < amount {
            return Err(SpiralError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balances.insert(*account, available - amount);
        self.total_supply -= amount;
        self.supply.record_burn(amount);
        Ok(())
    }

    /// Create `amount` for `account`.
    ///
    /// # Errors
    /// Returns `ExceedsMaxSupply` if `total_supply + amount > max_supply`.
    pub fn mint(&mut self, account: &AccountRef, amount: Amount) -> Result<()> {
        let headroom = self.headroom();
        if amount > headroom {
            return Err(SpiralError::ExceedsMaxSupply {
                requested: amount.into(),
                headroom,
            });
        }
        // total_supply ≤ max_supply bounds every balance, so these cannot overflow.
        *self.balances.entry(*account).or_insert(0) += amount;
        self.total_supply += amount;
        self.supply.record_mint(amount);
        Ok(())
    }

    pub(crate) fn revert_burn(&mut self, account: &AccountRef, amount: Amount) {
        *self.balances.entry(*account).or_insert(0) += amount;
        self.total_supply += amount;
        self.supply.unrecord_burn(amount);
    }

    pub(crate) fn revert_mint(&mut self, account: &AccountRef, amount: Amount) {
        if let Some(balance) = self.balances.get_mut(account) {
            *balance = balance.saturating_sub(amount);
        }
        self.total_supply = self.total_supply.saturating_sub(amount);
        self.supply.unrecord_mint(amount);
    }

    /// Sum of every balance.
    #[must_use]
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(0u128, |acc, b| acc.checked_add(*b))
    }

    /// Check every supply invariant at once.
    ///
    /// # Errors
    /// Returns [`SpiralError::SupplyInvariantViolation`] describing the first
    /// broken invariant.
    pub fn verify_supply(&self) -> Result<()> {
        if self.total_supply > self.max_supply {
            return Err(SpiralError::SupplyInvariantViolation {
                reason: format!(
                    "total supply {} above cap {}",
                    self.total_supply, self.max_supply
                ),
            });
        }
        let sum = self.sum_of_balances();
        if sum != Some(self.total_supply) {
            return Err(SpiralError::SupplyInvariantViolation {
                reason: format!(
                    "sum of balances {sum:?} != total supply {}",
                    self.total_supply
                ),
            });
        }
        self.supply.verify(self.total_supply)
    }
}
