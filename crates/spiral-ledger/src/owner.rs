//! Owner capability.
//!
//! A single stored account reference, compared against the caller at the top
//! of every administrative operation.

use spiral_types::{AccountRef, Result, SpiralError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerCapability {
    holder: AccountRef,
}

impl OwnerCapability {
    /// # Errors
    /// Returns [`SpiralError::ZeroAccount`] for the zero account.
    pub fn new(holder: AccountRef) -> Result<Self> {
        if holder.is_zero() {
            return Err(SpiralError::ZeroAccount);
        }
        Ok(Self { holder })
    }

    #[must_use]
    pub fn holder(&self) -> AccountRef {
        self.holder
    }

    /// `Ok(())` iff `caller` holds the capability.
    pub fn require(&self, caller: &AccountRef) -> Result<()> {
        if *caller == self.holder {
            Ok(())
        } else {
            Err(SpiralError::Unauthorized)
        }
    }

    /// Hand the capability from `caller` to `new_holder`. Returns the
    /// previous holder.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the current holder.
    /// - `ZeroAccount` if `new_holder` is the zero account.
    pub fn transfer(&mut self, caller: &AccountRef, new_holder: AccountRef) -> Result<AccountRef> {
        self.require(caller)?;
        if new_holder.is_zero() {
            return Err(SpiralError::ZeroAccount);
        }
        Ok(std::mem::replace(&mut self.holder, new_holder))
    }
}
