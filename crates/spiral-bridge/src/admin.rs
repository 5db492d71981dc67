//! Owner-gated administrative operations.
//!
//! Every entry point checks the owner capability first and mutates nothing
//! on failure.

use spiral_types::{AccountRef, Amount, EventKind, LedgerId, Result, SpiralError};

use crate::{bridge::SpiralBridge, endpoint::Endpoint};

impl<E: Endpoint> SpiralBridge<E> {
    /// Halt send and receive. Pausing an already paused bridge is a no-op.
    pub fn pause(&mut self, caller: AccountRef) -> Result<()> {
        self.owner.require(&caller)?;
        if self.pause.pause() {
            tracing::info!(by = %caller, "Bridge paused");
            self.emit(EventKind::Paused { by: caller });
        }
        Ok(())
    }

    /// Resume send and receive. Unpausing a running bridge is a no-op.
    pub fn unpause(&mut self, caller: AccountRef) -> Result<()> {
        self.owner.require(&caller)?;
        if self.pause.unpause() {
            tracing::info!(by = %caller, "Bridge unpaused");
            self.emit(EventKind::Unpaused { by: caller });
        }
        Ok(())
    }

    /// Trust `identifier` as the bridge address on `remote`, replacing any
    /// previous entry.
    ///
    /// # Errors
    /// `Unauthorized`, or `EmptyRemoteIdentifier` for an empty identifier.
    pub fn set_trusted(
        &mut self,
        caller: AccountRef,
        remote: LedgerId,
        identifier: impl Into<Vec<u8>>,
    ) -> Result<()> {
        self.owner.require(&caller)?;
        let identifier = identifier.into();
        self.remotes.set(remote, identifier.clone())?;
        tracing::info!(
            remote = %remote,
            identifier = %hex::encode(&identifier),
            "Trusted remote set"
        );
        self.emit(EventKind::TrustedRemoteUpdated {
            remote,
            identifier: Some(identifier),
        });
        Ok(())
    }

    /// Remove trust for `remote`. Sends to it and deliveries from it are
    /// rejected afterwards.
    pub fn clear_trusted(&mut self, caller: AccountRef, remote: LedgerId) -> Result<()> {
        self.owner.require(&caller)?;
        if self.remotes.clear(remote).is_some() {
            tracing::info!(remote = %remote, "Trusted remote cleared");
            self.emit(EventKind::TrustedRemoteUpdated {
                remote,
                identifier: None,
            });
        }
        Ok(())
    }

    /// Hand the owner capability to `new_owner`.
    ///
    /// # Errors
    /// `Unauthorized`, or `ZeroAccount` for the zero account.
    pub fn transfer_ownership(&mut self, caller: AccountRef, new_owner: AccountRef) -> Result<()> {
        let previous = self.owner.transfer(&caller, new_owner)?;
        tracing::info!(previous = %previous, new = %new_owner, "Ownership transferred");
        self.emit(EventKind::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Withdraw all native value held by the bridge to `to`. Returns the
    /// amount withdrawn.
    ///
    /// # Errors
    /// `Unauthorized`, or `ZeroAccount` if `to` is the zero account.
    pub fn emergency_withdraw(&mut self, caller: AccountRef, to: AccountRef) -> Result<Amount> {
        self.owner.require(&caller)?;
        if to.is_zero() {
            return Err(SpiralError::ZeroAccount);
        }
        let amount = std::mem::take(&mut self.stray_native);
        if amount == 0 {
            return Ok(0);
        }
        tracing::info!(to = %to, amount = %amount, "Native value withdrawn");
        self.emit(EventKind::NativeWithdrawn { to, amount });
        Ok(amount)
    }
}
