//! Replay guard: prevents double-minting and sequences outbound messages.
//!
//! Inbound: each message is identified by its [`Fingerprint`]. Consuming the
//! same fingerprint a second time returns
//! [`SpiralError::MessageAlreadyProcessed`], no matter how much later it
//! arrives. Consumed fingerprints are never evicted.
//!
//! Outbound: every account gets a gap-free counter starting at 0.

use std::collections::{HashMap, HashSet};

use spiral_types::{AccountRef, Fingerprint, LedgerId, Result, SpiralError};

/// Consumed-message set plus per-account outbound sequence counters.
#[derive(Debug, Clone, Default)]
pub struct ReplayGuard {
    /// Fingerprints of every inbound message ever accepted.
    consumed: HashSet<Fingerprint>,
    /// Next outbound sequence per account.
    sequences: HashMap<AccountRef, u64>,
}

impl ReplayGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fingerprint of an inbound `(source, sender, sequence)` triple.
    #[must_use]
    pub fn fingerprint(source: LedgerId, sender: &AccountRef, sequence: u64) -> Fingerprint {
        Fingerprint::of_message(source, sender, sequence)
    }

    /// Mark a fingerprint as consumed.
    ///
    /// # Errors
    /// Returns [`SpiralError::MessageAlreadyProcessed`] if `fingerprint` was
    /// consumed before.
    pub fn consume(&mut self, fingerprint: Fingerprint) -> Result<()> {
        if !self.consumed.insert(fingerprint) {
            return Err(SpiralError::MessageAlreadyProcessed(fingerprint));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_consumed(&self, fingerprint: &Fingerprint) -> bool {
        self.consumed.contains(fingerprint)
    }

    /// Number of fingerprints consumed so far.
    #[must_use]
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// The sequence the next send from `account` will carry.
    #[must_use]
    pub fn current_sequence(&self, account: &AccountRef) -> u64 {
        self.sequences.get(account).copied().unwrap_or(0)
    }

    /// Return the account's current sequence and advance it by one.
    ///
    /// # Errors
    /// Returns [`SpiralError::SequenceExhausted`] if the counter is at `u64::MAX`.
    pub fn next_sequence(&mut self, account: &AccountRef) -> Result<u64> {
        let counter = self.sequences.entry(*account).or_insert(0);
        let issued = *counter;
        *counter = issued.checked_add(1).ok_or(SpiralError::SequenceExhausted)?;
        Ok(issued)
    }

    pub(crate) fn forget(&mut self, fingerprint: &Fingerprint) {
        self.consumed.remove(fingerprint);
    }

    pub(crate) fn rewind_sequence(&mut self, account: &AccountRef) {
        if let Some(counter) = self.sequences.get_mut(account) {
            *counter = counter.saturating_sub(1);
            if *counter == 0 {
                self.sequences.remove(account);
            }
        }
    }
}
