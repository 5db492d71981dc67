//! Trusted-remote registry.
//!
//! Maps each remote ledger to the sender identifier expected on it. A ledger
//! with no entry is untrusted in both directions: sends to it and deliveries
//! from it are rejected.

use std::collections::HashMap;

use spiral_types::{LedgerId, Result, SpiralError};

/// Per-remote-ledger allow-list of expected sender identifiers.
#[derive(Debug, Clone, Default)]
pub struct TrustedRemotes {
    remotes: HashMap<LedgerId, Vec<u8>>,
}

impl TrustedRemotes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Trust `identifier` as the sender on `remote`, replacing any prior entry.
    ///
    /// # Errors
    /// Returns [`SpiralError::EmptyRemoteIdentifier`] if `identifier` is empty.
    pub fn set(&mut self, remote: LedgerId, identifier: Vec<u8>) -> Result<()> {
        if identifier.is_empty() {
            return Err(SpiralError::EmptyRemoteIdentifier);
        }
        self.remotes.insert(remote, identifier);
        Ok(())
    }

    /// Remove the entry for `remote`. Returns the old identifier, if any.
    pub fn clear(&mut self, remote: LedgerId) -> Option<Vec<u8>> {
        self.remotes.remove(&remote)
    }

    /// True iff `remote` has an entry byte-equal to `candidate`.
    #[must_use]
    pub fn is_trusted(&self, remote: LedgerId, candidate: &[u8]) -> bool {
        self.remotes
            .get(&remote)
            .is_some_and(|stored| stored.as_slice() == candidate)
    }

    /// The stored identifier for `remote`.
    #[must_use]
    pub fn get(&self, remote: LedgerId) -> Option<&[u8]> {
        self.remotes.get(&remote).map(Vec::as_slice)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.remotes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remotes.is_empty()
    }
}
