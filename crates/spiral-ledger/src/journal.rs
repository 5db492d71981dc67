//! All-or-nothing execution of ledger mutations.
//!
//! [`LedgerStore::transact`] hands the operation a [`Txn`] that records an
//! undo entry for every burn, mint, sequence issue and fingerprint
//! consumption. If the operation returns an error the entries are reverted
//! newest-first, so a rejected call leaves no trace:
//!
//! ```text
//! transact(op):
//!   op(txn) ── Ok(v)  ──▶ commit (drop journal) ──▶ Ok(v)
//!           └─ Err(e) ──▶ revert journal in reverse ──▶ Err(e)
//! ```
//!
//! Callers only ever get `&LedgerState` / `&ReplayGuard` outside a
//! transaction, which keeps the two orchestrators the sole mutators.

use spiral_types::{AccountRef, Amount, Fingerprint, Result};

use crate::{ledger_state::LedgerState, replay_guard::ReplayGuard};

/// One reversible mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
enum JournalEntry {
    Burned { account: AccountRef, amount: Amount },
    Minted { account: AccountRef, amount: Amount },
    SequenceIssued { account: AccountRef },
    Consumed(Fingerprint),
}

/// Ledger state and replay guard, mutated only through [`Txn`].
#[derive(Debug, Clone)]
pub struct LedgerStore {
    state: LedgerState,
    replay: ReplayGuard,
}

impl LedgerStore {
    #[must_use]
    pub fn new(state: LedgerState) -> Self {
        Self {
            state,
            replay: ReplayGuard::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    #[must_use]
    pub fn replay(&self) -> &ReplayGuard {
        &self.replay
    }

    /// Run `op` as one indivisible unit.
    ///
    /// Every mutation made through the [`Txn`] is kept if `op` returns `Ok`
    /// and reverted if it returns `Err`.
    pub fn transact<T>(&mut self, op: impl FnOnce(&mut Txn<'_>) -> Result<T>) -> Result<T> {
        let mut txn = Txn {
            store: self,
            journal: Vec::new(),
        };
        match op(&mut txn) {
            Ok(value) => Ok(value),
            Err(err) => {
                txn.rollback();
                Err(err)
            }
        }
    }
}

/// An open transaction against a [`LedgerStore`].
pub struct Txn<'a> {
    store: &'a mut LedgerStore,
    journal: Vec<JournalEntry>,
}

impl Txn<'_> {
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.store.state
    }

    #[must_use]
    pub fn replay(&self) -> &ReplayGuard {
        &self.store.replay
    }

    /// Number of mutations recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    /// See [`LedgerState::burn`].
    pub fn burn(&mut self, account: &AccountRef, amount: Amount) -> Result<()> {
        self.store.state.burn(account, amount)?;
        self.journal.push(JournalEntry::Burned {
            account: *account,
            amount,
        });
        Ok(())
    }

    /// See [`LedgerState::mint`].
    pub fn mint(&mut self, account: &AccountRef, amount: Amount) -> Result<()> {
        self.store.state.mint(account, amount)?;
        self.journal.push(JournalEntry::Minted {
            account: *account,
            amount,
        });
        Ok(())
    }

    /// See [`ReplayGuard::next_sequence`].
    pub fn next_sequence(&mut self, account: &AccountRef) -> Result<u64> {
        let sequence = self.store.replay.next_sequence(account)?;
        self.journal
            .push(JournalEntry::SequenceIssued { account: *account });
        Ok(sequence)
    }

    /// See [`ReplayGuard::consume`].
    pub fn consume(&mut self, fingerprint: Fingerprint) -> Result<()> {
        self.store.replay.consume(fingerprint)?;
        self.journal.push(JournalEntry::Consumed(fingerprint));
        Ok(())
    }

    fn rollback(self) {
        let reverted = self.journal.len();
        for entry in self.journal.into_iter().rev() {
            match entry {
                JournalEntry::Burned { account, amount } => {
                    self.store.state.revert_burn(&account, amount);
                }
                JournalEntry::Minted { account, amount } => {
                    self.store.state.revert_mint(&account, amount);
                }
                JournalEntry::SequenceIssued { account } => {
                    self.store.replay.rewind_sequence(&account);
                }
                JournalEntry::Consumed(fingerprint) => {
                    self.store.replay.forget(&fingerprint);
                }
            }
        }
        if reverted > 0 {
            tracing::debug!(entries = reverted, "Transaction rolled back");
        }
    }
}
