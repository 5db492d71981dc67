//! # spiral-ledger
//!
//! Local ledger state for the Spiral token core.
//!
//! ## Components
//!
//! 1. **LedgerState**: balances per account, total supply, supply cap
//! 2. **SupplyConservation**: genesis/mint/burn totals for auditing
//! 3. **ReplayGuard**: consumed inbound fingerprints + outbound sequences
//! 4. **TrustedRemotes**: expected sender identifier per remote ledger
//! 5. **PauseSwitch** and **OwnerCapability**: administrative gates
//! 6. **LedgerStore**: wraps state + guard and executes each operation
//!    all-or-nothing through a journaled [`Txn`]

pub mod journal;
pub mod ledger_state;
pub mod owner;
pub mod pause;
pub mod registry;
pub mod replay_guard;
pub mod supply;

pub use journal::{LedgerStore, Txn};
pub use ledger_state::LedgerState;
pub use owner::OwnerCapability;
pub use pause::PauseSwitch;
pub use registry::TrustedRemotes;
pub use replay_guard::ReplayGuard;
pub use supply::SupplyConservation;
