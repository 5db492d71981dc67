//! Observable events emitted by committed operations.
//!
//! Events are appended only after an operation commits, so a rejected call
//! never leaves an event behind.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountRef, Amount, EventId, LedgerId, U256};

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Tokens were burned locally and a message was handed to the endpoint.
    TransferInitiated {
        destination: LedgerId,
        /// Destination identifier exactly as supplied by the sender.
        to: Vec<u8>,
        from: AccountRef,
        amount: Amount,
        sequence: u64,
    },
    /// An inbound message was accepted and tokens were minted.
    TransferReceived {
        source: LedgerId,
        from: AccountRef,
        to: AccountRef,
        amount: Amount,
        /// Sequence word exactly as stamped on the source ledger.
        sequence: U256,
    },
    /// A trusted remote was set (`Some`) or cleared (`None`).
    TrustedRemoteUpdated {
        remote: LedgerId,
        identifier: Option<Vec<u8>>,
    },
    Paused {
        by: AccountRef,
    },
    Unpaused {
        by: AccountRef,
    },
    OwnershipTransferred {
        previous: AccountRef,
        new: AccountRef,
    },
    /// Stray native value was withdrawn by the owner.
    NativeWithdrawn {
        to: AccountRef,
        amount: Amount,
    },
}

impl EventKind {
    /// Stable upper-case name for logs and indexing.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TransferInitiated { .. } => "TRANSFER_INITIATED",
            Self::TransferReceived { .. } => "TRANSFER_RECEIVED",
            Self::TrustedRemoteUpdated { .. } => "TRUSTED_REMOTE_UPDATED",
            Self::Paused { .. } => "PAUSED",
            Self::Unpaused { .. } => "UNPAUSED",
            Self::OwnershipTransferred { .. } => "OWNERSHIP_TRANSFERRED",
            Self::NativeWithdrawn { .. } => "NATIVE_WITHDRAWN",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A committed event with its identity and emission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeEvent {
    pub id: EventId,
    pub emitted_at: DateTime<Utc>,
    pub kind: EventKind,
}

impl BridgeEvent {
    #[must_use]
    pub fn now(kind: EventKind) -> Self {
        Self {
            id: EventId::new(),
            emitted_at: Utc::now(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        let kind = EventKind::Paused {
            by: AccountRef::random(),
        };
        assert_eq!(format!("{kind}"), "PAUSED");
        let kind = EventKind::TrustedRemoteUpdated {
            remote: LedgerId(1),
            identifier: None,
        };
        assert_eq!(kind.name(), "TRUSTED_REMOTE_UPDATED");
    }

    #[test]
    fn event_serde_roundtrip() {
        let event = BridgeEvent::now(EventKind::TransferReceived {
            source: LedgerId(102),
            from: AccountRef::random(),
            to: AccountRef::random(),
            amount: 10 * crate::constants::ONE_TOKEN,
            sequence: U256::from(3u64),
        });
        let json = serde_json::to_string(&event).unwrap();
        let back: BridgeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event.id, back.id);
        assert_eq!(event.kind, back.kind);
    }
}
