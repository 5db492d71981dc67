//! Identifiers used throughout Spiral.
//!
//! Accounts are fixed-width 20-byte references, ledgers are numbered with a
//! `u32`, and inbound messages are identified by a SHA-256 [`Fingerprint`].
//! Events carry a UUIDv7 so they sort by emission time.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{SpiralError, U256, constants::SHORT_IDENTIFIER_LEN};

// ---------------------------------------------------------------------------
// AccountRef
// ---------------------------------------------------------------------------

/// Canonical local account reference (the short-form width).
///
/// The all-zero reference is reserved and never a valid holder or mint target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct AccountRef(pub [u8; SHORT_IDENTIFIER_LEN]);

impl AccountRef {
    /// The reserved all-zero reference.
    pub const ZERO: Self = Self([0u8; SHORT_IDENTIFIER_LEN]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; SHORT_IDENTIFIER_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; SHORT_IDENTIFIER_LEN] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// First four bytes in hex, for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for AccountRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for AccountRef {
    type Err = SpiralError;

    /// Parses a 40-digit hex string, with or without a `0x` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| SpiralError::Serialization(format!("account {s:?}: {e}")))?;
        let array: [u8; SHORT_IDENTIFIER_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| SpiralError::UnsupportedIdentifierWidth { len: bytes.len() })?;
        Ok(Self(array))
    }
}

impl Serialize for AccountRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Random non-zero account for tests. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl AccountRef {
    #[must_use]
    pub fn random() -> Self {
        loop {
            let candidate = Self(rand::random::<[u8; SHORT_IDENTIFIER_LEN]>());
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// LedgerId
// ---------------------------------------------------------------------------

/// Identifier distinguishing one ledger from another in cross-ledger messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct LedgerId(pub u32);

impl fmt::Display for LedgerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ledger:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Fingerprint
// ---------------------------------------------------------------------------

/// Domain-separated SHA-256 digest uniquely identifying one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Fingerprint of the `(source ledger, sender on source, sequence)` triple.
    ///
    /// `SHA-256("spiral:inbound:v1:" || source (u32 BE) || sender (20 bytes) || sequence (u256 BE))`
    ///
    /// Every field has a fixed width, so distinct triples never share an
    /// encoding. The sequence is hashed as the full wire word, so senders
    /// whose counters exceed 64 bits still get distinct fingerprints.
    #[must_use]
    pub fn of_sequence_word(source: LedgerId, sender: &AccountRef, sequence: &U256) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(crate::constants::FINGERPRINT_DOMAIN);
        hasher.update(source.0.to_be_bytes());
        hasher.update(sender.as_bytes());
        hasher.update(sequence.as_bytes());
        Self(hasher.finalize().into())
    }

    /// [`Fingerprint::of_sequence_word`] for a sequence that fits a `u64`.
    #[must_use]
    pub fn of_message(source: LedgerId, sender: &AccountRef, sequence: u64) -> Self {
        Self::of_sequence_word(source, sender, &U256::from(sequence))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fp:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// EventId
// ---------------------------------------------------------------------------

/// Unique event identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct EventId(pub Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
