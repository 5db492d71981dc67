//! Token amounts.
//!
//! Amounts are kept as integer base units (`u128`). The wire format carries
//! amounts and sequences as unsigned 256-bit big-endian words ([`U256`]); a
//! word above the 128-bit range is above any representable supply cap.
//! Human-readable whole-token figures are produced with `rust_decimal`.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Token amount in base units.
pub type Amount = u128;

/// Unsigned 256-bit big-endian word, exactly as carried on the wire.
///
/// Byte order is big-endian, so the derived ordering is numeric ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct U256(pub [u8; 32]);

impl U256 {
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// The value as a `u128`, or `None` if any of the high 16 bytes is set.
    #[must_use]
    pub fn to_u128(&self) -> Option<u128> {
        let (high, low) = self.0.split_at(16);
        if high.iter().any(|b| *b != 0) {
            return None;
        }
        let mut out = [0u8; 16];
        out.copy_from_slice(low);
        Some(u128::from_be_bytes(out))
    }

    /// The value as a `u64`, or `None` if it does not fit.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|v| u64::try_from(v).ok())
    }
}

impl From<u128> for U256 {
    fn from(value: u128) -> Self {
        let mut out = [0u8; 32];
        out[16..].copy_from_slice(&value.to_be_bytes());
        Self(out)
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        Self::from(u128::from(value))
    }
}

impl fmt::Display for U256 {
    /// Decimal when it fits 128 bits, `0x`-prefixed hex otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_u128() {
            Some(value) => write!(f, "{value}"),
            None => write!(f, "0x{}", hex::encode(self.0)),
        }
    }
}

/// Convert base units into whole tokens at the given decimals.
///
/// Returns `None` when the amount does not fit a `Decimal` mantissa.
#[must_use]
pub fn to_decimal(amount: Amount, decimals: u8) -> Option<Decimal> {
    let mantissa = i128::try_from(amount).ok()?;
    Decimal::try_from_i128_with_scale(mantissa, u32::from(decimals))
        .ok()
        .map(|d| d.normalize())
}

/// Whole-token rendering for log lines, falling back to raw base units.
#[must_use]
pub fn display_amount(amount: Amount, decimals: u8) -> String {
    to_decimal(amount, decimals).map_or_else(|| format!("{amount}u"), |d| d.to_string())
}
