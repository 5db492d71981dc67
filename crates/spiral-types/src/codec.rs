//! Identifier codec: variable-width destination identifiers → [`AccountRef`].
//!
//! Two widths are accepted:
//!
//! ```text
//! short-form (20 bytes):  [ account ............................ ]
//! long-form  (32 bytes):  [ 00 00 ... 00 ][ account ............ ]
//!                           12 high bytes   20 low-order bytes
//! ```
//!
//! Long-form values are truncated to their low-order (trailing) bytes.
//! Every other width is rejected, and so is the all-zero account.

use crate::{
    AccountRef, Result, SpiralError,
    constants::{LONG_IDENTIFIER_LEN, SHORT_IDENTIFIER_LEN},
};

/// Whether `len` is one of the two accepted identifier widths.
#[must_use]
pub const fn is_supported_width(len: usize) -> bool {
    len == SHORT_IDENTIFIER_LEN || len == LONG_IDENTIFIER_LEN
}

/// Normalize a destination identifier into the canonical account reference.
///
/// Pure: identical input always yields identical output.
///
/// # Errors
/// - [`SpiralError::UnsupportedIdentifierWidth`] for widths other than 20 or 32.
/// - [`SpiralError::ZeroIdentifier`] if the decoded account is all zeros.
pub fn decode_identifier(bytes: &[u8]) -> Result<AccountRef> {
    if !is_supported_width(bytes.len()) {
        return Err(SpiralError::UnsupportedIdentifierWidth { len: bytes.len() });
    }

    let low = &bytes[bytes.len() - SHORT_IDENTIFIER_LEN..];
    let mut canonical = [0u8; SHORT_IDENTIFIER_LEN];
    canonical.copy_from_slice(low);

    let account = AccountRef(canonical);
    if account.is_zero() {
        return Err(SpiralError::ZeroIdentifier);
    }
    Ok(account)
}

/// Short-form encoding: the canonical bytes themselves.
#[must_use]
pub fn encode_short(account: &AccountRef) -> [u8; SHORT_IDENTIFIER_LEN] {
    account.0
}

/// Long-form encoding: the canonical bytes left-padded with zeros.
#[must_use]
pub fn encode_long(account: &AccountRef) -> [u8; LONG_IDENTIFIER_LEN] {
    let mut out = [0u8; LONG_IDENTIFIER_LEN];
    out[LONG_IDENTIFIER_LEN - SHORT_IDENTIFIER_LEN..].copy_from_slice(&account.0);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(seed: u8) -> AccountRef {
        let mut bytes = [0u8; SHORT_IDENTIFIER_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = seed.wrapping_add(u8::try_from(i).unwrap());
        }
        AccountRef(bytes)
    }

    #[test]
    fn short_form_roundtrips() {
        let a = account(1);
        assert_eq!(decode_identifier(&encode_short(&a)).unwrap(), a);
    }

    #[test]
    fn long_form_roundtrips() {
        let a = account(9);
        assert_eq!(decode_identifier(&encode_long(&a)).unwrap(), a);
    }

    #[test]
    fn long_form_keeps_low_order_bytes() {
        let mut long = [0xffu8; LONG_IDENTIFIER_LEN];
        long[LONG_IDENTIFIER_LEN - SHORT_IDENTIFIER_LEN..].copy_from_slice(&[0x11; SHORT_IDENTIFIER_LEN]);
        let decoded = decode_identifier(&long).unwrap();
        assert_eq!(decoded, AccountRef([0x11; SHORT_IDENTIFIER_LEN]));
    }

    #[test]
    fn decoding_is_pure() {
        let long = encode_long(&account(42));
        assert_eq!(decode_identifier(&long), decode_identifier(&long));
    }

    #[test]
    fn other_widths_rejected() {
        for len in [0usize, 1, 19, 21, 31, 33, 64] {
            let bytes = vec![7u8; len];
            assert_eq!(
                decode_identifier(&bytes),
                Err(SpiralError::UnsupportedIdentifierWidth { len }),
                "width {len} must be rejected"
            );
            assert!(!is_supported_width(len));
        }
    }

    #[test]
    fn zero_identifier_rejected_at_both_widths() {
        assert_eq!(
            decode_identifier(&[0u8; SHORT_IDENTIFIER_LEN]),
            Err(SpiralError::ZeroIdentifier)
        );
        assert_eq!(
            decode_identifier(&[0u8; LONG_IDENTIFIER_LEN]),
            Err(SpiralError::ZeroIdentifier)
        );
    }

    #[test]
    fn long_form_with_zero_low_bytes_is_zero() {
        let mut long = [0u8; LONG_IDENTIFIER_LEN];
        long[0] = 1;
        assert_eq!(decode_identifier(&long), Err(SpiralError::ZeroIdentifier));
    }
}
