//! System-wide constants for the Spiral token core.

use crate::Amount;

/// Width of the canonical (short-form) account reference, in bytes.
pub const SHORT_IDENTIFIER_LEN: usize = 20;

/// Width of the long-form account identifier used by wider ledgers, in bytes.
pub const LONG_IDENTIFIER_LEN: usize = 32;

/// Default token decimals.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest decimals value whose amounts can still be rendered as a `Decimal`.
pub const MAX_DECIMALS: u8 = 28;

/// One whole token at the default decimals.
pub const ONE_TOKEN: Amount = 1_000_000_000_000_000_000;

/// Default supply cap: one billion tokens.
pub const DEFAULT_MAX_SUPPLY: Amount = 1_000_000_000 * ONE_TOKEN;

/// Default genesis supply credited to the deployer: one million tokens.
pub const DEFAULT_INITIAL_SUPPLY: Amount = 1_000_000 * ONE_TOKEN;

/// Domain separator prefix for inbound message fingerprints.
pub const FINGERPRINT_DOMAIN: &[u8] = b"spiral:inbound:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Spiral";
