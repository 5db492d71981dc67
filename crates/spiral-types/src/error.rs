//! Error types for the Spiral token core.
//!
//! All errors use the `SP_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by class:
//! - 1xx: Authorization errors
//! - 2xx: Validation errors
//! - 3xx: Policy errors
//! - 4xx: Integrity errors
//! - 5xx: Transport errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Amount, Fingerprint, LedgerId, U256};

/// Central error enum for all Spiral operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpiralError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// Caller does not hold the owner capability.
    #[error("SP_ERR_100: Unauthorized: caller does not hold the owner capability")]
    Unauthorized,

    /// Delivery did not come from the configured transport endpoint.
    #[error("SP_ERR_101: Untrusted caller: deliveries are accepted from the endpoint only")]
    UntrustedCaller,

    // =================================================================
    // Validation Errors (2xx)
    // =================================================================
    /// The inbound payload has the wrong shape.
    #[error("SP_ERR_200: Malformed payload: {reason}")]
    MalformedPayload { reason: String },

    /// Zero-valued transfers are never accepted.
    #[error("SP_ERR_201: Zero amount")]
    ZeroAmount,

    /// The payload names the zero account as its sender.
    #[error("SP_ERR_202: Zero sender")]
    ZeroSender,

    /// The zero account cannot hold a capability.
    #[error("SP_ERR_203: Zero account is not a valid holder")]
    ZeroAccount,

    /// The recipient identifier is neither short-form nor long-form.
    #[error("SP_ERR_204: Invalid recipient identifier of {len} bytes")]
    InvalidRecipientIdentifier { len: usize },

    /// The identifier codec was handed an unsupported width.
    #[error("SP_ERR_205: Unsupported identifier width: {len} bytes")]
    UnsupportedIdentifierWidth { len: usize },

    /// The identifier decodes to the reserved all-zero account.
    #[error("SP_ERR_206: Zero identifier")]
    ZeroIdentifier,

    /// A trusted remote must name a non-empty sender identifier.
    #[error("SP_ERR_207: Empty remote identifier")]
    EmptyRemoteIdentifier,

    // =================================================================
    // Policy Errors (3xx)
    // =================================================================
    /// No trusted remote is configured for the destination ledger.
    #[error("SP_ERR_300: Destination not trusted: {0}")]
    DestinationNotTrusted(LedgerId),

    /// The claimed source identifier does not match the registry.
    #[error("SP_ERR_301: Untrusted source: {0}")]
    UntrustedSource(LedgerId),

    /// Sends and deliveries are rejected while paused.
    #[error("SP_ERR_302: System paused")]
    SystemPaused,

    // =================================================================
    // Integrity Errors (4xx)
    // =================================================================
    /// The inbound message fingerprint was already consumed.
    #[error("SP_ERR_400: Message already processed: {0}")]
    MessageAlreadyProcessed(Fingerprint),

    /// Minting would push total supply past the cap. `requested` is the
    /// wire word, which may lie beyond the `Amount` range.
    #[error("SP_ERR_401: Exceeds max supply: requested {requested}, headroom {headroom}")]
    ExceedsMaxSupply { requested: U256, headroom: Amount },

    /// Sender balance is below the requested amount.
    #[error("SP_ERR_402: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// Supply accounting no longer adds up. Critical.
    #[error("SP_ERR_403: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// The account's outbound sequence counter cannot advance further.
    #[error("SP_ERR_404: Outbound sequence exhausted")]
    SequenceExhausted,

    // =================================================================
    // Transport Errors (5xx)
    // =================================================================
    /// The endpoint refused the dispatch request.
    #[error("SP_ERR_500: Dispatch failed: {reason}")]
    DispatchFailed { reason: String },

    /// The endpoint could not estimate fees.
    #[error("SP_ERR_501: Fee estimate failed: {reason}")]
    FeeEstimateFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SP_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SP_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, bad values, etc.).
    #[error("SP_ERR_902: Configuration error: {0}")]
    Configuration(String),
}

impl SpiralError {
    /// The numeric `SP_ERR_` code of this error.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::Unauthorized => 100,
            Self::UntrustedCaller => 101,
            Self::MalformedPayload { .. } => 200,
            Self::ZeroAmount => 201,
            Self::ZeroSender => 202,
            Self::ZeroAccount => 203,
            Self::InvalidRecipientIdentifier { .. } => 204,
            Self::UnsupportedIdentifierWidth { .. } => 205,
            Self::ZeroIdentifier => 206,
            Self::EmptyRemoteIdentifier => 207,
            Self::DestinationNotTrusted(_) => 300,
            Self::UntrustedSource(_) => 301,
            Self::SystemPaused => 302,
            Self::MessageAlreadyProcessed(_) => 400,
            Self::ExceedsMaxSupply { .. } => 401,
            Self::InsufficientBalance { .. } => 402,
            Self::SupplyInvariantViolation { .. } => 403,
            Self::SequenceExhausted => 404,
            Self::DispatchFailed { .. } => 500,
            Self::FeeEstimateFailed { .. } => 501,
            Self::Internal(_) => 900,
            Self::Serialization(_) => 901,
            Self::Configuration(_) => 902,
        }
    }

    /// Shorthand for building a [`SpiralError::MalformedPayload`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SpiralError>;

impl From<serde_json::Error> for SpiralError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SpiralError::ZeroAmount;
        let msg = format!("{err}");
        assert!(msg.starts_with("SP_ERR_201"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = SpiralError::InsufficientBalance {
            needed: 100,
            available: 50,
        };
        let msg = format!("{err}");
        assert!(msg.contains("SP_ERR_402"));
        assert!(msg.contains("100"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn code_matches_display_prefix() {
        let errors = vec![
            SpiralError::Unauthorized,
            SpiralError::UntrustedCaller,
            SpiralError::malformed("short"),
            SpiralError::ZeroSender,
            SpiralError::InvalidRecipientIdentifier { len: 7 },
            SpiralError::DestinationNotTrusted(LedgerId(101)),
            SpiralError::UntrustedSource(LedgerId(102)),
            SpiralError::SystemPaused,
            SpiralError::MessageAlreadyProcessed(Fingerprint([7u8; 32])),
            SpiralError::ExceedsMaxSupply {
                requested: U256::from(2u128),
                headroom: 1,
            },
            SpiralError::DispatchFailed {
                reason: "down".into(),
            },
            SpiralError::Configuration("bad".into()),
        ];
        for err in errors {
            let msg = format!("{err}");
            let prefix = format!("SP_ERR_{}", err.code());
            assert!(msg.starts_with(&prefix), "{msg} does not start with {prefix}");
        }
    }

    #[test]
    fn serde_json_errors_convert() {
        let err: SpiralError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert_eq!(err.code(), 901);
    }
}
