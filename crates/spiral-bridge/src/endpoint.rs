//! # Endpoint port
//!
//! The transport collaborator that carries payloads between ledgers. The
//! core only asks it to dispatch and to quote fees; authenticity of
//! deliveries is the endpoint's job, semantic validation is ours.
//!
//! Calls are synchronous: an operation never suspends halfway through.

#[cfg(any(test, feature = "test-helpers"))]
use std::cell::RefCell;

use serde::{Deserialize, Serialize};
#[cfg(any(test, feature = "test-helpers"))]
use spiral_types::SpiralError;
use spiral_types::{AccountRef, Amount, LedgerId, Result};

/// Everything the endpoint needs to send one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequest {
    pub destination: LedgerId,
    /// Trusted sender identifier registered for `destination`.
    pub trusted_remote: Vec<u8>,
    pub payload: Vec<u8>,
    /// Where unspent fee budget is refunded.
    pub refund_to: AccountRef,
    /// Token used to pay fees instead of native value, if any.
    pub fee_token: Option<AccountRef>,
    pub adapter_params: Vec<u8>,
    /// Native fee budget attached to the request.
    pub native_fee: Amount,
}

/// Endpoint fee estimate, returned to callers unmodified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub native_fee: Amount,
    /// Fee when paying in the alternate fee token.
    pub token_fee: Amount,
}

/// A dry-run fee query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuery {
    pub destination: LedgerId,
    pub payload: Vec<u8>,
    pub pay_in_fee_token: bool,
    pub adapter_params: Vec<u8>,
}

/// Outbound port to the message transport.
pub trait Endpoint {
    /// Hand a message to the transport.
    fn dispatch(&mut self, request: DispatchRequest) -> Result<()>;

    /// Estimate the fee for sending `query.payload`.
    fn estimate_fees(&self, query: &FeeQuery) -> Result<FeeQuote>;
}

// =============================================================================
// In-memory endpoint
// =============================================================================

/// In-memory endpoint that records every request.
///
/// Used by tests and local simulations; dispatched payloads can be fed to
/// another bridge's receive path to emulate delivery. Only built for tests
/// or with the `test-helpers` feature.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Default)]
pub struct MockEndpoint {
    /// Requests accepted so far, oldest first.
    pub dispatched: Vec<DispatchRequest>,
    /// When set, `dispatch` fails with this reason.
    pub fail_dispatch: Option<String>,
    /// Quote returned by `estimate_fees`.
    pub quote: FeeQuote,
    /// When set, `estimate_fees` fails with this reason.
    pub fail_estimate: Option<String>,
    /// Queries seen by `estimate_fees`.
    pub queries: RefCell<Vec<FeeQuery>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl MockEndpoint {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quote(native_fee: Amount, token_fee: Amount) -> Self {
        Self {
            quote: FeeQuote {
                native_fee,
                token_fee,
            },
            ..Self::default()
        }
    }

    /// Remove and return every recorded dispatch.
    pub fn drain(&mut self) -> Vec<DispatchRequest> {
        std::mem::take(&mut self.dispatched)
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Endpoint for MockEndpoint {
    fn dispatch(&mut self, request: DispatchRequest) -> Result<()> {
        if let Some(reason) = &self.fail_dispatch {
            return Err(SpiralError::DispatchFailed {
                reason: reason.clone(),
            });
        }
        self.dispatched.push(request);
        Ok(())
    }

    fn estimate_fees(&self, query: &FeeQuery) -> Result<FeeQuote> {
        if let Some(reason) = &self.fail_estimate {
            return Err(SpiralError::FeeEstimateFailed {
                reason: reason.clone(),
            });
        }
        self.queries.borrow_mut().push(query.clone());
        Ok(self.quote)
    }
}
