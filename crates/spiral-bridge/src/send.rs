//! Send orchestrator: burn locally, then ask the endpoint to dispatch.
//!
//! ```text
//! Idle ─▶ Validating ─▶ Burned ─▶ Dispatched
//!              │           │
//!              └───────────┴──▶ Rejected (no state change)
//! ```
//!
//! The burn and the sequence increment happen inside one journaled
//! transaction together with the dispatch request. If the endpoint refuses
//! the request, both are reverted and the caller sees the endpoint's error.

use serde::{Deserialize, Serialize};
use spiral_types::{
    AccountRef, Amount, EventKind, LedgerId, Result, SpiralError, decode_identifier,
    is_supported_width,
};

use crate::{
    bridge::SpiralBridge,
    endpoint::{DispatchRequest, Endpoint},
    payload::TransferPayload,
};

/// An outbound transfer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    pub destination: LedgerId,
    /// Recipient identifier on the destination ledger (20 or 32 bytes).
    pub to: Vec<u8>,
    pub amount: Amount,
    /// Native fee budget forwarded to the endpoint.
    pub native_fee: Amount,
    /// Refund target for unspent fees; defaults to the caller.
    pub refund_to: Option<AccountRef>,
    pub fee_token: Option<AccountRef>,
    pub adapter_params: Vec<u8>,
}

impl SendRequest {
    #[must_use]
    pub fn new(destination: LedgerId, to: impl Into<Vec<u8>>, amount: Amount) -> Self {
        Self {
            destination,
            to: to.into(),
            amount,
            native_fee: 0,
            refund_to: None,
            fee_token: None,
            adapter_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_native_fee(mut self, native_fee: Amount) -> Self {
        self.native_fee = native_fee;
        self
    }

    #[must_use]
    pub fn with_refund_to(mut self, refund_to: AccountRef) -> Self {
        self.refund_to = Some(refund_to);
        self
    }

    #[must_use]
    pub fn with_fee_token(mut self, fee_token: AccountRef) -> Self {
        self.fee_token = Some(fee_token);
        self
    }

    #[must_use]
    pub fn with_adapter_params(mut self, adapter_params: impl Into<Vec<u8>>) -> Self {
        self.adapter_params = adapter_params.into();
        self
    }
}

/// Outcome of a committed send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendReceipt {
    pub destination: LedgerId,
    pub amount: Amount,
    pub sequence: u64,
}

/// Reject recipient identifiers the destination could never mint to.
pub(crate) fn validate_recipient(to: &[u8]) -> Result<()> {
    if !is_supported_width(to.len()) {
        return Err(SpiralError::InvalidRecipientIdentifier { len: to.len() });
    }
    decode_identifier(to).map(|_| ())
}

impl<E: Endpoint> SpiralBridge<E> {
    /// Burn `request.amount` from `caller` and dispatch it to the destination.
    ///
    /// # Errors
    /// In check order: `SystemPaused`, `ZeroAmount`, `InsufficientBalance`,
    /// `DestinationNotTrusted`, `InvalidRecipientIdentifier` / `ZeroIdentifier`,
    /// `SequenceExhausted`, then whatever the endpoint returns from dispatch.
    pub fn send(&mut self, caller: AccountRef, request: SendRequest) -> Result<SendReceipt> {
        self.pause.check_active()?;
        if request.amount == 0 {
            return Err(SpiralError::ZeroAmount);
        }
        let available = self.balance_of(&caller);
        if available < request.amount {
            return Err(SpiralError::InsufficientBalance {
                needed: request.amount,
                available,
            });
        }
        let trusted_remote = self
            .remotes
            .get(request.destination)
            .ok_or(SpiralError::DestinationNotTrusted(request.destination))?
            .to_vec();
        validate_recipient(&request.to)?;

        let SendRequest {
            destination,
            to,
            amount,
            native_fee,
            refund_to,
            fee_token,
            adapter_params,
        } = request;

        let Self {
            store, endpoint, ..
        } = self;
        let sequence = store
            .transact(|tx| {
                let sequence = tx.next_sequence(&caller)?;
                tx.burn(&caller, amount)?;
                let payload = TransferPayload::new(to.as_slice(), amount, caller, sequence).encode()?;
                endpoint.dispatch(DispatchRequest {
                    destination,
                    trusted_remote,
                    payload,
                    refund_to: refund_to.unwrap_or(caller),
                    fee_token,
                    adapter_params,
                    native_fee,
                })?;
                Ok(sequence)
            })
            .inspect_err(|err| {
                tracing::warn!(
                    from = %caller,
                    destination = %destination,
                    error = %err,
                    "Send aborted, burn reverted"
                );
            })?;

        tracing::info!(
            from = %caller,
            destination = %destination,
            to = %hex::encode(&to),
            amount = %self.fmt_amount(amount),
            sequence,
            "Transfer initiated"
        );
        self.emit(EventKind::TransferInitiated {
            destination,
            to,
            from: caller,
            amount,
            sequence,
        });

        Ok(SendReceipt {
            destination,
            amount,
            sequence,
        })
    }
}
