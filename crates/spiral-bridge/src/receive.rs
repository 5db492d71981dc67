//! Receive orchestrator: validate an inbound message and mint.
//!
//! ```text
//! Idle ─▶ Authenticating ─▶ Decoding ─▶ DedupChecking ─▶ CapChecking ─▶ Minted
//!              │                │              │               │
//!              └────────────────┴──────────────┴───────────────┴──▶ Rejected
//! ```
//!
//! Trust checks run before any mutation. The fingerprint is consumed before
//! the mint inside one transaction, so a cap failure also un-consumes it and
//! a redelivery can never mint twice. An amount word wider than 128 bits is
//! necessarily over the cap and is rejected at the cap check, not the decode.

use serde::{Deserialize, Serialize};
use spiral_types::{
    AccountRef, Amount, EventKind, Fingerprint, LedgerId, Result, SpiralError, U256,
    decode_identifier, is_supported_width,
};

use crate::{bridge::SpiralBridge, endpoint::Endpoint, payload::TransferPayload};

/// A message handed to the bridge by the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub source: LedgerId,
    /// Sender identifier on the source ledger, as reported by the transport.
    pub source_identifier: Vec<u8>,
    /// Transport-level nonce. Not used for deduplication.
    pub transport_nonce: u64,
    pub payload: Vec<u8>,
}

/// Outcome of a committed delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveReceipt {
    pub recipient: AccountRef,
    pub amount: Amount,
    /// Sequence word the sender stamped on the source ledger.
    pub sequence: U256,
    pub fingerprint: Fingerprint,
}

impl<E: Endpoint> SpiralBridge<E> {
    /// Validate `delivery` and mint its amount to the normalized recipient.
    ///
    /// # Errors
    /// In check order: `SystemPaused`, `UntrustedCaller`, `UntrustedSource`,
    /// `MalformedPayload`, `InvalidRecipientIdentifier`, `ZeroSender`,
    /// `ZeroAmount`, `ZeroIdentifier`, `MessageAlreadyProcessed`,
    /// `ExceedsMaxSupply`.
    pub fn receive(&mut self, caller: AccountRef, delivery: &Delivery) -> Result<ReceiveReceipt> {
        self.pause.check_active()?;
        if caller != self.endpoint_account {
            tracing::warn!(caller = %caller, source = %delivery.source, "Delivery from untrusted caller");
            return Err(SpiralError::UntrustedCaller);
        }
        if !self
            .remotes
            .is_trusted(delivery.source, &delivery.source_identifier)
        {
            tracing::warn!(
                source = %delivery.source,
                claimed = %hex::encode(&delivery.source_identifier),
                "Delivery from untrusted source"
            );
            return Err(SpiralError::UntrustedSource(delivery.source));
        }

        let TransferPayload {
            to,
            amount,
            sender,
            sequence,
        } = TransferPayload::decode(&delivery.payload)?;
        if !is_supported_width(to.len()) {
            return Err(SpiralError::InvalidRecipientIdentifier { len: to.len() });
        }
        if sender.is_zero() {
            return Err(SpiralError::ZeroSender);
        }
        if amount.is_zero() {
            return Err(SpiralError::ZeroAmount);
        }
        let recipient = decode_identifier(&to)?;

        let fingerprint = Fingerprint::of_sequence_word(delivery.source, &sender, &sequence);
        let amount = self
            .store
            .transact(|tx| {
                tx.consume(fingerprint)?;
                let amount = amount.to_u128().ok_or_else(|| SpiralError::ExceedsMaxSupply {
                    requested: amount,
                    headroom: tx.state().headroom(),
                })?;
                tx.mint(&recipient, amount)?;
                Ok(amount)
            })
            .inspect_err(|err| {
                tracing::warn!(
                    source = %delivery.source,
                    from = %sender,
                    sequence = %sequence,
                    fingerprint = %fingerprint,
                    error = %err,
                    "Delivery rejected"
                );
            })?;

        tracing::info!(
            source = %delivery.source,
            from = %sender,
            to = %recipient,
            amount = %self.fmt_amount(amount),
            sequence = %sequence,
            "Transfer received"
        );
        self.emit(EventKind::TransferReceived {
            source: delivery.source,
            from: sender,
            to: recipient,
            amount,
            sequence,
        });

        Ok(ReceiveReceipt {
            recipient,
            amount,
            sequence,
            fingerprint,
        })
    }
}
