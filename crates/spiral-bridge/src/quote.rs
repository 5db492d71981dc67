//! Fee estimation for a prospective send. Read-only.

use spiral_types::{AccountRef, Amount, LedgerId, Result, SpiralError};

use crate::{
    bridge::SpiralBridge,
    endpoint::{Endpoint, FeeQuery, FeeQuote},
    payload::TransferPayload,
    send::validate_recipient,
};

impl<E: Endpoint> SpiralBridge<E> {
    /// Ask the endpoint what sending `amount` to `to` on `destination` would
    /// cost. The payload is built exactly as `send` would build it next.
    ///
    /// # Errors
    /// `ZeroAmount`, `DestinationNotTrusted`, `InvalidRecipientIdentifier` /
    /// `ZeroIdentifier`, or the endpoint's own failure.
    pub fn quote_send(
        &self,
        caller: AccountRef,
        destination: LedgerId,
        to: &[u8],
        amount: Amount,
        pay_in_fee_token: bool,
        adapter_params: &[u8],
    ) -> Result<FeeQuote> {
        if amount == 0 {
            return Err(SpiralError::ZeroAmount);
        }
        if self.remotes.get(destination).is_none() {
            return Err(SpiralError::DestinationNotTrusted(destination));
        }
        validate_recipient(to)?;

        let payload =
            TransferPayload::new(to, amount, caller, self.current_sequence(&caller)).encode()?;
        let quote = self.endpoint.estimate_fees(&FeeQuery {
            destination,
            payload,
            pay_in_fee_token,
            adapter_params: adapter_params.to_vec(),
        })?;

        tracing::debug!(
            from = %caller,
            destination = %destination,
            native_fee = %quote.native_fee,
            token_fee = %quote.token_fee,
            "Fee quote"
        );
        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use spiral_types::TokenConfig;

    use super::*;
    use crate::{endpoint::MockEndpoint, send::SendRequest};

    const REMOTE: LedgerId = LedgerId(102);

    fn setup() -> (SpiralBridge<MockEndpoint>, AccountRef) {
        let owner = AccountRef::random();
        let config = TokenConfig::new(LedgerId(101), owner, AccountRef::random());
        let mut bridge = SpiralBridge::new(config, MockEndpoint::with_quote(1_000, 250)).unwrap();
        bridge.set_trusted(owner, REMOTE, vec![0xee; 20]).unwrap();
        bridge.take_events();
        (bridge, owner)
    }

    #[test]
    fn returns_endpoint_quote_unmodified() {
        let (bridge, owner) = setup();
        let to = AccountRef::random();
        let quote = bridge.quote_send(owner, REMOTE, &to.0, 5, true, &[3, 4]).unwrap();
        assert_eq!(
            quote,
            FeeQuote {
                native_fee: 1_000,
                token_fee: 250
            }
        );

        let queries = bridge.endpoint().queries.borrow();
        assert!(queries[0].pay_in_fee_token);
        assert_eq!(queries[0].adapter_params, vec![3, 4]);
        let payload = TransferPayload::decode(&queries[0].payload).unwrap();
        assert_eq!(payload.sender, owner);
        assert_eq!(payload.sequence.to_u64(), Some(0));
    }

    #[test]
    fn payload_tracks_next_sequence() {
        let (mut bridge, owner) = setup();
        let to = AccountRef::random();
        bridge.send(owner, SendRequest::new(REMOTE, to.0, 1)).unwrap();

        bridge.quote_send(owner, REMOTE, &to.0, 1, false, &[]).unwrap();
        let queries = bridge.endpoint().queries.borrow();
        assert_eq!(TransferPayload::decode(&queries[0].payload).unwrap().sequence.to_u64(), Some(1));
    }

    #[test]
    fn shares_send_preconditions() {
        let (bridge, owner) = setup();
        let to = AccountRef::random().0;
        assert_eq!(
            bridge.quote_send(owner, REMOTE, &to, 0, false, &[]),
            Err(SpiralError::ZeroAmount)
        );
        assert_eq!(
            bridge.quote_send(owner, LedgerId(9), &to, 1, false, &[]),
            Err(SpiralError::DestinationNotTrusted(LedgerId(9)))
        );
        assert_eq!(
            bridge.quote_send(owner, REMOTE, &[1; 5], 1, false, &[]),
            Err(SpiralError::InvalidRecipientIdentifier { len: 5 })
        );
        assert!(bridge.endpoint().queries.borrow().is_empty());
    }

    #[test]
    fn never_mutates() {
        let (bridge, owner) = setup();
        let supply = bridge.total_supply();
        let to = AccountRef::random().0;
        for _ in 0..3 {
            bridge.quote_send(owner, REMOTE, &to, 10, false, &[]).unwrap();
        }
        assert_eq!(bridge.total_supply(), supply);
        assert_eq!(bridge.current_sequence(&owner), 0);
        assert!(bridge.events().is_empty());
    }

    #[test]
    fn endpoint_failure_propagates() {
        let (mut bridge, owner) = setup();
        bridge.endpoint_mut().fail_estimate = Some("oracle down".into());
        let err = bridge
            .quote_send(owner, REMOTE, &AccountRef::random().0, 1, false, &[])
            .unwrap_err();
        assert_eq!(err.code(), 501);
    }
}
