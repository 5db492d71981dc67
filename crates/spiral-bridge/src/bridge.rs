//! The bridge facade: one explicit state structure per ledger deployment.
//!
//! [`SpiralBridge`] owns the ledger store, the registry, the administrative
//! gates and the endpoint. Every mutating entry point takes `&mut self`, so
//! calls are serialized by construction. The entry points themselves live
//! in `send`, `receive`, `quote` and `admin`.

use spiral_ledger::{LedgerState, LedgerStore, OwnerCapability, PauseSwitch, TrustedRemotes};
use spiral_types::{
    AccountRef, Amount, BridgeEvent, EventKind, Fingerprint, LedgerId, Result, SpiralError,
    TokenConfig, display_amount,
};

use crate::endpoint::Endpoint;

/// Token identity, fixed at deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub local_ledger: LedgerId,
}

/// Cross-ledger token core for one ledger.
#[derive(Debug)]
pub struct SpiralBridge<E: Endpoint> {
    pub(crate) token: TokenMetadata,
    pub(crate) store: LedgerStore,
    pub(crate) remotes: TrustedRemotes,
    pub(crate) pause: PauseSwitch,
    pub(crate) owner: OwnerCapability,
    /// Account the endpoint calls `receive` from.
    pub(crate) endpoint_account: AccountRef,
    pub(crate) endpoint: E,
    /// Native value refunded to the bridge by the transport.
    pub(crate) stray_native: Amount,
    events: Vec<BridgeEvent>,
}

impl<E: Endpoint> SpiralBridge<E> {
    /// Deploy: validate the config and credit the genesis supply to the owner.
    pub fn new(config: TokenConfig, endpoint: E) -> Result<Self> {
        config.validate()?;
        let state = LedgerState::genesis(config.max_supply, config.owner, config.initial_supply)?;
        let owner = OwnerCapability::new(config.owner)?;

        tracing::info!(
            token = %config.symbol,
            ledger = %config.local_ledger,
            owner = %config.owner,
            initial_supply = %display_amount(config.initial_supply, config.decimals),
            max_supply = %display_amount(config.max_supply, config.decimals),
            "Spiral bridge deployed"
        );

        Ok(Self {
            token: TokenMetadata {
                name: config.name,
                symbol: config.symbol,
                decimals: config.decimals,
                local_ledger: config.local_ledger,
            },
            store: LedgerStore::new(state),
            remotes: TrustedRemotes::new(),
            pause: PauseSwitch::new(),
            owner,
            endpoint_account: config.endpoint,
            endpoint,
            stray_native: 0,
            events: Vec::new(),
        })
    }

    // ---------------------------------------------------------------------
    // Read surface
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn token(&self) -> &TokenMetadata {
        &self.token
    }

    #[must_use]
    pub fn balance_of(&self, account: &AccountRef) -> Amount {
        self.store.state().balance(account)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.store.state().total_supply()
    }

    #[must_use]
    pub fn max_supply(&self) -> Amount {
        self.store.state().max_supply()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    #[must_use]
    pub fn owner(&self) -> AccountRef {
        self.owner.holder()
    }

    #[must_use]
    pub fn endpoint_account(&self) -> AccountRef {
        self.endpoint_account
    }

    /// Sequence the next send from `account` will carry.
    #[must_use]
    pub fn current_sequence(&self, account: &AccountRef) -> u64 {
        self.store.replay().current_sequence(account)
    }

    #[must_use]
    pub fn is_consumed(&self, fingerprint: &Fingerprint) -> bool {
        self.store.replay().is_consumed(fingerprint)
    }

    #[must_use]
    pub fn trusted_remote(&self, remote: LedgerId) -> Option<&[u8]> {
        self.remotes.get(remote)
    }

    /// Native value currently held for emergency withdrawal.
    #[must_use]
    pub fn stray_native(&self) -> Amount {
        self.stray_native
    }

    #[must_use]
    pub fn ledger(&self) -> &LedgerState {
        self.store.state()
    }

    /// Check every supply invariant.
    pub fn verify_supply(&self) -> Result<()> {
        self.store.state().verify_supply()
    }

    #[must_use]
    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Mutable access for driving the endpoint in simulations.
    pub fn endpoint_mut(&mut self) -> &mut E {
        &mut self.endpoint
    }

    // ---------------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn events(&self) -> &[BridgeEvent] {
        &self.events
    }

    /// Remove and return every event emitted so far.
    pub fn take_events(&mut self) -> Vec<BridgeEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, kind: EventKind) {
        tracing::debug!(event = %kind, "Event emitted");
        self.events.push(BridgeEvent::now(kind));
    }

    /// Whole-token rendering for log fields.
    pub(crate) fn fmt_amount(&self, amount: Amount) -> String {
        display_amount(amount, self.token.decimals)
    }

    /// Accept native value refunded by the transport.
    ///
    /// # Errors
    /// `UntrustedCaller` unless `caller` is the endpoint account.
    pub fn credit_native(&mut self, caller: AccountRef, amount: Amount) -> Result<()> {
        if caller != self.endpoint_account {
            tracing::warn!(caller = %caller, "Native credit from untrusted caller");
            return Err(SpiralError::UntrustedCaller);
        }
        self.stray_native = self.stray_native.saturating_add(amount);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use spiral_types::constants::{DEFAULT_INITIAL_SUPPLY, DEFAULT_MAX_SUPPLY};

    use super::*;
    use crate::endpoint::MockEndpoint;

    #[test]
    fn deploy_credits_owner() {
        let owner = AccountRef::random();
        let config = TokenConfig::new(LedgerId(101), owner, AccountRef::random());
        let bridge = SpiralBridge::new(config, MockEndpoint::new()).unwrap();

        assert_eq!(bridge.balance_of(&owner), DEFAULT_INITIAL_SUPPLY);
        assert_eq!(bridge.total_supply(), DEFAULT_INITIAL_SUPPLY);
        assert_eq!(bridge.max_supply(), DEFAULT_MAX_SUPPLY);
        assert_eq!(bridge.owner(), owner);
        assert!(!bridge.is_paused());
        assert_eq!(bridge.token().decimals, 18);
        assert!(bridge.events().is_empty());
        bridge.verify_supply().unwrap();
    }

    #[test]
    fn deploy_rejects_invalid_config() {
        let mut config = TokenConfig::new(LedgerId(101), AccountRef::random(), AccountRef::random());
        config.initial_supply = config.max_supply + 1;
        assert!(SpiralBridge::new(config, MockEndpoint::new()).is_err());
    }

    #[test]
    fn native_credits_accumulate() {
        let config = TokenConfig::new(LedgerId(101), AccountRef::random(), AccountRef::random());
        let mut bridge = SpiralBridge::new(config, MockEndpoint::new()).unwrap();
        let endpoint = bridge.endpoint_account();
        bridge.credit_native(endpoint, 5).unwrap();
        bridge.credit_native(endpoint, 7).unwrap();
        assert_eq!(bridge.stray_native(), 12);
    }

    #[test]
    fn only_endpoint_may_credit_native() {
        let owner = AccountRef::random();
        let config = TokenConfig::new(LedgerId(101), owner, AccountRef::random());
        let mut bridge = SpiralBridge::new(config, MockEndpoint::new()).unwrap();
        for caller in [owner, AccountRef::random()] {
            assert_eq!(bridge.credit_native(caller, 9), Err(SpiralError::UntrustedCaller));
        }
        assert_eq!(bridge.stray_native(), 0);
    }
}
