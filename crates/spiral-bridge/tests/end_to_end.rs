//! End-to-end tests across two bridge deployments.
//!
//! Ledger A and ledger B each run a [`SpiralBridge`] with a recording
//! endpoint. The harness moves whatever A dispatched into B's receive path
//! (and back), playing the role of the transport.

use spiral_bridge::{Delivery, DispatchRequest, MockEndpoint, SendRequest, SpiralBridge};
use spiral_types::{
    AccountRef, Fingerprint, LedgerId, SpiralError, TokenConfig,
    constants::{DEFAULT_INITIAL_SUPPLY, DEFAULT_MAX_SUPPLY, ONE_TOKEN},
    encode_long,
};

const LEDGER_A: LedgerId = LedgerId(101);
const LEDGER_B: LedgerId = LedgerId(102);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One side of the loopback.
struct Side {
    ledger: LedgerId,
    /// Identifier the other side registers as trusted for this ledger.
    address: AccountRef,
    owner: AccountRef,
    endpoint: AccountRef,
    bridge: SpiralBridge<MockEndpoint>,
}

impl Side {
    fn deploy(ledger: LedgerId) -> Self {
        let owner = AccountRef::random();
        let endpoint = AccountRef::random();
        let config = TokenConfig::new(ledger, owner, endpoint);
        Self {
            ledger,
            address: AccountRef::random(),
            owner,
            endpoint,
            bridge: SpiralBridge::new(config, MockEndpoint::new()).expect("deploy should succeed"),
        }
    }

    /// Delivery this side would receive for a request dispatched by `from`.
    fn delivery_from(from: &Side, request: &DispatchRequest) -> Delivery {
        Delivery {
            source: from.ledger,
            source_identifier: from.address.0.to_vec(),
            transport_nonce: 0,
            payload: request.payload.clone(),
        }
    }
}

struct Loopback {
    a: Side,
    b: Side,
}

impl Loopback {
    fn new() -> Self {
        init_tracing();
        let mut a = Side::deploy(LEDGER_A);
        let mut b = Side::deploy(LEDGER_B);
        a.bridge
            .set_trusted(a.owner, LEDGER_B, b.address.0)
            .expect("owner may set trusted remote");
        b.bridge
            .set_trusted(b.owner, LEDGER_A, a.address.0)
            .expect("owner may set trusted remote");
        a.bridge.take_events();
        b.bridge.take_events();
        Self { a, b }
    }

    /// Deliver everything A dispatched to B. Returns the deliveries made.
    fn relay_a_to_b(&mut self) -> Vec<Delivery> {
        let requests = self.a.bridge.endpoint_mut().drain();
        let mut delivered = Vec::new();
        for request in &requests {
            assert_eq!(request.destination, LEDGER_B);
            let delivery = Side::delivery_from(&self.a, request);
            self.b
                .bridge
                .receive(self.b.endpoint, &delivery)
                .expect("relayed delivery should mint");
            delivered.push(delivery);
        }
        delivered
    }

    fn relay_b_to_a(&mut self) {
        for request in self.b.bridge.endpoint_mut().drain() {
            let delivery = Side::delivery_from(&self.b, &request);
            self.a
                .bridge
                .receive(self.a.endpoint, &delivery)
                .expect("relayed delivery should mint");
        }
    }

    fn combined_supply(&self) -> u128 {
        self.a.bridge.total_supply() + self.b.bridge.total_supply()
    }
}

#[test]
fn send_burns_and_advances_sequence() {
    let mut net = Loopback::new();
    let owner = net.a.owner;

    assert_eq!(net.a.bridge.max_supply(), DEFAULT_MAX_SUPPLY);
    assert_eq!(net.a.bridge.balance_of(&owner), DEFAULT_INITIAL_SUPPLY);

    let receipt = net
        .a
        .bridge
        .send(owner, SendRequest::new(LEDGER_B, AccountRef::random().0, 100 * ONE_TOKEN))
        .unwrap();

    assert_eq!(receipt.sequence, 0);
    assert_eq!(net.a.bridge.current_sequence(&owner), 1);
    assert_eq!(net.a.bridge.balance_of(&owner), DEFAULT_INITIAL_SUPPLY - 100 * ONE_TOKEN);
    assert_eq!(net.a.bridge.total_supply(), DEFAULT_INITIAL_SUPPLY - 100 * ONE_TOKEN);
}

#[test]
fn round_trip_conserves_combined_supply() {
    let mut net = Loopback::new();
    let alice = net.a.owner;
    let bob = AccountRef::random();
    let combined = net.combined_supply();

    net.a
        .bridge
        .send(alice, SendRequest::new(LEDGER_B, bob.0, 250 * ONE_TOKEN))
        .unwrap();
    net.relay_a_to_b();

    assert_eq!(net.b.bridge.balance_of(&bob), 250 * ONE_TOKEN);
    assert_eq!(net.combined_supply(), combined);

    // Bob sends half back to Alice, long-form this time.
    net.b
        .bridge
        .send(bob, SendRequest::new(LEDGER_A, encode_long(&alice), 125 * ONE_TOKEN))
        .unwrap();
    net.relay_b_to_a();

    assert_eq!(net.b.bridge.balance_of(&bob), 125 * ONE_TOKEN);
    assert_eq!(
        net.a.bridge.balance_of(&alice),
        DEFAULT_INITIAL_SUPPLY - 125 * ONE_TOKEN
    );
    assert_eq!(net.combined_supply(), combined);
    net.a.bridge.verify_supply().unwrap();
    net.b.bridge.verify_supply().unwrap();
}

#[test]
fn inbound_mint_then_redelivery_rejected() {
    let mut net = Loopback::new();
    let recipient = AccountRef::random();

    net.a
        .bridge
        .send(net.a.owner, SendRequest::new(LEDGER_B, recipient.0, 10 * ONE_TOKEN))
        .unwrap();
    let delivered = net.relay_a_to_b();
    let supply = net.b.bridge.total_supply();
    assert_eq!(net.b.bridge.balance_of(&recipient), 10 * ONE_TOKEN);

    let fp = Fingerprint::of_message(LEDGER_A, &net.a.owner, 0);
    assert!(net.b.bridge.is_consumed(&fp));

    let err = net
        .b
        .bridge
        .receive(net.b.endpoint, &delivered[0])
        .unwrap_err();
    assert_eq!(err, SpiralError::MessageAlreadyProcessed(fp));
    assert_eq!(net.b.bridge.total_supply(), supply);
    assert_eq!(net.b.bridge.balance_of(&recipient), 10 * ONE_TOKEN);
}

#[test]
fn source_identifier_mismatch_rejected() {
    let mut net = Loopback::new();
    net.a
        .bridge
        .send(net.a.owner, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN))
        .unwrap();
    let request = net.a.bridge.endpoint_mut().drain().remove(0);

    let mut forged = Side::delivery_from(&net.a, &request);
    forged.source_identifier = AccountRef::random().0.to_vec();
    let supply = net.b.bridge.total_supply();

    assert_eq!(
        net.b.bridge.receive(net.b.endpoint, &forged),
        Err(SpiralError::UntrustedSource(LEDGER_A))
    );
    assert_eq!(net.b.bridge.total_supply(), supply);
    assert!(net.b.bridge.events().is_empty());
}

#[test]
fn zero_send_leaves_sequence() {
    let mut net = Loopback::new();
    let owner = net.a.owner;
    assert_eq!(
        net.a
            .bridge
            .send(owner, SendRequest::new(LEDGER_B, AccountRef::random().0, 0)),
        Err(SpiralError::ZeroAmount)
    );
    assert_eq!(net.a.bridge.current_sequence(&owner), 0);
}

#[test]
fn supply_cap_boundary() {
    let mut net = Loopback::new();
    let headroom = net.b.bridge.max_supply() - net.b.bridge.total_supply();
    let sender = AccountRef::random();

    let message = |amount, sequence| {
        let payload = spiral_bridge::TransferPayload::new(AccountRef::random().0, amount, sender, sequence)
            .encode()
            .unwrap();
        Delivery {
            source: LEDGER_A,
            source_identifier: net.a.address.0.to_vec(),
            transport_nonce: 0,
            payload,
        }
    };

    let over = message(headroom + 1, 0);
    let exact = message(headroom, 0);

    assert!(matches!(
        net.b.bridge.receive(net.b.endpoint, &over),
        Err(SpiralError::ExceedsMaxSupply { .. })
    ));
    net.b.bridge.receive(net.b.endpoint, &exact).unwrap();
    assert_eq!(net.b.bridge.total_supply(), net.b.bridge.max_supply());
    net.b.bridge.verify_supply().unwrap();
}

#[test]
fn pause_blocks_both_paths() {
    let mut net = Loopback::new();
    let alice = net.a.owner;

    net.a
        .bridge
        .send(alice, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN))
        .unwrap();
    let request = net.a.bridge.endpoint_mut().drain().remove(0);
    let delivery = Side::delivery_from(&net.a, &request);

    net.a.bridge.pause(alice).unwrap();
    net.b.bridge.pause(net.b.owner).unwrap();

    assert_eq!(
        net.a
            .bridge
            .send(alice, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN)),
        Err(SpiralError::SystemPaused)
    );
    assert_eq!(
        net.b.bridge.receive(net.b.endpoint, &delivery),
        Err(SpiralError::SystemPaused)
    );

    net.a.bridge.unpause(alice).unwrap();
    net.b.bridge.unpause(net.b.owner).unwrap();

    net.a
        .bridge
        .send(alice, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN))
        .unwrap();
    net.b.bridge.receive(net.b.endpoint, &delivery).unwrap();
}

#[test]
fn clearing_trust_cuts_the_route() {
    let mut net = Loopback::new();
    net.a
        .bridge
        .send(net.a.owner, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN))
        .unwrap();
    let request = net.a.bridge.endpoint_mut().drain().remove(0);

    net.b.bridge.clear_trusted(net.b.owner, LEDGER_A).unwrap();
    assert_eq!(
        net.b
            .bridge
            .receive(net.b.endpoint, &Side::delivery_from(&net.a, &request)),
        Err(SpiralError::UntrustedSource(LEDGER_A))
    );
    assert_eq!(
        net.b
            .bridge
            .send(net.b.owner, SendRequest::new(LEDGER_A, AccountRef::random().0, 1)),
        Err(SpiralError::DestinationNotTrusted(LEDGER_A))
    );
}

#[test]
fn events_serialize_for_indexers() {
    let mut net = Loopback::new();
    net.a
        .bridge
        .send(net.a.owner, SendRequest::new(LEDGER_B, AccountRef::random().0, ONE_TOKEN))
        .unwrap();
    net.relay_a_to_b();

    let events: Vec<_> = net
        .a
        .bridge
        .take_events()
        .into_iter()
        .chain(net.b.bridge.take_events())
        .collect();
    assert_eq!(events.len(), 2);

    for event in &events {
        let json = serde_json::to_string(event).unwrap();
        let back: spiral_types::BridgeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, event.id);
        assert_eq!(back.kind, event.kind);
    }
    assert_eq!(events[0].kind.name(), "TRANSFER_INITIATED");
    assert_eq!(events[1].kind.name(), "TRANSFER_RECEIVED");
}
