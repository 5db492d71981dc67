//! # spiral-bridge
//!
//! **Transfer plane** of the Spiral token core: moves value between ledgers
//! by burning on the source and minting on the destination.
//!
//! ## Flow
//!
//! ```text
//!  ledger A                          transport                 ledger B
//!  send ──▶ burn + sequence ──▶ Endpoint::dispatch ──▶ receive ──▶ consume + mint
//! ```
//!
//! 1. [`SpiralBridge::send`] burns the caller's tokens, stamps the next
//!    outbound sequence and hands a [`TransferPayload`] to the [`Endpoint`]
//! 2. [`SpiralBridge::receive`] authenticates the delivery against the
//!    trusted-remote registry, rejects replays by fingerprint and mints
//!    within the supply cap
//! 3. [`SpiralBridge::quote_send`] prices a send without mutating anything
//! 4. Owner-gated admin: pause, trusted remotes, ownership, native withdrawal
//!
//! Every mutating call is all-or-nothing: a failure anywhere leaves
//! balances, supply, sequences and the consumed set untouched.

pub mod admin;
pub mod bridge;
pub mod endpoint;
pub mod payload;
pub mod quote;
pub mod receive;
pub mod send;

pub use bridge::{SpiralBridge, TokenMetadata};
#[cfg(any(test, feature = "test-helpers"))]
pub use endpoint::MockEndpoint;
pub use endpoint::{DispatchRequest, Endpoint, FeeQuery, FeeQuote};
pub use payload::TransferPayload;
pub use receive::{Delivery, ReceiveReceipt};
pub use send::{SendReceipt, SendRequest};
