//! # spiral-types
//!
//! Shared types, errors, and configuration for the **Spiral** cross-ledger
//! token core.
//!
//! This crate is the leaf dependency of the workspace; every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountRef`], [`LedgerId`], [`Fingerprint`], [`EventId`]
//! - **Amounts**: [`Amount`] and whole-token rendering
//! - **Identifier codec**: [`decode_identifier`], [`encode_short`], [`encode_long`]
//! - **Events**: [`BridgeEvent`], [`EventKind`]
//! - **Configuration**: [`TokenConfig`]
//! - **Errors**: [`SpiralError`] with `SP_ERR_` prefix codes
//! - **Constants**: identifier widths, supply defaults

pub mod amount;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;

pub use amount::*;
pub use codec::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;

// Constants are accessed via `spiral_types::constants::FOO`
// (not re-exported to avoid name collisions).
