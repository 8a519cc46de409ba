//! Fee escrow and relayer-incentive accounting for packet relay.
//!
//! Third parties pre-pay fees for having a packet relayed, acknowledged, or
//! timed out; this crate escrows those fees and, once the packet's lifecycle
//! resolves, pays the relayers that did the work and refunds the rest.
//!
//! The escrow account is a closed system: it must always hold exactly the sum
//! of all escrowed fee totals. If the ledger ever rejects a transfer out of
//! it, that invariant is broken and the engine locks itself; every mutating
//! operation is rejected from then on until the surrounding system
//! intervenes.

mod distribute;
mod error;
mod escrow;
mod state;

pub use {distribute::*, error::*, escrow::*, state::*};
