use {
    tollgate_storage::{Item, Map},
    tollgate_types::{Addr, PacketFees, PacketId, StdResult, Storage},
};

/// The account that custodies all escrowed fees. It is owned by this
/// subsystem, not by any user, and must always hold exactly the sum of all
/// fee totals across the currently-escrowed records.
pub const FEE_ESCROW_ADDR: Addr = Addr::from_array(*b"tollgate/fee/escrow_");

/// Escrowed fee offers, keyed by the packet they incentivize. The
/// `(port, channel)` key prefix is what makes per-channel enumeration work.
pub const FEES_IN_ESCROW: Map<&PacketId, PacketFees> = Map::new("fee");

/// The insolvency circuit breaker. Absent means unlocked.
const LOCKED: Item<bool> = Item::new("locked");

/// Whether the engine has detected an accounting inconsistency and shut
/// itself down. While locked, all escrow and distribution operations are
/// rejected; clearing the flag is an administrative action outside this
/// crate.
pub fn is_locked(storage: &dyn Storage) -> StdResult<bool> {
    LOCKED
        .may_load(storage)
        .map(|locked| locked.unwrap_or(false))
}

/// The single write site of the lock flag, reached only when the ledger
/// rejects a transfer out of the escrow account.
pub(crate) fn lock_fee_engine(storage: &mut dyn Storage) -> StdResult<()> {
    tracing::error!("Fee engine locked; escrow account cannot cover escrowed fees");

    LOCKED.save(storage, &true)
}

// ----------------------------------- tests -----------------------------------
