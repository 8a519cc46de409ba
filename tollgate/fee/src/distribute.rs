use {
    crate::{
        delete_fees_in_escrow, get_identified_packet_fees_for_channel, has_fees_in_escrow,
        is_locked, lock_fee_engine, FeeError, FeeResult, FEES_IN_ESCROW, FEE_ESCROW_ADDR,
    },
    tollgate_types::{
        Addr, Bank, BankError, ChannelId, Coins, PacketFees, PacketId, PortId, Signer, Storage,
    },
};

/// Decide where a payout actually goes.
///
/// The intended recipient wins if it parses as a local address and isn't a
/// blocked account; otherwise the fallback is given the same test. If both
/// fail, `None`: the amount deliberately stays on the escrow account,
/// stranded rather than lost.
///
/// Pure with respect to the ledger: the blocked-account predicate comes in as
/// a closure, so routing is testable without any ledger at hand.
fn route(primary: &Signer, fallback: &Signer, is_blocked: &dyn Fn(Addr) -> bool) -> Option<Addr> {
    for candidate in [primary, fallback] {
        if let Ok(addr) = candidate.to_addr() {
            if !is_blocked(addr) {
                return Some(addr);
            }
        }
    }

    None
}

/// Pay `amount` out of the escrow account to the routed recipient.
///
/// Empty amounts and unroutable recipients are no-ops. The only error that
/// can come out of here is the ledger refusing the transfer.
fn distribute_fee(
    bank: &mut dyn Bank,
    amount: &Coins,
    primary: &Signer,
    fallback: &Signer,
) -> Result<(), BankError> {
    if amount.is_empty() {
        return Ok(());
    }

    let Some(recipient) = route(primary, fallback, &|addr| bank.is_blocked(addr)) else {
        tracing::debug!(
            primary = %primary,
            fallback = %fallback,
            %amount,
            "No valid payout recipient; amount stays escrowed"
        );
        return Ok(());
    };

    bank.send(FEE_ESCROW_ADDR, recipient, amount)
}

/// Run one entry's transfers in order; on the first ledger rejection, lock
/// the engine and surface the soft failure. Transfers already applied are
/// not rolled back; the untouched escrow record plus the lock flag are the
/// recovery signal.
fn apply_transfers(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    transfers: &[(&Coins, &Signer, &Signer)],
) -> FeeResult<()> {
    for (amount, primary, fallback) in transfers {
        if let Err(err) = distribute_fee(bank, amount, primary, fallback) {
            return match err {
                BankError::InsufficientBalance { .. } => {
                    lock_fee_engine(storage)?;
                    Err(FeeError::EscrowOutOfBalance(err))
                },
                BankError::Std(err) => Err(err.into()),
            };
        }
    }

    Ok(())
}

/// Settle a packet's fees after its acknowledgement arrived: the forward
/// relayer earned the receive fee, the reverse relayer the ack fee, and the
/// timeout fee was never earned, so it returns to the payer.
///
/// Entries are processed strictly in escrowed order. On full success the
/// escrow record is deleted; a missing record is a no-op success (a packet
/// may legitimately carry no fee offers, or be settled already).
pub fn distribute_packet_fees_on_acknowledgement(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    forward_relayer: &Signer,
    reverse_relayer: &Signer,
    packet_fees: &PacketFees,
    packet_id: &PacketId,
) -> FeeResult<()> {
    if is_locked(storage)? {
        return Err(FeeError::Locked);
    }

    if !has_fees_in_escrow(storage, packet_id) {
        tracing::debug!(packet = %packet_id, "No fees escrowed; nothing to distribute");
        return Ok(());
    }

    for packet_fee in packet_fees {
        let refund = &packet_fee.refund_address;

        apply_transfers(storage, bank, &[
            (&packet_fee.fee.recv_fee, forward_relayer, refund),
            (&packet_fee.fee.ack_fee, reverse_relayer, refund),
            // The fallback equals the target here: an invalid refund address
            // leaves the amount escrowed.
            (&packet_fee.fee.timeout_fee, refund, refund),
        ])?;
    }

    delete_fees_in_escrow(storage, packet_id);

    tracing::info!(
        packet = %packet_id,
        entries = packet_fees.len(),
        "Distributed packet fees on acknowledgement"
    );

    Ok(())
}

/// Settle a packet's fees after it timed out: the mirror image of
/// acknowledgement. The relayer that proved the timeout earns the timeout
/// fee; receive and ack fees were never earned and return to the payer.
pub fn distribute_packet_fees_on_timeout(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    timeout_relayer: &Signer,
    packet_fees: &PacketFees,
    packet_id: &PacketId,
) -> FeeResult<()> {
    if is_locked(storage)? {
        return Err(FeeError::Locked);
    }

    if !has_fees_in_escrow(storage, packet_id) {
        tracing::debug!(packet = %packet_id, "No fees escrowed; nothing to distribute");
        return Ok(());
    }

    for packet_fee in packet_fees {
        let refund = &packet_fee.refund_address;

        apply_transfers(storage, bank, &[
            (&packet_fee.fee.timeout_fee, timeout_relayer, refund),
            (&packet_fee.fee.recv_fee, refund, refund),
            (&packet_fee.fee.ack_fee, refund, refund),
        ])?;
    }

    delete_fees_in_escrow(storage, packet_id);

    tracing::info!(
        packet = %packet_id,
        entries = packet_fees.len(),
        "Distributed packet fees on timeout"
    );

    Ok(())
}

/// Return every outstanding fee offer on the channel to its payer, ahead of
/// the channel closing. No relayer is involved; nothing can be relayed
/// anymore.
///
/// Offers whose refund address is invalid or blocked stay escrowed: their
/// records are rewritten to exactly the unrefunded offers, and remain
/// observable through channel enumeration. Fully-refunded records are
/// deleted.
pub fn refund_fees_on_channel_closure(
    storage: &mut dyn Storage,
    bank: &mut dyn Bank,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> FeeResult<()> {
    if is_locked(storage)? {
        return Err(FeeError::Locked);
    }

    let identified = get_identified_packet_fees_for_channel(storage, port_id, channel_id)?;

    for identified_fees in identified {
        let mut unrefunded = Vec::new();

        for packet_fee in &identified_fees.packet_fees {
            let refund = &packet_fee.refund_address;

            let Some(recipient) = route(refund, refund, &|addr| bank.is_blocked(addr)) else {
                unrefunded.push(packet_fee.clone());
                continue;
            };

            let total = packet_fee.fee.total()?;
            if total.is_empty() {
                continue;
            }

            if let Err(err) = bank.send(FEE_ESCROW_ADDR, recipient, &total) {
                return match err {
                    BankError::InsufficientBalance { .. } => {
                        lock_fee_engine(storage)?;
                        Err(FeeError::EscrowOutOfBalance(err))
                    },
                    BankError::Std(err) => Err(err.into()),
                };
            }
        }

        if unrefunded.is_empty() {
            delete_fees_in_escrow(storage, &identified_fees.packet_id);
        } else {
            // Keep exactly the offers that couldn't be refunded; a later
            // governance action can still reach them through the store.
            FEES_IN_ESCROW.save(
                storage,
                &identified_fees.packet_id,
                &PacketFees::new(unrefunded),
            )?;
        }
    }

    tracing::info!(port = %port_id, channel = %channel_id, "Refunded fees on channel closure");

    Ok(())
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, tollgate_types::Addr};

    #[test]
    fn routing_prefers_primary_then_fallback() {
        let primary = Signer::from(Addr::mock(1));
        let fallback = Signer::from(Addr::mock(2));
        let foreign = Signer::new_unchecked("cosmos1vqy3v4pkyt8rv6c6rmvqsl9dnkr4sdwkhdqes3");

        let nothing_blocked = |_: Addr| false;
        let primary_blocked = |addr: Addr| addr == Addr::mock(1);
        let all_blocked = |_: Addr| true;

        assert_eq!(
            route(&primary, &fallback, &nothing_blocked),
            Some(Addr::mock(1))
        );
        assert_eq!(
            route(&primary, &fallback, &primary_blocked),
            Some(Addr::mock(2))
        );
        assert_eq!(
            route(&foreign, &fallback, &nothing_blocked),
            Some(Addr::mock(2))
        );
        assert_eq!(route(&primary, &fallback, &all_blocked), None);
        assert_eq!(route(&foreign, &foreign, &nothing_blocked), None);
    }
}
