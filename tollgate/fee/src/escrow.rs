use {
    crate::{is_locked, FeeError, FeeResult, FEES_IN_ESCROW},
    tollgate_types::{
        ChannelId, IdentifiedPacketFees, Order, PacketFees, PacketId, PortId, StdResult, Storage,
    },
};

/// Accept a packet's fee offers into escrow, fully replacing any existing
/// record for the same packet. The caller is responsible for having funded
/// the escrow account with the offers' combined total.
///
/// Rejected while the engine is locked, and when any offer fails validation.
pub fn set_fees_in_escrow(
    storage: &mut dyn Storage,
    packet_id: &PacketId,
    packet_fees: &PacketFees,
) -> FeeResult<()> {
    if is_locked(storage)? {
        return Err(FeeError::Locked);
    }

    for packet_fee in packet_fees {
        packet_fee.validate()?;
    }

    FEES_IN_ESCROW.save(storage, packet_id, packet_fees)?;

    tracing::debug!(packet = %packet_id, offers = packet_fees.len(), "Escrowed packet fees");

    Ok(())
}

pub fn has_fees_in_escrow(storage: &dyn Storage, packet_id: &PacketId) -> bool {
    FEES_IN_ESCROW.has(storage, packet_id)
}

pub fn get_fees_in_escrow(
    storage: &dyn Storage,
    packet_id: &PacketId,
) -> StdResult<Option<PacketFees>> {
    FEES_IN_ESCROW.may_load(storage, packet_id)
}

/// Records are only ever deleted whole; partial deletion doesn't exist.
pub(crate) fn delete_fees_in_escrow(storage: &mut dyn Storage, packet_id: &PacketId) {
    FEES_IN_ESCROW.remove(storage, packet_id);
}

/// Every still-escrowed record under the given channel, in ascending
/// sequence order.
pub fn get_identified_packet_fees_for_channel(
    storage: &dyn Storage,
    port_id: &PortId,
    channel_id: &ChannelId,
) -> StdResult<Vec<IdentifiedPacketFees>> {
    FEES_IN_ESCROW
        .prefix((port_id, channel_id))
        .range(storage, Order::Ascending)
        .map(|record| {
            record.map(|(sequence, packet_fees)| {
                let packet_id = PacketId::new(port_id.clone(), channel_id.clone(), sequence);
                IdentifiedPacketFees::new(packet_id, packet_fees)
            })
        })
        .collect()
}

/// Every still-escrowed record across all channels. Used for state export
/// and diagnostics, not by settlement itself.
pub fn get_all_identified_packet_fees(storage: &dyn Storage) -> StdResult<Vec<IdentifiedPacketFees>> {
    FEES_IN_ESCROW
        .range(storage, Order::Ascending)
        .map(|record| {
            record.map(|(packet_id, packet_fees)| IdentifiedPacketFees::new(packet_id, packet_fees))
        })
        .collect()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::lock_fee_engine,
        tollgate_types::{
            coins, Addr, Coins, Denom, Fee, MockStorage, PacketFee, ResultExt, Sequence, Signer,
        },
    };

    fn mock_packet_id(channel: &str, sequence: u64) -> PacketId {
        PacketId::new(
            PortId::new_unchecked("transfer"),
            ChannelId::new_unchecked(channel),
            Sequence::new(sequence),
        )
    }

    fn mock_packet_fees() -> PacketFees {
        let fee = Fee::new(
            coins! { Denom::new_unchecked("uatom") => 100 },
            coins! { Denom::new_unchecked("uatom") => 50 },
            Coins::new(),
        );

        PacketFees::new(vec![PacketFee::new(
            fee,
            Signer::from(Addr::mock(1)),
            vec![],
        )])
    }

    #[test]
    fn escrow_roundtrip() {
        let mut storage = MockStorage::new();
        let id = mock_packet_id("channel-0", 1);
        let fees = mock_packet_fees();

        assert!(!has_fees_in_escrow(&storage, &id));

        set_fees_in_escrow(&mut storage, &id, &fees).should_succeed();

        assert!(has_fees_in_escrow(&storage, &id));
        get_fees_in_escrow(&storage, &id).should_succeed_and_equal(Some(fees));

        delete_fees_in_escrow(&mut storage, &id);

        assert!(!has_fees_in_escrow(&storage, &id));
    }

    #[test]
    fn escrow_rejected_while_locked() {
        let mut storage = MockStorage::new();

        lock_fee_engine(&mut storage).should_succeed();

        set_fees_in_escrow(&mut storage, &mock_packet_id("channel-0", 1), &mock_packet_fees())
            .should_fail_with_error("locked");
    }

    #[test]
    fn escrow_rejects_invalid_offers() {
        let mut storage = MockStorage::new();

        let relayer = Signer::from(Addr::mock(2));
        let invalid = PacketFees::new(vec![PacketFee::new(
            Fee::new(Coins::new(), Coins::new(), Coins::new()),
            Signer::from(Addr::mock(1)),
            vec![relayer.clone(), relayer],
        )]);

        set_fees_in_escrow(&mut storage, &mock_packet_id("channel-0", 1), &invalid)
            .should_fail_with_error("duplicate relayer");

        // A rejected offer leaves no trace.
        assert!(!has_fees_in_escrow(&storage, &mock_packet_id("channel-0", 1)));
    }

    #[test]
    fn enumerating_by_channel() {
        let mut storage = MockStorage::new();
        let fees = mock_packet_fees();

        for (channel, sequence) in [("channel-0", 2), ("channel-1", 1), ("channel-0", 1)] {
            set_fees_in_escrow(&mut storage, &mock_packet_id(channel, sequence), &fees)
                .should_succeed();
        }

        let identified = get_identified_packet_fees_for_channel(
            &storage,
            &PortId::new_unchecked("transfer"),
            &ChannelId::new_unchecked("channel-0"),
        )
        .should_succeed();

        assert_eq!(identified.len(), 2);
        assert_eq!(identified[0].packet_id, mock_packet_id("channel-0", 1));
        assert_eq!(identified[1].packet_id, mock_packet_id("channel-0", 2));

        let all = get_all_identified_packet_fees(&storage).should_succeed();
        assert_eq!(all.len(), 3);
    }
}
