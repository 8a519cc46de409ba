use {
    crate::{Coins, PacketId, Signer, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeSet, slice, vec},
};

/// The fee schedule a payer offers for relaying one packet: one component per
/// possible lifecycle outcome.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq,
)]
pub struct Fee {
    /// Paid to the relayer that delivers the packet to the destination chain.
    pub recv_fee: Coins,
    /// Paid to the relayer that returns the acknowledgement.
    pub ack_fee: Coins,
    /// Paid to the relayer that proves the packet timed out.
    pub timeout_fee: Coins,
}

impl Fee {
    pub fn new(recv_fee: Coins, ack_fee: Coins, timeout_fee: Coins) -> Self {
        Self {
            recv_fee,
            ack_fee,
            timeout_fee,
        }
    }

    /// The denomination-wise sum of all three components: the amount that
    /// sits on the escrow account while the packet is in flight.
    ///
    /// Errors on overflow; a fee whose total cannot be represented must never
    /// be escrowed.
    pub fn total(&self) -> StdResult<Coins> {
        let mut total = self.recv_fee.clone();
        total.insert_many(self.ack_fee.clone())?;
        total.insert_many(self.timeout_fee.clone())?;
        Ok(total)
    }
}

/// One escrowed fee offer: the schedule, where unused portions go back to,
/// and optionally which relayers are allowed to earn it.
///
/// Immutable once escrowed. Distribution works off this snapshot even if the
/// driver would quote a different fee at settlement time.
#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Debug, Clone, PartialEq, Eq,
)]
pub struct PacketFee {
    pub fee: Fee,
    pub refund_address: Signer,
    /// Relayers permitted to claim this offer. Empty means anyone. The driver
    /// enforces the restriction before a packet is queued for relay; payout
    /// itself doesn't re-check it.
    pub relayers: Vec<Signer>,
}

impl PacketFee {
    pub fn new(fee: Fee, refund_address: Signer, relayers: Vec<Signer>) -> Self {
        Self {
            fee,
            refund_address,
            relayers,
        }
    }

    /// Checks performed before the offer is accepted into escrow.
    pub fn validate(&self) -> StdResult<()> {
        // The total must be representable, otherwise the conservation check
        // at settlement has nothing to conserve.
        self.fee.total()?;

        let mut seen = BTreeSet::new();
        for relayer in &self.relayers {
            if !seen.insert(relayer.as_str()) {
                return Err(StdError::invalid_fee(format!(
                    "duplicate relayer `{relayer}` in allow-list"
                )));
            }
        }

        Ok(())
    }
}

/// All fee offers escrowed for a single packet, in insertion order.
///
/// Multiple payers may stack offers on the same packet. Order carries no
/// payout semantics, but settlement processes entries strictly in this order,
/// which determines which transfer (if any) trips the insolvency lock.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    PartialEq,
    Eq,
)]
pub struct PacketFees(Vec<PacketFee>);

impl PacketFees {
    pub fn new(packet_fees: Vec<PacketFee>) -> Self {
        Self(packet_fees)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> slice::Iter<'_, PacketFee> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<PacketFee> {
        self.0
    }
}

impl From<Vec<PacketFee>> for PacketFees {
    fn from(packet_fees: Vec<PacketFee>) -> Self {
        Self(packet_fees)
    }
}

impl<'a> IntoIterator for &'a PacketFees {
    type IntoIter = slice::Iter<'a, PacketFee>;
    type Item = &'a PacketFee;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for PacketFees {
    type IntoIter = vec::IntoIter<PacketFee>;
    type Item = PacketFee;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// A packet's escrowed fees together with the packet's identity; the item
/// yielded when enumerating a channel's outstanding escrow entries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedPacketFees {
    pub packet_id: PacketId,
    pub packet_fees: PacketFees,
}

impl IdentifiedPacketFees {
    pub fn new(packet_id: PacketId, packet_fees: PacketFees) -> Self {
        Self {
            packet_id,
            packet_fees,
        }
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{coins, Addr, Coin, Denom, ResultExt, Uint128},
        proptest::prelude::*,
    };

    fn atom() -> Denom {
        Denom::new_unchecked("uatom")
    }

    fn osmo() -> Denom {
        Denom::new_unchecked("uosmo")
    }

    #[test]
    fn totaling_fee() {
        let fee = Fee::new(
            coins! { atom() => 100 },
            coins! { atom() => 50, osmo() => 7 },
            coins! { osmo() => 3 },
        );

        fee.total()
            .should_succeed_and_equal(coins! { atom() => 150, osmo() => 10 });
    }

    #[test]
    fn totaling_fee_detects_overflow() {
        let fee = Fee::new(
            coins! { atom() => u128::MAX },
            coins! { atom() => 1 },
            Coins::new(),
        );

        fee.total().should_fail_with_error("addition overflow");
    }

    #[test]
    fn validating_packet_fee() {
        let fee = Fee::new(coins! { atom() => 1 }, Coins::new(), Coins::new());

        PacketFee::new(fee.clone(), Signer::from(Addr::mock(1)), vec![])
            .validate()
            .should_succeed();

        let relayer = Signer::from(Addr::mock(2));
        PacketFee::new(
            fee,
            Signer::from(Addr::mock(1)),
            vec![relayer.clone(), relayer],
        )
        .validate()
        .should_fail_with_error("duplicate relayer");
    }

    proptest! {
        /// The total is the coin-wise sum of the components, independent of
        /// which component a coin sits in.
        #[test]
        fn fee_total_conserves_components(
            recv in 0..u128::MAX / 8,
            ack in 0..u128::MAX / 8,
            timeout in 0..u128::MAX / 8,
        ) {
            // `From<Coin>` drops zero amounts, keeping the coins canonical.
            let [recv_coins, ack_coins, timeout_coins] =
                [recv, ack, timeout].map(|amount| Coins::from(Coin::new(atom(), Uint128::new(amount))));

            let forward = Fee::new(recv_coins.clone(), ack_coins.clone(), timeout_coins.clone())
                .total()
                .unwrap();
            let shuffled = Fee::new(timeout_coins, recv_coins, ack_coins)
                .total()
                .unwrap();

            prop_assert_eq!(&forward, &shuffled);
            prop_assert_eq!(
                forward.amount_of(&atom()),
                Uint128::new(recv + ack + timeout)
            );
        }
    }
}
