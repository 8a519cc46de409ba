use {
    crate::{Denom, Uint128},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{Deserialize, Serialize},
    std::fmt::{self, Debug, Display, Formatter},
};

#[derive(
    Serialize, Deserialize, BorshSerialize, BorshDeserialize, Clone, PartialEq, Eq,
)]
pub struct Coin {
    pub denom: Denom,
    pub amount: Uint128,
}

impl Coin {
    pub fn new(denom: Denom, amount: Uint128) -> Self {
        Self { denom, amount }
    }
}

impl Display for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.denom, self.amount)
    }
}

impl Debug for Coin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Coin({}:{})", self.denom, self.amount)
    }
}

/// A record in the [`Coins`](crate::Coins) map, holding references instead of
/// owned values.
///
/// Iterating a `Coins` yields `(&Denom, &Uint128)` pairs; wrapping them in a
/// temporary owned `Coin` would mean cloning the denom on every step. This
/// struct avoids that.
#[derive(Serialize)]
pub struct CoinRef<'a> {
    pub denom: &'a Denom,
    pub amount: &'a Uint128,
}

impl Display for CoinRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.denom, self.amount)
    }
}
