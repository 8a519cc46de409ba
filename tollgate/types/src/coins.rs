use {
    crate::{Coin, CoinRef, Denom, StdError, StdResult, Uint128},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser, ser::SerializeSeq},
    std::{
        collections::{btree_map, BTreeMap},
        fmt::{self, Debug, Display, Formatter},
        io,
    },
};

/// A canonical multi-denomination amount: a map from denoms to amounts.
///
/// Invariants:
///
/// - no duplicate denoms (enforced by the map);
/// - no zero amounts (a denom with amount zero simply isn't present);
/// - amounts only grow through checked addition.
///
/// Serialized to JSON as an array of coins, because JSON maps with non-string
/// keys are awkward and arrays keep the wire format self-describing.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Coins(BTreeMap<Denom, Uint128>);

impl Coins {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Create a `Coins` holding exactly one denom.
    pub fn one(denom: Denom, amount: Uint128) -> StdResult<Self> {
        if amount.is_zero() {
            return Err(StdError::invalid_coins("zero amount"));
        }

        Ok(Self([(denom, amount)].into()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_non_empty(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return whether there is a non-zero amount of the given denom.
    pub fn has(&self, denom: &Denom) -> bool {
        self.0.contains_key(denom)
    }

    /// Get the amount of the given denom; zero if the denom isn't present.
    pub fn amount_of(&self, denom: &Denom) -> Uint128 {
        self.0.get(denom).copied().unwrap_or(Uint128::ZERO)
    }

    /// Add a coin, merging with any existing amount of the same denom.
    /// Inserting a zero amount is a no-op.
    pub fn insert(&mut self, coin: Coin) -> StdResult<&mut Self> {
        if coin.amount.is_zero() {
            return Ok(self);
        }

        match self.0.get_mut(&coin.denom) {
            Some(amount) => {
                *amount = amount.checked_add(coin.amount)?;
            },
            None => {
                self.0.insert(coin.denom, coin.amount);
            },
        }

        Ok(self)
    }

    /// Add every coin of another `Coins`.
    pub fn insert_many(&mut self, coins: Coins) -> StdResult<&mut Self> {
        for coin in coins {
            self.insert(coin)?;
        }

        Ok(self)
    }

    pub fn into_vec(self) -> Vec<Coin> {
        self.into_iter().collect()
    }

    // No `iter_mut` on purpose: handing out `&mut Uint128` would let callers
    // zero out an amount and break the no-zero-amount invariant.
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        if coin.amount.is_zero() {
            Self::new()
        } else {
            Self([(coin.denom, coin.amount)].into())
        }
    }
}

impl TryFrom<Vec<Coin>> for Coins {
    type Error = StdError;

    fn try_from(coins: Vec<Coin>) -> StdResult<Self> {
        let mut map = BTreeMap::new();

        for coin in coins {
            if coin.amount.is_zero() {
                return Err(StdError::invalid_coins(format!(
                    "zero amount for denom `{}`",
                    coin.denom
                )));
            }

            if map.insert(coin.denom.clone(), coin.amount).is_some() {
                return Err(StdError::invalid_coins(format!(
                    "duplicate denom `{}`",
                    coin.denom
                )));
            }
        }

        Ok(Self(map))
    }
}

impl<'a> IntoIterator for &'a Coins {
    type IntoIter = CoinsIter<'a>;
    type Item = CoinRef<'a>;

    fn into_iter(self) -> Self::IntoIter {
        CoinsIter(self.0.iter())
    }
}

impl IntoIterator for Coins {
    type IntoIter = CoinsIntoIter;
    type Item = Coin;

    fn into_iter(self) -> Self::IntoIter {
        CoinsIntoIter(self.0.into_iter())
    }
}

pub struct CoinsIter<'a>(btree_map::Iter<'a, Denom, Uint128>);

impl<'a> Iterator for CoinsIter<'a> {
    type Item = CoinRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0
            .next()
            .map(|(denom, amount)| CoinRef { denom, amount })
    }
}

pub struct CoinsIntoIter(btree_map::IntoIter<Denom, Uint128>);

impl Iterator for CoinsIntoIter {
    type Item = Coin;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(denom, amount)| Coin { denom, amount })
    }
}

impl Display for Coins {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for coin in self {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
            first = false;
        }
        Ok(())
    }
}

impl Debug for Coins {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Coins({self})")
    }
}

impl ser::Serialize for Coins {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for (denom, amount) in &self.0 {
            seq.serialize_element(&CoinRef { denom, amount })?;
        }
        seq.end()
    }
}

impl<'de> de::Deserialize<'de> for Coins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_seq(CoinsVisitor)
    }
}

struct CoinsVisitor;

impl<'de> de::Visitor<'de> for CoinsVisitor {
    type Value = Coins;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of coins")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: de::SeqAccess<'de>,
    {
        let mut map = BTreeMap::new();

        while let Some(Coin { denom, amount }) = seq.next_element()? {
            if amount.is_zero() {
                return Err(de::Error::custom("coin amount is zero"));
            }

            if map.insert(denom, amount).is_some() {
                return Err(de::Error::custom("duplicate denom found"));
            }
        }

        Ok(Coins(map))
    }
}

impl BorshSerialize for Coins {
    fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for Coins {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        let map = <BTreeMap<Denom, Uint128> as BorshDeserialize>::deserialize_reader(reader)?;

        if map.values().any(|amount| amount.is_zero()) {
            return Err(io::Error::other(StdError::invalid_coins("zero amount")));
        }

        Ok(Self(map))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{coins, JsonDeExt, JsonSerExt, ResultExt},
    };

    fn atom() -> Denom {
        Denom::new_unchecked("uatom")
    }

    fn osmo() -> Denom {
        Denom::new_unchecked("uosmo")
    }

    #[test]
    fn inserting_merges_amounts() {
        let mut coins = coins! { atom() => 123 };

        coins
            .insert(Coin::new(atom(), Uint128::new(77)))
            .should_succeed();
        coins
            .insert(Coin::new(osmo(), Uint128::new(5)))
            .should_succeed();

        assert_eq!(coins.amount_of(&atom()), Uint128::new(200));
        assert_eq!(coins.amount_of(&osmo()), Uint128::new(5));

        // Inserting zero is a no-op, not an error, and doesn't create a record.
        coins.insert(Coin::new(atom(), Uint128::ZERO)).should_succeed();
        assert_eq!(coins.len(), 2);
    }

    #[test]
    fn inserting_detects_overflow() {
        let mut coins = coins! { atom() => u128::MAX };

        coins
            .insert(Coin::new(atom(), Uint128::ONE))
            .should_fail_with_error("addition overflow");
    }

    #[test]
    fn constructing_from_vec() {
        // Duplicate denom.
        Coins::try_from(vec![
            Coin::new(atom(), Uint128::new(1)),
            Coin::new(atom(), Uint128::new(2)),
        ])
        .should_fail_with_error("duplicate denom");

        // Zero amount.
        Coins::try_from(vec![Coin::new(atom(), Uint128::ZERO)])
            .should_fail_with_error("zero amount");
    }

    #[test]
    fn serializing_as_array() {
        let coins = coins! { osmo() => 789, atom() => 123 };

        let json = coins.to_json_vec().should_succeed();

        // Ordered by denom, regardless of insertion order.
        assert_eq!(
            json,
            br#"[{"denom":"uatom","amount":"123"},{"denom":"uosmo","amount":"789"}]"#
        );

        json.deserialize_json::<Coins>()
            .should_succeed_and_equal(coins);

        // Zero amounts and duplicates are rejected on the way in.
        br#"[{"denom":"uatom","amount":"0"}]"#
            .deserialize_json::<Coins>()
            .should_fail();
        br#"[{"denom":"uatom","amount":"1"},{"denom":"uatom","amount":"2"}]"#
            .deserialize_json::<Coins>()
            .should_fail();
    }
}
