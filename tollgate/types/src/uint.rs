use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{de, ser},
    std::{
        fmt,
        iter::Sum,
        ops::{Add, AddAssign, Sub, SubAssign},
        str::FromStr,
    },
};

/// A wrapper over `u128`, string-encoded in JSON.
///
/// JSON only guarantees integers in the range [-(2^53)+1, (2^53)-1], so
/// anything wider than 53 bits goes over the wire as a string.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct Uint128(u128);

impl Uint128 {
    pub const MAX: Self = Self(u128::MAX);
    pub const ONE: Self = Self(1);
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn u128(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_non_zero(self) -> bool {
        self.0 != 0
    }

    pub fn checked_add(self, other: Self) -> StdResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| StdError::overflow_add(self, other))
    }

    pub fn checked_sub(self, other: Self) -> StdResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| StdError::overflow_sub(self, other))
    }
}

// The panicking operators exist for tests and constant arithmetic. Runtime
// accounting code goes through the checked methods.
impl Add for Uint128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.checked_add(rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl Sub for Uint128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.checked_sub(rhs).unwrap_or_else(|err| panic!("{err}"))
    }
}

impl AddAssign for Uint128 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Uint128 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Uint128 {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.0
    }
}

impl FromStr for Uint128 {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        u128::from_str(s)
            .map(Self)
            .map_err(|_| StdError::parse_number::<Self, _>(s))
    }
}

impl fmt::Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string())
    }
}

impl ser::Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Uint128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(Uint128Visitor)
    }
}

struct Uint128Visitor;

impl de::Visitor<'_> for Uint128Visitor {
    type Value = Uint128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded 128-bit unsigned integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse::<u128>().map(Uint128::new).map_err(E::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{JsonDeExt, JsonSerExt, ResultExt},
    };

    #[test]
    fn checked_math() {
        Uint128::new(100)
            .checked_add(Uint128::new(23))
            .should_succeed_and_equal(Uint128::new(123));
        Uint128::MAX
            .checked_add(Uint128::ONE)
            .should_fail_with_error("addition overflow");
        Uint128::new(50)
            .checked_sub(Uint128::new(20))
            .should_succeed_and_equal(Uint128::new(30));
        Uint128::ZERO
            .checked_sub(Uint128::ONE)
            .should_fail_with_error("subtraction underflow");
    }

    #[test]
    fn serializing_as_string() {
        let value = Uint128::new(340_282_366_920_938_463_463);

        let json = value.to_json_vec().should_succeed();
        assert_eq!(json, br#""340282366920938463463""#);

        json.deserialize_json::<Uint128>()
            .should_succeed_and_equal(value);

        // A bare JSON number is not accepted.
        br#"123"#
            .deserialize_json::<Uint128>()
            .should_fail();
    }
}
