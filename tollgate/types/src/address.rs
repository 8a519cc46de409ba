use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    data_encoding::HEXLOWER_PERMISSIVE,
    serde::{
        de::{self, Error},
        ser,
    },
    std::{
        fmt::{self, Debug, Display, Formatter},
        str::FromStr,
    },
};

/// An account address.
///
/// Addresses are of 20-byte length, rendered as lowercase hex with the `0x`
/// prefix. Validation happens on every decode path (string parsing, JSON),
/// so an `Addr` held in memory is valid by construction.
///
/// Identities received from a counterparty chain may not be local addresses
/// at all; those travel as [`Signer`](crate::Signer)s until proven parseable.
#[derive(
    BorshSerialize, BorshDeserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Addr([u8; Self::LENGTH]);

impl Addr {
    pub const LENGTH: usize = 20;

    pub const fn from_array(array: [u8; Self::LENGTH]) -> Self {
        Self(array)
    }

    /// Generate a mock address for use in testing.
    pub const fn mock(index: u8) -> Self {
        let mut bytes = [0; Self::LENGTH];
        bytes[Self::LENGTH - 1] = index;
        Self(bytes)
    }
}

impl AsRef<[u8]> for Addr {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Addr {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        let Some(hex) = s.strip_prefix("0x") else {
            return Err(StdError::invalid_address(s, "missing `0x` prefix"));
        };

        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.as_bytes())
            .map_err(|_| StdError::invalid_address(s, "not a hex string"))?;

        bytes
            .try_into()
            .map(Self)
            .map_err(|_| StdError::invalid_address(s, "incorrect length"))
    }
}

impl Display for Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", HEXLOWER_PERMISSIVE.encode(&self.0))
    }
}

impl Debug for Addr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Addr(0x{})", HEXLOWER_PERMISSIVE.encode(&self.0))
    }
}

impl ser::Serialize for Addr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Addr {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        Addr::from_str(&s).map_err(D::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, crate::ResultExt, hex_literal::hex, test_case::test_case};

    #[test_case(
        "0x299663875aa94264bd7a67cfd3efedb1d225960f",
        Ok(Addr::from_array(hex!("299663875aa94264bd7a67cfd3efedb1d225960f")));
        "valid lowercase address"
    )]
    #[test_case(
        "0x299663875AA94264BD7A67CFD3EFEDB1D225960F",
        Ok(Addr::from_array(hex!("299663875aa94264bd7a67cfd3efedb1d225960f")));
        "valid uppercase address"
    )]
    #[test_case(
        "299663875aa94264bd7a67cfd3efedb1d225960f",
        Err("missing `0x` prefix");
        "missing prefix"
    )]
    #[test_case(
        "0x299663875aa94264bd7a67cfd3efedb1d2259",
        Err("not a hex string");
        "odd number of hex digits"
    )]
    #[test_case(
        "0x299663875aa94264bd7a67cfd3efedb1d22596",
        Err("incorrect length");
        "too short"
    )]
    #[test_case(
        "0xnot a hex string but is 42 characters...",
        Err("not a hex string");
        "not hex"
    )]
    fn parsing_address(input: &str, expect: Result<Addr, &'static str>) {
        Addr::from_str(input).should_match(expect)
    }

    #[test]
    fn stringify_roundtrip() {
        let addr = Addr::mock(7);
        let s = addr.to_string();

        assert_eq!(s, "0x0000000000000000000000000000000000000007");

        Addr::from_str(&s).should_succeed_and_equal(addr);
    }
}
