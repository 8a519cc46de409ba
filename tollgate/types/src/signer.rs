use {
    crate::{Addr, StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{
        de::{self, Error},
        ser,
    },
    std::{
        fmt::{self, Display, Formatter},
        io,
        str::FromStr,
    },
};

/// A raw account identity as received from the packet-relay driver.
///
/// Relayer identities originate on the counterparty chain and may not parse
/// as local [`Addr`]s at all, which is exactly why fee payouts carry a
/// fallback recipient. The only invariant enforced here is non-emptiness;
/// syntactic validity is decided at payout time via [`Signer::to_addr`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signer(String);

impl Signer {
    pub fn new_unchecked<T>(s: T) -> Self
    where
        T: Into<String>,
    {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Attempt to interpret the identity as a local account address.
    pub fn to_addr(&self) -> StdResult<Addr> {
        Addr::from_str(&self.0)
    }
}

impl From<Addr> for Signer {
    fn from(addr: Addr) -> Self {
        Self(addr.to_string())
    }
}

impl Display for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Signer {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        s.to_string().try_into()
    }
}

impl TryFrom<String> for Signer {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        if s.is_empty() {
            return Err(StdError::invalid_address(s, "empty signer"));
        }

        Ok(Self(s))
    }
}

impl TryFrom<&str> for Signer {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        s.to_string().try_into()
    }
}

impl ser::Serialize for Signer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> de::Deserialize<'de> for Signer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl BorshSerialize for Signer {
    fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for Signer {
    fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
    where
        R: io::Read,
    {
        <String as BorshDeserialize>::deserialize_reader(reader)?
            .try_into()
            .map_err(io::Error::other)
    }
}

// ----------------------------------- tests -----------------------------------
