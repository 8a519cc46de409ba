use {
    crate::{StdError, StdResult},
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

/// Denomination of a coin.
///
/// A valid denom is 1-128 characters long and consists of one or more parts
/// separated by the forward slash (`/`), each part a non-empty ASCII
/// alphanumeric string.
///
/// Examples of valid denoms:
///
/// - `uatom`
/// - `factory/pool/1234`
///
/// Examples of invalid denoms:
///
/// - `` (empty)
/// - `factory//1234` (empty part)
/// - `factory/&/1234` (non-alphanumeric character)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub const MAX_LENGTH: usize = 128;

    /// Create a denom without going through validation.
    ///
    /// Intended for constants and tests, where the input is known to be valid.
    pub fn new_unchecked<T>(s: T) -> Self
    where
        T: Into<String>,
    {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn validate(s: &str) -> StdResult<()> {
        if !(1..=Self::MAX_LENGTH).contains(&s.len()) {
            return Err(StdError::invalid_denom(s, "too short or too long"));
        }

        for part in s.split('/') {
            if part.is_empty() {
                return Err(StdError::invalid_denom(s, "empty part"));
            }

            if part.chars().any(|ch| !ch.is_ascii_alphanumeric()) {
                return Err(StdError::invalid_denom(s, "non-alphanumeric character"));
            }
        }

        Ok(())
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl FromStr for Denom {
    type Err = StdError;

    fn from_str(s: &str) -> StdResult<Self> {
        Self::validate(s)?;

        Ok(Self(s.to_string()))
    }
}

impl TryFrom<&str> for Denom {
    type Error = StdError;

    fn try_from(s: &str) -> StdResult<Self> {
        Denom::from_str(s)
    }
}

impl TryFrom<String> for Denom {
    type Error = StdError;

    fn try_from(s: String) -> StdResult<Self> {
        Self::validate(&s)?;

        Ok(Self(s))
    }
}

impl ser::Serialize for Denom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> de::Deserialize<'de> for Denom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        <String as de::Deserialize>::deserialize(deserializer)?
            .try_into()
            .map_err(D::Error::custom)
    }
}

impl BorshSerialize for Denom {
    fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: io::Write,
    {
        BorshSerialize::serialize(&self.0, writer)
    }
}

impl BorshDeserialize for Denom {
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

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{BorshDeExt, BorshSerExt, ResultExt},
        test_case::test_case,
    };

    #[test_case(
        "uatom",
        Ok(Denom::new_unchecked("uatom"));
        "valid denom with one part"
    )]
    #[test_case(
        "factory/pool/1234",
        Ok(Denom::new_unchecked("factory/pool/1234"));
        "valid denom with multiple parts"
    )]
    #[test_case(
        "",
        Err("too short or too long");
        "empty denom"
    )]
    #[test_case(
        "a".repeat(129),
        Err("too short or too long");
        "denom that is too long"
    )]
    #[test_case(
        "factory//1234",
        Err("empty part");
        "denom with empty part"
    )]
    #[test_case(
        "factory/&/1234",
        Err("non-alphanumeric character");
        "denom with non-alphanumeric character"
    )]
    fn creating_denom_from_string<T>(input: T, expect: Result<Denom, &'static str>)
    where
        T: AsRef<str>,
    {
        Denom::from_str(input.as_ref()).should_match(expect)
    }

    #[test]
    fn serializing_borsh() {
        let denom = Denom::new_unchecked("factory/pool/1234");

        denom
            .to_borsh_vec()
            .should_succeed()
            .deserialize_borsh::<Denom>()
            .should_succeed_and_equal(denom);

        // Borsh bytes carrying an invalid denom must be rejected on decode.
        "factory//1234"
            .to_string()
            .to_borsh_vec()
            .should_succeed()
            .deserialize_borsh::<Denom>()
            .should_fail();
    }
}
