use {
    crate::{StdError, StdResult},
    borsh::{BorshDeserialize, BorshSerialize},
    serde::{
        de::{self, Error},
        ser, Deserialize, Serialize,
    },
    std::{
        fmt::{self, Display, Formatter},
        io,
        str::FromStr,
    },
};

/// Longest allowed port or channel identifier.
const MAX_IDENTIFIER_LENGTH: usize = 64;

/// Validate a port or channel identifier: non-empty, bounded length, and
/// restricted to ASCII alphanumerics plus `.`, `_`, `+`, `-`, `#`, `[`, `]`,
/// `<`, `>`.
fn validate_identifier(s: &str) -> Result<(), &'static str> {
    if s.is_empty() {
        return Err("empty identifier");
    }

    if s.len() > MAX_IDENTIFIER_LENGTH {
        return Err("too long");
    }

    if s.chars()
        .any(|ch| !ch.is_ascii_alphanumeric() && !".+_-#[]<>".contains(ch))
    {
        return Err("disallowed character");
    }

    Ok(())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Create an identifier without going through validation.
            ///
            /// Intended for constants and tests, where the input is known to
            /// be valid.
            pub fn new_unchecked<T>(s: T) -> Self
            where
                T: Into<String>,
            {
                Self(s.into())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = StdError;

            fn from_str(s: &str) -> StdResult<Self> {
                s.to_string().try_into()
            }
        }

        impl TryFrom<String> for $name {
            type Error = StdError;

            fn try_from(s: String) -> StdResult<Self> {
                if let Err(reason) = validate_identifier(&s) {
                    return Err(StdError::invalid_identifier(s, reason));
                }

                Ok(Self(s))
            }
        }

        impl TryFrom<&str> for $name {
            type Error = StdError;

            fn try_from(s: &str) -> StdResult<Self> {
                s.to_string().try_into()
            }
        }

        impl ser::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ser::Serializer,
            {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> de::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: de::Deserializer<'de>,
            {
                <String as de::Deserialize>::deserialize(deserializer)?
                    .try_into()
                    .map_err(D::Error::custom)
            }
        }

        impl BorshSerialize for $name {
            fn serialize<W>(&self, writer: &mut W) -> io::Result<()>
            where
                W: io::Write,
            {
                BorshSerialize::serialize(&self.0, writer)
            }
        }

        impl BorshDeserialize for $name {
            fn deserialize_reader<R>(reader: &mut R) -> io::Result<Self>
            where
                R: io::Read,
            {
                <String as BorshDeserialize>::deserialize_reader(reader)?
                    .try_into()
                    .map_err(io::Error::other)
            }
        }
    };
}

identifier! {
    /// Identifier of the port a packet was sent on, e.g. `transfer`.
    PortId
}

identifier! {
    /// Identifier of the channel a packet was sent on, e.g. `channel-0`.
    ChannelId
}

/// A packet's position within its channel. Strictly increasing, assigned by
/// the channel state machine when the packet is sent.
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
pub struct Sequence(u64);

impl Sequence {
    pub const fn new(sequence: u64) -> Self {
        Self(sequence)
    }

    pub const fn u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for Sequence {
    fn from(sequence: u64) -> Self {
        Self(sequence)
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_string())
    }
}

impl ser::Serialize for Sequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Sequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let s = <String as de::Deserialize>::deserialize(deserializer)?;
        s.parse::<u64>().map(Self).map_err(D::Error::custom)
    }
}

/// Unique identity of one packet within one channel.
#[derive(
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub struct PacketId {
    pub port_id: PortId,
    pub channel_id: ChannelId,
    pub sequence: Sequence,
}

impl PacketId {
    pub fn new(port_id: PortId, channel_id: ChannelId, sequence: Sequence) -> Self {
        Self {
            port_id,
            channel_id,
            sequence,
        }
    }
}

impl Display for PacketId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.port_id, self.channel_id, self.sequence)
    }
}

// ----------------------------------- tests -----------------------------------
