use {
    crate::{join_keys, nested_namespaces_with_key, split_keys},
    std::borrow::Cow,
    tollgate_types::{
        Addr, ChannelId, Denom, PacketId, PortId, Sequence, StdError, StdResult,
    },
};

/// A single serialized key segment, either borrowed or owned.
pub type RawKey<'a> = Cow<'a, [u8]>;

/// Describes a type usable as a key in a [`Map`](crate::Map).
///
/// Keys serialize to raw bytes without going through serde: the encoding must
/// be compact, infallible, and order-preserving, none of which serde
/// guarantees. Compound keys (tuples) are encoded as their segments with each
/// segment but the last prefixed by its 2-byte big-endian length, so a prefix
/// scan knows where one segment ends and the next begins.
pub trait PrimaryKey {
    /// The number of segments the key serializes to. 1 for plain keys;
    /// the sum of the elements' counts for compound keys. Needed to decode
    /// nested compound keys unambiguously.
    const KEY_ELEMS: u8;

    /// For compound keys, the leading elements used in prefix iteration;
    /// `()` for plain keys.
    type Prefix: Prefixer;

    /// The elements remaining once `Prefix` is stripped; decoded when
    /// iterating a prefix.
    type Suffix: PrimaryKey;

    /// The owned type raw keys decode into. E.g. `&Denom` decodes into
    /// `Denom`.
    type Output;

    /// Serialize the key into one or more raw segments.
    fn raw_keys(&self) -> Vec<RawKey>;

    /// Serialize the segments into one byte string: every segment but the
    /// last length-prefixed.
    fn joined_key(&self) -> Vec<u8> {
        let mut raw_keys = self.raw_keys();
        let last = raw_keys.pop();
        nested_namespaces_with_key(None, &raw_keys, last.as_ref())
    }

    /// Deserialize a joined key back into the output type.
    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output>;
}

/// Describes a type usable as the leading part of a key in prefix scans.
pub trait Prefixer {
    fn raw_prefixes(&self) -> Vec<RawKey>;
}

// Every key can lead a prefix scan over the keys it is a prefix of.
impl<T> Prefixer for T
where
    T: PrimaryKey,
{
    fn raw_prefixes(&self) -> Vec<RawKey> {
        self.raw_keys()
    }
}

impl PrimaryKey for () {
    type Output = ();
    type Prefix = ();
    type Suffix = ();

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        if !bytes.is_empty() {
            return Err(StdError::deserialize::<Self::Output, _>(
                "key",
                "expecting empty bytes",
            ));
        }

        Ok(())
    }
}

impl PrimaryKey for u64 {
    type Output = u64;
    type Prefix = ();
    type Suffix = Self;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        // Big endian, so that the byte-wise iteration order of the store
        // matches numerical order.
        vec![Cow::Owned(self.to_be_bytes().to_vec())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        bytes
            .try_into()
            .map(u64::from_be_bytes)
            .map_err(|_| StdError::deserialize::<Self::Output, _>("key", "expecting 8 bytes"))
    }
}

impl PrimaryKey for Sequence {
    type Output = Sequence;
    type Prefix = ();
    type Suffix = Self;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![Cow::Owned(self.u64().to_be_bytes().to_vec())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        u64::from_slice(bytes).map(Sequence::new)
    }
}

impl PrimaryKey for Addr {
    type Output = Addr;
    type Prefix = ();
    type Suffix = Self;

    const KEY_ELEMS: u8 = 1;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![Cow::Owned(self.as_ref().to_vec())]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        bytes
            .try_into()
            .map(Addr::from_array)
            .map_err(|_| StdError::deserialize::<Self::Output, _>("key", "expecting 20 bytes"))
    }
}

macro_rules! impl_string_key {
    ($($ty:ty),+ $(,)?) => {
        $(impl PrimaryKey for &$ty {
            type Output = $ty;
            type Prefix = ();
            type Suffix = Self;

            const KEY_ELEMS: u8 = 1;

            fn raw_keys(&self) -> Vec<RawKey> {
                vec![Cow::Borrowed(self.as_str().as_bytes())]
            }

            fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
                let s = std::str::from_utf8(bytes)
                    .map_err(|err| StdError::deserialize::<Self::Output, _>("key", err))?;
                s.try_into()
            }
        })+
    };
}

impl_string_key!(Denom, PortId, ChannelId);

impl<A, B> PrimaryKey for (A, B)
where
    A: PrimaryKey,
    B: PrimaryKey,
{
    type Output = (A::Output, B::Output);
    type Prefix = A;
    type Suffix = B;

    const KEY_ELEMS: u8 = A::KEY_ELEMS + B::KEY_ELEMS;

    fn raw_keys(&self) -> Vec<RawKey> {
        let mut raw_keys = self.0.raw_keys();
        raw_keys.extend(self.1.raw_keys());
        raw_keys
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let segments = split_keys(bytes, Self::KEY_ELEMS)?;
        let (a_segments, b_segments) = segments.split_at(A::KEY_ELEMS as usize);

        let a = A::from_slice(&join_keys(a_segments))?;
        let b = B::from_slice(&join_keys(b_segments))?;

        Ok((a, b))
    }
}

impl<'a> PrimaryKey for &'a PacketId {
    type Output = PacketId;
    type Prefix = (&'a PortId, &'a ChannelId);
    type Suffix = Sequence;

    const KEY_ELEMS: u8 = 3;

    fn raw_keys(&self) -> Vec<RawKey> {
        vec![
            Cow::Borrowed(self.port_id.as_str().as_bytes()),
            Cow::Borrowed(self.channel_id.as_str().as_bytes()),
            Cow::Owned(self.sequence.u64().to_be_bytes().to_vec()),
        ]
    }

    fn from_slice(bytes: &[u8]) -> StdResult<Self::Output> {
        let segments = split_keys(bytes, Self::KEY_ELEMS)?;

        Ok(PacketId::new(
            <&PortId>::from_slice(segments[0])?,
            <&ChannelId>::from_slice(segments[1])?,
            Sequence::from_slice(segments[2])?,
        ))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, tollgate_types::ResultExt};

    fn mock_packet_id(sequence: u64) -> PacketId {
        PacketId::new(
            PortId::new_unchecked("transfer"),
            ChannelId::new_unchecked("channel-0"),
            Sequence::new(sequence),
        )
    }

    #[test]
    fn packet_id_roundtrip() {
        let id = mock_packet_id(42);

        let joined = (&id).joined_key();

        <&PacketId>::from_slice(&joined).should_succeed_and_equal(id);
    }

    #[test]
    fn tuple_roundtrip() {
        let denom = Denom::new_unchecked("uatom");
        let key = (Addr::mock(9), &denom);

        let joined = key.joined_key();

        <(Addr, &Denom)>::from_slice(&joined)
            .should_succeed_and_equal((Addr::mock(9), Denom::new_unchecked("uatom")));
    }

    #[test]
    fn sequence_keys_sort_numerically() {
        // Byte-wise order of the encoding must match numerical order, or
        // channel enumeration would come out shuffled.
        let a = Sequence::new(9).joined_key();
        let b = Sequence::new(10).joined_key();
        let c = Sequence::new(256).joined_key();

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn identifier_keys_are_validated_on_decode() {
        <&PortId>::from_slice(b"has space").should_fail_with_error("disallowed character");
    }
}
