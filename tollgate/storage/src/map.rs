use {
    crate::{Borsh, Codec, Path, Prefix, Prefixer, PrimaryKey},
    std::marker::PhantomData,
    tollgate_types::{Order, StdError, StdResult, Storage},
};

/// A typed key-value mapping over a namespaced region of storage.
pub struct Map<K, V, C = Borsh> {
    namespace: &'static str,
    key: PhantomData<K>,
    data: PhantomData<V>,
    codec: PhantomData<C>,
}

impl<K, V, C> Map<K, V, C>
where
    K: PrimaryKey,
    C: Codec<V>,
{
    pub const fn new(namespace: &'static str) -> Self {
        Self {
            namespace,
            key: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }

    fn path(&self, key: K) -> Path<V, C> {
        let mut raw_keys = key.raw_keys();
        let last = raw_keys.pop();
        Path::new(self.namespace.as_bytes(), &raw_keys, last)
    }

    pub fn has(&self, storage: &dyn Storage, key: K) -> bool {
        self.path(key).exists(storage)
    }

    pub fn may_load(&self, storage: &dyn Storage, key: K) -> StdResult<Option<V>> {
        self.path(key).may_load(storage)
    }

    pub fn load(&self, storage: &dyn Storage, key: K) -> StdResult<V> {
        self.path(key).load(storage)
    }

    pub fn save(&self, storage: &mut dyn Storage, key: K, data: &V) -> StdResult<()> {
        self.path(key).save(storage, data)
    }

    pub fn remove(&self, storage: &mut dyn Storage, key: K) {
        self.path(key).remove(storage)
    }

    /// Load the value under the key if it exists, feed it through `action`,
    /// then write back `Some` or delete on `None`.
    pub fn may_modify<F, E>(
        &self,
        storage: &mut dyn Storage,
        key: K,
        action: F,
    ) -> Result<Option<V>, E>
    where
        F: FnOnce(Option<V>) -> Result<Option<V>, E>,
        E: From<StdError>,
    {
        self.path(key).may_modify(storage, action)
    }

    /// Fix the leading key segments, leaving the rest enumerable.
    pub fn prefix(&self, prefix: K::Prefix) -> Prefix<K::Suffix, V, C> {
        Prefix::new(self.namespace.as_bytes(), &prefix.raw_prefixes())
    }

    /// Iterate every record in the map, decoding full keys and values.
    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(K::Output, V)>> + 'b>
    where
        K::Output: 'b,
        V: 'b,
    {
        Prefix::<K, V, C>::new(self.namespace.as_bytes(), &[]).range(storage, order)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        tollgate_types::{
            ChannelId, MockStorage, PacketId, PortId, ResultExt, Sequence, Uint128,
        },
    };

    const SEQUENCES: Map<&PacketId, Uint128> = Map::new("seq");

    fn mock_packet_id(channel: &str, sequence: u64) -> PacketId {
        PacketId::new(
            PortId::new_unchecked("transfer"),
            ChannelId::new_unchecked(channel),
            Sequence::new(sequence),
        )
    }

    #[test]
    fn save_load_roundtrip() {
        let mut storage = MockStorage::new();
        let id = mock_packet_id("channel-0", 1);

        assert!(!SEQUENCES.has(&storage, &id));

        SEQUENCES
            .save(&mut storage, &id, &Uint128::new(88))
            .should_succeed();

        SEQUENCES
            .load(&storage, &id)
            .should_succeed_and_equal(Uint128::new(88));

        SEQUENCES.remove(&mut storage, &id);

        SEQUENCES.may_load(&storage, &id).should_succeed_and_equal(None);
    }

    #[test]
    fn prefix_iteration_is_scoped_and_ordered() {
        let mut storage = MockStorage::new();

        // Insert out of order, across two channels.
        for (channel, sequence) in [
            ("channel-0", 3),
            ("channel-1", 1),
            ("channel-0", 1),
            ("channel-0", 256),
        ] {
            let id = mock_packet_id(channel, sequence);
            SEQUENCES
                .save(&mut storage, &id, &Uint128::new(sequence as u128))
                .should_succeed();
        }

        let port = PortId::new_unchecked("transfer");
        let channel = ChannelId::new_unchecked("channel-0");

        let entries = SEQUENCES
            .prefix((&port, &channel))
            .range(&storage, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()
            .should_succeed();

        // Only channel-0 entries, in ascending sequence order.
        assert_eq!(entries, [
            (Sequence::new(1), Uint128::new(1)),
            (Sequence::new(3), Uint128::new(3)),
            (Sequence::new(256), Uint128::new(256)),
        ]);

        let sequences = SEQUENCES
            .prefix((&port, &channel))
            .keys(&storage, Order::Descending)
            .collect::<StdResult<Vec<_>>>()
            .should_succeed();

        assert_eq!(sequences, [
            Sequence::new(256),
            Sequence::new(3),
            Sequence::new(1),
        ]);

        // Full iteration decodes complete packet identities.
        let all = SEQUENCES
            .range(&storage, Order::Ascending)
            .collect::<StdResult<Vec<_>>>()
            .should_succeed();

        assert_eq!(all.len(), 4);
        assert_eq!(all[3].0, mock_packet_id("channel-1", 1));
    }
}
