use {
    crate::{nested_namespaces_with_key, prefix_upper_bound, Borsh, Codec, PrimaryKey, RawKey},
    std::marker::PhantomData,
    tollgate_types::{Order, StdResult, Storage},
};

/// A partially-resolved location in a [`Map`](crate::Map): the namespace plus
/// the leading key segments, fixed; the trailing segments (`B`), enumerable.
pub struct Prefix<B, V, C = Borsh> {
    prefix: Vec<u8>,
    suffix: PhantomData<B>,
    data: PhantomData<V>,
    codec: PhantomData<C>,
}

impl<B, V, C> Prefix<B, V, C>
where
    B: PrimaryKey,
    C: Codec<V>,
{
    pub(crate) fn new(namespace: &[u8], prefixes: &[RawKey]) -> Self {
        Self {
            // Every component including the namespace is length-prefixed;
            // only the final key segment of a full path isn't.
            prefix: nested_namespaces_with_key(Some(namespace), prefixes, None),
            suffix: PhantomData,
            data: PhantomData,
            codec: PhantomData,
        }
    }

    /// Iterate records under this prefix, decoding both the remaining key
    /// segments and the value.
    pub fn range<'b>(
        &self,
        storage: &'b dyn Storage,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<(B::Output, V)>> + 'b>
    where
        B::Output: 'b,
        V: 'b,
    {
        let max = prefix_upper_bound(&self.prefix);
        let prefix_len = self.prefix.len();

        let iter = storage
            .scan(Some(self.prefix.as_slice()), max.as_deref(), order)
            .map(move |(k, v)| {
                let suffix = B::from_slice(&k[prefix_len..])?;
                let data = C::decode(&v)?;
                Ok((suffix, data))
            });

        Box::new(iter)
    }

    /// Iterate only the decoded keys under this prefix.
    pub fn keys<'b>(
        &self,
        storage: &'b dyn Storage,
        order: Order,
    ) -> Box<dyn Iterator<Item = StdResult<B::Output>> + 'b>
    where
        B::Output: 'b,
    {
        let max = prefix_upper_bound(&self.prefix);
        let prefix_len = self.prefix.len();

        let iter = storage
            .scan(Some(self.prefix.as_slice()), max.as_deref(), order)
            .map(move |(k, _)| B::from_slice(&k[prefix_len..]));

        Box::new(iter)
    }
}
