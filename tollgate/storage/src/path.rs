use {
    crate::{nested_namespaces_with_key, Codec, RawKey},
    std::{borrow::Cow, marker::PhantomData},
    tollgate_types::{StdError, StdResult, Storage},
};

/// A fully-resolved location in storage, holding data of type `T` encoded
/// with codec `C`.
pub struct Path<T, C> {
    storage_key: Cow<'static, [u8]>,
    data: PhantomData<T>,
    codec: PhantomData<C>,
}

impl<T, C> Path<T, C>
where
    C: Codec<T>,
{
    pub(crate) fn new(namespace: &[u8], prefixes: &[RawKey], maybe_key: Option<RawKey>) -> Self {
        Self {
            storage_key: Cow::Owned(nested_namespaces_with_key(
                Some(namespace),
                prefixes,
                maybe_key.as_ref(),
            )),
            data: PhantomData,
            codec: PhantomData,
        }
    }

    pub const fn from_raw(storage_key: &'static [u8]) -> Self {
        Self {
            storage_key: Cow::Borrowed(storage_key),
            data: PhantomData,
            codec: PhantomData,
        }
    }

    pub fn storage_key(&self) -> &[u8] {
        self.storage_key.as_ref()
    }

    pub fn exists(&self, storage: &dyn Storage) -> bool {
        storage.read(self.storage_key()).is_some()
    }

    pub fn may_load(&self, storage: &dyn Storage) -> StdResult<Option<T>> {
        storage
            .read(self.storage_key())
            .map(|raw| C::decode(&raw))
            .transpose()
    }

    pub fn load(&self, storage: &dyn Storage) -> StdResult<T> {
        storage
            .read(self.storage_key())
            .ok_or_else(|| StdError::data_not_found::<T>(self.storage_key()))
            .and_then(|raw| C::decode(&raw))
    }

    pub fn save(&self, storage: &mut dyn Storage, data: &T) -> StdResult<()> {
        let raw = C::encode(data)?;
        storage.write(self.storage_key(), &raw);
        Ok(())
    }

    pub fn remove(&self, storage: &mut dyn Storage) {
        storage.remove(self.storage_key());
    }

    /// Load the value if it exists, feed it through `action`, then write back
    /// `Some` or delete on `None`.
    pub fn may_modify<F, E>(&self, storage: &mut dyn Storage, action: F) -> Result<Option<T>, E>
    where
        F: FnOnce(Option<T>) -> Result<Option<T>, E>,
        E: From<StdError>,
    {
        let maybe_data = action(self.may_load(storage)?)?;

        if let Some(data) = &maybe_data {
            self.save(storage, data)?;
        } else {
            self.remove(storage);
        }

        Ok(maybe_data)
    }
}
