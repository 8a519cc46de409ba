use {
    crate::{Borsh, Codec, Path},
    std::ops::Deref,
};

/// A single value stored under a fixed key.
pub struct Item<T, C = Borsh>
where
    C: Codec<T>,
{
    path: Path<T, C>,
}

impl<T, C> Item<T, C>
where
    C: Codec<T>,
{
    pub const fn new(storage_key: &'static str) -> Self {
        Self {
            path: Path::from_raw(storage_key.as_bytes()),
        }
    }
}

// `Item` is a wrapper over a `Path` with a fixed key; rather than repeating
// the accessor methods, expose them through `Deref`.
impl<T, C> Deref for Item<T, C>
where
    C: Codec<T>,
{
    type Target = Path<T, C>;

    fn deref(&self) -> &Self::Target {
        &self.path
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        tollgate_types::{MockStorage, ResultExt},
    };

    const LOCKED: Item<bool> = Item::new("locked");

    #[test]
    fn save_load_remove() {
        let mut storage = MockStorage::new();

        // Nothing saved yet.
        assert!(!LOCKED.exists(&storage));
        LOCKED.may_load(&storage).should_succeed_and_equal(None);
        LOCKED.load(&storage).should_fail_with_error("data not found");

        LOCKED.save(&mut storage, &true).should_succeed();

        assert!(LOCKED.exists(&storage));
        LOCKED.load(&storage).should_succeed_and_equal(true);

        // Removing twice is fine.
        LOCKED.remove(&mut storage);
        LOCKED.remove(&mut storage);
        assert!(!LOCKED.exists(&storage));
    }
}
