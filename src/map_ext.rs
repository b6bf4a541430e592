use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::{
    collection::Collection,
    error::{MapError, Side},
};

/// Removal and collection-valued helpers for [`HashMap`].
pub trait MapExt<K, V> {
    /// Remove `key` and return its value, or fail with [`MapError::KeyNotFound`]
    fn must_remove_key<Q>(&mut self, key: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Add `item` into the collection stored at `key`, creating the collection for a new key
    fn add_to_collection<T>(&mut self, key: K, item: T)
    where
        V: Collection<T>;

    /// Remove `item` from the collection stored at `key`. The key itself is dropped once its
    /// collection becomes empty. Returns false if the key is absent or the item was not in it.
    fn remove_from_collection<T>(&mut self, key: &K, item: &T) -> bool
    where
        V: Collection<T>;

    /// Like [`MapExt::remove_from_collection`], failing with `KeyNotFound(Key)` for an absent
    /// key and `KeyNotFound(Value)` for an item missing from the collection
    fn must_remove_from_collection<T>(&mut self, key: &K, item: &T) -> Result<(), MapError>
    where
        V: Collection<T>;
}

impl<K, V> MapExt<K, V> for HashMap<K, V>
where
    K: Hash + Eq,
{
    fn must_remove_key<Q>(&mut self, key: &Q) -> Result<V, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove(key).ok_or(MapError::KeyNotFound(Side::Key))
    }

    fn add_to_collection<T>(&mut self, key: K, item: T)
    where
        V: Collection<T>,
    {
        self.entry(key).or_default().add(item);
    }

    fn remove_from_collection<T>(&mut self, key: &K, item: &T) -> bool
    where
        V: Collection<T>,
    {
        let Some(collection) = self.get_mut(key) else {
            return false;
        };

        let was_removed = collection.remove(item);
        if collection.is_empty() {
            self.remove(key);
        }
        was_removed
    }

    fn must_remove_from_collection<T>(&mut self, key: &K, item: &T) -> Result<(), MapError>
    where
        V: Collection<T>,
    {
        if !self.contains_key(key) {
            return Err(MapError::KeyNotFound(Side::Key));
        }
        let was_removed = self.remove_from_collection(key, item);
        MapError::ensure_removed(was_removed, Side::Value)
    }
}
