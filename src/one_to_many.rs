use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use tracing::{debug, trace, warn};

use crate::{
    collection::Collection,
    error::{MapError, Side},
    map_ext::MapExt,
};

/// Two way map between a key and the items of its collection. An item belongs to at most one
/// key, and a key only exists while its collection is non-empty.
#[derive(Clone, Debug)]
pub struct OneToManyMap<K, T, C = Vec<T>> {
    forward: HashMap<K, C>,
    backward: HashMap<T, K>,
}

impl<K, T, C> Default for OneToManyMap<K, T, C> {
    fn default() -> Self {
        Self {
            forward: Default::default(),
            backward: Default::default(),
        }
    }
}

impl<K, T, C> OneToManyMap<K, T, C>
where
    K: Hash + Eq + Clone,
    T: Hash + Eq + Clone,
    C: Collection<T>,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Group `items` by `key_selector` and turn every group into a collection with
    /// `collection_builder`.
    ///
    /// The reverse index is built from the finished collections. An item that lands under
    /// two keys is indexed to whichever group is visited last. Groups the builder turns into
    /// an empty collection are left out.
    pub fn from_items<I, S, B>(items: I, mut key_selector: S, mut collection_builder: B) -> Self
    where
        I: IntoIterator<Item = T>,
        S: FnMut(&T) -> K,
        B: FnMut(Vec<T>) -> C,
    {
        let mut groups: HashMap<K, Vec<T>> = HashMap::new();
        for item in items {
            groups.add_to_collection(key_selector(&item), item);
        }

        let mut result = Self::new();
        for (key, group) in groups {
            let collection = collection_builder(group);
            if collection.is_empty() {
                continue;
            }
            for item in collection.items() {
                result.backward.insert(item.clone(), key.clone());
            }
            result.forward.insert(key, collection);
        }
        debug!(
            keys = result.forward.len(),
            items = result.backward.len(),
            "built one to many map"
        );

        result
    }

    /// Add `item` to the collection of `key`.
    ///
    /// The reverse index is overwritten without taking the item out of a collection it may
    /// already sit in; the key it pointed to before is returned.
    pub fn add(&mut self, key: K, item: T) -> Option<K> {
        self.forward.add_to_collection(key.clone(), item.clone());
        let previous = self.backward.insert(item, key);
        trace!(
            keys = self.forward.len(),
            items = self.backward.len(),
            reassigned = previous.is_some(),
            "added item"
        );
        previous
    }

    /// Remove `key` together with all of its items. Returns false if the key is absent.
    ///
    /// Fails with [`MapError::KeyNotFound`] if one of the items is missing from the reverse
    /// index, which only happens after [`OneToManyMap::add`] moved it elsewhere. The map is
    /// left unchanged in that case.
    pub fn remove_key<Q>(&mut self, key: &Q) -> Result<bool, MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(collection) = self.forward.get(key) else {
            return Ok(false);
        };

        if !collection.items().all(|item| self.backward.contains_key(item)) {
            warn!("item of removed key is missing from reverse index");
            return Err(MapError::KeyNotFound(Side::Value));
        }

        for item in collection.items() {
            self.backward.remove(item);
        }
        self.forward.must_remove_key(key)?;
        trace!(
            keys = self.forward.len(),
            items = self.backward.len(),
            "removed key"
        );
        Ok(true)
    }

    pub fn must_remove_key<Q>(&mut self, key: &Q) -> Result<(), MapError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let was_removed = self.remove_key(key)?;
        MapError::ensure_removed(was_removed, Side::Key)
    }

    /// Remove a single item. Its key is dropped when this empties the key's collection.
    /// Returns false if the item is absent.
    pub fn remove_value(&mut self, item: &T) -> Result<bool, MapError> {
        let Some(key) = self.backward.remove(item) else {
            return Ok(false);
        };

        if let Err(error) = self.forward.must_remove_from_collection(&key, item) {
            warn!("removed item is missing from the collection of its key");
            return Err(error);
        }
        trace!(
            keys = self.forward.len(),
            items = self.backward.len(),
            "removed item"
        );
        Ok(true)
    }

    pub fn get_items<Q>(&self, key: &Q) -> Option<&C>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key)
    }

    pub fn get_key<Q>(&self, item: &Q) -> Option<&K>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.get(item)
    }

    pub fn has_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn has_item<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.contains_key(item)
    }

    pub fn forward(&self) -> &HashMap<K, C> {
        &self.forward
    }

    pub fn backward(&self) -> &HashMap<T, K> {
        &self.backward
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.forward.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &C)> + '_ {
        self.forward.iter()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
