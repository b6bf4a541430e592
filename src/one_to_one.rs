use std::{
    borrow::Borrow,
    collections::{HashMap, HashSet},
    hash::Hash,
};

use tracing::{debug, trace};

use crate::{
    error::{MapError, Side},
    map_ext::MapExt,
};

/// Two way 1 to 1 map. Every key has exactly one value and every value exactly one key.
#[derive(Clone, Debug)]
pub struct OneToOneMap<K, V> {
    forward: HashMap<K, V>,
    backward: HashMap<V, K>,
}

impl<K, V> Default for OneToOneMap<K, V> {
    fn default() -> Self {
        Self {
            forward: Default::default(),
            backward: Default::default(),
        }
    }
}

impl<K, V> OneToOneMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Build a map by copying `mapping`.
    ///
    /// Duplicate values are not validated: the reverse view keeps whichever pair came last in
    /// iteration order. Use [`TryFrom`] for a checked build.
    pub fn from_map(mapping: &HashMap<K, V>) -> Self {
        Self::from_owned(mapping.clone())
    }

    /// Build a map that takes ownership of `mapping` as its forward view, no copy is made.
    ///
    /// Same duplicate value caveat as [`OneToOneMap::from_map`].
    pub fn from_owned(mapping: HashMap<K, V>) -> Self {
        let backward = mapping
            .iter()
            .map(|(key, value)| (value.clone(), key.clone()))
            .collect::<HashMap<_, _>>();
        debug!(
            keys = mapping.len(),
            values = backward.len(),
            "built one to one map"
        );

        Self {
            forward: mapping,
            backward,
        }
    }

    /// Insert a pair. Fails without touching the map if either the key or the value is taken.
    pub fn add(&mut self, key: K, value: V) -> Result<(), MapError> {
        if self.forward.contains_key(&key) {
            return Err(MapError::DuplicateKey(Side::Key));
        }
        if self.backward.contains_key(&value) {
            return Err(MapError::DuplicateKey(Side::Value));
        }

        self.forward.insert(key.clone(), value.clone());
        self.backward.insert(value, key);
        trace!(len = self.forward.len(), "added pair");
        Ok(())
    }

    /// Remove `key` from the forward view and `value` from the backward view.
    ///
    /// The two removals are independent: nothing checks that `key` and `value` were paired with
    /// each other. Returns true if at least one side removed something.
    pub fn remove<QK, QV>(&mut self, key: &QK, value: &QV) -> bool
    where
        K: Borrow<QK>,
        V: Borrow<QV>,
        QK: Hash + Eq + ?Sized,
        QV: Hash + Eq + ?Sized,
    {
        let was_removed_forward = self.forward.remove(key).is_some();
        let was_removed_backward = self.backward.remove(value).is_some();
        trace!(
            was_removed_forward,
            was_removed_backward,
            "removed pair"
        );
        was_removed_forward || was_removed_backward
    }

    /// Like [`OneToOneMap::remove`] but both removals must find an entry.
    ///
    /// The key is removed first; a missing key fails before the value side is touched.
    pub fn must_remove<QK, QV>(&mut self, key: &QK, value: &QV) -> Result<(), MapError>
    where
        K: Borrow<QK>,
        V: Borrow<QV>,
        QK: Hash + Eq + ?Sized,
        QV: Hash + Eq + ?Sized,
    {
        self.forward.must_remove_key(key)?;
        self.backward
            .must_remove_key(value)
            .map_err(|_| MapError::KeyNotFound(Side::Value))?;
        trace!(len = self.forward.len(), "removed pair");
        Ok(())
    }

    pub fn get_forward<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.get(key)
    }

    pub fn get_backward<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.get(value)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.forward.contains_key(key)
    }

    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.backward.contains_key(value)
    }

    pub fn forward(&self) -> &HashMap<K, V> {
        &self.forward
    }

    pub fn backward(&self) -> &HashMap<V, K> {
        &self.backward
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.forward.iter()
    }

    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

impl<K, V> TryFrom<HashMap<K, V>> for OneToOneMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Hash + Eq + Clone,
{
    type Error = MapError;

    fn try_from(value: HashMap<K, V>) -> Result<Self, Self::Error> {
        let mut existing_backward = HashSet::new();
        for v in value.values() {
            if !existing_backward.insert(v) {
                return Err(MapError::DuplicateKey(Side::Value));
            }
        }

        Ok(Self::from_owned(value))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::OneToOneMap;
    use crate::error::{MapError, Side};

    fn sample() -> OneToOneMap<String, u32> {
        let mut map = OneToOneMap::new();
        map.add("one".to_string(), 1).unwrap();
        map.add("two".to_string(), 2).unwrap();
        map
    }

    #[test]
    fn added_pair_is_visible_both_ways() {
        let map = sample();
        assert_eq!(map.get_forward("one"), Some(&1));
        assert_eq!(map.get_backward(&2).map(String::as_str), Some("two"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.backward().len(), 2);
    }

    #[rstest]
    #[case("one", 3, Side::Key)]
    #[case("three", 1, Side::Value)]
    #[case("one", 1, Side::Key)]
    fn duplicate_add_leaves_map_untouched(
        #[case] key: &str,
        #[case] value: u32,
        #[case] side: Side,
    ) {
        let mut map = sample();
        assert_eq!(
            map.add(key.to_string(), value),
            Err(MapError::DuplicateKey(side))
        );
        assert_eq!(map.forward(), sample().forward());
        assert_eq!(map.backward(), sample().backward());
    }

    #[test]
    fn copying_constructor_leaves_source_alone() {
        let source = HashMap::from([('a', 1), ('b', 2)]);
        let mut map = OneToOneMap::from_map(&source);
        map.add('c', 3).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(map.forward().len(), 3);
        assert_eq!(map.get_backward(&1), Some(&'a'));
    }

    #[test]
    fn owning_constructor_inverts_mapping() {
        let map = OneToOneMap::from_owned(HashMap::from([('a', 1), ('b', 2)]));
        assert_eq!(
            map.backward(),
            &HashMap::from([(1, 'a'), (2, 'b')])
        );
    }

    #[test]
    fn unchecked_constructor_collapses_duplicate_values() {
        let map = OneToOneMap::from_owned(HashMap::from([('a', 1), ('b', 1)]));
        assert_eq!(map.forward().len(), 2);
        assert_eq!(map.backward().len(), 1);
    }

    #[test]
    fn checked_constructor_rejects_duplicate_values() {
        let result = OneToOneMap::try_from(HashMap::from([('a', 1), ('b', 1)]));
        assert_eq!(result.err(), Some(MapError::DuplicateKey(Side::Value)));

        let map = OneToOneMap::try_from(HashMap::from([('a', 1), ('b', 2)])).unwrap();
        assert_eq!(map.get_backward(&2), Some(&'b'));
    }

    #[test]
    fn remove_reports_any_side() {
        let mut map = sample();
        assert!(map.remove("one", &1));
        assert!(!map.contains_key("one"));
        assert!(!map.contains_value(&1));
        assert!(!map.remove("one", &1));
    }

    #[test]
    fn remove_does_not_check_pairing() {
        let mut map = sample();
        // "one" is paired with 1, yet 2 is dropped from the backward view
        assert!(map.remove("one", &2));
        assert_eq!(map.get_forward("two"), Some(&2));
        assert_eq!(map.get_backward(&2), None);
        assert_eq!(map.get_backward(&1).map(String::as_str), Some("one"));
    }

    #[test]
    fn must_remove_requires_both_sides() {
        let mut map = sample();
        map.must_remove("one", &1).unwrap();
        assert!(!map.is_empty());
        assert_eq!(
            map.must_remove("one", &2),
            Err(MapError::KeyNotFound(Side::Key))
        );
        assert_eq!(map.get_backward(&2).map(String::as_str), Some("two"));

        assert_eq!(
            map.must_remove("two", &1),
            Err(MapError::KeyNotFound(Side::Value))
        );
        assert!(!map.contains_key("two"));
    }
}
