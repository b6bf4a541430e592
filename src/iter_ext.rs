use std::hash::Hash;

use crate::{
    collection::Collection, error::MapError, one_to_many::OneToManyMap, one_to_one::OneToOneMap,
};

/// Collects an iterator into one of the bidirectional maps.
pub trait MapIteratorExt: Iterator + Sized {
    /// Fails on the first repeated key or value
    fn to_one_to_one_map<K, V, KS, VS>(
        self,
        mut key_selector: KS,
        mut value_selector: VS,
    ) -> Result<OneToOneMap<K, V>, MapError>
    where
        K: Hash + Eq + Clone,
        V: Hash + Eq + Clone,
        KS: FnMut(&Self::Item) -> K,
        VS: FnMut(&Self::Item) -> V,
    {
        let mut result = OneToOneMap::new();
        for item in self {
            result.add(key_selector(&item), value_selector(&item))?;
        }
        Ok(result)
    }

    fn to_one_to_many_map<K, C, KS>(self, key_selector: KS) -> OneToManyMap<K, Self::Item, C>
    where
        K: Hash + Eq + Clone,
        Self::Item: Hash + Eq + Clone,
        C: Collection<Self::Item>,
        KS: FnMut(&Self::Item) -> K,
    {
        OneToManyMap::from_items(self, key_selector, |group| {
            let mut collection = C::default();
            for item in group {
                collection.add(item);
            }
            collection
        })
    }
}

impl<I: Iterator> MapIteratorExt for I {}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;

    use super::MapIteratorExt;
    use crate::error::{MapError, Side};

    #[test]
    fn pairs_become_one_to_one_map() {
        let map = ["alpha", "beta"]
            .into_iter()
            .to_one_to_one_map(|word| word.chars().next(), |word| word.len())
            .unwrap();
        assert_eq!(map.get_forward(&Some('a')), Some(&5));
        assert_eq!(map.get_backward(&4), Some(&Some('b')));
    }

    #[test]
    fn repeated_key_or_value_is_rejected() {
        let keys = ["ab", "ac"]
            .into_iter()
            .to_one_to_one_map(|word| word.as_bytes()[0], |word| word.to_string());
        assert_eq!(keys.err(), Some(MapError::DuplicateKey(Side::Key)));

        let values = ["ab", "cb"]
            .into_iter()
            .to_one_to_one_map(|word| word.as_bytes()[0], |word| word.as_bytes()[1]);
        assert_eq!(values.err(), Some(MapError::DuplicateKey(Side::Value)));
    }

    #[test]
    fn items_become_one_to_many_map() {
        let map = ["apple", "avocado", "banana"]
            .into_iter()
            .to_one_to_many_map::<_, HashSet<_>, _>(|fruit| fruit.chars().next());
        assert_eq!(
            map.get_items(&Some('a')),
            Some(&HashSet::from(["apple", "avocado"]))
        );
        assert_eq!(map.get_key("banana"), Some(&Some('b')));
    }
}
