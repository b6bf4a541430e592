use std::{
    hash::Hash,
    io::{Read, Write},
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{
    collection::Collection,
    error::{MapError, Side},
    one_to_many::OneToManyMap,
    one_to_one::OneToOneMap,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode snapshot")]
    Encode(#[from] rmp_serde::encode::Error),
    #[error("failed to decode snapshot")]
    Decode(#[from] rmp_serde::decode::Error),
    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(#[from] MapError),
}

impl<K, V> OneToOneMap<K, V>
where
    K: Hash + Eq + Clone + Serialize + DeserializeOwned,
    V: Hash + Eq + Clone + Serialize + DeserializeOwned,
{
    pub fn dump(&self, buffer: &mut impl Write) -> Result<(), SnapshotError> {
        let scheme = PairScheme {
            pairs: self.iter().collect(),
        };

        rmp_serde::encode::write(buffer, &scheme)?;
        Ok(())
    }

    /// Rebuild a map from [`OneToOneMap::dump`] output, rejecting repeated keys or values
    pub fn read(buffer: &mut impl Read) -> Result<Self, SnapshotError> {
        let scheme: PairScheme<K, V> = rmp_serde::decode::from_read(buffer)?;

        let mut result = Self::new();
        for (key, value) in scheme.pairs {
            result.add(key, value)?;
        }
        debug!(len = result.len(), "loaded one to one map");
        Ok(result)
    }
}

impl<K, T, C> OneToManyMap<K, T, C>
where
    K: Hash + Eq + Clone + Serialize + DeserializeOwned,
    T: Hash + Eq + Clone + Serialize + DeserializeOwned,
    C: Collection<T>,
{
    pub fn dump(&self, buffer: &mut impl Write) -> Result<(), SnapshotError> {
        let scheme = GroupScheme {
            groups: self
                .iter()
                .map(|(key, collection)| (key, collection.items().collect()))
                .collect(),
        };

        rmp_serde::encode::write(buffer, &scheme)?;
        Ok(())
    }

    /// Rebuild a map from [`OneToManyMap::dump`] output, rejecting an item listed under two
    /// different keys. Repeats under the same key are kept, as [`OneToManyMap::add`] allows them.
    pub fn read(buffer: &mut impl Read) -> Result<Self, SnapshotError> {
        let scheme: GroupScheme<K, T> = rmp_serde::decode::from_read(buffer)?;

        let mut result = Self::new();
        for (key, items) in scheme.groups {
            for item in items {
                if result.get_key(&item).is_some_and(|owner| owner != &key) {
                    return Err(MapError::DuplicateKey(Side::Value).into());
                }
                result.add(key.clone(), item);
            }
        }
        debug!(keys = result.len(), "loaded one to many map");
        Ok(result)
    }
}

#[derive(Serialize, Deserialize)]
struct PairScheme<K, V> {
    pairs: Vec<(K, V)>,
}

#[derive(Serialize, Deserialize)]
struct GroupScheme<K, T> {
    groups: Vec<(K, Vec<T>)>,
}
