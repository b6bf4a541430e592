use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use tracing::trace;

use crate::error::{MapError, Side};

/// Holds unique instances by id. Ids are never removed or reassigned once added.
#[derive(Clone, Debug)]
pub struct InstanceRegistry<Id, T> {
    instances: HashMap<Id, T>,
}

impl<Id, T> Default for InstanceRegistry<Id, T> {
    fn default() -> Self {
        Self {
            instances: Default::default(),
        }
    }
}

impl<Id, T> InstanceRegistry<Id, T>
where
    Id: Hash + Eq,
{
    pub fn new() -> Self {
        Default::default()
    }

    /// Fails with [`MapError::DuplicateKey`] if the id is taken, the stored instance is kept
    pub fn add_instance(&mut self, id: Id, instance: T) -> Result<(), MapError> {
        if self.instances.contains_key(&id) {
            return Err(MapError::DuplicateKey(Side::Key));
        }
        self.instances.insert(id, instance);
        trace!(len = self.instances.len(), "registered instance");
        Ok(())
    }

    pub fn get_instance<Q>(&self, id: &Q) -> Option<&T>
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.instances.get(id)
    }

    pub fn must_get<Q>(&self, id: &Q) -> Result<&T, MapError>
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_instance(id).ok_or(MapError::KeyNotFound(Side::Key))
    }

    pub fn has_instance<Q>(&self, id: &Q) -> bool
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.instances.contains_key(id)
    }

    /// Return the instance for `id`, building and storing it first if there is none yet
    pub(crate) fn get_or_insert_with<F>(&mut self, id: Id, build: F) -> &T
    where
        F: FnOnce(&Id) -> T,
    {
        self.instances.entry(id).or_insert_with_key(build)
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id> + '_ {
        self.instances.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Id, &T)> + '_ {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::InstanceRegistry;
    use crate::error::{MapError, Side};

    #[test]
    fn added_instance_can_be_found() {
        let mut registry = InstanceRegistry::new();
        registry.add_instance("db".to_string(), 5432).unwrap();

        assert!(registry.has_instance("db"));
        assert_eq!(registry.get_instance("db"), Some(&5432));
        assert_eq!(registry.must_get("db"), Ok(&5432));
    }

    #[test]
    fn duplicate_id_keeps_first_instance() {
        let mut registry = InstanceRegistry::new();
        registry.add_instance(1, "x").unwrap();
        assert_eq!(
            registry.add_instance(1, "y"),
            Err(MapError::DuplicateKey(Side::Key))
        );
        assert_eq!(registry.get_instance(&1), Some(&"x"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_id() {
        let registry: InstanceRegistry<u32, String> = InstanceRegistry::new();
        assert_eq!(registry.get_instance(&3), None);
        assert!(!registry.has_instance(&3));
        assert_eq!(registry.must_get(&3), Err(MapError::KeyNotFound(Side::Key)));
    }

    #[test]
    fn queries_do_not_mutate() {
        let mut registry = InstanceRegistry::new();
        registry.add_instance('a', vec![1]).unwrap();
        for _ in 0..3 {
            assert!(registry.has_instance(&'a'));
            assert!(!registry.has_instance(&'b'));
            assert_eq!(registry.get_instance(&'b'), None);
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec![&'a']);
    }
}
