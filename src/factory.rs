use std::{borrow::Borrow, fmt, hash::Hash};

use tracing::debug;

use crate::{error::MapError, registry::InstanceRegistry};

/// An [`InstanceRegistry`] that builds missing instances on demand.
///
/// The constructor runs at most once per id, as long as nobody registers that id by hand
/// through [`LazyInstanceFactory::add_instance`] before it is first requested. Nothing here
/// locks: callers sharing a factory across threads should keep it behind a `Mutex` for the
/// whole [`LazyInstanceFactory::get_or_create`] call.
pub struct LazyInstanceFactory<Id, T, F> {
    registry: InstanceRegistry<Id, T>,
    constructor: F,
}

impl<Id, T, F> LazyInstanceFactory<Id, T, F>
where
    Id: Hash + Eq,
    F: FnMut(&Id) -> T,
{
    pub fn new(constructor: F) -> Self {
        Self {
            registry: InstanceRegistry::new(),
            constructor,
        }
    }

    pub fn get_or_create(&mut self, id: Id) -> &T {
        let constructor = &mut self.constructor;
        let len = self.registry.len();
        self.registry.get_or_insert_with(id, |id| {
            debug!(len, "creating instance");
            constructor(id)
        })
    }

    pub fn add_instance(&mut self, id: Id, instance: T) -> Result<(), MapError> {
        self.registry.add_instance(id, instance)
    }

    pub fn get_instance<Q>(&self, id: &Q) -> Option<&T>
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry.get_instance(id)
    }

    pub fn must_get<Q>(&self, id: &Q) -> Result<&T, MapError>
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry.must_get(id)
    }

    pub fn has_instance<Q>(&self, id: &Q) -> bool
    where
        Id: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.registry.has_instance(id)
    }

    pub fn registry(&self) -> &InstanceRegistry<Id, T> {
        &self.registry
    }

    pub fn into_registry(self) -> InstanceRegistry<Id, T> {
        self.registry
    }
}

impl<Id, T, F> fmt::Debug for LazyInstanceFactory<Id, T, F>
where
    Id: fmt::Debug,
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyInstanceFactory")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
