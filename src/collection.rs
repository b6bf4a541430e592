use std::{
    collections::{BTreeSet, HashSet, VecDeque},
    hash::Hash,
};

/// A growable bag of items, used as the value side of [`crate::OneToManyMap`].
pub trait Collection<T>: Default {
    fn add(&mut self, item: T);

    /// Remove one occurrence of `item`, returning bool indicating if it was here
    fn remove(&mut self, item: &T) -> bool;

    fn count(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a;
}

impl<T: PartialEq> Collection<T> for Vec<T> {
    fn add(&mut self, item: T) {
        self.push(item);
    }

    fn remove(&mut self, item: &T) -> bool {
        let Some(position) = self.iter().position(|existing| existing == item) else {
            return false;
        };
        Vec::remove(self, position);
        true
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}

impl<T: PartialEq> Collection<T> for VecDeque<T> {
    fn add(&mut self, item: T) {
        self.push_back(item);
    }

    fn remove(&mut self, item: &T) -> bool {
        let Some(position) = self.iter().position(|existing| existing == item) else {
            return false;
        };
        VecDeque::remove(self, position).is_some()
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}

impl<T: Hash + Eq> Collection<T> for HashSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }

    fn remove(&mut self, item: &T) -> bool {
        HashSet::remove(self, item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}

impl<T: Ord> Collection<T> for BTreeSet<T> {
    fn add(&mut self, item: T) {
        self.insert(item);
    }

    fn remove(&mut self, item: &T) -> bool {
        BTreeSet::remove(self, item)
    }

    fn count(&self) -> usize {
        self.len()
    }

    fn items<'a>(&'a self) -> impl Iterator<Item = &'a T>
    where
        T: 'a,
    {
        self.iter()
    }
}
