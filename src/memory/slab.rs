use std::{
    iter::FusedIterator,
    marker::PhantomData,
    ops::{Index, IndexMut},
};

use crate::memory::EntityIndex;

/// A slab arena that manages fixed-sized objects.
///
/// Keys of removed objects are reused for later insertions, so a key is only
/// valid until the object it refers to is removed.
#[derive(Debug, Clone)]
pub struct Slab<K, V> {
    data: Vec<Entry<V>>,
    free: usize,
    len: usize,
    phantom: PhantomData<K>,
}

impl<K, V> Slab<K, V>
where
    K: EntityIndex,
{
    /// Creates an empty [`Slab<K, V>`].
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            free: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            free: 0,
            len: 0,
            phantom: PhantomData,
        }
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether there is no stored value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an upper bound on a valid index in this slab.
    pub fn upper_bound(&self) -> K {
        K::new(self.data.len())
    }

    pub fn contains(&self, key: K) -> bool {
        matches!(self.data.get(key.index()), Some(Entry::Full(_)))
    }

    pub fn insert(&mut self, value: V) -> K {
        let index = self.free;

        if index == self.data.len() {
            self.data.push(Entry::Full(value));
            self.free += 1;
        } else {
            let Entry::Free(next) = self.data[index] else { unreachable!() };
            self.free = next;
            self.data[index] = Entry::Full(value);
        }

        self.len += 1;

        K::new(index)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        let index = key.index();
        let entry = self.data.get_mut(index)?;

        let entry_data = std::mem::replace(entry, Entry::Free(self.free));

        match entry_data {
            Entry::Free(_) => {
                *entry = entry_data;
                None
            }
            Entry::Full(value) => {
                self.free = index;
                self.len -= 1;
                Some(value)
            }
        }
    }

    pub fn get(&self, key: K) -> Option<&V> {
        match self.data.get(key.index()) {
            Some(Entry::Full(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        match self.data.get_mut(key.index()) {
            Some(Entry::Full(value)) => Some(value),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.free = 0;
        self.len = 0;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }
}

impl<K, V> Index<K> for Slab<K, V>
where
    K: EntityIndex,
{
    type Output = V;

    fn index(&self, key: K) -> &Self::Output {
        self.get(key).expect("invalid key")
    }
}

impl<K, V> IndexMut<K> for Slab<K, V>
where
    K: EntityIndex,
{
    fn index_mut(&mut self, key: K) -> &mut Self::Output {
        self.get_mut(key).expect("invalid key")
    }
}

impl<K, V> Default for Slab<K, V>
where
    K: EntityIndex,
{
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum Entry<V> {
    Free(usize),
    Full(V),
}

pub struct Iter<'a, K, V> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Entry<V>>>,
    len: usize,
    phantom: PhantomData<K>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(slab: &'a Slab<K, V>) -> Self {
        Self {
            entries: slab.data.iter().enumerate(),
            len: slab.len,
            phantom: PhantomData,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, entry) in self.entries.by_ref() {
            if let Entry::Full(value) = entry {
                self.len -= 1;
                let key = K::new(index);
                return Some((key, value));
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V>
where
    K: EntityIndex,
{
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> where K: EntityIndex {}

impl<'a, K, V> IntoIterator for &'a Slab<K, V>
where
    K: EntityIndex,
{
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::NodeIndex;

    #[test]
    pub fn insert_and_get() {
        let mut slab: Slab<NodeIndex, u32> = Slab::new();

        let a = slab.insert(10);
        let b = slab.insert(20);

        assert_eq!(slab.len(), 2);
        assert_eq!(slab.get(a), Some(&10));
        assert_eq!(slab[b], 20);
        assert!(slab.contains(a));
    }

    #[test]
    pub fn remove_reuses_keys() {
        let mut slab: Slab<NodeIndex, u32> = Slab::new();

        let a = slab.insert(10);
        let _b = slab.insert(20);

        assert_eq!(slab.remove(a), Some(10));
        assert_eq!(slab.remove(a), None);
        assert!(!slab.contains(a));

        let c = slab.insert(30);
        assert_eq!(c, a);
        assert_eq!(slab.len(), 2);
    }

    #[test]
    pub fn iterates_in_key_order() {
        let mut slab: Slab<NodeIndex, u32> = Slab::new();

        let a = slab.insert(1);
        let b = slab.insert(2);
        let c = slab.insert(3);
        slab.remove(b);

        let items: Vec<_> = slab.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(items, vec![(a, 1), (c, 3)]);
        assert_eq!(slab.iter().len(), 2);
    }
}
