//! Ordered set of unique keys.
//!
//! [`Set`] is a thin wrapper around `RbTree<K, ()>`: every key is also its own
//! entry, iteration is in ascending comparator order and duplicates are refused
//! with [`Error::KeyDuplicate`](crate::Error::KeyDuplicate).

use core::fmt;

use crate::error::Result;
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::iter::Traversable;
use crate::trees::rb_tree::{self, RbTree};

/// An ordered set backed by a red-black tree.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `K` | Key type |
/// | `C` | [`Comparator`] defining key order and equality |
/// | `D` | [`Destructor`] for keys the set discards |
pub struct Set<K, C = NaturalOrder, D = DropValue>
where
    D: Destructor<K>,
{
    tree: RbTree<K, (), C, D, DropValue>,
}

impl<K: Ord> Set<K> {
    /// Creates an empty set ordered by `Ord`.
    pub fn natural() -> Self {
        Self::new(NaturalOrder, DropValue)
    }
}

impl<K, C, D> Set<K, C, D>
where
    D: Destructor<K>,
{
    /// Creates an empty set.
    pub fn new(compare: C, destroy: D) -> Self {
        Self {
            tree: RbTree::new(compare, destroy, DropValue),
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Adds `key`; an equal key already present makes this fail with
    /// [`Error::KeyDuplicate`](crate::Error::KeyDuplicate).
    pub fn insert(&mut self, key: K) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.tree.insert(key, ()).map(|_| ())
    }

    pub fn exists(&self, key: &K) -> bool
    where
        C: Comparator<K>,
    {
        self.tree.find(key).is_some()
    }

    /// The stored key equal to `key`.
    pub fn find(&self, key: &K) -> Option<&K>
    where
        C: Comparator<K>,
    {
        self.tree.find(key).and_then(|n| self.tree.key(n))
    }

    /// Removes `key`, releasing the stored key through the destructor.
    pub fn remove(&mut self, key: &K) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.tree.remove(key)
    }

    /// Removes `key` and returns the stored key without destroying it.
    pub fn take(&mut self, key: &K) -> Result<K>
    where
        C: Comparator<K>,
    {
        self.tree.take(key).map(|(k, ())| k)
    }

    /// Smallest key.
    pub fn first(&self) -> Option<&K> {
        self.tree.first().and_then(|n| self.tree.key(n))
    }

    /// Largest key.
    pub fn last(&self) -> Option<&K> {
        self.tree.last().and_then(|n| self.tree.key(n))
    }

    /// Iterates keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Tears the set down, releasing every key through the destructor.
    pub fn delete(self) {
        self.tree.delete();
    }
}

impl<K, C, D> Default for Set<K, C, D>
where
    C: Default,
    D: Destructor<K> + Default,
{
    fn default() -> Self {
        Self::new(C::default(), D::default())
    }
}

impl<K: fmt::Debug, C, D> fmt::Debug for Set<K, C, D>
where
    D: Destructor<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K, C, D> Traversable<K> for Set<K, C, D>
where
    D: Destructor<K>,
{
    fn len(&self) -> usize {
        self.tree.len()
    }
    fn for_each_ref(&self, f: &mut dyn FnMut(&K)) {
        self.iter().for_each(f);
    }
}

impl<'a, K, C, D> IntoIterator for &'a Set<K, C, D>
where
    D: Destructor<K>,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over a [`Set`].
pub struct Iter<'a, K> {
    inner: rb_tree::Iter<'a, K, ()>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
