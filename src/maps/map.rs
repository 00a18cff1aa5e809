//! Ordered key → value map.
//!
//! [`Map`] wraps an [`RbTree`]; keys are unique under the comparator and
//! iteration yields `(key, value)` pairs in ascending key order. Inserting an
//! existing key is refused rather than overwriting, so the stored value is
//! never silently replaced.

use core::fmt;

use crate::error::Result;
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::trees::rb_tree::{self, RbTree};

/// An ordered map backed by a red-black tree.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `K` / `V` | Key / value types |
/// | `C` | [`Comparator`] over keys |
/// | `DK` / `DV` | [`Destructor`]s for discarded keys / values |
pub struct Map<K, V, C = NaturalOrder, DK = DropValue, DV = DropValue>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
{
    tree: RbTree<K, V, C, DK, DV>,
}

impl<K: Ord, V> Map<K, V> {
    /// Creates an empty map ordered by `Ord`.
    pub fn natural() -> Self {
        Self::new(NaturalOrder, DropValue, DropValue)
    }
}

impl<K, V, C, DK, DV> Map<K, V, C, DK, DV>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
{
    pub fn new(compare: C, destroy_key: DK, destroy_value: DV) -> Self {
        Self {
            tree: RbTree::new(compare, destroy_key, destroy_value),
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

    /// Adds `key` → `value`. Fails with
    /// [`Error::KeyDuplicate`](crate::Error::KeyDuplicate) when the key exists,
    /// keeping the old value.
    pub fn insert(&mut self, key: K, value: V) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.tree.insert(key, value).map(|_| ())
    }

    pub fn exists(&self, key: &K) -> bool
    where
        C: Comparator<K>,
    {
        self.tree.find(key).is_some()
    }

    /// Value stored under `key`.
    pub fn find(&self, key: &K) -> Option<&V>
    where
        C: Comparator<K>,
    {
        self.tree.get(key)
    }

    /// Removes `key`, releasing both key and value through the destructors.
    pub fn remove(&mut self, key: &K) -> Result<()>
    where
        C: Comparator<K>,
    {
        self.tree.remove(key)
    }

    /// Removes `key` and returns the stored pair without destroying it.
    pub fn take(&mut self, key: &K) -> Result<(K, V)>
    where
        C: Comparator<K>,
    {
        self.tree.take(key)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// Tears the map down, releasing every key and value through the destructors.
    pub fn delete(self) {
        self.tree.delete();
    }
}

impl<K, V, C, DK, DV> Default for Map<K, V, C, DK, DV>
where
    C: Default,
    DK: Destructor<K> + Default,
    DV: Destructor<V> + Default,
{
    fn default() -> Self {
        Self::new(C::default(), DK::default(), DV::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, DK, DV> fmt::Debug for Map<K, V, C, DK, DV>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, DK, DV> IntoIterator for &'a Map<K, V, C, DK, DV>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending `(key, value)` iterator over a [`Map`].
pub struct Iter<'a, K, V> {
    inner: rb_tree::Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
