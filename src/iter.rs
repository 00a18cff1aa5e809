//! Iteration model shared by all containers.
//!
//! Every container hands out a borrowing iterator (`iter()`) that yields its
//! payloads in natural order: index order for [`Array`](crate::Array) and
//! [`Deque`](crate::Deque), link order for [`SList`](crate::SList) and ascending
//! key order for [`Set`](crate::Set) / [`Map`](crate::Map). The sequence is finite
//! and not restartable; call `iter()` again to start over.
//!
//! Because iterators borrow the container, structural mutation while an
//! iterator is alive is rejected at compile time. In-place replacement is the
//! one mutation allowed during traversal and goes through a [`ReplaceCursor`],
//! which holds the container exclusively.

use std::collections::VecDeque;

use crate::error::Result;
use crate::object::ObjectBox;

/// Unwraps an [`ObjectBox`] to the caller's view of the value.
#[inline(always)]
pub fn get_value<T: ?Sized>(raw: &ObjectBox<T>) -> &T {
    raw.get()
}

/// Drains `iter`, calling `f` once per element in sequence order.
pub fn for_each<I, F>(iter: I, mut f: F)
where
    I: IntoIterator,
    F: FnMut(I::Item),
{
    for item in iter {
        f(item);
    }
}

/// A cursor that can overwrite the element it last yielded.
///
/// Implemented by the index-addressed containers ([`Array`](crate::Array) and
/// [`Deque`](crate::Deque)).
pub trait ReplaceCursor<T> {
    /// Advances and returns the next element, or `None` at the end.
    fn get_next(&mut self) -> Option<&T>;

    /// Replaces the element most recently returned by [`get_next`](Self::get_next).
    ///
    /// The previous value is released through the container's destructor.
    /// Fails with [`Error::NotInitialized`](crate::Error::NotInitialized) before
    /// the first successful `get_next`.
    fn replace_value(&mut self, value: T) -> Result<()>;
}

/// An object-safe view over any sequence-like container.
///
/// Lets callers walk an [`Array`](crate::Array), [`Deque`](crate::Deque),
/// [`SList`](crate::SList), [`Set`](crate::Set) or a `std` collection without
/// knowing which one they hold.
pub trait Traversable<T> {
    /// Number of live elements.
    fn len(&self) -> usize;

    /// Returns `true` when there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visits every element in natural order.
    fn for_each_ref(&self, f: &mut dyn FnMut(&T));
}

impl<T> Traversable<T> for Vec<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn for_each_ref(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<T> Traversable<T> for VecDeque<T> {
    fn len(&self) -> usize {
        self.len()
    }
    fn for_each_ref(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: Clone>(t: &dyn Traversable<T>) -> Vec<T> {
        let mut out = Vec::with_capacity(t.len());
        t.for_each_ref(&mut |v| out.push(v.clone()));
        out
    }

    #[test]
    fn test_iter_for_each_preserves_order() {
        let mut seen = Vec::new();
        for_each(vec![3, 1, 2], |v| seen.push(v));
        assert_eq!(seen, vec![3, 1, 2]);
    }

    #[test]
    fn test_iter_get_value() {
        let b = ObjectBox::new("addr");
        assert_eq!(*get_value(&b), "addr");
    }

    #[test]
    fn test_iter_traversable_std() {
        let v = vec![1, 2, 3];
        let d: VecDeque<i32> = [4, 5].into_iter().collect();
        assert_eq!(collect(&v), vec![1, 2, 3]);
        assert_eq!(collect(&d), vec![4, 5]);
        assert!(!Traversable::is_empty(&d));
    }
}
