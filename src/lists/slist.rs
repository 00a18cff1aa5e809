//! Singly linked list of owned boxes.
//!
//! Each node owns its [`ObjectBox`] and, exclusively, the next node. Only a head
//! link is kept, so positional operations and [`push_back`](SList::push_back)
//! walk the chain in O(pos).

use core::fmt;

use crate::error::{Error, Result};
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::iter::Traversable;
use crate::object::ObjectBox;

struct Node<T> {
    value: ObjectBox<T>,
    next: Option<Box<Node<T>>>,
}

/// A singly linked list with positional insert/remove and linear search.
pub struct SList<T, C = NaturalOrder, D = DropValue>
where
    D: Destructor<T>,
{
    head: Option<Box<Node<T>>>,
    len: usize,
    destroy: D,
    compare: C,
}

impl<T: Ord> SList<T> {
    /// Creates an empty list ordered by `Ord` whose discarded elements are dropped.
    pub fn natural() -> Self {
        Self::new(DropValue, NaturalOrder)
    }
}

impl<T, C, D> SList<T, C, D>
where
    D: Destructor<T>,
{
    /// Creates an empty list.
    pub fn new(destroy: D, compare: C) -> Self {
        Self {
            head: None,
            len: 0,
            destroy,
            compare,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Inserts `elem` so that it ends up at position `pos`.
    ///
    /// `pos == 0` pushes at the front and `pos == len()` appends. Larger
    /// positions fail with [`Error::InsertFailed`].
    pub fn insert(&mut self, pos: usize, elem: T) -> Result<()> {
        let len = self.len;
        if pos > len {
            log::debug!("slist insert at {} rejected, len {}", pos, len);
            return Err(Error::InsertFailed { pos, len });
        }
        let mut link = &mut self.head;
        for _ in 0..pos {
            match link {
                Some(node) => link = &mut node.next,
                None => return Err(Error::InsertFailed { pos, len }),
            }
        }
        let next = link.take();
        *link = Some(Box::new(Node {
            value: ObjectBox::new(elem),
            next,
        }));
        self.len += 1;
        Ok(())
    }

    pub fn push_front(&mut self, elem: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node {
            value: ObjectBox::new(elem),
            next,
        }));
        self.len += 1;
    }

    /// Appends `elem` after walking to the last node.
    pub fn push_back(&mut self, elem: T) {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(Node {
            value: ObjectBox::new(elem),
            next: None,
        }));
        self.len += 1;
    }

    /// Unlinks the node at `pos` and releases its value through the destructor.
    pub fn remove(&mut self, pos: usize) -> Result<()> {
        let value = self.take(pos)?;
        self.destroy.destroy(value);
        Ok(())
    }

    /// Unlinks the node at `pos` and hands its value to the caller.
    pub fn take(&mut self, pos: usize) -> Result<T> {
        let len = self.len;
        if pos >= len {
            log::debug!("slist remove at {} rejected, len {}", pos, len);
            return Err(Error::IndexOutOfBound { index: pos, len });
        }
        let mut link = &mut self.head;
        for _ in 0..pos {
            match link {
                Some(node) => link = &mut node.next,
                None => return Err(Error::IndexOutOfBound { index: pos, len }),
            }
        }
        let node = link.take().ok_or(Error::IndexOutOfBound { index: pos, len })?;
        let Node { value, next } = *node;
        *link = next;
        self.len -= 1;
        Ok(value.into_inner())
    }

    /// First element the comparator reports equal to `value`.
    pub fn find(&self, value: &T) -> Option<&T>
    where
        C: Comparator<T>,
    {
        self.iter()
            .find(|v| self.compare.compare(v, value).is_eq())
    }

    /// Position of the first element the comparator reports equal to `value`.
    pub fn position(&self, value: &T) -> Option<usize>
    where
        C: Comparator<T>,
    {
        self.iter()
            .position(|v| self.compare.compare(v, value).is_eq())
    }

    /// Calls `f` on every element, head to tail.
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
            remaining: self.len,
        }
    }

    /// Tears the list down, releasing every element through the destructor.
    pub fn delete(mut self) {
        self.teardown();
    }

    // Iterative so long chains don't recurse through `Box` drops.
    fn teardown(&mut self) {
        let mut cur = self.head.take();
        while let Some(node) = cur {
            let Node { value, next } = *node;
            cur = next;
            self.destroy.destroy(value.into_inner());
        }
        self.len = 0;
    }
}

impl<T, C, D> Drop for SList<T, C, D>
where
    D: Destructor<T>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, C, D> Default for SList<T, C, D>
where
    C: Default,
    D: Destructor<T> + Default,
{
    fn default() -> Self {
        Self::new(D::default(), C::default())
    }
}

impl<T: fmt::Debug, C, D> fmt::Debug for SList<T, C, D>
where
    D: Destructor<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, D> Traversable<T> for SList<T, C, D>
where
    D: Destructor<T>,
{
    fn len(&self) -> usize {
        self.len
    }
    fn for_each_ref(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<'a, T, C, D> IntoIterator for &'a SList<T, C, D>
where
    D: Destructor<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Head-to-tail iterator over an [`SList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        self.remaining -= 1;
        Some(node.value.get())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
