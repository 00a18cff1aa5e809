//! Circular double-ended queue of owned boxes.
//!
//! # Ring layout
//! [`Deque`] stores its boxes in a fixed-size slot buffer with a `head` cursor
//! (logical index 0), a `tail` cursor (one past the back) and a live count.
//! Logical index `i` lives in physical slot `(head + i) % capacity`; both
//! cursors always stay in `0..capacity`.
//!
//! # Growth
//! When a push finds the ring full, a buffer of twice the capacity is reserved
//! first and the live elements are moved over in logical order, so afterwards
//! `head == 0` and `tail == len`. If the reservation fails the push returns
//! [`Error::Memory`] and the ring is untouched.

use core::fmt;

use super::array::DEFAULT_CAPACITY;
use crate::error::{Error, Result};
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::iter::{ReplaceCursor, Traversable};
use crate::object::ObjectBox;

/// A growable ring buffer supporting O(1) push/pop at both ends.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `T` | Element type |
/// | `C` | [`Comparator`] used by [`find`](Deque::find) |
/// | `D` | [`Destructor`] run on elements the deque discards |
pub struct Deque<T, C = NaturalOrder, D = DropValue>
where
    D: Destructor<T>,
{
    slots: Vec<Option<ObjectBox<T>>>,
    capacity: usize,
    head: usize,
    tail: usize,
    len: usize,
    compare: C,
    destroy: D,
}

impl<T> Deque<T> {
    /// Creates an empty deque with natural ordering whose discarded elements are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, NaturalOrder, DropValue)
    }
}

impl<T, C, D> Deque<T, C, D>
where
    D: Destructor<T>,
{
    /// Creates an empty deque with `capacity` slots (at least one).
    ///
    /// The ring is allocated by the first push, so an oversized capacity
    /// surfaces as [`Error::Memory`] there instead of failing here.
    pub fn new(capacity: usize, compare: C, destroy: D) -> Self {
        Self {
            slots: Vec::new(),
            capacity: capacity.max(1),
            head: 0,
            tail: 0,
            len: 0,
            compare,
            destroy,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the ring.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Maps a logical index to its physical slot.
    #[inline(always)]
    fn physical(&self, index: usize) -> usize {
        (self.head + index) % self.slots.len()
    }

    #[inline(always)]
    fn wrap_dec(&self, idx: usize) -> usize {
        (idx + self.slots.len() - 1) % self.slots.len()
    }

    #[inline(always)]
    fn wrap_inc(&self, idx: usize) -> usize {
        (idx + 1) % self.slots.len()
    }

    /// Doubles the ring and re-linearizes it so that `head == 0`.
    ///
    /// An unallocated ring is sized to the recorded capacity instead.
    #[inline(never)]
    fn grow(&mut self) -> Result<()> {
        let new_capacity = if self.slots.is_empty() {
            self.capacity
        } else {
            self.slots.len().saturating_mul(2)
        };
        let mut slots = Vec::new();
        slots.try_reserve_exact(new_capacity)?;
        for i in 0..self.len {
            let idx = self.physical(i);
            slots.push(self.slots[idx].take());
        }
        slots.resize_with(new_capacity, || None);
        log::trace!(
            "deque capacity {} -> {} (len {})",
            self.slots.len(),
            new_capacity,
            self.len
        );
        self.slots = slots;
        self.capacity = new_capacity;
        self.head = 0;
        self.tail = self.len;
        Ok(())
    }

    /// Appends `elem` at the back.
    pub fn push_back(&mut self, elem: T) -> Result<()> {
        if self.len == self.slots.len() {
            self.grow()?;
        }
        self.slots[self.tail] = Some(ObjectBox::new(elem));
        self.tail = self.wrap_inc(self.tail);
        self.len += 1;
        Ok(())
    }

    /// Prepends `elem` at the front.
    pub fn push_front(&mut self, elem: T) -> Result<()> {
        if self.len == self.slots.len() {
            self.grow()?;
        }
        self.head = self.wrap_dec(self.head);
        self.slots[self.head] = Some(ObjectBox::new(elem));
        self.len += 1;
        Ok(())
    }

    /// Removes the front element and hands it to the caller.
    ///
    /// Fails with [`Error::NotInitialized`] when the deque is empty.
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::NotInitialized);
        }
        let value = self.slots[self.head].take().ok_or(Error::Generic)?;
        self.head = self.wrap_inc(self.head);
        self.len -= 1;
        Ok(value.into_inner())
    }

    /// Removes the back element and hands it to the caller.
    ///
    /// Fails with [`Error::NotInitialized`] when the deque is empty.
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return Err(Error::NotInitialized);
        }
        let idx = self.wrap_dec(self.tail);
        let value = self.slots[idx].take().ok_or(Error::Generic)?;
        self.tail = idx;
        self.len -= 1;
        Ok(value.into_inner())
    }

    /// Element at logical `index` (0 is the front).
    #[inline]
    pub fn element_at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(Error::IndexOutOfBound {
                index,
                len: self.len,
            });
        }
        self.slots[self.physical(index)]
            .as_ref()
            .map(ObjectBox::get)
            .ok_or(Error::Generic)
    }

    pub fn front(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(Error::ElementReturn);
        }
        self.element_at(0)
    }

    pub fn back(&self) -> Result<&T> {
        if self.len == 0 {
            return Err(Error::ElementReturn);
        }
        self.element_at(self.len - 1)
    }

    /// Logical index of the first element the comparator reports equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        C: Comparator<T>,
    {
        self.iter()
            .position(|v| self.compare.compare(v, value).is_eq())
    }

    /// Iterates front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            head: self.head,
            pos: 0,
            len: self.len,
        }
    }

    /// Cursor that can overwrite elements in place while walking front to back.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, C, D> {
        CursorMut {
            deque: self,
            next: 0,
            current: None,
        }
    }

    /// Tears the deque down, releasing every element through the destructor.
    pub fn delete(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        for i in 0..self.len {
            let idx = self.physical(i);
            if let Some(b) = self.slots[idx].take() {
                self.destroy.destroy(b.into_inner());
            }
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }
}

impl<T, C, D> Drop for Deque<T, C, D>
where
    D: Destructor<T>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, C, D> Default for Deque<T, C, D>
where
    C: Default,
    D: Destructor<T> + Default,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, C::default(), D::default())
    }
}

impl<T: fmt::Debug, C, D> fmt::Debug for Deque<T, C, D>
where
    D: Destructor<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, D> Traversable<T> for Deque<T, C, D>
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

impl<'a, T, C, D> IntoIterator for &'a Deque<T, C, D>
where
    D: Destructor<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over a [`Deque`].
pub struct Iter<'a, T> {
    slots: &'a [Option<ObjectBox<T>>],
    head: usize,
    pos: usize,
    len: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.len {
            let idx = (self.head + self.pos) % self.slots.len();
            self.pos += 1;
            if let Some(b) = &self.slots[idx] {
                return Some(b.get());
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.pos;
        (rest, Some(rest))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Replacing cursor over a [`Deque`]; see [`ReplaceCursor`].
pub struct CursorMut<'a, T, C, D>
where
    D: Destructor<T>,
{
    deque: &'a mut Deque<T, C, D>,
    next: usize,
    current: Option<usize>,
}

impl<T, C, D> ReplaceCursor<T> for CursorMut<'_, T, C, D>
where
    D: Destructor<T>,
{
    fn get_next(&mut self) -> Option<&T> {
        if self.next >= self.deque.len {
            return None;
        }
        let idx = self.deque.physical(self.next);
        self.current = Some(idx);
        self.next += 1;
        self.deque.slots[idx].as_ref().map(ObjectBox::get)
    }

    fn replace_value(&mut self, value: T) -> Result<()> {
        let idx = self.current.ok_or(Error::NotInitialized)?;
        let slot = self.deque.slots[idx].as_mut().ok_or(Error::Generic)?;
        let old = slot.replace_raw(value);
        self.deque.destroy.destroy(old);
        Ok(())
    }
}
