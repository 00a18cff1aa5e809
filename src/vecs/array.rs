//! Growable contiguous array of owned boxes.
//!
//! [`Array`] keeps one [`ObjectBox`] per element in a contiguous buffer. Every
//! in-range index is addressable in O(1); appends are amortized O(1) thanks to
//! capacity doubling, and positional insert/remove shift the tail in O(n).
//!
//! Capacity is tracked explicitly and only ever grows. Growth reserves the new
//! storage *before* touching any element, so an allocation failure returns
//! [`Error::Memory`] with the array exactly as it was.

use core::fmt;
use core::slice;

use crate::error::{Error, Result};
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::iter::{ReplaceCursor, Traversable};
use crate::object::ObjectBox;

/// Capacity used by [`Array::default`] and [`Deque::default`](crate::Deque).
pub const DEFAULT_CAPACITY: usize = 8;

/// A resizable array that owns a boxed copy of each element.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `T` | Element type |
/// | `C` | [`Comparator`] used by [`find`](Array::find) |
/// | `D` | [`Destructor`] run on elements the array discards |
pub struct Array<T, C = NaturalOrder, D = DropValue>
where
    D: Destructor<T>,
{
    elements: Vec<ObjectBox<T>>,
    capacity: usize,
    compare: C,
    destroy: D,
}

impl<T> Array<T> {
    /// Creates an empty array with natural ordering whose discarded elements are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(capacity, NaturalOrder, DropValue)
    }
}

impl<T, C, D> Array<T, C, D>
where
    D: Destructor<T>,
{
    /// Creates an empty array with room for `initial_capacity` elements.
    ///
    /// Storage is claimed by the first insertion, so an oversized capacity
    /// surfaces as [`Error::Memory`] there instead of failing here.
    pub fn new(initial_capacity: usize, compare: C, destroy: D) -> Self {
        Self {
            elements: Vec::new(),
            capacity: initial_capacity,
            compare,
            destroy,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Grows the backing storage to hold at least `new_capacity` elements.
    ///
    /// Never shrinks and never changes the length.
    pub fn reserve(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity > self.capacity {
            self.grow_exact(new_capacity)?;
        }
        Ok(())
    }

    /// Ensures room for one more element, doubling capacity when full.
    fn grow_for_one(&mut self) -> Result<()> {
        let len = self.elements.len();
        if len < self.capacity {
            if len < self.elements.capacity() {
                return Ok(());
            }
            return self.grow_exact(self.capacity);
        }
        let doubled = self.capacity.saturating_mul(2);
        self.grow_exact(doubled.max(len + 1))
    }

    #[inline(never)]
    fn grow_exact(&mut self, new_capacity: usize) -> Result<()> {
        let additional = new_capacity - self.elements.len();
        self.elements.try_reserve_exact(additional)?;
        log::trace!(
            "array capacity {} -> {} (len {})",
            self.capacity,
            new_capacity,
            self.elements.len()
        );
        self.capacity = new_capacity;
        Ok(())
    }

    /// Appends `elem` to the back.
    pub fn push_back(&mut self, elem: T) -> Result<()> {
        self.grow_for_one()?;
        self.elements.push(ObjectBox::new(elem));
        Ok(())
    }

    /// Inserts `elem` at `index`, shifting later elements right.
    ///
    /// `index == len()` appends. Fails with [`Error::IndexOutOfBound`] past that.
    pub fn insert_at(&mut self, index: usize, elem: T) -> Result<()> {
        let len = self.elements.len();
        if index > len {
            log::debug!("array insert_at({}) rejected, len {}", index, len);
            return Err(Error::IndexOutOfBound { index, len });
        }
        self.grow_for_one()?;
        self.elements.insert(index, ObjectBox::new(elem));
        Ok(())
    }

    /// Returns the element at `index`.
    #[inline]
    pub fn element_at(&self, index: usize) -> Result<&T> {
        self.elements
            .get(index)
            .map(ObjectBox::get)
            .ok_or(Error::IndexOutOfBound {
                index,
                len: self.elements.len(),
            })
    }

    /// Removes the element at `index` and releases it through the destructor.
    pub fn remove_from(&mut self, index: usize) -> Result<()> {
        let value = self.take_at(index)?;
        self.destroy.destroy(value);
        Ok(())
    }

    /// Removes the element at `index` and hands it back to the caller.
    ///
    /// The destructor is not invoked.
    pub fn take_at(&mut self, index: usize) -> Result<T> {
        let len = self.elements.len();
        if index >= len {
            log::debug!("array remove at {} rejected, len {}", index, len);
            return Err(Error::IndexOutOfBound { index, len });
        }
        Ok(self.elements.remove(index).into_inner())
    }

    /// First element, or [`Error::ElementReturn`] when empty.
    pub fn front(&self) -> Result<&T> {
        self.elements
            .first()
            .map(ObjectBox::get)
            .ok_or(Error::ElementReturn)
    }

    /// Last element, or [`Error::ElementReturn`] when empty.
    pub fn back(&self) -> Result<&T> {
        self.elements
            .last()
            .map(ObjectBox::get)
            .ok_or(Error::ElementReturn)
    }

    /// Index of the first element the comparator reports equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        C: Comparator<T>,
    {
        self.elements
            .iter()
            .position(|b| self.compare.compare(b.get(), value).is_eq())
    }

    /// Iterates front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements.iter(),
        }
    }

    /// Cursor that can overwrite elements in place while walking front to back.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T, C, D> {
        CursorMut {
            array: self,
            next: 0,
            current: None,
        }
    }

    /// Calls `f` on every element, front to back.
    pub fn for_each<F: FnMut(&T)>(&self, f: F) {
        self.iter().for_each(f);
    }

    /// Tears the array down, releasing every element through the destructor.
    pub fn delete(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        for b in self.elements.drain(..) {
            self.destroy.destroy(b.into_inner());
        }
    }
}

impl<T, C, D> Drop for Array<T, C, D>
where
    D: Destructor<T>,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<T, C, D> Default for Array<T, C, D>
where
    C: Default,
    D: Destructor<T> + Default,
{
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, C::default(), D::default())
    }
}

impl<T: fmt::Debug, C, D> fmt::Debug for Array<T, C, D>
where
    D: Destructor<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, C, D> Traversable<T> for Array<T, C, D>
where
    D: Destructor<T>,
{
    fn len(&self) -> usize {
        self.len()
    }
    fn for_each_ref(&self, f: &mut dyn FnMut(&T)) {
        self.iter().for_each(f);
    }
}

impl<'a, T, C, D> IntoIterator for &'a Array<T, C, D>
where
    D: Destructor<T>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back iterator over an [`Array`].
pub struct Iter<'a, T> {
    inner: slice::Iter<'a, ObjectBox<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(ObjectBox::get)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Replacing cursor over an [`Array`]; see [`ReplaceCursor`].
pub struct CursorMut<'a, T, C, D>
where
    D: Destructor<T>,
{
    array: &'a mut Array<T, C, D>,
    next: usize,
    current: Option<usize>,
}

impl<T, C, D> ReplaceCursor<T> for CursorMut<'_, T, C, D>
where
    D: Destructor<T>,
{
    fn get_next(&mut self) -> Option<&T> {
        let b = self.array.elements.get(self.next)?;
        self.current = Some(self.next);
        self.next += 1;
        Some(b.get())
    }

    fn replace_value(&mut self, value: T) -> Result<()> {
        let index = self.current.ok_or(Error::NotInitialized)?;
        let len = self.array.elements.len();
        let slot = self
            .array
            .elements
            .get_mut(index)
            .ok_or(Error::IndexOutOfBound { index, len })?;
        let old = slot.replace_raw(value);
        self.array.destroy.destroy(old);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn collect<T: Clone, C, D: Destructor<T>>(a: &Array<T, C, D>) -> Vec<T> {
        a.iter().cloned().collect()
    }

    // ─── push / element_at ────────────────────────────────────────────────────
    #[test]
    fn test_array_push_and_element_at() {
        let mut a: Array<i32> = Array::with_capacity(2);
        a.push_back(1).unwrap();
        a.push_back(2).unwrap();
        a.push_back(3).unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(*a.element_at(0).unwrap(), 1);
        assert_eq!(*a.element_at(2).unwrap(), 3);
        assert_eq!(
            a.element_at(3),
            Err(Error::IndexOutOfBound { index: 3, len: 3 })
        );
    }

    #[test]
    fn test_array_capacity_doubles() {
        let mut a: Array<i32> = Array::with_capacity(2);
        a.push_back(1).unwrap();
        a.push_back(2).unwrap();
        assert_eq!(a.capacity(), 2);
        a.push_back(3).unwrap();
        assert_eq!(a.capacity(), 4);
        for i in 0..5 {
            a.push_back(i).unwrap();
        }
        assert_eq!(a.capacity(), 8);
    }

    #[test]
    fn test_array_oversized_capacity_reports_memory() {
        let mut a: Array<u64> = Array::with_capacity(usize::MAX / 4);
        assert_eq!(a.capacity(), usize::MAX / 4);
        assert_eq!(a.push_back(1), Err(Error::Memory));
        assert_eq!(a.insert_at(0, 1), Err(Error::Memory));
        assert!(a.is_empty());
        assert_eq!(a.capacity(), usize::MAX / 4);
    }

    #[test]
    fn test_array_storage_claimed_on_first_push() {
        let mut a: Array<i32> = Array::with_capacity(3);
        for v in 0..3 {
            a.push_back(v).unwrap();
        }
        assert_eq!(a.capacity(), 3);
        a.push_back(3).unwrap();
        assert_eq!(a.capacity(), 6);
    }

    #[test]
    fn test_array_zero_capacity_grows() {
        let mut a: Array<i32> = Array::with_capacity(0);
        assert!(a.is_empty());
        a.push_back(5).unwrap();
        assert_eq!(a.capacity(), 1);
        assert_eq!(*a.front().unwrap(), 5);
    }

    // ─── insert / remove ──────────────────────────────────────────────────────
    #[test]
    fn test_array_remove_from_middle() {
        let mut a: Array<i32> = Array::with_capacity(4);
        a.push_back(1).unwrap();
        a.push_back(2).unwrap();
        a.push_back(3).unwrap();
        a.remove_from(1).unwrap();
        assert_eq!(collect(&a), vec![1, 3]);
    }

    #[test]
    fn test_array_insert_at() {
        let mut a: Array<i32> = Array::with_capacity(1);
        a.insert_at(0, 2).unwrap();
        a.insert_at(0, 0).unwrap();
        a.insert_at(1, 1).unwrap();
        a.insert_at(3, 3).unwrap();
        assert_eq!(collect(&a), vec![0, 1, 2, 3]);
        assert_eq!(
            a.insert_at(9, 9),
            Err(Error::IndexOutOfBound { index: 9, len: 4 })
        );
        assert_eq!(a.len(), 4);
    }

    #[test]
    fn test_array_remove_out_of_range() {
        let mut a: Array<i32> = Array::with_capacity(1);
        assert_eq!(
            a.remove_from(0),
            Err(Error::IndexOutOfBound { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_array_take_at_skips_destructor() {
        let freed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&freed);
        let mut a = Array::new(4, NaturalOrder, move |v: i32| sink.borrow_mut().push(v));
        a.push_back(10).unwrap();
        a.push_back(20).unwrap();
        assert_eq!(a.take_at(0).unwrap(), 10);
        a.remove_from(0).unwrap();
        assert_eq!(*freed.borrow(), vec![20]);
    }

    // ─── front / back / reserve ───────────────────────────────────────────────
    #[test]
    fn test_array_front_back() {
        let mut a: Array<&str> = Array::with_capacity(4);
        assert_eq!(a.front(), Err(Error::ElementReturn));
        assert_eq!(a.back(), Err(Error::ElementReturn));
        a.push_back("a").unwrap();
        a.push_back("b").unwrap();
        assert_eq!(*a.front().unwrap(), "a");
        assert_eq!(*a.back().unwrap(), "b");
    }

    #[test]
    fn test_array_reserve_keeps_len() {
        let mut a: Array<i32> = Array::with_capacity(2);
        a.push_back(1).unwrap();
        a.reserve(100).unwrap();
        assert_eq!(a.capacity(), 100);
        assert_eq!(a.len(), 1);
        a.reserve(10).unwrap();
        assert_eq!(a.capacity(), 100);
    }

    #[test]
    fn test_array_reserve_failure_rolls_back() {
        let mut a: Array<u64> = Array::with_capacity(2);
        a.push_back(7).unwrap();
        assert_eq!(a.reserve(usize::MAX), Err(Error::Memory));
        assert_eq!(a.capacity(), 2);
        assert_eq!(collect(&a), vec![7]);
    }

    // ─── find / iteration ─────────────────────────────────────────────────────
    #[test]
    fn test_array_find_with_comparator() {
        let by_len = |a: &String, b: &String| a.len().cmp(&b.len());
        let mut a = Array::new(4, by_len, DropValue);
        a.push_back("ab".to_string()).unwrap();
        a.push_back("xyz".to_string()).unwrap();
        assert_eq!(a.find(&"abc".to_string()), Some(1));
        assert_eq!(a.find(&"q".to_string()), None);
    }

    #[test]
    fn test_array_cursor_replace() {
        let freed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&freed);
        let mut a = Array::new(4, NaturalOrder, move |v: i32| sink.borrow_mut().push(v));
        for i in 1..=3 {
            a.push_back(i).unwrap();
        }
        {
            let mut cur = a.cursor_mut();
            assert_eq!(cur.replace_value(0), Err(Error::NotInitialized));
            while let Some(v) = cur.get_next() {
                let doubled = *v * 10;
                cur.replace_value(doubled).unwrap();
            }
        }
        assert_eq!(collect(&a), vec![10, 20, 30]);
        assert_eq!(*freed.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_array_iter_exact_size() {
        let mut a: Array<i32> = Array::default();
        a.push_back(1).unwrap();
        a.push_back(2).unwrap();
        assert_eq!(a.iter().len(), 2);
        let mut sum = 0;
        for v in &a {
            sum += v;
        }
        assert_eq!(sum, 3);
    }

    // ─── teardown ─────────────────────────────────────────────────────────────
    #[test]
    fn test_array_delete_runs_destructor_once() {
        let freed = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&freed);
        let mut a = Array::new(2, NaturalOrder, move |v: i32| sink.borrow_mut().push(v));
        a.push_back(1).unwrap();
        a.push_back(2).unwrap();
        a.delete();
        assert_eq!(*freed.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_array_drop_runs_destructor() {
        let freed = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&freed);
        {
            let mut a = Array::new(2, NaturalOrder, move |_: i32| *sink.borrow_mut() += 1);
            a.push_back(1).unwrap();
            a.push_back(2).unwrap();
            a.push_back(3).unwrap();
        }
        assert_eq!(*freed.borrow(), 3);
    }

    #[test]
    fn test_array_debug() {
        let mut a: Array<i32> = Array::with_capacity(2);
        a.push_back(4).unwrap();
        assert_eq!(format!("{:?}", a), "[4]");
    }
}
