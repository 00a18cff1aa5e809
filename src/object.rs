//! The owned storage unit shared by every container.
//!
//! An [`ObjectBox`] holds one heap-allocated copy of a value together with its
//! size in bytes. Containers never store caller values directly: each entry
//! owns exactly one box, and the box is released exactly once, either when the
//! entry is removed or when the container is torn down.

use core::fmt;
use core::mem;

use crate::error::{Error, Result};

/// Exclusively owned heap copy of a value.
pub struct ObjectBox<T: ?Sized> {
    value: Box<T>,
}

impl<T> ObjectBox<T> {
    /// Boxes `value`, taking ownership of it.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value: Box::new(value),
        }
    }

    /// Boxes a copy of `data`; the caller's value is left untouched.
    pub fn create(data: &T) -> Self
    where
        T: Clone,
    {
        Self::new(data.clone())
    }

    /// Swaps in `value` and returns the previous payload.
    ///
    /// The allocation is reused; the caller decides how to release the old value.
    #[inline]
    pub fn replace_raw(&mut self, value: T) -> T {
        mem::replace(&mut *self.value, value)
    }

    /// Unwraps the box, handing the payload to the caller.
    #[inline]
    pub fn into_inner(self) -> T {
        *self.value
    }
}

impl ObjectBox<[u8]> {
    /// Copies the first `size` bytes of `data` into a new box.
    ///
    /// Fails with [`Error::InvalidInput`] when `size` exceeds `data.len()` and with
    /// [`Error::Memory`] when the copy cannot be allocated. `data` is never modified.
    pub fn copy_bytes(data: &[u8], size: usize) -> Result<Self> {
        let src = data.get(..size).ok_or(Error::InvalidInput)?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)?;
        buf.extend_from_slice(src);
        Ok(Self {
            value: buf.into_boxed_slice(),
        })
    }
}

impl<T: ?Sized> ObjectBox<T> {
    /// View of the owned copy plus its size in bytes. Allocates nothing.
    #[inline]
    pub fn get_raw(&self) -> (&T, usize) {
        (&self.value, mem::size_of_val(&*self.value))
    }

    /// Shared view of the payload.
    #[inline(always)]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Exclusive view of the payload.
    #[inline(always)]
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Size of the payload in bytes (shallow, as `size_of_val` reports it).
    #[inline]
    pub fn size(&self) -> usize {
        mem::size_of_val(&*self.value)
    }

    /// Releases the payload and the box.
    #[inline]
    pub fn destroy(self) {
        drop(self);
    }
}

impl<T: ?Sized + fmt::Debug> fmt::Debug for ObjectBox<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectBox")
            .field("value", &&*self.value)
            .field("size", &self.size())
            .finish()
    }
}

impl<T: Clone> Clone for ObjectBox<T> {
    fn clone(&self) -> Self {
        Self::create(&self.value)
    }
}
