//! Comparator and destructor capabilities supplied at construction.
//!
//! Every container records one [`Comparator`] (used for ordering or searching)
//! and one [`Destructor`] per owned payload kind. Plain closures implement both
//! traits, so callers rarely need to name a type:
//!
//! ```rust
//! use boxed_collections::Array;
//!
//! let mut freed = Vec::new();
//! let mut arr = Array::new(4, |a: &i32, b: &i32| b.cmp(a), |v: i32| freed.push(v));
//! arr.push_back(1).unwrap();
//! arr.remove_from(0).unwrap();
//! drop(arr);
//! assert_eq!(freed, vec![1]);
//! ```

use core::cmp::Ordering;

/// Total order over `T` used by ordered containers and by linear searches.
pub trait Comparator<T: ?Sized> {
    /// Compares two values.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their `Ord` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline(always)]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Releases a value the container is discarding.
///
/// Invoked exactly once for every value a container drops on its own, i.e. on
/// `remove*`, on in-place replacement and on teardown. Values handed back to the
/// caller (`pop_*`, `take*`) bypass the destructor.
pub trait Destructor<T> {
    /// Consumes `value`.
    fn destroy(&mut self, value: T);
}

/// Destructor that simply drops the value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropValue;

impl<T> Destructor<T> for DropValue {
    #[inline(always)]
    fn destroy(&mut self, value: T) {
        drop(value);
    }
}

impl<T, F> Destructor<T> for F
where
    F: FnMut(T),
{
    #[inline(always)]
    fn destroy(&mut self, value: T) {
        self(value)
    }
}
