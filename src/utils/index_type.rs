//! Compact index types for arena-backed node links.

use core::fmt::Debug;
use core::hash::Hash;

/// An integer type used as an **arena slot index** for tree node links.
///
/// Instead of pointer-based parent/child links, the red-black tree stores
/// indices into its node arena. Two values are reserved:
///
/// * [`SENTINEL`](NodeIndex::SENTINEL) (slot 0) is the shared black NIL node that
///   stands for every empty subtree and for the parent of the root.
/// * [`NONE`](NodeIndex::NONE) terminates the free-slot chain and never names a slot.
pub trait NodeIndex: Copy + Eq + Hash + Debug + 'static {
    /// Slot of the shared NIL node.
    const SENTINEL: Self;

    /// Marker for "no slot" (end of the free chain).
    const NONE: Self;

    /// Converts this index to a `usize` for arena access.
    fn as_usize(self) -> usize;

    /// Converts an arena position, or `None` when it does not fit (or would
    /// collide with [`NONE`](NodeIndex::NONE)).
    fn try_from_usize(i: usize) -> Option<Self>;

    /// Returns true for the NIL slot.
    #[inline(always)]
    fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

macro_rules! impl_node_index {
    ($($ty:ty),*) => {
        $(
            impl NodeIndex for $ty {
                const SENTINEL: Self = 0;
                const NONE: Self = <$ty>::MAX;

                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn try_from_usize(i: usize) -> Option<Self> {
                    match <$ty>::try_from(i) {
                        Ok(v) if v != Self::NONE => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_node_index!(u8, u16, u32, usize);
