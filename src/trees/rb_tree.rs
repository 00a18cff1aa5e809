//! Arena-backed red-black tree: the ordering engine under [`Set`](crate::Set)
//! and [`Map`](crate::Map).
//!
//! # Layout
//! Nodes live in a `Vec` arena and link to each other by [`NodeIndex`] rather
//! than by pointer. Slot 0 is the **sentinel**: a data-less, permanently black
//! node that stands for every empty subtree and is the parent of the root, so
//! the rebalancing code never branches on "no child". Parent links are plain
//! back-references used for successor walks and fixups; ownership of every
//! entry sits with the arena slot. Colours are packed one bit per slot in a
//! `BitVec` (set = red).
//!
//! Removed slots are threaded onto a free chain (through their `right` link)
//! and reused by later inserts.
//!
//! # Invariants
//! After every public call:
//! 1. the root and the sentinel are black;
//! 2. no red node has a red child;
//! 3. every path from a node to a descendant sentinel crosses the same number
//!    of black nodes;
//! 4. keys are strictly ordered by the comparator (duplicates are rejected).
//!
//! [`RbTree::check_invariants`] verifies all four and reports the black-height.

use core::cmp::Ordering;
use core::fmt;

use bitvec::prelude::{BitVec, Lsb0};

use crate::error::{Error, Result};
use crate::hooks::{Comparator, Destructor, DropValue, NaturalOrder};
use crate::object::ObjectBox;
use crate::utils::index_type::NodeIndex;

struct Node<K, V, I> {
    parent: I,
    left: I,
    right: I,
    entry: Option<(ObjectBox<K>, ObjectBox<V>)>,
}

impl<K, V, I: NodeIndex> Node<K, V, I> {
    fn vacant() -> Self {
        Self {
            parent: I::SENTINEL,
            left: I::SENTINEL,
            right: I::SENTINEL,
            entry: None,
        }
    }
}

/// Handle to a live tree node, as returned by [`RbTree::find`] and friends.
///
/// A handle stays meaningful until its entry is removed; after that the slot
/// may be reused, much like a slab key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId<I = u32>(I);

/// A red-black tree mapping `K` to `V` under comparator `C`.
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|--------|
/// | `K` | Key type |
/// | `V` | Value type (`()` for sets) |
/// | `C` | [`Comparator`] defining the key order |
/// | `DK` / `DV` | [`Destructor`]s for discarded keys / values |
/// | `I` | Arena index width; bounds the number of live nodes |
pub struct RbTree<K, V, C = NaturalOrder, DK = DropValue, DV = DropValue, I = u32>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
    I: NodeIndex,
{
    nodes: Vec<Node<K, V, I>>,
    red: BitVec<usize, Lsb0>,
    root: I,
    free: I,
    len: usize,
    compare: C,
    destroy_key: DK,
    destroy_value: DV,
}

impl<K: Ord, V> RbTree<K, V> {
    /// Creates an empty tree ordered by `Ord` whose discarded entries are dropped.
    pub fn natural() -> Self {
        Self::new(NaturalOrder, DropValue, DropValue)
    }
}

impl<K, V, C, DK, DV, I> RbTree<K, V, C, DK, DV, I>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
    I: NodeIndex,
{
    /// Creates an empty tree.
    pub fn new(compare: C, destroy_key: DK, destroy_value: DV) -> Self {
        let mut red = BitVec::new();
        red.push(false);
        Self {
            nodes: vec![Node::vacant()],
            red,
            root: I::SENTINEL,
            free: I::NONE,
            len: 0,
            compare,
            destroy_key,
            destroy_value,
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// O(1): the root is the sentinel.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    // ─── link / colour accessors ─────────────────────────────────────────────

    #[inline(always)]
    fn left(&self, x: I) -> I {
        self.nodes[x.as_usize()].left
    }

    #[inline(always)]
    fn right(&self, x: I) -> I {
        self.nodes[x.as_usize()].right
    }

    #[inline(always)]
    fn parent(&self, x: I) -> I {
        self.nodes[x.as_usize()].parent
    }

    #[inline(always)]
    fn set_left(&mut self, x: I, v: I) {
        self.nodes[x.as_usize()].left = v;
    }

    #[inline(always)]
    fn set_right(&mut self, x: I, v: I) {
        self.nodes[x.as_usize()].right = v;
    }

    #[inline(always)]
    fn set_parent(&mut self, x: I, v: I) {
        self.nodes[x.as_usize()].parent = v;
    }

    #[inline(always)]
    fn is_red(&self, x: I) -> bool {
        self.red[x.as_usize()]
    }

    /// Colours `x`; the sentinel stays black whatever is asked.
    #[inline(always)]
    fn set_red(&mut self, x: I, red: bool) {
        if !x.is_sentinel() {
            self.red.set(x.as_usize(), red);
        }
    }

    #[inline]
    fn key_at(&self, x: I) -> Option<&K> {
        self.nodes[x.as_usize()].entry.as_ref().map(|(k, _)| k.get())
    }

    fn is_live(&self, x: I) -> bool {
        !x.is_sentinel()
            && self
                .nodes
                .get(x.as_usize())
                .is_some_and(|n| n.entry.is_some())
    }

    // ─── arena ───────────────────────────────────────────────────────────────

    /// Claims a slot for a new red node. Fails before consuming anything.
    fn alloc(&mut self, key: K, value: V) -> Result<I> {
        let entry = Some((ObjectBox::new(key), ObjectBox::new(value)));
        if self.free != I::NONE {
            let z = self.free;
            let node = &mut self.nodes[z.as_usize()];
            self.free = node.right;
            node.parent = I::SENTINEL;
            node.left = I::SENTINEL;
            node.right = I::SENTINEL;
            node.entry = entry;
            self.red.set(z.as_usize(), true);
            return Ok(z);
        }
        let z = I::try_from_usize(self.nodes.len()).ok_or(Error::Memory)?;
        if self.nodes.len() == self.nodes.capacity() {
            log::trace!("rb arena grows past {} slots", self.nodes.len());
        }
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node {
            entry,
            ..Node::vacant()
        });
        self.red.push(true);
        Ok(z)
    }

    /// Returns slot `z` (already emptied) to the free chain.
    fn release(&mut self, z: I) {
        let node = &mut self.nodes[z.as_usize()];
        node.parent = I::SENTINEL;
        node.left = I::SENTINEL;
        node.right = self.free;
        node.entry = None;
        self.free = z;
        self.red.set(z.as_usize(), false);
    }

    // ─── rotations ───────────────────────────────────────────────────────────

    fn rotate_left(&mut self, x: I) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.set_right(x, y_left);
        if !y_left.is_sentinel() {
            self.set_parent(y_left, x);
        }
        let xp = self.parent(x);
        self.set_parent(y, xp);
        if xp.is_sentinel() {
            self.root = y;
        } else if x == self.left(xp) {
            self.set_left(xp, y);
        } else {
            self.set_right(xp, y);
        }
        self.set_left(y, x);
        self.set_parent(x, y);
    }

    fn rotate_right(&mut self, x: I) {
        let y = self.left(x);
        let y_right = self.right(y);
        self.set_left(x, y_right);
        if !y_right.is_sentinel() {
            self.set_parent(y_right, x);
        }
        let xp = self.parent(x);
        self.set_parent(y, xp);
        if xp.is_sentinel() {
            self.root = y;
        } else if x == self.right(xp) {
            self.set_right(xp, y);
        } else {
            self.set_left(xp, y);
        }
        self.set_right(y, x);
        self.set_parent(x, y);
    }

    // ─── insert ──────────────────────────────────────────────────────────────

    /// Inserts `key` → `value`.
    ///
    /// Fails with [`Error::KeyDuplicate`] when an equal key is present; the tree
    /// (including the existing value) is left untouched and the arguments are
    /// dropped.
    pub fn insert(&mut self, key: K, value: V) -> Result<NodeId<I>>
    where
        C: Comparator<K>,
    {
        let mut parent = I::SENTINEL;
        let mut x = self.root;
        let mut go_left = false;
        while !x.is_sentinel() {
            parent = x;
            let existing = self.key_at(x).ok_or(Error::Generic)?;
            match self.compare.compare(&key, existing) {
                Ordering::Less => {
                    go_left = true;
                    x = self.left(x);
                }
                Ordering::Greater => {
                    go_left = false;
                    x = self.right(x);
                }
                Ordering::Equal => {
                    log::debug!("rb insert rejected: duplicate key");
                    return Err(Error::KeyDuplicate);
                }
            }
        }

        let z = self.alloc(key, value)?;
        self.set_parent(z, parent);
        if parent.is_sentinel() {
            self.root = z;
        } else if go_left {
            self.set_left(parent, z);
        } else {
            self.set_right(parent, z);
        }
        self.len += 1;
        self.insert_fixup(z);
        Ok(NodeId(z))
    }

    fn insert_fixup(&mut self, mut z: I) {
        while self.is_red(self.parent(z)) {
            let p = self.parent(z);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.is_red(uncle) {
                    self.set_red(p, false);
                    self.set_red(uncle, false);
                    self.set_red(g, true);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_red(p, false);
                    self.set_red(g, true);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.is_red(uncle) {
                    self.set_red(p, false);
                    self.set_red(uncle, false);
                    self.set_red(g, true);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_red(p, false);
                    self.set_red(g, true);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_red(root, false);
    }

    // ─── lookup ──────────────────────────────────────────────────────────────

    fn locate(&self, key: &K) -> Option<I>
    where
        C: Comparator<K>,
    {
        let mut x = self.root;
        while !x.is_sentinel() {
            let k = self.key_at(x)?;
            match self.compare.compare(key, k) {
                Ordering::Less => x = self.left(x),
                Ordering::Greater => x = self.right(x),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }

    /// Node holding a key equal to `key`.
    pub fn find(&self, key: &K) -> Option<NodeId<I>>
    where
        C: Comparator<K>,
    {
        self.locate(key).map(NodeId)
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V>
    where
        C: Comparator<K>,
    {
        let x = self.locate(key)?;
        self.nodes[x.as_usize()].entry.as_ref().map(|(_, v)| v.get())
    }

    /// Key stored in `node`, or `None` for a stale handle.
    pub fn key(&self, node: NodeId<I>) -> Option<&K> {
        if !self.is_live(node.0) {
            return None;
        }
        self.key_at(node.0)
    }

    /// Value stored in `node`, or `None` for a stale handle.
    pub fn value(&self, node: NodeId<I>) -> Option<&V> {
        if !self.is_live(node.0) {
            return None;
        }
        self.nodes[node.0.as_usize()]
            .entry
            .as_ref()
            .map(|(_, v)| v.get())
    }

    /// Leftmost descendant of `node` (the node itself if it has no left child).
    pub fn minimum(&self, node: NodeId<I>) -> Option<NodeId<I>> {
        if !self.is_live(node.0) {
            return None;
        }
        Some(NodeId(minimum_in(&self.nodes, node.0)))
    }

    /// Rightmost descendant of `node`.
    pub fn maximum(&self, node: NodeId<I>) -> Option<NodeId<I>> {
        if !self.is_live(node.0) {
            return None;
        }
        let mut x = node.0;
        while !self.right(x).is_sentinel() {
            x = self.right(x);
        }
        Some(NodeId(x))
    }

    /// Next node in ascending key order.
    ///
    /// The minimum of the right subtree when there is one, otherwise the first
    /// ancestor reached through a left-child edge.
    pub fn successor(&self, node: NodeId<I>) -> Option<NodeId<I>> {
        if !self.is_live(node.0) {
            return None;
        }
        let next = successor_in(&self.nodes, node.0);
        (!next.is_sentinel()).then_some(NodeId(next))
    }

    /// Node with the smallest key.
    pub fn first(&self) -> Option<NodeId<I>> {
        self.minimum(NodeId(self.root))
    }

    /// Node with the largest key.
    pub fn last(&self) -> Option<NodeId<I>> {
        self.maximum(NodeId(self.root))
    }

    // ─── remove ──────────────────────────────────────────────────────────────

    /// Removes `key`, releasing its key and value through the destructors.
    pub fn remove(&mut self, key: &K) -> Result<()>
    where
        C: Comparator<K>,
    {
        let (k, v) = self.take(key)?;
        self.destroy_key.destroy(k);
        self.destroy_value.destroy(v);
        Ok(())
    }

    /// Removes `key` and hands the stored pair back to the caller.
    ///
    /// The destructors are not invoked.
    pub fn take(&mut self, key: &K) -> Result<(K, V)>
    where
        C: Comparator<K>,
    {
        let Some(z) = self.locate(key) else {
            log::debug!("rb remove rejected: key not found");
            return Err(Error::KeyNotFound);
        };
        let (k, v) = self.nodes[z.as_usize()]
            .entry
            .take()
            .ok_or(Error::Generic)?;
        self.unlink(z);
        self.release(z);
        self.len -= 1;
        Ok((k.into_inner(), v.into_inner()))
    }

    /// Replaces subtree `u` with subtree `v` under `u`'s parent.
    fn transplant(&mut self, u: I, v: I) {
        let up = self.parent(u);
        if up.is_sentinel() {
            self.root = v;
        } else if u == self.left(up) {
            self.set_left(up, v);
        } else {
            self.set_right(up, v);
        }
        // May write the sentinel's parent; the fixup reads it back.
        self.set_parent(v, up);
    }

    fn unlink(&mut self, z: I) {
        let mut removed_red = self.is_red(z);
        let x;
        if self.left(z).is_sentinel() {
            x = self.right(z);
            self.transplant(z, x);
        } else if self.right(z).is_sentinel() {
            x = self.left(z);
            self.transplant(z, x);
        } else {
            let y = minimum_in(&self.nodes, self.right(z));
            removed_red = self.is_red(y);
            x = self.right(y);
            if self.parent(y) == z {
                self.set_parent(x, y);
            } else {
                self.transplant(y, x);
                let zr = self.right(z);
                self.set_right(y, zr);
                self.set_parent(zr, y);
            }
            self.transplant(z, y);
            let zl = self.left(z);
            self.set_left(y, zl);
            self.set_parent(zl, y);
            let z_red = self.is_red(z);
            self.set_red(y, z_red);
        }
        if !removed_red {
            self.delete_fixup(x);
        }
        self.set_parent(I::SENTINEL, I::SENTINEL);
    }

    fn delete_fixup(&mut self, mut x: I) {
        while x != self.root && !self.is_red(x) {
            let p = self.parent(x);
            if x == self.left(p) {
                let mut w = self.right(p);
                if self.is_red(w) {
                    self.set_red(w, false);
                    self.set_red(p, true);
                    self.rotate_left(p);
                    w = self.right(self.parent(x));
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_red(w, true);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.right(w)) {
                        let wl = self.left(w);
                        self.set_red(wl, false);
                        self.set_red(w, true);
                        self.rotate_right(w);
                        w = self.right(self.parent(x));
                    }
                    let p = self.parent(x);
                    let p_red = self.is_red(p);
                    self.set_red(w, p_red);
                    self.set_red(p, false);
                    let wr = self.right(w);
                    self.set_red(wr, false);
                    self.rotate_left(p);
                    x = self.root;
                }
            } else {
                let mut w = self.left(p);
                if self.is_red(w) {
                    self.set_red(w, false);
                    self.set_red(p, true);
                    self.rotate_right(p);
                    w = self.left(self.parent(x));
                }
                if !self.is_red(self.left(w)) && !self.is_red(self.right(w)) {
                    self.set_red(w, true);
                    x = self.parent(x);
                } else {
                    if !self.is_red(self.left(w)) {
                        let wr = self.right(w);
                        self.set_red(wr, false);
                        self.set_red(w, true);
                        self.rotate_left(w);
                        w = self.left(self.parent(x));
                    }
                    let p = self.parent(x);
                    let p_red = self.is_red(p);
                    self.set_red(w, p_red);
                    self.set_red(p, false);
                    let wl = self.left(w);
                    self.set_red(wl, false);
                    self.rotate_right(p);
                    x = self.root;
                }
            }
        }
        self.set_red(x, false);
    }

    // ─── traversal / validation ──────────────────────────────────────────────

    /// Iterates entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, I> {
        let next = if self.root.is_sentinel() {
            I::SENTINEL
        } else {
            minimum_in(&self.nodes, self.root)
        };
        Iter {
            nodes: &self.nodes,
            next,
            remaining: self.len,
        }
    }

    /// Verifies every red-black invariant plus parent links, strict ordering and
    /// the cached length. Returns the black-height of the root (sentinel counted).
    ///
    /// Fails with [`Error::Generic`] on the first violation found.
    pub fn check_invariants(&self) -> Result<usize>
    where
        C: Comparator<K>,
    {
        if self.is_red(I::SENTINEL) || self.is_red(self.root) {
            return Err(Error::Generic);
        }
        if !self.parent(self.root).is_sentinel() {
            return Err(Error::Generic);
        }
        let (black_height, count) = self.check_subtree(self.root)?;
        if count != self.len {
            return Err(Error::Generic);
        }
        let mut prev: Option<&K> = None;
        for (k, _) in self.iter() {
            if let Some(p) = prev {
                if self.compare.compare(p, k) != Ordering::Less {
                    return Err(Error::Generic);
                }
            }
            prev = Some(k);
        }
        Ok(black_height)
    }

    fn check_subtree(&self, x: I) -> Result<(usize, usize)> {
        if x.is_sentinel() {
            return Ok((1, 0));
        }
        if !self.is_live(x) {
            return Err(Error::Generic);
        }
        let (l, r) = (self.left(x), self.right(x));
        if self.is_red(x) && (self.is_red(l) || self.is_red(r)) {
            return Err(Error::Generic);
        }
        for child in [l, r] {
            if !child.is_sentinel() && self.parent(child) != x {
                return Err(Error::Generic);
            }
        }
        let (lbh, lcount) = self.check_subtree(l)?;
        let (rbh, rcount) = self.check_subtree(r)?;
        if lbh != rbh {
            return Err(Error::Generic);
        }
        Ok((lbh + usize::from(!self.is_red(x)), lcount + rcount + 1))
    }

    // ─── teardown ────────────────────────────────────────────────────────────

    /// Tears the tree down, releasing every key and value through the destructors.
    pub fn delete(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        for node in self.nodes.drain(..) {
            if let Some((k, v)) = node.entry {
                self.destroy_key.destroy(k.into_inner());
                self.destroy_value.destroy(v.into_inner());
            }
        }
        self.nodes.push(Node::vacant());
        self.red.clear();
        self.red.push(false);
        self.root = I::SENTINEL;
        self.free = I::NONE;
        self.len = 0;
    }
}

fn minimum_in<K, V, I: NodeIndex>(nodes: &[Node<K, V, I>], mut x: I) -> I {
    loop {
        let left = nodes[x.as_usize()].left;
        if left.is_sentinel() {
            return x;
        }
        x = left;
    }
}

fn successor_in<K, V, I: NodeIndex>(nodes: &[Node<K, V, I>], x: I) -> I {
    let right = nodes[x.as_usize()].right;
    if !right.is_sentinel() {
        return minimum_in(nodes, right);
    }
    let mut x = x;
    let mut y = nodes[x.as_usize()].parent;
    while !y.is_sentinel() && x == nodes[y.as_usize()].right {
        x = y;
        y = nodes[y.as_usize()].parent;
    }
    y
}

impl<K, V, C, DK, DV, I> Drop for RbTree<K, V, C, DK, DV, I>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
    I: NodeIndex,
{
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<K, V, C, DK, DV, I> Default for RbTree<K, V, C, DK, DV, I>
where
    C: Default,
    DK: Destructor<K> + Default,
    DV: Destructor<V> + Default,
    I: NodeIndex,
{
    fn default() -> Self {
        Self::new(C::default(), DK::default(), DV::default())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C, DK, DV, I> fmt::Debug for RbTree<K, V, C, DK, DV, I>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
    I: NodeIndex,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, C, DK, DV, I> IntoIterator for &'a RbTree<K, V, C, DK, DV, I>
where
    DK: Destructor<K>,
    DV: Destructor<V>,
    I: NodeIndex,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`RbTree`], driven by successor walks.
pub struct Iter<'a, K, V, I = u32> {
    nodes: &'a [Node<K, V, I>],
    next: I,
    remaining: usize,
}

impl<'a, K, V, I: NodeIndex> Iterator for Iter<'a, K, V, I> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next.is_sentinel() {
            return None;
        }
        let nodes = self.nodes;
        let current = self.next;
        self.next = successor_in(nodes, current);
        self.remaining = self.remaining.saturating_sub(1);
        nodes[current.as_usize()]
            .entry
            .as_ref()
            .map(|(k, v)| (k.get(), v.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, I: NodeIndex> ExactSizeIterator for Iter<'_, K, V, I> {}
