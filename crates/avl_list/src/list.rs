use std::fmt;
use std::ops::Index;

use crate::arena::Arena;
use crate::error::{ListError, Result};
use crate::iter::Iter;
use crate::node::{Id, LEFT, Node, RIGHT};

/// A positional list stored in an AVL tree ordered by index.
///
/// `insert`, `delete` and `retrieve` run in O(log n). Nodes live in an arena
/// owned by the list; children are owned through the tree shape and the parent
/// link is a plain id used only to walk upwards.
///
/// Subtree sizes are cached as `u32`, so a list holds at most
/// [`MAX_LEN`](Self::MAX_LEN) elements.
pub struct AvlTreeList<T> {
    pub(crate) nodes: Arena<T>,
    pub(crate) root: Id,
    pub(crate) len: usize,
}

impl<T> AvlTreeList<T> {
    pub const MAX_LEN: usize = u32::MAX as usize - 1;

    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: Id::NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the whole tree, `-1` when empty.
    pub fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = Id::NIL;
        self.len = 0;
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let x = self.select_id(self.root, index + 1);
        (!x.is_nil()).then(|| &self.node(x).value)
    }

    pub fn retrieve(&self, index: usize) -> Result<&T> {
        self.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.get(self.len.checked_sub(1)?)
    }

    /// Inserts `value` so that it ends up at `index`.
    ///
    /// Returns the number of rotations performed while rebalancing (a double
    /// rotation counts as two). Fails without touching the list when `index`
    /// is past the end or the list already holds `MAX_LEN` elements.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize> {
        if index > self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if self.len >= Self::MAX_LEN {
            return Err(ListError::CapacityExceeded { max: Self::MAX_LEN });
        }
        Ok(self.insert_unchecked(index, value))
    }

    /// Deletes the element at `index` and returns the number of rotations.
    pub fn delete(&mut self, index: usize) -> Result<usize> {
        self.check_removable(index)?;
        Ok(self.remove_unchecked(index).1)
    }

    /// Removes the element at `index` and hands it back.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.check_removable(index).ok()?;
        Some(self.remove_unchecked(index).0)
    }

    /// First index holding a value equal to `value`.
    pub fn search(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    pub fn to_array(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<T> {
        let order = self.in_order_ids();
        self.nodes.into_values(&order)
    }

    fn check_removable(&self, index: usize) -> Result<()> {
        if self.root.is_nil() {
            return Err(ListError::Empty);
        }
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    pub(crate) fn insert_unchecked(&mut self, index: usize, value: T) -> usize {
        debug_assert!(index <= self.len);
        if self.root.is_nil() {
            self.root = self.alloc(value, Id::NIL);
            self.len = 1;
            return 0;
        }

        let x = if index == self.len {
            let last = self.select_id(self.root, self.len);
            self.attach(last, RIGHT, value)
        } else {
            let current = self.select_id(self.root, index + 1);
            if self.node(current).ch[LEFT].is_nil() {
                self.attach(current, LEFT, value)
            } else {
                // the predecessor lies in the left subtree, so its right slot is free
                let pred = self.predecessor_id(current);
                self.attach(pred, RIGHT, value)
            }
        };
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        self.fix_after_insert(x)
    }

    pub(crate) fn remove_unchecked(&mut self, index: usize) -> (T, usize) {
        debug_assert!(index < self.len);
        let x = self.select_id(self.root, index + 1);
        let [l, r] = self.node(x).ch;
        let p = self.node(x).p;

        let removed = if p.is_nil() && (l.is_nil() || r.is_nil()) {
            let child = if l.is_nil() { r } else { l };
            self.replace_child(Id::NIL, x, child);
            (self.release(x, &mut []), 0)
        } else if l.is_nil() || r.is_nil() {
            let child = if l.is_nil() { r } else { l };
            self.replace_child(p, x, child);
            let mut keep = [p];
            let value = self.release(x, &mut keep);
            (value, self.fix_after_delete(keep[0]))
        } else {
            // `x` stays in place and takes over the successor's value
            let s = self.successor_id(x);
            let sp = self.node(s).p;
            let sr = self.node(s).ch[RIGHT];
            self.replace_child(sp, s, sr);
            let mut keep = [sp, x];
            let successor = self.release(s, &mut keep);
            let [sp, x] = keep;
            let value = std::mem::replace(&mut self.node_mut(x).value, successor);
            (value, self.fix_after_delete(sp))
        };
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        removed
    }

    #[inline(always)]
    pub(crate) fn node(&self, x: Id) -> &Node<T> {
        debug_assert!(!x.is_nil());
        self.nodes.get(x)
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, x: Id) -> &mut Node<T> {
        debug_assert!(!x.is_nil());
        self.nodes.get_mut(x)
    }

    #[inline(always)]
    pub(crate) fn size_of(&self, x: Id) -> u32 {
        if x.is_nil() { 0 } else { self.node(x).size }
    }

    #[inline(always)]
    pub(crate) fn height_of(&self, x: Id) -> i32 {
        if x.is_nil() { -1 } else { self.node(x).height }
    }

    pub(crate) fn balance_of(&self, x: Id) -> i32 {
        let [l, r] = self.node(x).ch;
        self.height_of(l) - self.height_of(r)
    }

    pub(crate) fn alloc(&mut self, value: T, p: Id) -> Id {
        self.nodes.alloc(value, p)
    }

    fn attach(&mut self, p: Id, dir: usize, value: T) -> Id {
        debug_assert!(self.node(p).ch[dir].is_nil());
        let x = self.alloc(value, p);
        self.node_mut(p).ch[dir] = x;
        x
    }

    /// Points the slot of `p` that holds `old` at `new` (the root slot when `p`
    /// is nil) and re-parents `new`.
    pub(crate) fn replace_child(&mut self, p: Id, old: Id, new: Id) {
        if p.is_nil() {
            self.root = new;
        } else {
            let node = self.node_mut(p);
            let dir = if node.ch[LEFT] == old { LEFT } else { RIGHT };
            debug_assert_eq!(node.ch[dir], old);
            node.ch[dir] = new;
        }
        if !new.is_nil() {
            self.node_mut(new).p = p;
        }
    }

    /// Frees the slot of an already unlinked node.
    ///
    /// A node moved into the hole has its neighbours re-pointed; entries of
    /// `keep` naming the moved node are rewritten.
    fn release(&mut self, x: Id, keep: &mut [Id]) -> T {
        let (value, moved) = self.nodes.release(x);
        if let Some(last) = moved {
            let (ch, p) = (self.node(x).ch, self.node(x).p);
            for c in ch {
                if !c.is_nil() {
                    self.node_mut(c).p = x;
                }
            }
            if p.is_nil() {
                self.root = x;
            } else {
                let node = self.node_mut(p);
                let dir = if node.ch[LEFT] == last { LEFT } else { RIGHT };
                node.ch[dir] = x;
            }
            for k in keep.iter_mut().filter(|k| **k == last) {
                *k = x;
            }
        }
        value
    }

    pub(crate) fn in_order_ids(&self) -> Vec<Id> {
        let mut order = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut x = self.root;
        while !x.is_nil() || !stack.is_empty() {
            while !x.is_nil() {
                stack.push(x);
                x = self.node(x).ch[LEFT];
            }
            if let Some(top) = stack.pop() {
                order.push(top);
                x = self.node(top).ch[RIGHT];
            }
        }
        order
    }
}

impl<T: Clone> Clone for AvlTreeList<T> {
    fn clone(&self) -> Self {
        let (nodes, keys) = self.nodes.clone_rekeyed();
        Self {
            nodes,
            root: self.root.rekeyed(&keys),
            len: self.len,
        }
    }
}

impl<T> Default for AvlTreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for AvlTreeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlTreeList<T> {}

impl<T> Index<usize> for AvlTreeList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!(
                "index {index} out of range for list of length {}",
                self.len
            ),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlTreeList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for AvlTreeList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

#[cfg(test)]
impl<T> AvlTreeList<T> {
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.nodes.len(), self.len);
        if self.root.is_nil() {
            assert_eq!(self.len, 0);
            return;
        }
        assert!(self.node(self.root).p.is_nil());
        assert_eq!(self.size_of(self.root) as usize, self.len);

        let mut stack = vec![self.root];
        let mut seen = 0;
        while let Some(x) = stack.pop() {
            seen += 1;
            let [l, r] = self.node(x).ch;
            for c in [l, r] {
                if !c.is_nil() {
                    assert_eq!(self.node(c).p, x, "broken parent link");
                    stack.push(c);
                }
            }
            let node = self.node(x);
            assert_eq!(node.size, self.size_of(l) + self.size_of(r) + 1);
            assert_eq!(node.height, self.height_of(l).max(self.height_of(r)) + 1);
            assert!(self.balance_of(x).abs() <= 1, "unbalanced node");
        }
        assert_eq!(seen, self.len);
    }
}
