use log::trace;

use crate::list::AvlTreeList;
use crate::node::{Id, LEFT, RIGHT};

impl<T> AvlTreeList<T> {
    /// Recomputes the cached size and height of `x` from its children.
    #[inline]
    pub(crate) fn pull(&mut self, x: Id) {
        let [l, r] = self.node(x).ch;
        let size = self.size_of(l) + self.size_of(r) + 1;
        let height = self.height_of(l).max(self.height_of(r)) + 1;
        let node = self.node_mut(x);
        node.size = size;
        node.height = height;
    }

    /// Walks from a freshly attached leaf to the root.
    ///
    /// At most one rebalancing (single or double rotation) is done. Once the
    /// height of some ancestor stops changing no rotation can be needed above
    /// it, but sizes still change all the way up.
    pub(crate) fn fix_after_insert(&mut self, leaf: Id) -> usize {
        let mut rotations = 0;
        let mut rotate = true;
        let mut x = self.node(leaf).p;
        while !x.is_nil() {
            let prev_height = self.node(x).height;
            self.pull(x);
            if rotate {
                if self.balance_of(x).abs() >= 2 {
                    rotations += self.rebalance(x);
                    rotate = false;
                } else if self.node(x).height == prev_height {
                    rotate = false;
                }
            }
            x = self.node(x).p;
        }
        rotations
    }

    /// Walks from `x` to the root, rotating wherever a node is out of balance.
    pub(crate) fn fix_after_delete(&mut self, mut x: Id) -> usize {
        let mut rotations = 0;
        while !x.is_nil() {
            self.pull(x);
            if self.balance_of(x).abs() >= 2 {
                rotations += self.rebalance(x);
            }
            x = self.node(x).p;
        }
        rotations
    }

    /// Restores balance at `x` (`|bf| == 2`); returns the rotation count.
    fn rebalance(&mut self, x: Id) -> usize {
        let bf = self.balance_of(x);
        debug_assert_eq!(bf.abs(), 2);
        if bf < 0 {
            let r = self.node(x).ch[RIGHT];
            if self.balance_of(r) > 0 {
                self.rotate_right(r);
                self.rotate_left(x);
                2
            } else {
                self.rotate_left(x);
                1
            }
        } else {
            let l = self.node(x).ch[LEFT];
            if self.balance_of(l) < 0 {
                self.rotate_left(l);
                self.rotate_right(x);
                2
            } else {
                self.rotate_right(x);
                1
            }
        }
    }

    pub(crate) fn rotate_left(&mut self, x: Id) {
        self.rotate(x, LEFT);
    }

    pub(crate) fn rotate_right(&mut self, x: Id) {
        self.rotate(x, RIGHT);
    }

    /// Lifts the child of `x` opposite to `dir` into the place of `x`.
    ///
    /// Only `x` and the pivot are pulled; ancestors are left to the caller's
    /// fix-up walk.
    fn rotate(&mut self, x: Id, dir: usize) {
        let pivot = self.node(x).ch[dir ^ 1];
        debug_assert!(!pivot.is_nil());
        let inner = self.node(pivot).ch[dir];

        self.node_mut(x).ch[dir ^ 1] = inner;
        if !inner.is_nil() {
            self.node_mut(inner).p = x;
        }
        let p = self.node(x).p;
        self.replace_child(p, x, pivot);
        self.node_mut(pivot).ch[dir] = x;
        self.node_mut(x).p = pivot;

        self.pull(x);
        self.pull(pivot);
        trace!(
            "rotate {} at {x:?} (pivot {pivot:?})",
            if dir == LEFT { "left" } else { "right" }
        );
    }
}
