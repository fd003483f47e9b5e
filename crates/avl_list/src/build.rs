use log::debug;

use crate::arena::Arena;
use crate::list::AvlTreeList;
use crate::node::Id;

impl<T> AvlTreeList<T> {
    /// Builds a balanced tree holding `values` in order, in O(n).
    ///
    /// Slot `i` of the arena holds `values[i]`; each subtree is rooted at the
    /// midpoint of its range.
    ///
    /// # Panics
    ///
    /// Panics if `values` is longer than [`MAX_LEN`](Self::MAX_LEN).
    pub fn from_vec(values: Vec<T>) -> Self {
        let len = values.len();
        assert!(len <= Self::MAX_LEN, "{len} elements exceed list capacity");
        let mut list = Self {
            nodes: Arena::from_values(values),
            root: Id::NIL,
            len,
        };
        list.root = list.build(0, len, Id::NIL);
        debug!("bulk rebuild of {len} elements, height {}", list.height());
        list
    }

    fn build(&mut self, lo: usize, hi: usize, p: Id) -> Id {
        if lo == hi {
            return Id::NIL;
        }
        let mid = lo + (hi - lo) / 2;
        let x = self.nodes.slot(mid);
        let l = self.build(lo, mid, x);
        let r = self.build(mid + 1, hi, x);
        let node = self.node_mut(x);
        node.p = p;
        node.ch = [l, r];
        self.pull(x);
        x
    }
}

impl<T> FromIterator<T> for AvlTreeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T> Extend<T> for AvlTreeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            assert!(self.len < Self::MAX_LEN, "list capacity exceeded");
            let index = self.len;
            self.insert_unchecked(index, value);
        }
    }
}
