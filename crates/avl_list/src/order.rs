use std::fmt;

use crate::list::AvlTreeList;
use crate::node::{Id, LEFT, RIGHT};

impl<T> AvlTreeList<T> {
    /// Node at 1-based in-order position `k` within the subtree of `x`, nil if
    /// there is none.
    pub(crate) fn select_id(&self, mut x: Id, mut k: usize) -> Id {
        while !x.is_nil() {
            let node = self.node(x);
            let r = self.size_of(node.ch[LEFT]) as usize + 1;
            if k == r {
                return x;
            }
            if k < r {
                x = node.ch[LEFT];
            } else {
                k -= r;
                x = node.ch[RIGHT];
            }
        }
        Id::NIL
    }

    /// 1-based in-order position of `x` in the whole tree.
    pub(crate) fn rank_id(&self, x: Id) -> usize {
        let mut rank = self.size_of(self.node(x).ch[LEFT]) as usize + 1;
        let mut cur = x;
        loop {
            let p = self.node(cur).p;
            if p.is_nil() {
                return rank;
            }
            let parent = self.node(p);
            if parent.ch[RIGHT] == cur {
                rank += self.size_of(parent.ch[LEFT]) as usize + 1;
            }
            cur = p;
        }
    }

    pub(crate) fn extreme(&self, mut x: Id, dir: usize) -> Id {
        while !x.is_nil() {
            let next = self.node(x).ch[dir];
            if next.is_nil() {
                break;
            }
            x = next;
        }
        x
    }

    /// In-order neighbour of `x`: predecessor for `LEFT`, successor for `RIGHT`.
    fn neighbor(&self, x: Id, dir: usize) -> Id {
        let child = self.node(x).ch[dir];
        if !child.is_nil() {
            return self.extreme(child, dir ^ 1);
        }
        let mut cur = x;
        let mut p = self.node(x).p;
        while !p.is_nil() && self.node(p).ch[dir] == cur {
            cur = p;
            p = self.node(p).p;
        }
        p
    }

    pub(crate) fn predecessor_id(&self, x: Id) -> Id {
        self.neighbor(x, LEFT)
    }

    pub(crate) fn successor_id(&self, x: Id) -> Id {
        self.neighbor(x, RIGHT)
    }

    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(self, self.root)
    }

    /// Node at 1-based position `k`.
    pub fn select(&self, k: usize) -> Option<NodeRef<'_, T>> {
        if k == 0 || k > self.len {
            return None;
        }
        NodeRef::wrap(self, self.select_id(self.root, k))
    }
}

/// Read-only view of one node of an [`AvlTreeList`].
pub struct NodeRef<'a, T> {
    list: &'a AvlTreeList<T>,
    id: Id,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    fn wrap(list: &'a AvlTreeList<T>, id: Id) -> Option<Self> {
        (!id.is_nil()).then_some(Self { list, id })
    }

    pub fn value(&self) -> &'a T {
        &self.list.node(self.id).value
    }

    pub fn left(&self) -> Option<Self> {
        Self::wrap(self.list, self.list.node(self.id).ch[LEFT])
    }

    pub fn right(&self) -> Option<Self> {
        Self::wrap(self.list, self.list.node(self.id).ch[RIGHT])
    }

    pub fn parent(&self) -> Option<Self> {
        Self::wrap(self.list, self.list.node(self.id).p)
    }

    pub fn height(&self) -> i32 {
        self.list.node(self.id).height
    }

    /// Number of elements in the subtree rooted here.
    pub fn size(&self) -> usize {
        self.list.node(self.id).size as usize
    }

    pub fn balance_factor(&self) -> i32 {
        self.list.balance_of(self.id)
    }

    /// 1-based position in the list.
    pub fn rank(&self) -> usize {
        self.list.rank_id(self.id)
    }

    pub fn predecessor(&self) -> Option<Self> {
        Self::wrap(self.list, self.list.predecessor_id(self.id))
    }

    pub fn successor(&self) -> Option<Self> {
        Self::wrap(self.list, self.list.successor_id(self.id))
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", self.value())
            .field("size", &self.size())
            .field("height", &self.height())
            .finish()
    }
}
