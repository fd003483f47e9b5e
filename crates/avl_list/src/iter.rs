use std::iter::FusedIterator;

use crate::list::AvlTreeList;
use crate::node::{Id, LEFT, RIGHT};

/// In-order iterator over an [`AvlTreeList`], following successor links.
pub struct Iter<'a, T> {
    list: &'a AvlTreeList<T>,
    front: Id,
    back: Id,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a AvlTreeList<T>) -> Self {
        Self {
            list,
            front: list.extreme(list.root, LEFT),
            back: list.extreme(list.root, RIGHT),
            remaining: list.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.front = self.list.successor_id(x);
        self.remaining -= 1;
        Some(&self.list.node(x).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.back = self.list.predecessor_id(x);
        self.remaining -= 1;
        Some(&self.list.node(x).value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
