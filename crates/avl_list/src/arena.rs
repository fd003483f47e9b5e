use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::node::{Id, Node};

static NEXT_SEGMENT: AtomicU32 = AtomicU32::new(0);

fn fresh_key() -> u32 {
    NEXT_SEGMENT.fetch_add(1, Ordering::Relaxed)
}

/// Node storage of one list, split into segments that change owner whole.
///
/// Segment keys are handed out process-wide, so an id keeps naming the same
/// node after its segment moves into another list. A removed node's hole is
/// filled with the last node of the same segment.
pub(crate) struct Arena<T> {
    segments: HashMap<u32, Vec<Node<T>>>,
    home: u32,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            segments: HashMap::new(),
            home: fresh_key(),
            len: 0,
        }
    }

    /// A single segment holding `values` in order, unlinked; `values[i]` sits
    /// at `slot(i)`.
    pub(crate) fn from_values(values: Vec<T>) -> Self {
        let mut arena = Self::new();
        arena.len = values.len();
        let nodes = values
            .into_iter()
            .map(|value| Node::new(value, Id::NIL))
            .collect();
        arena.segments.insert(arena.home, nodes);
        arena
    }

    pub(crate) fn slot(&self, i: usize) -> Id {
        Id::new(self.home, i as u32)
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }

    #[inline(always)]
    pub(crate) fn get(&self, x: Id) -> &Node<T> {
        &self.segments[&x.seg()][x.off()]
    }

    #[inline(always)]
    pub(crate) fn get_mut(&mut self, x: Id) -> &mut Node<T> {
        &mut self.segment_mut(x.seg())[x.off()]
    }

    fn segment_mut(&mut self, key: u32) -> &mut Vec<Node<T>> {
        match self.segments.get_mut(&key) {
            Some(nodes) => nodes,
            None => panic!("no segment with key {key}"),
        }
    }

    pub(crate) fn alloc(&mut self, value: T, p: Id) -> Id {
        let home = self.home;
        let nodes = self.segments.entry(home).or_default();
        let off = nodes.len() as u32;
        nodes.push(Node::new(value, p));
        self.len += 1;
        Id::new(home, off)
    }

    /// Drops `x` from storage and returns its value.
    ///
    /// If another node had to move into the hole its old id is returned too;
    /// the caller re-points that node's neighbours at `x`.
    pub(crate) fn release(&mut self, x: Id) -> (T, Option<Id>) {
        let key = x.seg();
        let nodes = self.segment_mut(key);
        let last = nodes.len() - 1;
        let removed = nodes.swap_remove(x.off());
        let drained = nodes.is_empty();
        if drained && key != self.home {
            self.segments.remove(&key);
        }
        self.len -= 1;
        let moved = (x.off() != last).then(|| Id::new(key, last as u32));
        (removed.value, moved)
    }

    /// Takes over every segment of `other` without moving any node.
    ///
    /// Ids into `self` stay valid and `other_root` is returned as it reads in
    /// the merged arena. Only a key clash (a clone that kept its keys, or a
    /// wrapped key counter) makes `other` rewrite its links.
    pub(crate) fn absorb(&mut self, mut other: Self, other_root: Id) -> Id {
        let (small, large) = if self.segments.len() <= other.segments.len() {
            (&self.segments, &other.segments)
        } else {
            (&other.segments, &self.segments)
        };
        let clashes = small
            .keys()
            .copied()
            .filter(|key| large.contains_key(key))
            .collect::<Vec<_>>();

        let mut root = other_root;
        if !clashes.is_empty() {
            let keys = clashes
                .into_iter()
                .map(|key| (key, self.unused_key(&other)))
                .collect::<HashMap<_, _>>();
            other.rekey(&keys);
            root = root.rekeyed(&keys);
        }

        if self.segments.len() < other.segments.len() {
            std::mem::swap(&mut self.segments, &mut other.segments);
        }
        self.segments.extend(other.segments);
        self.len += other.len;
        root
    }

    fn unused_key(&self, other: &Self) -> u32 {
        loop {
            let key = fresh_key();
            if !self.segments.contains_key(&key) && !other.segments.contains_key(&key) {
                return key;
            }
        }
    }

    fn rekey(&mut self, keys: &HashMap<u32, u32>) {
        for nodes in self.segments.values_mut() {
            for node in nodes.iter_mut() {
                node.rekey(keys);
            }
        }
        for (old, new) in keys {
            if let Some(nodes) = self.segments.remove(old) {
                self.segments.insert(*new, nodes);
            }
        }
        if let Some(&home) = keys.get(&self.home) {
            self.home = home;
        }
    }

    /// Moves the values out in the order given by `order`.
    pub(crate) fn into_values(self, order: &[Id]) -> Vec<T> {
        let mut slots = self
            .segments
            .into_iter()
            .map(|(key, nodes)| (key, nodes.into_iter().map(|n| Some(n.value)).collect::<Vec<_>>()))
            .collect::<HashMap<_, _>>();
        order
            .iter()
            .filter_map(|x| slots.get_mut(&x.seg())?.get_mut(x.off())?.take())
            .collect()
    }
}

impl<T: Clone> Arena<T> {
    /// Deep copy under fresh segment keys, together with the key mapping.
    pub(crate) fn clone_rekeyed(&self) -> (Self, HashMap<u32, u32>) {
        let keys = self
            .segments
            .keys()
            .map(|&key| (key, fresh_key()))
            .collect::<HashMap<_, _>>();
        let segments = self
            .segments
            .iter()
            .map(|(key, nodes)| {
                let mut nodes = nodes.clone();
                for node in &mut nodes {
                    node.rekey(&keys);
                }
                (keys[key], nodes)
            })
            .collect();
        let home = keys.get(&self.home).copied().unwrap_or_else(fresh_key);
        let arena = Self {
            segments,
            home,
            len: self.len,
        };
        (arena, keys)
    }
}

#[cfg(test)]
impl<T> Arena<T> {
    pub(crate) fn buffers(&self) -> Vec<*const Node<T>> {
        self.segments.values().map(|nodes| nodes.as_ptr()).collect()
    }
}
