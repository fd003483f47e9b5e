use log::debug;

use crate::list::AvlTreeList;
use crate::node::{Id, LEFT, RIGHT};

impl<T> AvlTreeList<T> {
    /// Appends `other` after `self`.
    ///
    /// Returns `|height(self) - height(other)|` as measured before the call,
    /// counting an empty list as height -1. The nodes of `other` are adopted
    /// in place, so the work done is O(log n) on the trees.
    ///
    /// # Panics
    ///
    /// Panics if the combined length exceeds [`MAX_LEN`](Self::MAX_LEN).
    pub fn concat(&mut self, other: Self) -> usize {
        let height_diff = (self.height() - other.height()).unsigned_abs() as usize;
        self.join_trees(other);
        height_diff
    }

    /// Appends `other` and returns the rotations spent restoring balance.
    pub(crate) fn join_trees(&mut self, mut other: Self) -> usize {
        if other.is_empty() {
            return 0;
        }
        if self.is_empty() {
            *self = other;
            return 0;
        }

        let total = self.len + other.len;
        assert!(total <= Self::MAX_LEN, "{total} elements exceed list capacity");
        let diff = self.height() - other.height();
        debug!(
            "concat {} + {} elements, height difference {diff}",
            self.len, other.len
        );

        if diff <= 0 {
            // `other` is at least as tall: the bridge is the last element of `self`
            let (bridge, _) = self.remove_unchecked(self.len - 1);
            if self.is_empty() {
                let rotations = other.insert_unchecked(0, bridge);
                *self = other;
                return rotations;
            }
            let left = self.root;
            let right = self.nodes.absorb(other.nodes, other.root);
            self.root = right;
            self.len = total;
            self.join(bridge, left, right, LEFT)
        } else {
            let (bridge, _) = other.remove_unchecked(0);
            if other.is_empty() {
                return self.insert_unchecked(self.len, bridge);
            }
            let left = self.root;
            let right = self.nodes.absorb(other.nodes, other.root);
            self.len = total;
            self.join(bridge, right, left, RIGHT)
        }
    }

    /// Hangs `short` and a bridge node off the `side` spine of `tall`.
    ///
    /// `side` is the spine adjacent to the bridge: `LEFT` when `tall` is the
    /// right operand. Returns the rotations of the fix-up from the bridge.
    fn join(&mut self, bridge: T, short: Id, tall: Id, side: usize) -> usize {
        let h = self.height_of(short);
        let mut p = Id::NIL;
        let mut c = tall;
        while self.height_of(c) > h {
            p = c;
            c = self.node(c).ch[side];
        }

        let x = self.alloc(bridge, p);
        let mut ch = [Id::NIL; 2];
        ch[side] = short;
        ch[side ^ 1] = c;
        self.node_mut(x).ch = ch;
        self.node_mut(short).p = x;
        if !c.is_nil() {
            self.node_mut(c).p = x;
        }
        if p.is_nil() {
            self.root = x;
        } else {
            self.node_mut(p).ch[side] = x;
        }

        let rotations = self.fix_after_delete(x);
        debug!(
            "joined at height {h} under {}, {rotations} rotations, {} segments",
            if side == LEFT { "right operand" } else { "left operand" },
            self.nodes.segment_count()
        );
        rotations
    }
}

#[cfg(test)]
mod tests {
    use crate::list::AvlTreeList;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_list(rng: &mut StdRng, len: usize, offset: i64) -> AvlTreeList<i64> {
        let mut list = AvlTreeList::new();
        for i in 0..len {
            let index = rng.random_range(0..=i);
            list.insert(index, offset + i as i64).unwrap();
        }
        list
    }

    #[test]
    fn single_elements_concat() {
        let mut a = AvlTreeList::new();
        a.insert(0, 1).unwrap();
        let mut b = AvlTreeList::new();
        b.insert(0, 2).unwrap();
        assert_eq!(a.concat(b), 0);
        assert_eq!(a.to_array(), [1, 2]);
        a.assert_invariants();
    }

    #[test]
    fn empty_operands() {
        let mut a = AvlTreeList::<i32>::new();
        assert_eq!(a.concat(AvlTreeList::new()), 0);
        assert!(a.is_empty());

        assert_eq!(a.concat((0..3).collect()), 2);
        assert_eq!(a.to_array(), [0, 1, 2]);
        assert_eq!(a.concat(AvlTreeList::new()), 2);
        assert_eq!(a.to_array(), [0, 1, 2]);
        a.assert_invariants();
    }

    #[test]
    fn singleton_bridge_falls_back_to_insert() {
        let mut a = (0..1).collect::<AvlTreeList<i32>>();
        assert_eq!(a.concat((1..20).collect()), 4);
        assert_eq!(a.to_array(), (0..20).collect::<Vec<_>>());
        a.assert_invariants();

        let mut b = (0..20).collect::<AvlTreeList<i32>>();
        assert_eq!(b.concat((20..21).collect()), 4);
        assert_eq!(b.to_array(), (0..21).collect::<Vec<_>>());
        b.assert_invariants();
    }

    #[test]
    fn lopsided_operands_in_both_directions() {
        for (small, large) in [(2, 100), (5, 1000), (3, 64), (40, 41)] {
            let mut a = (0..small).collect::<AvlTreeList<i32>>();
            let b = (small..large).collect::<AvlTreeList<i32>>();
            let expected = (a.height() - b.height()).unsigned_abs() as usize;
            assert_eq!(a.concat(b), expected);
            assert_eq!(a.to_array(), (0..large).collect::<Vec<_>>());
            a.assert_invariants();

            let mut c = (0..large - small).collect::<AvlTreeList<i32>>();
            let d = (large - small..large).collect::<AvlTreeList<i32>>();
            let expected = (c.height() - d.height()).unsigned_abs() as usize;
            assert_eq!(c.concat(d), expected);
            assert_eq!(c.to_array(), (0..large).collect::<Vec<_>>());
            c.assert_invariants();
        }
    }

    #[test]
    fn bridge_fix_up_reports_its_rotations() {
        // attaching [0] and the bridge 1 under 3 overloads the left spine of
        // [2, 3, 4, 5]: a single rotation at 3, then a double one at the root
        let mut a = AvlTreeList::from_vec(vec![0, 1]);
        let b = AvlTreeList::from_vec(vec![2, 3, 4, 5]);
        assert_eq!(a.join_trees(b), 3);
        assert_eq!(a.to_array(), [0, 1, 2, 3, 4, 5]);
        assert_eq!(a.height(), 2);
        a.assert_invariants();

        let mut c = AvlTreeList::from_vec(vec![0, 1]);
        assert_eq!(c.concat(AvlTreeList::from_vec(vec![2, 3, 4, 5])), 1);
        assert_eq!(c, a);

        let mut d = AvlTreeList::from_vec(vec![0, 1, 2]);
        assert_eq!(d.join_trees(AvlTreeList::from_vec(vec![3, 4, 5])), 0);
        d.assert_invariants();
    }

    #[test]
    fn concat_adopts_nodes_in_place() {
        for (n, m) in [(4096, 4096), (10, 4096), (4096, 10)] {
            let mut a = (0..n).collect::<AvlTreeList<u32>>();
            let b = (n..n + m).collect::<AvlTreeList<u32>>();
            let adopted = b.nodes.buffers();

            a.concat(b);
            let after = a.nodes.buffers();
            assert_eq!(after.len(), 2);
            for buffer in &adopted {
                assert!(after.contains(buffer), "n={n} m={m} segment was copied");
            }
            assert_eq!(a.to_array(), (0..n + m).collect::<Vec<_>>());
            a.assert_invariants();
        }
    }

    #[test]
    fn concat_of_a_clone_with_itself() {
        let mut a = (0..50).collect::<AvlTreeList<i32>>();
        a.delete(10).unwrap();
        let copy = a.clone();
        a.concat(copy);
        let mut expected = (0..50).filter(|&v| v != 10).collect::<Vec<_>>();
        expected.extend_from_within(..);
        assert_eq!(a.to_array(), expected);
        a.assert_invariants();
    }

    #[test]
    fn random_concat_matches_vec_append() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for _ in 0..200 {
            let (n, m) = (rng.random_range(0..80), rng.random_range(0..80));
            let mut a = random_list(&mut rng, n, 0);
            let b = random_list(&mut rng, m, 1_000);
            let mut expected = a.to_array();
            expected.extend(b.to_array());
            let diff = (a.height() - b.height()).unsigned_abs() as usize;

            assert_eq!(a.concat(b), diff);
            assert_eq!(a.len(), n + m);
            assert_eq!(a.to_array(), expected);
            a.assert_invariants();

            // the joined list must keep working as a list
            if !a.is_empty() {
                let index = rng.random_range(0..a.len());
                a.delete(index).unwrap();
                expected.remove(index);
            }
            a.insert(a.len() / 2, -1).unwrap();
            expected.insert(expected.len() / 2, -1);
            assert_eq!(a.to_array(), expected);
            a.assert_invariants();
        }
    }
}
