use rand::Rng;
use rand::seq::SliceRandom;

use crate::list::AvlTreeList;

impl<T: Clone> AvlTreeList<T> {
    /// Returns a new list holding a uniformly random permutation of the
    /// elements, drawn from `rng`.
    pub fn permutation<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut values = self.to_array();
        values.shuffle(rng);
        Self::from_vec(values)
    }
}
