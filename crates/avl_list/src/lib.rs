//! A positional list backed by an AVL tree.
//!
//! [`AvlTreeList`] keeps its elements in in-order sequence, so the tree is
//! ordered by index instead of by key. Every node caches its subtree size and
//! height, which gives O(log n) `insert`, `delete` and `retrieve` at arbitrary
//! positions, and lets two lists be concatenated with a height-guided join.
//!
//! ```
//! use avl_list::AvlTreeList;
//!
//! let mut list = AvlTreeList::new();
//! list.insert(0, "b").unwrap();
//! list.insert(0, "a").unwrap();
//! list.insert(2, "c").unwrap();
//! assert_eq!(list.to_array(), ["a", "b", "c"]);
//!
//! let tail = ["d", "e"].into_iter().collect::<AvlTreeList<_>>();
//! list.concat(tail);
//! assert_eq!(list.retrieve(3), Ok(&"d"));
//! assert_eq!(list.select(5).unwrap().rank(), 5);
//! ```

mod arena;
mod balance;
mod build;
mod error;
mod iter;
mod join;
mod list;
mod node;
mod order;
mod shuffle;
mod sort;

pub use error::{ListError, Result};
pub use iter::Iter;
pub use list::AvlTreeList;
pub use order::NodeRef;
