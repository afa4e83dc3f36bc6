//! An AVL tree usable as an ordered set, an ordered key/value map and a sorted collection.
//!
//! The tree is configured by a [`ValuePolicy`]: a comparator defining the order of
//! values and a clone function deciding whether values are isolated from callers.
//!
//! ```
//! use avl_policy::{AvlTreeMap, AvlTreeSet};
//!
//! let mut set = AvlTreeSet::ordered();
//! set.extend([5, 3, 8, 1, 4, 7, 9]);
//! assert_eq!(set.sorted(), vec![1, 3, 4, 5, 7, 8, 9]);
//! assert_eq!(set.min(), Some(1));
//! assert_eq!(set.max(), Some(9));
//!
//! let mut map = AvlTreeMap::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
//! map.insert("three", 3);
//! map.insert("one", 1);
//! assert_eq!(map.get(&"two"), Some(1));
//! assert_eq!(map.sorted(), vec![1, 3]);
//! ```

mod map;
mod node;
mod ordered;
mod policy;
mod set;

pub use map::AvlTreeMap;
pub use policy::{CloneFn, CompareFn, DeepClone, ValuePolicy};
pub use set::AvlTreeSet;
