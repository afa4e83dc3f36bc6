//! An ordered map implemented with an AVL tree.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::policy::{CloneFn, CompareFn, DeepClone, ValuePolicy};
use crate::set::AvlTreeSet;

/// An ordered map implemented with an AVL tree.
///
/// Entries are ordered by key only. The clone policy applies to values,
/// keys are taken as identifiers and only copied with [`Clone::clone`].
///
/// ```
/// use avl_policy::AvlTreeMap;
/// let mut map = AvlTreeMap::ordered();
/// map.insert(0, "zero");
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.get(&1), Some("one"));
/// map.remove(&1);
/// assert!(map.get(&1).is_none());
/// assert_eq!(map.sorted(), vec!["zero", "two"]);
/// ```
pub struct AvlTreeMap<K, V> {
    set: AvlTreeSet<Entry<K, V>>,
    compare: CompareFn<K>,
    clone: CloneFn<V>,
}

struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> AvlTreeMap<K, V>
where
    K: Clone + 'static,
    V: 'static,
{
    fn with_parts(compare: CompareFn<K>, clone: CloneFn<V>, isolated: bool) -> Self {
        let entry_compare = {
            let compare = Rc::clone(&compare);
            move |lhs: &Entry<K, V>, rhs: &Entry<K, V>| compare(&lhs.key, &rhs.key)
        };
        let entry_clone = {
            let clone = Rc::clone(&clone);
            move |entry: &Entry<K, V>| Entry {
                key: entry.key.clone(),
                value: clone(&entry.value),
            }
        };
        let policy =
            ValuePolicy::from_parts(Rc::new(entry_compare), Rc::new(entry_clone), isolated);
        Self {
            set: AvlTreeSet::with_policy(policy),
            compare,
            clone,
        }
    }

    /// Creates an empty map ordered by `compare`.
    ///
    /// Values are deep-cloned on insertion and on every read, see [`DeepClone`].
    /// Use [`new_mutable`](Self::new_mutable) to store values as they are.
    pub fn new<C>(compare: C) -> Self
    where
        V: DeepClone,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        Self::with_parts(Rc::new(compare), Rc::new(V::deep_clone), true)
    }

    /// Creates an empty map storing mutable data ordered by `compare`.
    pub fn new_mutable<C>(compare: C) -> Self
    where
        V: Clone,
        C: Fn(&K, &K) -> Ordering + 'static,
    {
        Self::with_parts(Rc::new(compare), Rc::new(V::clone), false)
    }

    /// Creates an empty map storing immutable data ordered by `compare`.
    /// `clone` is used to copy values on their way into and out of the map.
    pub fn new_immutable<C, D>(compare: C, clone: D) -> Self
    where
        C: Fn(&K, &K) -> Ordering + 'static,
        D: Fn(&V) -> V + 'static,
    {
        Self::with_parts(Rc::new(compare), Rc::new(clone), true)
    }
}

impl<K, V> AvlTreeMap<K, V> {
    /// Inserts a key-value pair into the map.
    /// Returns the previous value if the key was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.set
            .replace(Entry { key, value })
            .map(|entry| entry.value)
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    /// Returns the height of the tree, 0 for an empty map.
    pub fn height(&self) -> usize {
        self.set.height()
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.set.clear();
    }

    /// Returns a copy of the value corresponding to the key.
    pub fn get(&self, key: &K) -> Option<V> {
        self.find(key).map(|entry| (self.clone)(&entry.value))
    }

    /// Returns true if the map contains a value for the key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a copy of the value of the smallest key.
    pub fn min(&self) -> Option<V> {
        self.set.first().map(|entry| (self.clone)(&entry.value))
    }

    /// Returns a copy of the value of the largest key.
    pub fn max(&self) -> Option<V> {
        self.set.last().map(|entry| (self.clone)(&entry.value))
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let compare = Rc::clone(&self.compare);
        self.set
            .take_by(|entry| compare(&entry.key, key))
            .map(|entry| entry.value)
    }

    /// Removes all given keys from the map.
    /// Returns how many of them were present.
    pub fn remove_all<'a, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        keys.into_iter()
            .filter(|key| self.remove(key).is_some())
            .count()
    }

    /// Returns copies of all values in ascending order of their keys.
    pub fn sorted(&self) -> Vec<V> {
        let mut values = Vec::with_capacity(self.len());
        values.extend(self.set.iter().map(|entry| (self.clone)(&entry.value)));
        values
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.set.check_consistency()
    }

    fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        self.set.find_by(|entry| (self.compare)(&entry.key, key))
    }
}

impl<K, V> Clone for AvlTreeMap<K, V> {
    /// Copies the whole tree, passing every value through the clone policy.
    fn clone(&self) -> Self {
        Self {
            set: self.set.clone(),
            compare: Rc::clone(&self.compare),
            clone: Rc::clone(&self.clone),
        }
    }
}

impl<K, V> Extend<(K, V)> for AvlTreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for AvlTreeMap<K, V> {
    /// Formats the tree structure with entries written as `key:value`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.set
            .fmt_with(f, |entry, f| write!(f, "{:?}:{:?}", entry.key, entry.value))
    }
}
