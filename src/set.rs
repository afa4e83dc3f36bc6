//! An ordered set implemented with an AVL tree.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use crate::node::{self, Iter, Link};
use crate::policy::{DeepClone, ValuePolicy};

/// An ordered set implemented with an AVL tree.
///
/// Ordering and copying of values are configured by a [`ValuePolicy`].
/// Inserting a value that compares equal to a stored one replaces the stored value.
///
/// The set is meant for single-threaded use, concurrent access must be serialized by the caller.
///
/// ```
/// use avl_policy::AvlTreeSet;
/// let mut set = AvlTreeSet::ordered();
/// set.insert(0);
/// set.insert(1);
/// set.insert(2);
/// assert_eq!(set.get(&1), Some(1));
/// set.remove(&1);
/// assert!(set.get(&1).is_none());
/// assert_eq!(set.sorted(), vec![0, 2]);
/// ```
pub struct AvlTreeSet<T> {
    root: Link<T>,
    num_nodes: usize,
    policy: ValuePolicy<T>,
}

impl<T> AvlTreeSet<T> {
    /// Creates an empty set using the given policy.
    /// No memory is allocated until the first item is inserted.
    pub fn with_policy(policy: ValuePolicy<T>) -> Self {
        Self {
            root: None,
            num_nodes: 0,
            policy,
        }
    }

    /// Creates an empty set ordered by `compare`.
    ///
    /// Values are deep-cloned on insertion and on every read, see [`DeepClone`].
    /// Use [`new_mutable`](Self::new_mutable) to store values as they are.
    pub fn new<C>(compare: C) -> Self
    where
        T: DeepClone + 'static,
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::with_policy(ValuePolicy::auto(compare))
    }

    /// Creates an empty set storing mutable data ordered by `compare`.
    pub fn new_mutable<C>(compare: C) -> Self
    where
        T: Clone + 'static,
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::with_policy(ValuePolicy::mutable(compare))
    }

    /// Creates an empty set storing immutable data ordered by `compare`.
    /// `clone` is used to copy values on their way into and out of the set.
    pub fn new_immutable<C, D>(compare: C, clone: D) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
        D: Fn(&T) -> T + 'static,
    {
        Self::with_policy(ValuePolicy::immutable(compare, clone))
    }

    /// Returns the policy of this set.
    pub fn policy(&self) -> &ValuePolicy<T> {
        &self.policy
    }

    /// Returns true if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree, 0 for an empty set.
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// Clears the set, deallocating all memory.
    pub fn clear(&mut self) {
        log::debug!("clearing set of {} values", self.num_nodes);
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns a copy of the value matched by `f`.
    ///
    /// `f` is called with stored candidates and returns the ordering of the candidate
    /// relative to the sought value, like the closure of [`slice::binary_search_by`].
    /// This allows lookups by a partial key without building a full value.
    ///
    /// ```
    /// use avl_policy::AvlTreeSet;
    /// let mut set = AvlTreeSet::ordered();
    /// set.extend([(1, "one"), (2, "two")]);
    /// assert_eq!(set.get_by(|probe| probe.0.cmp(&2)), Some((2, "two")));
    /// ```
    pub fn get_by<F>(&self, f: F) -> Option<T>
    where
        F: FnMut(&T) -> Ordering,
    {
        self.find_by(f).map(|value| self.policy.copy(value))
    }

    /// Returns a copy of the stored value that is equal to the given value.
    pub fn get(&self, value: &T) -> Option<T> {
        self.get_by(|probe| self.policy.compare(probe, value))
    }

    /// Returns true if the set contains a value.
    pub fn contains(&self, value: &T) -> bool {
        self.find_by(|probe| self.policy.compare(probe, value)).is_some()
    }

    /// Returns a copy of the smallest value.
    pub fn min(&self) -> Option<T> {
        self.first().map(|value| self.policy.copy(value))
    }

    /// Returns a copy of the largest value.
    pub fn max(&self) -> Option<T> {
        self.last().map(|value| self.policy.copy(value))
    }

    /// Inserts a value into the set.
    /// Returns true if no equal value was stored before,
    /// otherwise the stored value is replaced and the size is unchanged.
    pub fn insert(&mut self, value: T) -> bool {
        self.replace(value).is_none()
    }

    /// Inserts a value into the set, replacing an equal stored value.
    /// Returns the replaced value.
    pub fn replace(&mut self, value: T) -> Option<T> {
        let value = self.policy.admit(value);
        let compare = self.policy.compare_fn();
        let (root, replaced) = node::insert(self.root.take(), value, &**compare);
        self.root = Some(root);
        if replaced.is_none() {
            self.num_nodes += 1;
        }
        replaced
    }

    /// Removes a value from the set.
    /// Returns whether the value was previously in the set.
    pub fn remove(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes a value from the set.
    /// Returns the value if it was previously in the set.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let compare = Rc::clone(self.policy.compare_fn());
        self.take_by(|probe| compare(probe, value))
    }

    /// Removes all given values from the set.
    /// Returns how many of them were present.
    pub fn remove_all<'a, I>(&mut self, values: I) -> usize
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
    {
        values
            .into_iter()
            .filter(|value| self.remove(value))
            .count()
    }

    /// Returns copies of all values in ascending order.
    pub fn sorted(&self) -> Vec<T> {
        let mut values = Vec::with_capacity(self.num_nodes);
        values.extend(self.iter().map(|value| self.policy.copy(value)));
        values
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        let num_nodes = node::check_consistency(&self.root, &**self.policy.compare_fn());
        assert_eq!(num_nodes, self.num_nodes);
    }

    pub(crate) fn find_by<F>(&self, mut f: F) -> Option<&T>
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match f(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => node.right.as_deref(),
                Ordering::Greater => node.left.as_deref(),
            };
        }
        None
    }

    pub(crate) fn take_by<F>(&mut self, f: F) -> Option<T>
    where
        F: Fn(&T) -> Ordering,
    {
        if self.root.is_none() {
            return None;
        }
        let (root, removed) = node::remove(self.root.take(), &f);
        self.root = root;
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    pub(crate) fn first(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    pub(crate) fn last(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.root)
    }

    pub(crate) fn fmt_with<F>(&self, f: &mut fmt::Formatter<'_>, fmt_value: F) -> fmt::Result
    where
        F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
    {
        if self.root.is_none() {
            return f.write_str(".");
        }
        node::fmt_link(&self.root, f, &fmt_value)
    }
}

impl<T> Clone for AvlTreeSet<T> {
    /// Copies the whole tree, passing every value through the clone policy.
    fn clone(&self) -> Self {
        let clone = self.policy.clone_fn();
        Self {
            root: self
                .root
                .as_ref()
                .map(|root| root.clone_with(&**clone)),
            num_nodes: self.num_nodes,
            policy: self.policy.clone(),
        }
    }
}

impl<T> Extend<T> for AvlTreeSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTreeSet<T> {
    /// Formats the tree structure as `{height}value: [left, right]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, |value, f| write!(f, "{:?}", value))
    }
}
