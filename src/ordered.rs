//! Constructors for naturally ordered element and key types.
//!
//! Strings, integers and every other [`Ord`] type are ordered with [`Ord::cmp`].

use crate::map::AvlTreeMap;
use crate::policy::DeepClone;
use crate::set::AvlTreeSet;

impl<T: Ord + 'static> AvlTreeSet<T> {
    /// Creates an empty set ordered by [`Ord::cmp`].
    /// Values are deep-cloned on insertion and on every read.
    pub fn ordered() -> Self
    where
        T: DeepClone,
    {
        Self::new(T::cmp)
    }

    /// Creates an empty set storing mutable data ordered by [`Ord::cmp`].
    pub fn ordered_mutable() -> Self
    where
        T: Clone,
    {
        Self::new_mutable(T::cmp)
    }

    /// Creates an empty set storing immutable data ordered by [`Ord::cmp`].
    pub fn ordered_immutable<D>(clone: D) -> Self
    where
        D: Fn(&T) -> T + 'static,
    {
        Self::new_immutable(T::cmp, clone)
    }
}

impl<T: Ord + DeepClone + 'static> Default for AvlTreeSet<T> {
    fn default() -> Self {
        Self::ordered()
    }
}

impl<T: Ord + DeepClone + 'static> FromIterator<T> for AvlTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::ordered();
        set.extend(iter);
        set
    }
}

impl<K: Ord + Clone + 'static, V: 'static> AvlTreeMap<K, V> {
    /// Creates an empty map ordered by [`Ord::cmp`] on keys.
    /// Values are deep-cloned on insertion and on every read.
    pub fn ordered() -> Self
    where
        V: DeepClone,
    {
        Self::new(K::cmp)
    }

    /// Creates an empty map storing mutable data ordered by [`Ord::cmp`] on keys.
    pub fn ordered_mutable() -> Self
    where
        V: Clone,
    {
        Self::new_mutable(K::cmp)
    }

    /// Creates an empty map storing immutable data ordered by [`Ord::cmp`] on keys.
    pub fn ordered_immutable<D>(clone: D) -> Self
    where
        D: Fn(&V) -> V + 'static,
    {
        Self::new_immutable(K::cmp, clone)
    }
}

impl<K: Ord + Clone + 'static, V: DeepClone + 'static> Default for AvlTreeMap<K, V> {
    fn default() -> Self {
        Self::ordered()
    }
}

impl<K: Ord + Clone + 'static, V: DeepClone + 'static> FromIterator<(K, V)> for AvlTreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::ordered();
        map.extend(iter);
        map
    }
}
