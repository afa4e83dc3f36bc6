//! Ordering and copy policies configuring a tree instance.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// Three-way comparison of two values.
///
/// Must be a strict weak ordering that stays consistent for the lifetime of the tree.
pub type CompareFn<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Produces a copy of a value.
pub type CloneFn<T> = Rc<dyn Fn(&T) -> T>;

/// Values that can produce a copy sharing no mutable state with the original.
///
/// Element types implementing this trait are isolated automatically by the
/// auto constructors ([`ValuePolicy::auto`], [`AvlTreeSet::new`], [`AvlTreeMap::new`]):
/// every inserted value and every value handed out by a read accessor
/// goes through [`deep_clone`](DeepClone::deep_clone).
///
/// [`AvlTreeSet::new`]: crate::AvlTreeSet::new
/// [`AvlTreeMap::new`]: crate::AvlTreeMap::new
pub trait DeepClone {
    /// Returns a copy of `self` that shares no mutable state with `self`.
    fn deep_clone(&self) -> Self;
}

macro_rules! deep_clone_by_clone {
    ($($t:ty),* $(,)?) => {
        $(
            impl DeepClone for $t {
                #[inline]
                fn deep_clone(&self) -> Self {
                    self.clone()
                }
            }
        )*
    };
}

deep_clone_by_clone!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, (),
    String, &'static str,
);

impl<T: DeepClone> DeepClone for Box<T> {
    fn deep_clone(&self) -> Self {
        Box::new((**self).deep_clone())
    }
}

impl<T: DeepClone> DeepClone for Rc<T> {
    fn deep_clone(&self) -> Self {
        Rc::new((**self).deep_clone())
    }
}

impl<T: DeepClone> DeepClone for RefCell<T> {
    fn deep_clone(&self) -> Self {
        RefCell::new(self.borrow().deep_clone())
    }
}

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> Self {
        self.as_ref().map(DeepClone::deep_clone)
    }
}

impl<T: DeepClone> DeepClone for Vec<T> {
    fn deep_clone(&self) -> Self {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<A: DeepClone, B: DeepClone> DeepClone for (A, B) {
    fn deep_clone(&self) -> Self {
        (self.0.deep_clone(), self.1.deep_clone())
    }
}

/// Comparator and copy function of a tree.
///
/// A *mutable* policy stores inserted values as given and hands out
/// copies made with [`Clone::clone`], so handle types like `Rc<RefCell<_>>`
/// keep sharing state with the caller.
/// An *immutable* policy passes every inserted value and every returned
/// value through its clone function, so callers can never observe or
/// induce aliasing with the values held by the tree.
pub struct ValuePolicy<T> {
    compare: CompareFn<T>,
    clone: CloneFn<T>,
    isolated: bool,
}

impl<T> ValuePolicy<T> {
    /// Creates a policy storing mutable data.
    pub fn mutable<C>(compare: C) -> Self
    where
        T: Clone + 'static,
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            compare: Rc::new(compare),
            clone: Rc::new(T::clone),
            isolated: false,
        }
    }

    /// Creates a policy storing immutable data.
    /// `clone` is used to copy values on their way into and out of the tree.
    pub fn immutable<C, D>(compare: C, clone: D) -> Self
    where
        C: Fn(&T, &T) -> Ordering + 'static,
        D: Fn(&T) -> T + 'static,
    {
        Self {
            compare: Rc::new(compare),
            clone: Rc::new(clone),
            isolated: true,
        }
    }

    /// Creates an immutable policy using the type's own [`DeepClone`] implementation.
    pub fn auto<C>(compare: C) -> Self
    where
        T: DeepClone + 'static,
        C: Fn(&T, &T) -> Ordering + 'static,
    {
        Self::immutable(compare, T::deep_clone)
    }

    pub(crate) fn from_parts(compare: CompareFn<T>, clone: CloneFn<T>, isolated: bool) -> Self {
        Self {
            compare,
            clone,
            isolated,
        }
    }

    /// Returns whether values are copied on insertion and on every read.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    /// Compares two values with the configured comparator.
    #[inline]
    pub fn compare(&self, lhs: &T, rhs: &T) -> Ordering {
        (self.compare)(lhs, rhs)
    }

    /// Copies a value for handing it out to a caller.
    #[inline]
    pub fn copy(&self, value: &T) -> T {
        (self.clone)(value)
    }

    /// Prepares a caller-supplied value for storage in the tree.
    #[inline]
    pub(crate) fn admit(&self, value: T) -> T {
        if self.isolated {
            (self.clone)(&value)
        } else {
            value
        }
    }

    pub(crate) fn compare_fn(&self) -> &CompareFn<T> {
        &self.compare
    }

    pub(crate) fn clone_fn(&self) -> &CloneFn<T> {
        &self.clone
    }
}

impl<T> Clone for ValuePolicy<T> {
    fn clone(&self) -> Self {
        Self {
            compare: Rc::clone(&self.compare),
            clone: Rc::clone(&self.clone),
            isolated: self.isolated,
        }
    }
}

impl<T> fmt::Debug for ValuePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuePolicy")
            .field("isolated", &self.isolated)
            .finish_non_exhaustive()
    }
}
