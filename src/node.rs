use std::cmp::{self, Ordering};
use std::fmt;
use std::mem;

pub(crate) type Link<T> = Option<Box<Node<T>>>;

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) height: usize,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

/// Height of a subtree, 0 for an empty one.
#[inline]
pub(crate) fn height<T>(link: &Link<T>) -> usize {
    match link {
        None => 0,
        Some(node) => node.height,
    }
}

impl<T> Node<T> {
    pub(crate) fn leaf(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    pub(crate) fn update_height(&mut self) {
        self.height = 1 + cmp::max(height(&self.left), height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Makes the right child the new subtree root.
    /// Returns the node unchanged if it has no right child.
    pub(crate) fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        match self.right.take() {
            None => self,
            Some(mut right) => {
                self.right = right.left.take();
                self.update_height();
                right.left = Some(self);
                right.update_height();
                right
            }
        }
    }

    /// Makes the left child the new subtree root.
    /// Returns the node unchanged if it has no left child.
    pub(crate) fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        match self.left.take() {
            None => self,
            Some(mut left) => {
                self.left = left.right.take();
                self.update_height();
                left.right = Some(self);
                left.update_height();
                left
            }
        }
    }

    /// Adjusts height and restores AVL condition (balance) at this node if necessary.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    pub(crate) fn rebalance(mut self: Box<Self>) -> Box<Self> {
        self.update_height();
        let balance = self.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left-right case: straighten the left child first
            if let Some(left) = self.left.take() {
                self.left = Some(if left.balance_factor() < 0 {
                    log::trace!("rebalance: double rotation left-right");
                    left.rotate_left()
                } else {
                    left
                });
            }
            log::trace!("rebalance: rotate right at height {}", self.height);
            self.rotate_right()
        } else if balance < -1 {
            // Right-left case: straighten the right child first
            if let Some(right) = self.right.take() {
                self.right = Some(if right.balance_factor() > 0 {
                    log::trace!("rebalance: double rotation right-left");
                    right.rotate_right()
                } else {
                    right
                });
            }
            log::trace!("rebalance: rotate left at height {}", self.height);
            self.rotate_left()
        } else {
            self
        }
    }

    /// Copies the subtree, passing every value through `clone`.
    pub(crate) fn clone_with<F>(&self, clone: &F) -> Box<Self>
    where
        F: Fn(&T) -> T + ?Sized,
    {
        Box::new(Node {
            value: clone(&self.value),
            height: self.height,
            left: self.left.as_ref().map(|left| left.clone_with(clone)),
            right: self.right.as_ref().map(|right| right.clone_with(clone)),
        })
    }
}

/// Inserts `value` into the subtree and returns the new subtree root.
///
/// A value comparing equal to a stored one replaces it in place, the
/// replaced value is returned and the shape of the tree is left untouched.
pub(crate) fn insert<T, C>(link: Link<T>, value: T, compare: &C) -> (Box<Node<T>>, Option<T>)
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
{
    let mut node = match link {
        None => return (Node::leaf(value), None),
        Some(node) => node,
    };
    let replaced = match compare(&value, &node.value) {
        Ordering::Equal => {
            let old = mem::replace(&mut node.value, value);
            return (node, Some(old));
        }
        Ordering::Less => {
            let (left, replaced) = insert(node.left.take(), value, compare);
            node.left = Some(left);
            replaced
        }
        Ordering::Greater => {
            let (right, replaced) = insert(node.right.take(), value, compare);
            node.right = Some(right);
            replaced
        }
    };
    (node.rebalance(), replaced)
}

/// Removes the value matched by `probe` from the subtree and returns the new subtree root.
///
/// `probe` returns the ordering of a stored candidate relative to the sought value.
/// Removing an absent value leaves the subtree unchanged.
pub(crate) fn remove<T, P>(link: Link<T>, probe: &P) -> (Link<T>, Option<T>)
where
    P: Fn(&T) -> Ordering + ?Sized,
{
    let mut node = match link {
        None => return (None, None),
        Some(node) => node,
    };
    let removed = match probe(&node.value) {
        Ordering::Equal => {
            let Node {
                value, left, right, ..
            } = *node;
            let replacement = match (left, right) {
                (left, None) => left,
                (None, right) => right,
                (Some(left), Some(right)) => {
                    // Promote in-order successor, detached from the right subtree first
                    log::debug!("remove: promoting in-order successor");
                    let (rest, mut successor) = remove_min(right);
                    successor.left = Some(left);
                    successor.right = rest;
                    Some(successor.rebalance())
                }
            };
            return (replacement, Some(value));
        }
        Ordering::Greater => {
            let (left, removed) = remove(node.left.take(), probe);
            node.left = left;
            removed
        }
        Ordering::Less => {
            let (right, removed) = remove(node.right.take(), probe);
            node.right = right;
            removed
        }
    };
    if removed.is_none() {
        // Nothing changed below this node
        return (Some(node), None);
    }
    (Some(node.rebalance()), removed)
}

/// Detaches the leftmost node of the subtree.
/// Returns the rebalanced rest of the subtree and the detached node.
fn remove_min<T>(mut node: Box<Node<T>>) -> (Link<T>, Box<Node<T>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            node.height = 1;
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            (Some(node.rebalance()), min)
        }
    }
}

/// Writes the subtree as `{height}value: [left, right]`, or just the value for a leaf.
pub(crate) fn fmt_link<T, F>(
    link: &Link<T>,
    f: &mut fmt::Formatter<'_>,
    fmt_value: &F,
) -> fmt::Result
where
    F: Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    match link {
        None => f.write_str("\"\""),
        Some(node) if node.left.is_none() && node.right.is_none() => fmt_value(&node.value, f),
        Some(node) => {
            write!(f, "{{{}}}", node.height)?;
            fmt_value(&node.value, f)?;
            f.write_str(": [")?;
            fmt_link(&node.left, f, fmt_value)?;
            f.write_str(", ")?;
            fmt_link(&node.right, f, fmt_value)?;
            f.write_str("]")
        }
    }
}

/// In-order iterator over the values of a subtree.
pub(crate) struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: &'a Link<T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<T>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.value)
    }
}

/// Asserts order, height and balance of the subtree.
/// Returns the number of nodes.
#[cfg(any(test, feature = "consistency_check"))]
pub(crate) fn check_consistency<T, C>(link: &Link<T>, compare: &C) -> usize
where
    C: Fn(&T, &T) -> Ordering + ?Sized,
{
    match link {
        None => 0,
        Some(node) => {
            let left_height = height(&node.left);
            let right_height = height(&node.right);

            // Check order
            if let Some(left) = &node.left {
                assert_eq!(compare(&left.value, &node.value), Ordering::Less);
            }
            if let Some(right) = &node.right {
                assert_eq!(compare(&right.value, &node.value), Ordering::Greater);
            }

            // Check height
            assert_eq!(node.height, 1 + cmp::max(left_height, right_height));

            // Check AVL condition (nearly balance)
            assert!(left_height <= right_height + 1);
            assert!(right_height <= left_height + 1);

            1 + check_consistency(&node.left, compare) + check_consistency(&node.right, compare)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmp_i32(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn values(link: &Link<i32>) -> Vec<i32> {
        Iter::new(link).copied().collect()
    }

    #[test]
    fn test_rotate_right_then_left() {
        //       1            2
        //      / \          / \
        //     2   3  ->   21   1
        //    / \              / \
        //  21   22          22   3
        let mut root = Node::leaf(1);
        let mut left = Node::leaf(2);
        left.left = Some(Node::leaf(21));
        left.right = Some(Node::leaf(22));
        left.update_height();
        root.left = Some(left);
        root.right = Some(Node::leaf(3));
        root.update_height();
        assert_eq!(root.height, 3);

        let root = root.rotate_right();
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 3);
        let left = root.left.as_ref().unwrap();
        let right = root.right.as_ref().unwrap();
        assert_eq!(left.value, 21);
        assert_eq!(right.value, 1);
        assert_eq!(right.height, 2);
        assert_eq!(right.left.as_ref().unwrap().value, 22);
        assert_eq!(right.right.as_ref().unwrap().value, 3);

        let root = root.rotate_left();
        assert_eq!(root.value, 1);
        let left = root.left.as_ref().unwrap();
        assert_eq!(left.value, 2);
        assert_eq!(left.left.as_ref().unwrap().value, 21);
        assert_eq!(left.right.as_ref().unwrap().value, 22);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
    }

    #[test]
    fn test_rotate_without_child_is_noop() {
        let root = Node::leaf(7).rotate_left().rotate_right();
        assert_eq!(root.value, 7);
        assert_eq!(root.height, 1);
    }

    #[test]
    fn test_rebalance_balanced_is_noop() {
        //      10
        //     /  \
        //    5   100
        //   / \
        //  2   7
        let mut left = Node::leaf(5);
        left.left = Some(Node::leaf(2));
        left.right = Some(Node::leaf(7));
        left.update_height();
        let mut root = Node::leaf(10);
        root.left = Some(left);
        root.right = Some(Node::leaf(100));

        let root = root.rebalance();
        assert_eq!(root.value, 10);
        assert_eq!(root.height, 3);
    }

    #[test]
    fn test_rebalance_left_right() {
        //     3          2
        //    /          / \
        //   1     ->   1   3
        //    \
        //     2
        let mut left = Node::leaf(1);
        left.right = Some(Node::leaf(2));
        left.update_height();
        let mut root = Node::leaf(3);
        root.left = Some(left);

        let root = root.rebalance();
        assert_eq!(root.value, 2);
        assert_eq!(root.height, 2);
        assert_eq!(root.left.as_ref().unwrap().value, 1);
        assert_eq!(root.right.as_ref().unwrap().value, 3);
    }

    #[test]
    fn test_insert_and_remove() {
        let mut root: Link<i32> = None;
        for value in [5, 3, 8, 1, 4, 7, 9] {
            let (new_root, replaced) = insert(root.take(), value, &cmp_i32);
            assert!(replaced.is_none());
            root = Some(new_root);
        }
        assert_eq!(check_consistency(&root, &cmp_i32), 7);
        assert_eq!(values(&root), vec![1, 3, 4, 5, 7, 8, 9]);

        let (new_root, replaced) = insert(root.take(), 4, &cmp_i32);
        root = Some(new_root);
        assert_eq!(replaced, Some(4));
        assert_eq!(check_consistency(&root, &cmp_i32), 7);

        // 5 is the root with two children
        let (new_root, removed) = remove(root.take(), &|v: &i32| v.cmp(&5));
        root = new_root;
        assert_eq!(removed, Some(5));
        assert_eq!(check_consistency(&root, &cmp_i32), 6);
        assert_eq!(values(&root), vec![1, 3, 4, 7, 8, 9]);

        let (new_root, removed) = remove(root.take(), &|v: &i32| v.cmp(&6));
        root = new_root;
        assert!(removed.is_none());
        assert_eq!(values(&root), vec![1, 3, 4, 7, 8, 9]);
    }

    #[test]
    fn test_remove_min_detaches_successor() {
        let mut root: Link<i32> = None;
        for value in 0..15 {
            root = Some(insert(root.take(), value, &cmp_i32).0);
        }
        let (rest, min) = remove_min(root.take().unwrap());
        assert_eq!(min.value, 0);
        assert!(min.left.is_none() && min.right.is_none());
        assert_eq!(check_consistency(&rest, &cmp_i32), 14);
        assert_eq!(values(&rest), (1..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_clone_with() {
        let mut root: Link<i32> = None;
        for value in 0..10 {
            root = Some(insert(root.take(), value, &cmp_i32).0);
        }
        let copy: Link<i32> = root.as_ref().map(|node| node.clone_with(&|v: &i32| v * 10));
        assert_eq!(height(&copy), height(&root));
        assert_eq!(values(&copy), (0..10).map(|v| v * 10).collect::<Vec<_>>());
    }
}
