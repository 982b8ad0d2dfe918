//! Common traits for ordered set data structures
//!
//! This module provides the [`OrderedSet`] trait, the membership API shared by
//! [`BalancedTree`](crate::avl::BalancedTree) and the standard library's
//! `BTreeSet` (see [`stdlib_compat`](crate::stdlib_compat)), along with the
//! [`InvariantViolation`] error reported by structural validation.

use std::fmt;

/// Error type for structural validation
///
/// None of the set operations can fail; these describe a tree whose shape no
/// longer satisfies the AVL invariants. Depths are counted from the root, which
/// sits at depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A key is not strictly between the bounds set by its ancestors
    OrderViolated { depth: usize },
    /// The stored balance factor disagrees with the measured subtree heights
    BalanceMismatch {
        depth: usize,
        stored: i8,
        actual: isize,
    },
    /// The subtree heights differ by more than one
    OutOfBalance { depth: usize, actual: isize },
    /// The arena holds nodes that are not reachable from the root
    DetachedNodes { reachable: usize, stored: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::OrderViolated { depth } => {
                write!(f, "key at depth {depth} breaks search-tree ordering")
            }
            InvariantViolation::BalanceMismatch {
                depth,
                stored,
                actual,
            } => {
                write!(
                    f,
                    "node at depth {depth} stores balance {stored} but measures {actual}"
                )
            }
            InvariantViolation::OutOfBalance { depth, actual } => {
                write!(f, "node at depth {depth} is out of balance ({actual})")
            }
            InvariantViolation::DetachedNodes { reachable, stored } => {
                write!(
                    f,
                    "{reachable} nodes reachable from the root but {stored} stored"
                )
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Base trait for ordered membership sets
///
/// The API mirrors a keys-only search tree: membership queries, insertion of
/// absent keys, removal of present keys, and clearing. Inserting a present key
/// and removing an absent key are silent no-ops.
///
/// # Example
///
/// ```rust
/// use rust_balanced_tree::{BalancedTree, OrderedSet};
///
/// fn fill<S: OrderedSet<i32>>() -> S {
///     let mut set = S::new();
///     for key in [3, 1, 2, 3] {
///         set.insert(key);
///     }
///     set
/// }
///
/// let tree: BalancedTree<i32> = fill();
/// assert_eq!(tree.len(), 3);
/// assert!(OrderedSet::find(&tree, &2));
/// ```
pub trait OrderedSet<T: Ord> {
    /// Creates a new empty set
    fn new() -> Self;

    /// Returns true if the set holds no keys
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the set
    fn len(&self) -> usize;

    /// Returns true if `key` is present
    ///
    /// # Time Complexity
    /// O(log n) for balanced trees.
    fn find(&self, key: &T) -> bool;

    /// Inserts `key`, returning false (and changing nothing) if it was already present
    ///
    /// # Time Complexity
    /// O(log n) for balanced trees.
    fn insert(&mut self, key: T) -> bool;

    /// Removes `key`, returning false (and changing nothing) if it was absent
    ///
    /// # Time Complexity
    /// O(log n) for balanced trees.
    fn remove(&mut self, key: &T) -> bool;

    /// Removes every key
    fn clear(&mut self);
}
