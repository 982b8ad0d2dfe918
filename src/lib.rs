//! Self-balancing binary search trees for Rust
//!
//! This crate provides an AVL tree, [`BalancedTree`], storing a set of ordered keys
//! with logarithmic-time search, insertion, and removal.
//!
//! # Features
//!
//! - **Arena-backed nodes**: nodes live in a generational `slotmap` arena; every node is
//!   owned by exactly one parent link (or the root slot), with no parent pointers
//! - **In-place rotations**: a rotated subtree keeps its root slot and swaps key values,
//!   so the link from the parent never changes
//! - **Stack-based removal**: removal records its ancestors on an explicit stack and
//!   rebalances on the way back up, rotating at as many levels as needed
//! - **Structural validation**: [`BalancedTree::validate`] checks ordering and balance
//!   factors, and [`BalancedTree::root`] exposes a read-only cursor for inspection
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `find`    | O(log n)   |
//! | `insert`  | O(log n), at most one rotation |
//! | `remove`  | O(log n), up to O(log n) rotations |
//! | `clear`   | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use rust_balanced_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(30);
//!
//! assert!(tree.find(&20));
//! assert_eq!(tree.root().map(|n| *n.key()), Some(20));
//!
//! tree.remove(&20);
//! assert!(!tree.find(&20));
//! assert!(tree.validate().is_ok());
//! ```

pub mod avl;
pub mod inspect;
pub mod stdlib_compat;
pub mod traits;

// Re-export the main types for convenience
pub use avl::BalancedTree;
pub use inspect::NodeRef;
pub use traits::{InvariantViolation, OrderedSet};
