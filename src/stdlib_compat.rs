//! Standard library compatibility layer
//!
//! Implements [`OrderedSet`] for `std::collections::BTreeSet`, so generic code and
//! tests written against the trait can run on the standard B-tree as a reference
//! model.
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use rust_balanced_tree::{BalancedTree, OrderedSet};
//!
//! fn same_membership<A: OrderedSet<u8>, B: OrderedSet<u8>>(a: &A, b: &B) -> bool {
//!     (0..=u8::MAX).all(|k| a.find(&k) == b.find(&k))
//! }
//!
//! let mut tree = BalancedTree::new();
//! let mut model = BTreeSet::new();
//! for key in [7u8, 3, 9, 3] {
//!     tree.insert(key);
//!     model.insert(key);
//! }
//! assert!(same_membership(&tree, &model));
//! ```

use std::collections::BTreeSet;

use crate::traits::OrderedSet;

impl<T: Ord> OrderedSet<T> for BTreeSet<T> {
    fn new() -> Self {
        BTreeSet::new()
    }

    fn is_empty(&self) -> bool {
        BTreeSet::is_empty(self)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn find(&self, key: &T) -> bool {
        self.contains(key)
    }

    fn insert(&mut self, key: T) -> bool {
        BTreeSet::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        BTreeSet::remove(self, key)
    }

    fn clear(&mut self) {
        BTreeSet::clear(self)
    }
}
