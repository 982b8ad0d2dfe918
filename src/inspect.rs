//! Read-only structural inspection of a [`BalancedTree`]
//!
//! [`NodeRef`] is a borrowed cursor onto a single node. It exposes the node's
//! key, stored balance factor and children, which is enough to assert exact tree
//! shapes in tests and to render the tree. It is deliberately not an iterator.
//!
//! This module also hosts [`BalancedTree::validate`], which walks the whole tree
//! and checks every AVL invariant, and the `Debug`/`Display` implementations.
//!
//! # Example
//!
//! ```rust
//! use rust_balanced_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key);
//! }
//!
//! let root = tree.root().unwrap();
//! assert_eq!(*root.key(), 20);
//! assert_eq!(root.balance(), 0);
//! assert_eq!(root.left().map(|n| *n.key()), Some(10));
//! assert_eq!(root.right().map(|n| *n.key()), Some(30));
//!
//! assert_eq!(tree.to_string(), "20 [0]\n├─ 10 [0]\n└─ 30 [0]");
//! ```

use std::fmt;

use crate::avl::{BalancedTree, Node, NodeKey};
use crate::traits::InvariantViolation;

/// Borrowed view of one node of a [`BalancedTree`]
pub struct NodeRef<'a, T> {
    tree: &'a BalancedTree<T>,
    key: NodeKey,
}

// Manual impls: deriving would require `T: Clone`
impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    fn node(&self) -> &'a Node<T> {
        &self.tree.nodes[self.key]
    }

    fn wrap(tree: &'a BalancedTree<T>, key: Option<NodeKey>) -> Option<Self> {
        key.map(|key| NodeRef { tree, key })
    }

    /// The key stored in this node
    pub fn key(&self) -> &'a T {
        &self.node().key
    }

    /// The stored balance factor, `height(left) - height(right)`
    pub fn balance(&self) -> i8 {
        self.node().balance
    }

    /// The left child, holding smaller keys
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(self.tree, self.node().left)
    }

    /// The right child, holding larger keys
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        Self::wrap(self.tree, self.node().right)
    }

    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        let node = self.node();
        node.left.is_none() && node.right.is_none()
    }
}

impl<T> BalancedTree<T> {
    /// Returns a cursor onto the root node, or `None` for an empty tree
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        NodeRef::wrap(self, self.root)
    }
}

impl<T: Ord> BalancedTree<T> {
    /// Checks every structural invariant of the tree
    ///
    /// Verifies that:
    /// - keys are strictly increasing in order (search-tree property)
    /// - each stored balance factor equals `height(left) - height(right)`
    /// - no balance factor exceeds one in magnitude
    /// - every node held by the arena is reachable from the root
    ///
    /// **Time Complexity**: O(n)
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.validate_height().map(|_| ())
    }

    /// Same as [`validate`](Self::validate), returning the measured height
    pub(crate) fn validate_height(&self) -> Result<usize, InvariantViolation> {
        let mut reachable = 0;
        let height = match self.root() {
            Some(root) => check_subtree(root, 0, None, None, &mut reachable)?,
            None => 0,
        };
        if reachable != self.nodes.len() {
            return Err(InvariantViolation::DetachedNodes {
                reachable,
                stored: self.nodes.len(),
            });
        }
        Ok(height)
    }
}

/// Returns the height of the subtree rooted at `node`
fn check_subtree<'a, T: Ord>(
    node: NodeRef<'a, T>,
    depth: usize,
    lower: Option<&'a T>,
    upper: Option<&'a T>,
    reachable: &mut usize,
) -> Result<usize, InvariantViolation> {
    *reachable += 1;

    let key = node.key();
    if lower.is_some_and(|l| key <= l) || upper.is_some_and(|u| key >= u) {
        return Err(InvariantViolation::OrderViolated { depth });
    }

    let left = match node.left() {
        Some(child) => check_subtree(child, depth + 1, lower, Some(key), reachable)?,
        None => 0,
    };
    let right = match node.right() {
        Some(child) => check_subtree(child, depth + 1, Some(key), upper, reachable)?,
        None => 0,
    };

    let actual = left as isize - right as isize;
    if actual.abs() > 1 {
        return Err(InvariantViolation::OutOfBalance { depth, actual });
    }
    if isize::from(node.balance()) != actual {
        return Err(InvariantViolation::BalanceMismatch {
            depth,
            stored: node.balance(),
            actual,
        });
    }

    Ok(1 + left.max(right))
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", self.key())
            .field("balance", &self.balance())
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for BalancedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalancedTree")
            .field("len", &self.len())
            .field("root", &self.root())
            .finish()
    }
}

/// Renders one node per line as `key [balance]`, children below with branches
///
/// Both children are printed whenever one exists so left and right stay
/// distinguishable; a missing child shows as `∅`.
impl<T: fmt::Display> fmt::Display for BalancedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => render(f, root, ""),
            None => f.write_str("∅"),
        }
    }
}

fn render<T: fmt::Display>(f: &mut fmt::Formatter<'_>, node: NodeRef<'_, T>, tab: &str) -> fmt::Result {
    write!(f, "{} [{}]", node.key(), node.balance())?;
    if node.is_leaf() {
        return Ok(());
    }

    for (child, is_last) in [(node.left(), false), (node.right(), true)] {
        let branch = if is_last { "└─ " } else { "├─ " };
        write!(f, "\n{tab}{branch}")?;
        match child {
            Some(child) => {
                let child_tab = format!("{tab}{}", if is_last { "   " } else { "│  " });
                render(f, child, &child_tab)?;
            }
            None => f.write_str("∅")?,
        }
    }
    Ok(())
}
