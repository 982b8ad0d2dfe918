//! AVL Tree implementation
//!
//! An AVL tree is a binary search tree in which the heights of the two child
//! subtrees of every node differ by at most one. It provides:
//! - O(log n) worst-case find, insert and remove
//! - At most one (single or double) rotation per insertion
//! - Up to one rotation per level on removal
//!
//! # Balance factors
//!
//! Every node stores `height(left) - height(right)`, so a positive factor means
//! the node is left-heavy. At rest every factor is -1, 0 or +1; a factor of ±2
//! only exists for the instant before a rotation repairs it.
//!
//! # Memory layout
//!
//! Nodes live in a `slotmap` arena and refer to their children by key. There are
//! no parent links: insertion remembers the deepest unbalanced ancestor on its way
//! down, and removal records the full ancestor path on an explicit stack.
//!
//! Rotations are performed in place. The node occupying the subtree's root slot
//! stays there and trades key values with the node being promoted, so the parent
//! (or the tree's root slot) never has to be relinked.
//!
//! # Example
//!
//! ```rust
//! use rust_balanced_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//! // Ascending inserts still produce a perfectly balanced tree
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.root().map(|n| *n.key()), Some(4));
//! ```

use std::cmp::Ordering;
use std::mem;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::traits::OrderedSet;

new_key_type! {
    /// Arena key of a tree node
    pub(crate) struct NodeKey;
}

/// Ancestors recorded during removal, root first
///
/// 64 inline slots hold the deepest path of any tree below 2^40 keys.
type Path = SmallVec<[NodeKey; 64]>;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) key: T,
    /// `height(left) - height(right)`
    pub(crate) balance: i8,
    pub(crate) left: Option<NodeKey>,
    pub(crate) right: Option<NodeKey>,
}

impl<T> Node<T> {
    fn leaf(key: T) -> Self {
        Self {
            key,
            balance: 0,
            left: None,
            right: None,
        }
    }
}

/// AVL tree storing a set of ordered keys
///
/// Keys are compared with their [`Ord`] implementation; inserting a key that is
/// already present leaves the tree untouched, as does removing an absent key.
/// Keys are moved between nodes during rebalancing but never cloned.
///
/// The tree is not internally synchronized. It is `Send`/`Sync` whenever `T` is,
/// so concurrent users can wrap it in a lock of their choice.
///
/// # Example
///
/// ```rust
/// use rust_balanced_tree::BalancedTree;
///
/// let mut tree = BalancedTree::new();
/// assert!(tree.insert("b"));
/// assert!(tree.insert("a"));
/// assert!(!tree.insert("a")); // duplicate, ignored
///
/// assert!(tree.find(&"a"));
/// assert!(tree.remove(&"a"));
/// assert!(!tree.find(&"a"));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone)]
pub struct BalancedTree<T> {
    pub(crate) nodes: SlotMap<NodeKey, Node<T>>,
    pub(crate) root: Option<NodeKey>,
}

impl<T> BalancedTree<T> {
    /// Creates a new empty tree
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    /// Returns true if the tree holds no keys
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of nodes on the longest root-to-leaf path
    ///
    /// Follows the heavier child at every level as recorded by the balance
    /// factors, so this is O(log n) rather than a full traversal.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut cur = self.root;
        while let Some(k) = cur {
            height += 1;
            let node = &self.nodes[k];
            cur = if node.balance >= 0 {
                node.left
            } else {
                node.right
            };
        }
        height
    }

    /// Removes every key, leaving an empty tree ready for reuse
    ///
    /// **Time Complexity**: O(n)
    pub fn clear(&mut self) {
        debug!(len = self.nodes.len(), "clearing tree");
        self.nodes.clear();
        self.root = None;
    }

    // ========================================================================
    // Rotations
    // ========================================================================

    /// Promotes the left child of `a` into `a`'s slot
    ///
    /// ```text
    ///        a:x              a:y
    ///       /   \            /   \
    ///     b:y    R    =>    P    b:x
    ///    /   \                  /   \
    ///   P     Q                Q     R
    /// ```
    ///
    /// Returns the slot holding the demoted key (now `a`'s right child). Balance
    /// factors are left to the caller.
    fn rotate_right(&mut self, a: NodeKey) -> NodeKey {
        let Some(b) = self.nodes[a].left else {
            unreachable!("right rotation requires a left child");
        };
        let (p, q) = (self.nodes[b].left, self.nodes[b].right);
        let r = self.nodes[a].right;

        let upper = &mut self.nodes[a];
        upper.left = p;
        upper.right = Some(b);
        let lower = &mut self.nodes[b];
        lower.left = q;
        lower.right = r;

        self.swap_keys(a, b);
        b
    }

    /// Promotes the right child of `a` into `a`'s slot
    ///
    /// Mirror of [`rotate_right`](Self::rotate_right). Returns the slot holding
    /// the demoted key (now `a`'s left child).
    fn rotate_left(&mut self, a: NodeKey) -> NodeKey {
        let Some(b) = self.nodes[a].right else {
            unreachable!("left rotation requires a right child");
        };
        let (q, r) = (self.nodes[b].left, self.nodes[b].right);
        let p = self.nodes[a].left;

        let upper = &mut self.nodes[a];
        upper.left = Some(b);
        upper.right = r;
        let lower = &mut self.nodes[b];
        lower.left = p;
        lower.right = q;

        self.swap_keys(a, b);
        b
    }

    /// Raises the right child of `a`'s left child into `a`'s slot
    fn rotate_left_right(&mut self, a: NodeKey) {
        let Some(b) = self.nodes[a].left else {
            unreachable!("left-right rotation requires a left child");
        };
        self.rotate_left(b);
        self.rotate_right(a);
    }

    /// Raises the left child of `a`'s right child into `a`'s slot
    fn rotate_right_left(&mut self, a: NodeKey) {
        let Some(b) = self.nodes[a].right else {
            unreachable!("right-left rotation requires a right child");
        };
        self.rotate_right(b);
        self.rotate_left(a);
    }

    fn swap_keys(&mut self, a: NodeKey, b: NodeKey) {
        if let Some([x, y]) = self.nodes.get_disjoint_mut([a, b]) {
            mem::swap(&mut x.key, &mut y.key);
        }
    }

    /// Assigns balance factors after a double rotation rooted at `a`
    ///
    /// `pivot_balance` is the factor the raised grandchild had just before the
    /// rotation. Its left subtree ends up under the new left child and its right
    /// subtree under the new right child, so whichever side was short leaves the
    /// corresponding child one level lopsided. The same table serves both
    /// directions and both insertion and removal.
    fn settle_double_rotation(&mut self, a: NodeKey, pivot_balance: i8) {
        let (left, right) = (self.nodes[a].left, self.nodes[a].right);
        self.nodes[a].balance = 0;
        if let Some(l) = left {
            self.nodes[l].balance = if pivot_balance == -1 { 1 } else { 0 };
        }
        if let Some(r) = right {
            self.nodes[r].balance = if pivot_balance == 1 { -1 } else { 0 };
        }
    }

    // ========================================================================
    // Removal rebalancing
    // ========================================================================

    /// Walks the recorded ancestors bottom-up after a node was spliced out
    ///
    /// `shrank_left` tells which side of the last ancestor lost a level. Above
    /// that, the side is read off the child slot the previous ancestor occupies;
    /// rotations keep slots in place, so that link is still valid.
    fn rebalance_after_remove(&mut self, mut path: Path, mut shrank_left: bool) {
        let mut child = None;
        while let Some(a) = path.pop() {
            if let Some(c) = child {
                shrank_left = self.nodes[a].left == Some(c);
            }

            let balance = {
                let node = &mut self.nodes[a];
                node.balance += if shrank_left { -1 } else { 1 };
                node.balance
            };

            let height_decreased = match balance {
                0 => true,
                2 => self.rebalance_left_heavy(a),
                -2 => self.rebalance_right_heavy(a),
                _ => false,
            };
            if !height_decreased {
                break;
            }
            child = Some(a);
        }
    }

    /// Repairs a node at +2 after its right subtree shrank
    ///
    /// Returns true if the subtree is now one level shorter than before the
    /// removal, meaning the ascent has to continue.
    fn rebalance_left_heavy(&mut self, a: NodeKey) -> bool {
        let Some(b) = self.nodes[a].left else {
            unreachable!("left-heavy node without a left child");
        };
        match self.nodes[b].balance {
            0 => {
                let demoted = self.rotate_right(a);
                self.nodes[a].balance = -1;
                self.nodes[demoted].balance = 1;
                trace!(rotation = "right", height_decreased = false, "remove rebalance");
                false
            }
            1 => {
                let demoted = self.rotate_right(a);
                self.nodes[a].balance = 0;
                self.nodes[demoted].balance = 0;
                trace!(rotation = "right", height_decreased = true, "remove rebalance");
                true
            }
            _ => {
                let pivot_balance = self.nodes[b].right.map_or(0, |c| self.nodes[c].balance);
                self.rotate_left_right(a);
                self.settle_double_rotation(a, pivot_balance);
                trace!(
                    rotation = "left_right",
                    pivot_balance,
                    height_decreased = true,
                    "remove rebalance"
                );
                true
            }
        }
    }

    /// Repairs a node at -2 after its left subtree shrank
    ///
    /// Mirror of [`rebalance_left_heavy`](Self::rebalance_left_heavy).
    fn rebalance_right_heavy(&mut self, a: NodeKey) -> bool {
        let Some(b) = self.nodes[a].right else {
            unreachable!("right-heavy node without a right child");
        };
        match self.nodes[b].balance {
            0 => {
                let demoted = self.rotate_left(a);
                self.nodes[a].balance = 1;
                self.nodes[demoted].balance = -1;
                trace!(rotation = "left", height_decreased = false, "remove rebalance");
                false
            }
            -1 => {
                let demoted = self.rotate_left(a);
                self.nodes[a].balance = 0;
                self.nodes[demoted].balance = 0;
                trace!(rotation = "left", height_decreased = true, "remove rebalance");
                true
            }
            _ => {
                let pivot_balance = self.nodes[b].left.map_or(0, |c| self.nodes[c].balance);
                self.rotate_right_left(a);
                self.settle_double_rotation(a, pivot_balance);
                trace!(
                    rotation = "right_left",
                    pivot_balance,
                    height_decreased = true,
                    "remove rebalance"
                );
                true
            }
        }
    }
}

impl<T: Ord> BalancedTree<T> {
    /// Returns true if `key` is present
    ///
    /// **Time Complexity**: O(log n)
    pub fn find(&self, key: &T) -> bool {
        let mut cur = self.root;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return true,
            };
        }
        false
    }

    /// Inserts `key`, returning false if it was already present
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. Descend as in `find`, remembering the deepest ancestor whose balance
    ///    factor is non-zero (the pivot) and the parent of the empty link reached
    /// 2. Link a new leaf with balance 0 under that parent
    /// 3. Every node below the pivot on the path was balanced, so each one simply
    ///    tilts towards the side the new key went
    /// 4. If the pivot tilts further towards its already heavier side, one single
    ///    or double rotation at the pivot restores its old height, and nothing
    ///    above it changes
    pub fn insert(&mut self, key: T) -> bool {
        let mut cur = self.root;
        let mut parent = None;
        let mut pivot = None;
        while let Some(k) = cur {
            let node = &self.nodes[k];
            if node.balance != 0 {
                pivot = Some(k);
            }
            let ord = key.cmp(&node.key);
            cur = match ord {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return false,
            };
            parent = Some((k, ord));
        }

        let leaf = self.nodes.insert(Node::leaf(key));
        match parent {
            None => self.root = Some(leaf),
            Some((p, Ordering::Less)) => self.nodes[p].left = Some(leaf),
            Some((p, _)) => self.nodes[p].right = Some(leaf),
        }

        match pivot {
            None => self.tilt_path(self.root, leaf),
            Some(a) => self.rebalance_after_insert(a, leaf),
        }
        true
    }

    /// Tilts every node from `cur` down to (excluding) `leaf` towards the leaf
    ///
    /// Only valid for nodes that were balanced before the leaf was added.
    fn tilt_path(&mut self, mut cur: Option<NodeKey>, leaf: NodeKey) {
        while let Some(k) = cur {
            let ord = self.nodes[leaf].key.cmp(&self.nodes[k].key);
            let node = &mut self.nodes[k];
            cur = match ord {
                Ordering::Less => {
                    node.balance += 1;
                    node.left
                }
                Ordering::Greater => {
                    node.balance -= 1;
                    node.right
                }
                Ordering::Equal => break,
            };
        }
    }

    fn rebalance_after_insert(&mut self, a: NodeKey, leaf: NodeKey) {
        let side = self.nodes[leaf].key.cmp(&self.nodes[a].key);
        match (self.nodes[a].balance, side) {
            (1, Ordering::Less) => {
                let Some(b) = self.nodes[a].left else {
                    unreachable!("left-heavy pivot without a left child");
                };
                if self.nodes[leaf].key < self.nodes[b].key {
                    let demoted = self.rotate_right(a);
                    self.nodes[a].balance = 0;
                    self.nodes[demoted].balance = 0;
                    self.tilt_path(self.nodes[a].left, leaf);
                    trace!(rotation = "right", "insert rebalance");
                } else {
                    let c = self.nodes[b].right;
                    self.tilt_path(c, leaf);
                    let pivot_balance = c.map_or(0, |c| self.nodes[c].balance);
                    self.rotate_left_right(a);
                    self.settle_double_rotation(a, pivot_balance);
                    trace!(rotation = "left_right", pivot_balance, "insert rebalance");
                }
            }
            (-1, Ordering::Greater) => {
                let Some(b) = self.nodes[a].right else {
                    unreachable!("right-heavy pivot without a right child");
                };
                if self.nodes[leaf].key > self.nodes[b].key {
                    let demoted = self.rotate_left(a);
                    self.nodes[a].balance = 0;
                    self.nodes[demoted].balance = 0;
                    self.tilt_path(self.nodes[a].right, leaf);
                    trace!(rotation = "left", "insert rebalance");
                } else {
                    let c = self.nodes[b].left;
                    self.tilt_path(c, leaf);
                    let pivot_balance = c.map_or(0, |c| self.nodes[c].balance);
                    self.rotate_right_left(a);
                    self.settle_double_rotation(a, pivot_balance);
                    trace!(rotation = "right_left", pivot_balance, "insert rebalance");
                }
            }
            // The key landed on the pivot's lighter side: it evens out
            _ => self.tilt_path(Some(a), leaf),
        }
    }

    /// Removes `key`, returning false if it was absent
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. Descend from the root, pushing each ancestor onto a stack
    /// 2. If the matched node has two children, continue down to its in-order
    ///    predecessor (pushing that path too); the predecessor is unlinked instead
    ///    and its key moves into the matched node
    /// 3. Splice the unlinked node out by handing its only child (if any) to its
    ///    parent
    /// 4. Pop ancestors, adjusting each balance factor for the side that shrank,
    ///    until one absorbs the change or the root is reached; rotations may fire
    ///    at any number of levels on the way
    pub fn remove(&mut self, key: &T) -> bool {
        let mut path = Path::new();
        let mut cur = self.root;
        let target = loop {
            let Some(k) = cur else {
                return false;
            };
            let node = &self.nodes[k];
            cur = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => break k,
            };
            path.push(k);
        };

        let mut victim = target;
        if let (Some(left), Some(_)) = (self.nodes[target].left, self.nodes[target].right) {
            path.push(target);
            victim = left;
            while let Some(right) = self.nodes[victim].right {
                path.push(victim);
                victim = right;
            }
        }

        let orphan = self.nodes[victim].left.or(self.nodes[victim].right);
        let mut shrank_left = false;
        match path.last() {
            None => self.root = orphan,
            Some(&p) => {
                let parent = &mut self.nodes[p];
                if parent.left == Some(victim) {
                    parent.left = orphan;
                    shrank_left = true;
                } else {
                    parent.right = orphan;
                }
            }
        }

        if let Some(removed) = self.nodes.remove(victim) {
            if victim != target {
                self.nodes[target].key = removed.key;
            }
        }

        self.rebalance_after_remove(path, shrank_left);
        true
    }
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> OrderedSet<T> for BalancedTree<T> {
    fn new() -> Self {
        BalancedTree::new()
    }

    fn is_empty(&self) -> bool {
        BalancedTree::is_empty(self)
    }

    fn len(&self) -> usize {
        BalancedTree::len(self)
    }

    fn find(&self, key: &T) -> bool {
        BalancedTree::find(self, key)
    }

    fn insert(&mut self, key: T) -> bool {
        BalancedTree::insert(self, key)
    }

    fn remove(&mut self, key: &T) -> bool {
        BalancedTree::remove(self, key)
    }

    fn clear(&mut self) {
        BalancedTree::clear(self)
    }
}
