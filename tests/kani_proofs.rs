//! Kani verification proofs for tree operations
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds. Each harness below
//! drives the tree with symbolic keys and asserts an invariant for every
//! possible ordering of those keys.
//!
//! To run these proofs:
//!   cargo kani

#[cfg(kani)]
use rust_balanced_tree::BalancedTree;

/// Proof that an inserted key is always found
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_insert_then_find() {
    let mut tree: BalancedTree<u8> = BalancedTree::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();

    tree.insert(a);
    tree.insert(b);
    tree.insert(c);

    assert!(tree.find(&a));
    assert!(tree.find(&b));
    assert!(tree.find(&c));
}

/// Proof that inserting a present key changes neither length nor result
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_duplicate_insert_is_noop() {
    let mut tree: BalancedTree<u8> = BalancedTree::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();

    tree.insert(a);
    tree.insert(b);
    let len = tree.len();

    assert!(!tree.insert(a));
    assert!(tree.len() == len);
}

/// Proof that every three-key insertion order yields a valid tree of height 2
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_three_inserts_balance() {
    let mut tree: BalancedTree<u8> = BalancedTree::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();
    kani::assume(a != b && b != c && a != c);

    tree.insert(a);
    tree.insert(b);
    tree.insert(c);

    assert!(tree.len() == 3);
    assert!(tree.height() == 2);
    assert!(tree.validate().is_ok());
}

/// Proof that removal of any key from a small tree keeps it valid
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(8)]
fn verify_remove_keeps_invariants() {
    let mut tree: BalancedTree<u8> = BalancedTree::new();
    for key in [40u8, 20, 60, 10, 30] {
        tree.insert(key);
    }

    let victim: u8 = kani::any();
    let was_present = tree.find(&victim);

    assert!(tree.remove(&victim) == was_present);
    assert!(!tree.find(&victim));
    assert!(tree.validate().is_ok());
}

/// Proof that removing an absent key leaves the length unchanged
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(6)]
fn verify_remove_absent_is_noop() {
    let mut tree: BalancedTree<u8> = BalancedTree::new();
    tree.insert(1);
    tree.insert(2);

    let key: u8 = kani::any();
    kani::assume(key != 1 && key != 2);

    assert!(!tree.remove(&key));
    assert!(tree.len() == 2);
}
