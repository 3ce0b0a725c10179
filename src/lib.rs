//! This crate provides an ordered symbol table backed by a Binary Search Tree
//! (BST) mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! ## Order statistics
//!
//! If every `Node` also remembers how many `Node`s are in its subtree (itself
//! included) the tree can find the `i`th smallest key or count the keys below
//! a given key by walking a single path from the root. The price is keeping
//! that count correct on every `Node` along the path of each insert and
//! delete.
//!
//! [`hibbard::Tree`] is such a tree. It doesn't rebalance itself so its
//! operations take `O(height)` which is `O(lg N)` for random insertions and
//! `O(N)` for sorted ones.
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`hibbard::Tree`] as a map.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod hibbard;
pub mod queue;
pub mod symbol_table;

#[cfg(feature = "serde")]
mod serialization;

pub use error::{Error, Result};
