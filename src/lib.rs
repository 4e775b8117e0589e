//! `rb_key_tree` is an ordered key store based on red-black tree.
//!
//! It supports point insert, remove and lookup of unique keys, each in
//! O(logN) time, and exposes read-only views of the tree nodes so callers can
//! inspect the shape of the tree.
//!
//! Nodes are kept in an arena and refer to each other by array index instead
//! of pointers. The parent relation is a plain back index, so the tree owns
//! every node exactly once, has no reference cycles, and is `Send`. Every
//! absent child refers to a shared nil sentinel that is always black.
//!
//! # Example
//!
//! ```rust
//! use rb_key_tree::{Color, RbTree};
//!
//! let mut tree = RbTree::new();
//! for key in [5, 14, 7, 8, 2, 12] {
//!     let (inserted, _node) = tree.insert(key);
//!     assert!(inserted);
//! }
//! assert!(tree.find(&8).is_some());
//! assert!(tree.remove(&14));
//! assert!(tree.find(&14).is_none());
//! assert_eq!(tree.root().map(|root| root.color()), Some(Color::Black));
//! assert!(tree.validate().is_ok());
//! ```
//!

#[cfg(feature = "graphviz")]
mod graphviz;
mod index;
mod iter;
mod node;
mod node_ref;
mod rbtree;
mod validate;


pub use index::{DefaultIx, IndexType, NodeIndex};
pub use iter::{IntoIter, Iter};
pub use node::{Color, Side};
pub use node_ref::NodeRef;
pub use rbtree::RbTree;
pub use validate::Violation;
