//! Height-balanced binary search tree over a multiset of ordered keys.
//!
//! Every node keeps its subtree height; after each insert or delete the
//! path back to the root is repaired with single or double rotations so
//! that sibling heights never differ by more than one.
//!
//! ```
//! use avl_tree::{AvlTree, DeleteStatus};
//!
//! let mut tree = AvlTree::new();
//! tree.insert(4);
//! tree.insert(2);
//! tree.insert(3);
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.delete(&3), DeleteStatus::Deleted);
//! assert_eq!(tree.delete(&3), DeleteStatus::NotFound);
//! ```

mod observer;
mod render;
mod tree;

#[cfg(feature = "tracing")]
pub use observer::TraceLog;
pub use observer::{NoTrace, Observer, Rotation, TreeEvent};
pub use tree::{AvlTree, DeleteStatus, Iter};
