//! Arena-based AVL tree map and set.
//!
//! All nodes live in a caller-owned `Vec` arena and every "pointer" is an
//! `Option<u32>` index into it, so entries keep a stable index for their
//! whole lifetime and the tree needs no per-node allocation.
//!
//! Rebalancing is driven by per-node balance factors
//! (`height(right) - height(left)`, one byte each); the insert and remove
//! fixups walk iteratively toward the root and perform at most one single
//! or double rotation per insertion.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`](types::Node) and [`KvNode`](types::KvNode) traits |
//! [`util`] | Traversal, keyed search, and the position-`swap` primitive |
//! [`avl`] | The AVL engine plus [`AvlMap`] and [`AvlSet`] |
//! [`equal_depth`] | Equal-leaf-depth check for arbitrary binary trees |
//! [`error`] | [`KeyError`] |

pub mod avl;
pub mod equal_depth;
pub mod error;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlNode, AvlSet};
pub use equal_depth::{equal_depths, BinaryNode};
pub use error::KeyError;
pub use types::{Comparator, KvNode, Node};
