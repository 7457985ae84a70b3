//! An AVL tree is a way of storing unique elements in such a way that
//! elements can be efficiently accessed, inserted and removed, all in
//! `O(log(n))` in the worst case.
//!
//! Conceptually, an AVL tree resembles something like:
//!
//! ```text
//!              [25]
//!             /    \
//!         [12]      [50]
//!        /    \    /    \
//!     [10]  [15] [37]  [75]
//! ```
//!
//! where every node is greater than everything in its left subtree and less
//! than everything in its right subtree, and the heights of the two subtrees
//! below any node differ by at most one.  Whenever an insertion or removal
//! breaks that bound, the tree restores it with local rotations on the way
//! back up, so no search path can degenerate into a list.
//!
//! Besides the usual ordered-collection operations, the tree can report the
//! depth at which a value is stored and walk the unique node-to-node path
//! connecting two stored values.
//!
//! # Examples
//!
//! ```
//! use avltree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for value in [50, 25, 75, 12, 37] {
//!     tree.insert(value)?;
//! }
//!
//! assert_eq!(tree.len(), 5);
//! assert_eq!(tree.height(), 2);
//! assert!(tree.contains(&37)?);
//! assert_eq!(tree.path_between(&12, &37)?, [&12, &25, &37]);
//! # Ok::<(), avltree::TreeError>(())
//! ```

mod avlnode;
pub mod avltree;

pub use crate::avltree::{AvlTree, IntoIter, Iter, TreeError};
