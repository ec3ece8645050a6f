//! `rb-order-tree` is a red-black tree ordered by a caller-supplied
//! comparator.
//!
//! It implements the insertion path of a red-black tree, so every
//! modification runs in O(logN) and the tree's height stays within
//! `2 * log2(len + 1)` even for sorted input.
//!
//! To handle the upward parent references of the rebalancing loop safely,
//! `rb-order-tree` stores nodes in an array and simulates pointers with
//! typed indices. The arena owns every node, teardown is a flat drop with
//! no recursion, and the tree is `Send` and `Unpin` whenever its contents
//! are.
//!
//! Equal values are kept as distinct nodes, so the tree can serve as a
//! multiset; read-only diagnostics (`black_height`, `has_red_violation`,
//! `height`) let an external suite certify the red-black invariants after
//! any insertion sequence.
//!
//! # Example
//!
//! ```rust
//! use rb_order_tree::OrderTree;
//!
//! let mut tree = OrderTree::natural();
//! tree.insert(2);
//! tree.insert(1);
//! tree.insert(3);
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.max(), Some(&3));
//! assert_eq!(tree.get(&2), Some(&2));
//! ```
//!

mod index;
mod node;
mod ordertree;
mod value;

#[cfg(feature = "graphviz")]
mod graphviz;

#[cfg(test)]
mod tests;

pub use index::{DefaultIx, IndexType, NodeIndex};
pub use ordertree::OrderTree;
pub use value::Value;
