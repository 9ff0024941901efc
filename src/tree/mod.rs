//! Ordered map over a periodically rebuilt binary search tree.
//!
//! This module provides:
//!
//! - [`OrderedCollection`]: the operation set of an ordered map with unique keys
//! - [`RebalancingTreeMap`]: a binary search tree that inserts without
//!   rotations and rebuilds itself into a balanced shape every
//!   [`RebalancePolicy::threshold`] insertions
//! - [`TreeMapError`]: the duplicate-key and empty-collection failures
//!
//! # Rebuilding Instead of Rotating
//!
//! Insertions descend by key comparison and attach a leaf at the first
//! empty slot. Sorted input therefore produces a list-shaped tree. Once
//! enough insertions have accumulated, the map moves every entry out in
//! key order and reassembles them with the median of each range as the
//! subtree root. The amortized cost is O(1) extra work per insertion and
//! the height right after a rebuild is ⌊log₂ n⌋ + 1.
//!
//! # Examples
//!
//! ```rust
//! use periodic_bst::tree::{RebalancingTreeMap, TreeMapError};
//!
//! let mut map = RebalancingTreeMap::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     map.add(key, key * 100).unwrap();
//! }
//!
//! assert_eq!(map.add(4, 0), Err(TreeMapError::DuplicateKey(4)));
//! assert_eq!(map.values_in_range(&3, &8), vec![&300, &400, &500, &700]);
//!
//! let keys: Vec<&i32> = map.keys().collect();
//! assert_eq!(keys, vec![&1, &3, &4, &5, &7, &8, &9]);
//! ```

mod collection;
mod contract;
mod error;
mod node;
mod policy;

pub use collection::RebalancingTreeMap;
pub use collection::RebalancingTreeMapIterator;
pub use contract::OrderedCollection;
pub use error::TreeMapError;
pub use policy::RebalancePolicy;
