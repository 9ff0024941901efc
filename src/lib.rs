//! # periodic-bst
//!
//! An in-memory ordered map over a binary search tree that keeps its
//! height logarithmic by rebuilding itself every fixed number of
//! insertions instead of rotating on each one.
//!
//! ## Overview
//!
//! - **Point lookup**: `contains_key`, `get`
//! - **Ordered traversal**: `for_each`, `iter`, `keys`, `values`
//! - **Range queries**: half-open `[min, max)` value selection
//! - **Extremes**: `min_key`, `max_key`
//! - **Rebalancing**: automatic every [`tree::RebalancePolicy`] threshold
//!   insertions, or on demand
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the map and its policy
//!
//! ## Logging
//!
//! Rebuilds are reported through the [`log`] facade at `debug` level;
//! install any logger to see them.
//!
//! ## Example
//!
//! ```rust
//! use periodic_bst::prelude::*;
//!
//! let mut map = RebalancingTreeMap::new();
//! map.add(2, "two").unwrap();
//! map.add(1, "one").unwrap();
//!
//! assert_eq!(map.min_key(), Ok(&1));
//! assert_eq!(map.values_in_range(&1, &2), vec![&"one"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use periodic_bst::prelude::*;
/// ```
pub mod prelude {
    pub use crate::tree::*;
}

pub mod tree;
