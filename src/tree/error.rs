//! Error types for the rebalancing tree map.
//!
//! Only two things can go wrong: inserting a key that is already
//! present, and asking an empty collection for its smallest or largest
//! key. Both are reported to the immediate caller; nothing is retried.

use std::fmt;

/// Represents the failures of [`OrderedCollection`](super::OrderedCollection)
/// operations.
///
/// # Examples
///
/// ```rust
/// use periodic_bst::tree::{OrderedCollection, RebalancingTreeMap, TreeMapError};
///
/// let mut map = RebalancingTreeMap::new();
/// map.add(1, "one").unwrap();
///
/// assert_eq!(map.add(1, "uno"), Err(TreeMapError::DuplicateKey(1)));
/// assert_eq!(
///     format!("{}", TreeMapError::DuplicateKey(1)),
///     "key 1 already exists"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeMapError<K> {
    /// The key was already present; the collection was left unchanged.
    DuplicateKey(K),
    /// The collection holds no entries.
    EmptyCollection,
}

impl<K> TreeMapError<K> {
    /// Returns the rejected key for [`TreeMapError::DuplicateKey`].
    #[must_use]
    pub const fn duplicate_key(&self) -> Option<&K> {
        match self {
            Self::DuplicateKey(key) => Some(key),
            Self::EmptyCollection => None,
        }
    }
}

impl<K: fmt::Display> fmt::Display for TreeMapError<K> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey(key) => write!(formatter, "key {key} already exists"),
            Self::EmptyCollection => write!(formatter, "collection is empty"),
        }
    }
}

impl<K: fmt::Debug + fmt::Display> std::error::Error for TreeMapError<K> {}
