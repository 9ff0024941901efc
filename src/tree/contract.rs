//! The operation set shared by ordered collections in this crate.

use super::TreeMapError;

/// An ordered key/value collection with unique keys.
///
/// Keys need a total order; values are opaque. Entries can be added but
/// never removed, and every traversal visits keys in ascending order.
///
/// # Examples
///
/// ```rust
/// use periodic_bst::tree::{OrderedCollection, RebalancingTreeMap};
///
/// fn spread<C: OrderedCollection<i64, &'static str>>(collection: &C) -> Option<i64> {
///     Some(collection.max_key().ok()? - collection.min_key().ok()?)
/// }
///
/// let mut map: RebalancingTreeMap<i64, &str> = RebalancingTreeMap::new();
/// map.add(-4, "low").unwrap();
/// map.add(10, "high").unwrap();
/// assert_eq!(spread(&map), Some(14));
/// ```
pub trait OrderedCollection<K: Ord, V> {
    /// Returns `true` if `key` is present.
    fn contains_key(&self, key: &K) -> bool;

    /// Returns the value stored under `key`, if present.
    fn get(&self, key: &K) -> Option<&V>;

    /// Inserts a new entry.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::DuplicateKey`] if `key` is already present;
    /// the collection is left unchanged.
    fn add(&mut self, key: K, value: V) -> Result<(), TreeMapError<K>>;

    /// Returns the values whose keys lie in the half-open interval
    /// `[min, max)`, where `min` and `max` are the lesser and greater of
    /// the two bounds. Values come in ascending key order.
    fn values_in_range(&self, first: &K, second: &K) -> Vec<&V> {
        let mut values = Vec::new();
        self.values_in_range_into(first, second, &mut values);
        values
    }

    /// Appends the values selected by [`values_in_range`](Self::values_in_range)
    /// to `sink`.
    fn values_in_range_into<'a>(&'a self, first: &K, second: &K, sink: &mut Vec<&'a V>);

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::EmptyCollection`] if there are no entries.
    fn min_key(&self) -> Result<&K, TreeMapError<K>>;

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::EmptyCollection`] if there are no entries.
    fn max_key(&self) -> Result<&K, TreeMapError<K>>;

    /// Calls `visitor` with every entry in ascending key order.
    fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V);

    /// Restores a logarithmic height without changing the contents.
    fn rebalance(&mut self);
}
