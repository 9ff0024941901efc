//! Ordered map over an unbalanced binary search tree with periodic rebuilds.
//!
//! This module provides [`RebalancingTreeMap`], a mutable ordered map
//! whose insertions are plain binary-search-tree insertions. Instead of
//! rotating on every insert, the map counts successful insertions and,
//! once the count reaches the threshold of its [`RebalancePolicy`],
//! linearizes the whole tree and rebuilds it around medians.
//!
//! - O(h) `add`, `contains_key`, `get`, `min_key`, `max_key`
//! - O(h + k) range queries where k is the number of results
//! - O(n) `rebalance`, at most once per `threshold` insertions
//! - O(1) `len` and `is_empty`
//!
//! where h is the current height: ⌊log₂ n⌋ + 1 right after a rebuild,
//! up to n for adversarial insertion orders between rebuilds.
//!
//! # Examples
//!
//! ```rust
//! use periodic_bst::tree::RebalancingTreeMap;
//!
//! let mut map = RebalancingTreeMap::new();
//! for (key, value) in [(5, "five"), (3, "three"), (8, "eight"), (1, "one")] {
//!     map.add(key, value).unwrap();
//! }
//!
//! assert_eq!(map.get(&3), Some(&"three"));
//! assert_eq!(map.min_key(), Ok(&1));
//! assert_eq!(map.max_key(), Ok(&8));
//!
//! // Half-open: 8 itself is excluded, argument order does not matter
//! assert_eq!(map.values_in_range(&8, &3), vec![&"three", &"five"]);
//! ```

use std::fmt;

use super::node::{InOrder, Node};
use super::{OrderedCollection, RebalancePolicy, TreeMapError};

// =============================================================================
// RebalancingTreeMap Definition
// =============================================================================

/// A mutable ordered map that restores logarithmic height by full rebuilds.
///
/// Keys are unique; adding a key that is already present fails with
/// [`TreeMapError::DuplicateKey`] and leaves the map untouched. Entries
/// cannot be removed.
///
/// # Time Complexity
///
/// | Operation          | Complexity  |
/// |--------------------|-------------|
/// | `new`              | O(1)        |
/// | `add`              | O(h)        |
/// | `get`              | O(h)        |
/// | `contains_key`     | O(h)        |
/// | `min_key`/`max_key`| O(h)        |
/// | `values_in_range`  | O(h + k)    |
/// | `for_each`/`iter`  | O(n)        |
/// | `rebalance`        | O(n)        |
/// | `len`/`is_empty`   | O(1)        |
///
/// # Examples
///
/// ```rust
/// use periodic_bst::tree::{RebalancePolicy, RebalancingTreeMap};
/// use std::num::NonZeroUsize;
///
/// let policy = RebalancePolicy::new(NonZeroUsize::new(100).unwrap());
/// let mut map = RebalancingTreeMap::with_policy(policy);
///
/// for key in 0..100 {
///     map.add(key, key * 2).unwrap();
/// }
///
/// // The 100th insertion triggered a rebuild
/// assert_eq!(map.height(), 7);
/// assert_eq!(map.insertions_since_rebalance(), 0);
/// ```
pub struct RebalancingTreeMap<K, V> {
    root: Option<Box<Node<K, V>>>,
    length: usize,
    insertions_since_rebalance: usize,
    policy: RebalancePolicy,
}

impl<K, V> RebalancingTreeMap<K, V> {
    /// Creates an empty map with the default policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use periodic_bst::tree::RebalancingTreeMap;
    ///
    /// let map: RebalancingTreeMap<u64, String> = RebalancingTreeMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.policy().threshold().get(), 5000);
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy(RebalancePolicy::new(RebalancePolicy::DEFAULT_THRESHOLD))
    }

    /// Creates an empty map that rebuilds according to `policy`.
    #[inline]
    #[must_use]
    pub const fn with_policy(policy: RebalancePolicy) -> Self {
        Self {
            root: None,
            length: 0,
            insertions_since_rebalance: 0,
            policy,
        }
    }

    /// Returns the number of entries in the map.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the policy this map was created with.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> RebalancePolicy {
        self.policy
    }

    /// Returns how many successful insertions happened since the last
    /// automatic rebuild.
    #[inline]
    #[must_use]
    pub const fn insertions_since_rebalance(&self) -> usize {
        self.insertions_since_rebalance
    }

    /// Returns the number of nodes on the longest root-to-leaf path, or 0
    /// for an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use periodic_bst::tree::RebalancingTreeMap;
    ///
    /// let mut map = RebalancingTreeMap::new();
    /// for key in 0..64 {
    ///     map.add(key, ()).unwrap();
    /// }
    /// assert_eq!(map.height(), 64);
    ///
    /// map.rebalance();
    /// assert_eq!(map.height(), 7);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::height)
    }

    /// Returns the smallest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::EmptyCollection`] if the map is empty.
    pub fn min_key(&self) -> Result<&K, TreeMapError<K>> {
        self.root
            .as_deref()
            .map(Node::min_key)
            .ok_or(TreeMapError::EmptyCollection)
    }

    /// Returns the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::EmptyCollection`] if the map is empty.
    pub fn max_key(&self) -> Result<&K, TreeMapError<K>> {
        self.root
            .as_deref()
            .map(Node::max_key)
            .ok_or(TreeMapError::EmptyCollection)
    }

    /// Calls `visitor` with every entry in ascending key order.
    ///
    /// Does nothing on an empty map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use periodic_bst::tree::RebalancingTreeMap;
    ///
    /// let mut map = RebalancingTreeMap::new();
    /// map.add(2, 20).unwrap();
    /// map.add(1, 10).unwrap();
    ///
    /// let mut seen = Vec::new();
    /// map.for_each(|key, value| seen.push((*key, *value)));
    /// assert_eq!(seen, vec![(1, 10), (2, 20)]);
    /// ```
    pub fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(root) = self.root.as_deref() {
            root.for_each(visitor);
        }
    }

    /// Returns an iterator over entries in ascending key order.
    ///
    /// The iterator keeps its own stack, so it never recurses regardless
    /// of how skewed the tree currently is.
    #[must_use]
    pub fn iter(&self) -> RebalancingTreeMapIterator<'_, K, V> {
        RebalancingTreeMapIterator {
            walk: InOrder::new(self.root.as_deref()),
            remaining: self.length,
        }
    }

    /// Returns an iterator over keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over values in ascending key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }
}

impl<K: Ord, V> RebalancingTreeMap<K, V> {
    /// Builds a map by adding every entry in iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::DuplicateKey`] for the first key that
    /// appears twice.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use periodic_bst::tree::{RebalancingTreeMap, TreeMapError};
    ///
    /// let map = RebalancingTreeMap::try_from_entries([(2, 'b'), (1, 'a')]).unwrap();
    /// assert_eq!(map.len(), 2);
    ///
    /// let duplicate = RebalancingTreeMap::try_from_entries([(1, 'a'), (1, 'b')]);
    /// assert_eq!(duplicate.err(), Some(TreeMapError::DuplicateKey(1)));
    /// ```
    pub fn try_from_entries<I>(entries: I) -> Result<Self, TreeMapError<K>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new();
        for (key, value) in entries {
            map.add(key, value)?;
        }
        Ok(map)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.root
            .as_deref()
            .is_some_and(|root| root.contains_key(key))
    }

    /// Returns the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.root.as_deref().and_then(|root| root.get(key))
    }

    /// Inserts a new entry.
    ///
    /// Every successful insertion counts towards the policy threshold;
    /// reaching it rebuilds the tree and resets the count.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::DuplicateKey`] if `key` is already present.
    /// The map and its insertion count are left unchanged.
    pub fn add(&mut self, key: K, value: V) -> Result<(), TreeMapError<K>> {
        match self.root.as_deref_mut() {
            None => self.root = Some(Box::new(Node::new(key, value))),
            Some(root) => root.add(key, value).inspect_err(|_| {
                log::trace!("rejected duplicate key (len = {})", self.length);
            })?,
        }

        self.length += 1;
        self.insertions_since_rebalance += 1;
        if self.policy.is_due(self.insertions_since_rebalance) {
            log::trace!(
                "threshold of {} insertions reached, rebalancing",
                self.policy.threshold()
            );
            self.rebalance();
            self.insertions_since_rebalance = 0;
        }
        Ok(())
    }

    /// Returns the values whose keys lie in `[min, max)`, in ascending key
    /// order, where `min`/`max` are the lesser/greater of the two bounds.
    ///
    /// Each call allocates a fresh vector.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use periodic_bst::tree::RebalancingTreeMap;
    ///
    /// let map = RebalancingTreeMap::try_from_entries((0..10).map(|key| (key, key * 10))).unwrap();
    /// assert_eq!(map.values_in_range(&2, &5), vec![&20, &30, &40]);
    /// assert_eq!(map.values_in_range(&5, &2), vec![&20, &30, &40]);
    /// assert!(map.values_in_range(&4, &4).is_empty());
    /// ```
    #[must_use]
    pub fn values_in_range(&self, first: &K, second: &K) -> Vec<&V> {
        let mut values = Vec::new();
        self.values_in_range_into(first, second, &mut values);
        values
    }

    /// Like [`values_in_range`](Self::values_in_range), but appends to a
    /// caller-supplied vector instead of allocating.
    pub fn values_in_range_into<'a>(&'a self, first: &K, second: &K, sink: &mut Vec<&'a V>) {
        let (min, max) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        if let Some(root) = self.root.as_deref() {
            root.values_in_range(min, max, sink);
        }
    }

    /// Rebuilds the tree into a balanced shape.
    ///
    /// All entries are moved out in ascending key order and reassembled
    /// around medians, giving a height of ⌊log₂ n⌋ + 1. Contents are
    /// unchanged. Does nothing on an empty map. A manual call does not
    /// reset the automatic insertion count.
    pub fn rebalance(&mut self) {
        let Some(root) = self.root.take() else {
            return;
        };

        let count = root.count();
        debug_assert_eq!(count, self.length);
        let height_before = root.height();

        let mut pairs = Vec::with_capacity(count);
        root.into_sorted_pairs(&mut pairs);
        self.root = Node::from_sorted_pairs(pairs);

        log::debug!(
            "rebalanced {count} entries: height {height_before} -> {}",
            self.height()
        );
    }
}

// =============================================================================
// Contract Implementation
// =============================================================================

impl<K: Ord, V> OrderedCollection<K, V> for RebalancingTreeMap<K, V> {
    fn contains_key(&self, key: &K) -> bool {
        Self::contains_key(self, key)
    }

    fn get(&self, key: &K) -> Option<&V> {
        Self::get(self, key)
    }

    fn add(&mut self, key: K, value: V) -> Result<(), TreeMapError<K>> {
        Self::add(self, key, value)
    }

    fn values_in_range_into<'a>(&'a self, first: &K, second: &K, sink: &mut Vec<&'a V>) {
        Self::values_in_range_into(self, first, second, sink);
    }

    fn min_key(&self) -> Result<&K, TreeMapError<K>> {
        Self::min_key(self)
    }

    fn max_key(&self) -> Result<&K, TreeMapError<K>> {
        Self::max_key(self)
    }

    fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(&K, &V),
    {
        Self::for_each(self, visitor);
    }

    fn rebalance(&mut self) {
        Self::rebalance(self);
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over entries of a [`RebalancingTreeMap`] in ascending key order.
pub struct RebalancingTreeMapIterator<'a, K, V> {
    walk: InOrder<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iterator for RebalancingTreeMapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.walk.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for RebalancingTreeMapIterator<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K, V> IntoIterator for &'a RebalancingTreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = RebalancingTreeMapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for RebalancingTreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for RebalancingTreeMap<K, V> {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            root.dismantle();
        }
    }
}

/// Two maps are equal when they hold the same entries; tree shape,
/// policy and insertion counts are ignored.
impl<K: PartialEq, V: PartialEq> PartialEq for RebalancingTreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for RebalancingTreeMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RebalancingTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display> fmt::Display for RebalancingTreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for (key, value) in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{key}: {value}")?;
        }
        write!(formatter, "}}")
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for RebalancingTreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
struct RebalancingTreeMapVisitor<K, V> {
    key_marker: std::marker::PhantomData<K>,
    value_marker: std::marker::PhantomData<V>,
}

#[cfg(feature = "serde")]
impl<K, V> RebalancingTreeMapVisitor<K, V> {
    const fn new() -> Self {
        Self {
            key_marker: std::marker::PhantomData,
            value_marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::de::Visitor<'de> for RebalancingTreeMapVisitor<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    type Value = RebalancingTreeMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with unique keys")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = RebalancingTreeMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.add(key, value)
                .map_err(|_| <A::Error as serde::de::Error>::custom("duplicate key in map"))?;
        }
        Ok(map)
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for RebalancingTreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(RebalancingTreeMapVisitor::new())
    }
}

// =============================================================================
// Tests
// =============================================================================
