//! Binary search tree node and the structural algorithms over it.
//!
//! A [`Node`] exclusively owns its two optional children; there are no
//! parent links. Insertion never rotates, so between rebuilds a subtree
//! can degrade into a list. Every walk whose length depends on the tree
//! height is therefore written as a loop or with an explicit stack. The
//! only recursive routine is [`Node::from_sorted_pairs`], whose depth is
//! bounded by the height of the balanced tree it produces.

use std::cmp::Ordering;

use super::TreeMapError;

// =============================================================================
// Node Definition
// =============================================================================

/// One key/value pair and its two owned subtrees.
///
/// Every key in `left` is strictly less than `key` and every key in
/// `right` is strictly greater.
pub(crate) struct Node<K, V> {
    key: K,
    value: V,
    left: Option<Box<Self>>,
    right: Option<Box<Self>>,
}

impl<K, V> Node<K, V> {
    /// Creates a leaf.
    pub(crate) const fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Builds a balanced subtree from pairs sorted by strictly ascending key.
    ///
    /// The pair at index `n / 2` becomes the root; the `n / 2` pairs before
    /// it form the left subtree and the rest form the right subtree, all the
    /// way down. Pairs are consumed in order, so no intermediate buffers are
    /// allocated. Ordering is the caller's obligation and is only checked by
    /// a debug assertion; unsorted input yields a tree whose lookups are
    /// meaningless. Returns `None` for an empty input.
    pub(crate) fn from_sorted_pairs<I>(pairs: I) -> Option<Box<Self>>
    where
        I: IntoIterator<Item = (K, V)>,
        I::IntoIter: ExactSizeIterator,
        K: Ord,
    {
        let mut pairs = pairs.into_iter();
        let length = pairs.len();
        let root = Self::build_balanced(&mut pairs, length);
        debug_assert!(
            root.as_deref().is_none_or(Self::is_strictly_ordered),
            "pairs passed to from_sorted_pairs must be sorted by strictly ascending key"
        );
        root
    }

    fn build_balanced<I>(pairs: &mut I, length: usize) -> Option<Box<Self>>
    where
        I: Iterator<Item = (K, V)>,
    {
        if length == 0 {
            return None;
        }
        let left_length = length / 2;
        let left = Self::build_balanced(pairs, left_length);
        let (key, value) = pairs.next()?;
        let right = Self::build_balanced(pairs, length - left_length - 1);
        Some(Box::new(Self {
            key,
            value,
            left,
            right,
        }))
    }

    /// Inserts a new pair below this node.
    ///
    /// # Errors
    ///
    /// Returns [`TreeMapError::DuplicateKey`] if `key` is already present
    /// anywhere in the subtree; nothing is modified in that case.
    pub(crate) fn add(&mut self, key: K, value: V) -> Result<(), TreeMapError<K>>
    where
        K: Ord,
    {
        let mut slot = match key.cmp(&self.key) {
            Ordering::Less => &mut self.left,
            Ordering::Greater => &mut self.right,
            Ordering::Equal => return Err(TreeMapError::DuplicateKey(key)),
        };
        while let Some(node) = slot {
            slot = match key.cmp(&node.key) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return Err(TreeMapError::DuplicateKey(key)),
            };
        }
        *slot = Some(Box::new(Self::new(key, value)));
        Ok(())
    }

    /// Returns `true` if `key` is present in the subtree.
    pub(crate) fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.get(key).is_some()
    }

    /// Returns the value stored under `key`, if any.
    pub(crate) fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut current = self;
        loop {
            let next = match key.cmp(&current.key) {
                Ordering::Equal => return Some(&current.value),
                Ordering::Less => current.left.as_deref(),
                Ordering::Greater => current.right.as_deref(),
            };
            current = next?;
        }
    }

    /// Appends the values whose keys lie in `[min, max)` in ascending key order.
    ///
    /// The left subtree is only entered while `min < key` and the right
    /// subtree only while `max > key`.
    pub(crate) fn values_in_range<'a>(&'a self, min: &K, max: &K, accumulator: &mut Vec<&'a V>)
    where
        K: Ord,
    {
        let mut stack: Vec<&'a Self> = Vec::new();
        let mut current = Some(self);
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = if *min < node.key {
                    node.left.as_deref()
                } else {
                    None
                };
            }
            let Some(node) = stack.pop() else {
                break;
            };
            if *min <= node.key && node.key < *max {
                accumulator.push(&node.value);
            }
            current = if *max > node.key {
                node.right.as_deref()
            } else {
                None
            };
        }
    }

    /// Returns the smallest key in the subtree.
    pub(crate) fn min_key(&self) -> &K {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        &current.key
    }

    /// Returns the largest key in the subtree.
    pub(crate) fn max_key(&self) -> &K {
        let mut current = self;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        &current.key
    }

    /// Calls `visitor` with every pair in ascending key order.
    pub(crate) fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in InOrder::new(Some(self)) {
            visitor(key, value);
        }
    }

    /// Returns the number of nodes in the subtree.
    pub(crate) fn count(&self) -> usize {
        InOrder::new(Some(self)).count()
    }

    /// Returns the number of nodes on the longest path from this node to a leaf.
    pub(crate) fn height(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.left.as_deref().map(|left| (left, depth + 1)));
            pending.extend(node.right.as_deref().map(|right| (right, depth + 1)));
        }
        deepest
    }

    /// Moves every pair into `accumulator` in ascending key order, consuming the subtree.
    pub(crate) fn into_sorted_pairs(self: Box<Self>, accumulator: &mut Vec<(K, V)>) {
        let mut stack: Vec<Box<Self>> = Vec::new();
        let mut current = Some(self);
        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Self {
                key, value, right, ..
            } = *node;
            accumulator.push((key, value));
            current = right;
        }
    }

    /// Frees the subtree without recursing once per level.
    pub(crate) fn dismantle(self: Box<Self>) {
        let mut pending = vec![self];
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }

    /// Returns `true` if an in-order walk yields strictly ascending keys.
    pub(crate) fn is_strictly_ordered(&self) -> bool
    where
        K: Ord,
    {
        let mut keys = InOrder::new(Some(self)).map(|(key, _)| key);
        let Some(mut previous) = keys.next() else {
            return true;
        };
        for key in keys {
            if previous >= key {
                return false;
            }
            previous = key;
        }
        true
    }
}

// =============================================================================
// In-order Traversal
// =============================================================================

/// Explicit-stack in-order walk over borrowed nodes.
///
/// The stack holds the path of nodes whose left subtree has been
/// entered but whose own pair has not been yielded yet.
pub(crate) struct InOrder<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> InOrder<'a, K, V> {
    pub(crate) fn new(root: Option<&'a Node<K, V>>) -> Self {
        let mut walk = Self { stack: Vec::new() };
        walk.push_left_spine(root);
        walk
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for InOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}

// =============================================================================
// Tests
// =============================================================================
