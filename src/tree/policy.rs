//! Rebalance configuration.

use std::num::NonZeroUsize;

/// Controls how often a [`RebalancingTreeMap`](super::RebalancingTreeMap)
/// rebuilds itself.
///
/// After every `threshold` successful insertions the whole tree is
/// linearized and rebuilt around medians. Duplicate-key failures do not
/// count towards the threshold.
///
/// # Examples
///
/// ```rust
/// use periodic_bst::tree::RebalancePolicy;
/// use std::num::NonZeroUsize;
///
/// assert_eq!(RebalancePolicy::default().threshold().get(), 5000);
///
/// let policy = RebalancePolicy::new(NonZeroUsize::new(64).unwrap());
/// assert_eq!(policy.threshold().get(), 64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalancePolicy {
    threshold: NonZeroUsize,
}

impl RebalancePolicy {
    /// Number of insertions between automatic rebuilds when nothing else is configured.
    pub const DEFAULT_THRESHOLD: NonZeroUsize = match NonZeroUsize::new(5000) {
        Some(threshold) => threshold,
        None => unreachable!(),
    };

    /// Creates a policy that rebuilds after every `threshold` insertions.
    #[inline]
    #[must_use]
    pub const fn new(threshold: NonZeroUsize) -> Self {
        Self { threshold }
    }

    /// Returns the number of insertions between automatic rebuilds.
    #[inline]
    #[must_use]
    pub const fn threshold(&self) -> NonZeroUsize {
        self.threshold
    }

    /// Returns `true` once `insertions` successful insertions call for a rebuild.
    #[inline]
    pub(crate) const fn is_due(&self, insertions: usize) -> bool {
        insertions >= self.threshold.get()
    }
}

impl Default for RebalancePolicy {
    #[inline]
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_policy_roundtrip() {
        let policy = RebalancePolicy::new(NonZeroUsize::new(128).unwrap());
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, r#"{"threshold":128}"#);
        let restored: RebalancePolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, policy);
    }

    #[rstest]
    fn test_policy_rejects_zero_threshold() {
        let result: Result<RebalancePolicy, _> = serde_json::from_str(r#"{"threshold":0}"#);
        assert!(result.is_err());
    }
}
