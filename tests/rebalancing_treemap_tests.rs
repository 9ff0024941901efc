//! Integration tests for RebalancingTreeMap.
//!
//! Exercises the public surface through both the inherent methods and
//! the `OrderedCollection` trait.

use periodic_bst::tree::{OrderedCollection, RebalancePolicy, RebalancingTreeMap, TreeMapError};
use rstest::{fixture, rstest};
use std::num::NonZeroUsize;

#[fixture]
fn numbers() -> RebalancingTreeMap<i32, &'static str> {
    RebalancingTreeMap::try_from_entries([
        (5, "five"),
        (3, "three"),
        (8, "eight"),
        (1, "one"),
        (4, "four"),
        (7, "seven"),
        (9, "nine"),
    ])
    .unwrap()
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn collect_pairs<C: OrderedCollection<i32, &'static str>>(collection: &C) -> Vec<(i32, &'static str)> {
    let mut pairs = Vec::new();
    collection.for_each(|key, value| pairs.push((*key, *value)));
    pairs
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[rstest]
fn test_contains_key_with_value(numbers: RebalancingTreeMap<i32, &'static str>) {
    assert!(OrderedCollection::contains_key(&numbers, &4));
    assert_eq!(OrderedCollection::get(&numbers, &4), Some(&"four"));
    assert!(!OrderedCollection::contains_key(&numbers, &6));
    assert_eq!(OrderedCollection::get(&numbers, &6), None);
}

#[rstest]
fn test_min_and_max_key(numbers: RebalancingTreeMap<i32, &'static str>) {
    assert_eq!(OrderedCollection::min_key(&numbers), Ok(&1));
    assert_eq!(OrderedCollection::max_key(&numbers), Ok(&9));
}

#[rstest]
fn test_min_and_max_key_on_empty_collection() {
    let empty: RebalancingTreeMap<i32, &'static str> = RebalancingTreeMap::new();
    assert_eq!(
        OrderedCollection::min_key(&empty),
        Err(TreeMapError::EmptyCollection)
    );
    assert_eq!(
        OrderedCollection::max_key(&empty),
        Err(TreeMapError::EmptyCollection)
    );
}

// =============================================================================
// Range Query Tests
// =============================================================================

#[rstest]
#[case(3, 8, vec!["three", "four", "five", "seven"])]
#[case(8, 3, vec!["three", "four", "five", "seven"])]
#[case(1, 9, vec!["one", "three", "four", "five", "seven", "eight"])]
#[case(1, 10, vec!["one", "three", "four", "five", "seven", "eight", "nine"])]
#[case(-100, 2, vec!["one"])]
#[case(9, 9, vec![])]
#[case(10, 100, vec![])]
fn test_values_in_range(
    numbers: RebalancingTreeMap<i32, &'static str>,
    #[case] first: i32,
    #[case] second: i32,
    #[case] expected: Vec<&'static str>,
) {
    let values: Vec<&str> = OrderedCollection::values_in_range(&numbers, &first, &second)
        .into_iter()
        .copied()
        .collect();
    assert_eq!(values, expected);
}

#[rstest]
fn test_range_results_survive_later_queries(numbers: RebalancingTreeMap<i32, &'static str>) {
    let low = numbers.values_in_range(&0, &4);
    let high = numbers.values_in_range(&7, &100);
    assert_eq!(low, vec![&"one", &"three"]);
    assert_eq!(high, vec![&"seven", &"eight", &"nine"]);
}

// =============================================================================
// Insertion Tests
// =============================================================================

#[rstest]
fn test_duplicate_key_is_rejected_through_trait(mut numbers: RebalancingTreeMap<i32, &'static str>) {
    let before = collect_pairs(&numbers);
    let range_before = numbers.values_in_range(&0, &100).len();

    let result = OrderedCollection::add(&mut numbers, 5, "FIVE");

    assert_eq!(result, Err(TreeMapError::DuplicateKey(5)));
    assert_eq!(collect_pairs(&numbers), before);
    assert_eq!(numbers.values_in_range(&0, &100).len(), range_before);
    assert_eq!(numbers.get(&5), Some(&"five"));
}

#[rstest]
fn test_duplicate_key_error_message() {
    let mut map = RebalancingTreeMap::new();
    map.add(12_u8, ()).unwrap();
    let error = map.add(12, ()).unwrap_err();
    assert_eq!(error.to_string(), "key 12 already exists");
}

#[rstest]
fn test_for_each_order_is_independent_of_insertion_order() {
    let ascending = RebalancingTreeMap::try_from_entries((1..=9).map(|key| (key, "x"))).unwrap();
    let descending =
        RebalancingTreeMap::try_from_entries((1..=9).rev().map(|key| (key, "x"))).unwrap();
    let interleaved =
        RebalancingTreeMap::try_from_entries([5, 1, 9, 2, 8, 3, 7, 4, 6].map(|key| (key, "x")))
            .unwrap();

    let expected: Vec<(i32, &str)> = (1..=9).map(|key| (key, "x")).collect();
    assert_eq!(collect_pairs(&ascending), expected);
    assert_eq!(collect_pairs(&descending), expected);
    assert_eq!(collect_pairs(&interleaved), expected);
}

// =============================================================================
// Rebalance Tests
// =============================================================================

#[rstest]
fn test_ascending_insertions_trigger_single_rebalance_at_threshold() {
    init_logger();
    let mut map = RebalancingTreeMap::new();
    for key in 0..4999_u32 {
        map.add(key, key).unwrap();
    }
    assert_eq!(map.height(), 4999);
    assert_eq!(map.insertions_since_rebalance(), 4999);

    map.add(4999, 4999).unwrap();

    assert_eq!(map.insertions_since_rebalance(), 0);
    assert_eq!(map.height(), 13);
    assert_eq!(map.len(), 5000);
    assert!(map.keys().copied().eq(0..5000));
}

#[rstest]
fn test_rebalance_through_trait_preserves_contents(mut numbers: RebalancingTreeMap<i32, &'static str>) {
    let before = collect_pairs(&numbers);
    OrderedCollection::rebalance(&mut numbers);
    assert_eq!(collect_pairs(&numbers), before);
    assert_eq!(numbers.height(), 3);
}

#[rstest]
#[case(2)]
#[case(7)]
#[case(50)]
fn test_height_stays_bounded_with_small_threshold(#[case] threshold: usize) {
    let policy = RebalancePolicy::new(NonZeroUsize::new(threshold).unwrap());
    let mut map = RebalancingTreeMap::with_policy(policy);
    for key in 0..1000_usize {
        map.add(key, ()).unwrap();
        // A balanced core plus at most `threshold - 1` keys hanging off it.
        assert!(map.height() <= map.len().ilog2() as usize + threshold);
    }
}

#[rstest]
fn test_prelude_exports_collection() {
    use periodic_bst::prelude::*;

    let mut map: RebalancingTreeMap<i64, i64> = RebalancingTreeMap::default();
    map.add(1, 1).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(RebalancePolicy::default(), map.policy());
}
