use fenwick::{FenwickError, FenwickTree};
use proptest::prelude::*;

const CAPACITY: usize = 64;

fn updates() -> impl Strategy<Value = Vec<(usize, i64)>> {
    prop::collection::vec((1..=CAPACITY, -10_000_i64..10_000), 0..200)
}

fn apply(updates: &[(usize, i64)]) -> FenwickTree {
    let mut tree = FenwickTree::new(CAPACITY).unwrap();
    for &(index, delta) in updates {
        tree.update(index, delta).unwrap();
    }
    tree
}

proptest! {
    #[test]
    fn update_order_does_not_matter(
        (updates, shuffled) in updates()
            .prop_flat_map(|u| (Just(u.clone()), Just(u).prop_shuffle()))
    ) {
        let forward = apply(&updates);
        let permuted = apply(&shuffled);
        for index in 0..=CAPACITY {
            prop_assert_eq!(forward.query(index), permuted.query(index));
        }
    }

    #[test]
    fn query_is_sum_of_updates_up_to_index(updates in updates(), index in 0..=CAPACITY) {
        let tree = apply(&updates);
        let expected: i64 = updates
            .iter()
            .filter(|&&(at, _)| at <= index)
            .map(|&(_, delta)| delta)
            .sum();
        prop_assert_eq!(tree.query(index), Ok(expected));
        prop_assert_eq!(tree.query(0), Ok(0));
    }

    #[test]
    fn indices_past_capacity_are_rejected(updates in updates(), extra in 1_usize..1000) {
        let mut tree = apply(&updates);
        let before = tree.clone();
        let index = CAPACITY + extra;
        let error = FenwickError::OutOfRange { index, capacity: CAPACITY };
        prop_assert_eq!(tree.update(index, 1), Err(error.clone()));
        prop_assert_eq!(tree.query(index), Err(error));
        prop_assert_eq!(tree, before);
    }
}
