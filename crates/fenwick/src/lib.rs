//! Binary indexed (Fenwick) tree over `i64` counters.
//!
//! Positions are 1-based: a tree of capacity `n` accepts point updates at
//! `1..=n` and prefix queries at `0..=n`. Counter `i` holds the sum of the
//! `lowbit(i)` positions ending at `i`, so both operations touch O(log n)
//! counters.
//!
//! ```
//! use fenwick::FenwickTree;
//!
//! let mut tree = FenwickTree::new(100)?;
//! tree.update(1, 20)?;
//! tree.update(4, 4)?;
//! assert_eq!(tree.query(3)?, 20);
//! assert_eq!(tree.query(4)?, 24);
//! # Ok::<(), fenwick::FenwickError>(())
//! ```

mod error;

pub use error::{FenwickError, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenwickTree {
    /// `counters[0]` is never read.
    counters: Vec<i64>,
    capacity: usize,
}

impl FenwickTree {
    /// Creates a tree of `capacity` zeroed positions.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(FenwickError::ZeroCapacity);
        }
        Ok(Self {
            counters: vec![0; capacity + 1],
            capacity,
        })
    }

    /// Builds a tree in O(n) where `values[k]` is the value at position `k + 1`.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        let mut tree = Self::new(values.len())?;
        tree.counters[1..].copy_from_slice(values);
        for i in 1..=tree.capacity {
            let parent = i + lowbit(i);
            if parent <= tree.capacity {
                tree.counters[parent] += tree.counters[i];
            }
        }
        Ok(tree)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Adds `delta` to the value at `index` (1-based).
    pub fn update(&mut self, index: usize, delta: i64) -> Result<()> {
        if index == 0 || index > self.capacity {
            return Err(self.out_of_range(index));
        }
        let mut i = index;
        while i <= self.capacity {
            self.counters[i] += delta;
            i += lowbit(i);
        }
        Ok(())
    }

    /// Sum of the values at positions `1..=index`; `query(0)` is 0.
    pub fn query(&self, index: usize) -> Result<i64> {
        if index > self.capacity {
            return Err(self.out_of_range(index));
        }
        Ok(self.prefix(index))
    }

    /// Sum of the values at positions `start..=end` (1-based).
    pub fn range_sum(&self, start: usize, end: usize) -> Result<i64> {
        if start == 0 {
            return Err(self.out_of_range(start));
        }
        if start > end {
            return Err(FenwickError::InvalidRange { start, end });
        }
        Ok(self.query(end)? - self.query(start - 1)?)
    }

    /// Current value at `index` (1-based).
    pub fn value_at(&self, index: usize) -> Result<i64> {
        self.range_sum(index, index)
    }

    /// Sum over every position.
    pub fn total(&self) -> i64 {
        self.prefix(self.capacity)
    }

    /// Resets every position to zero.
    pub fn clear(&mut self) {
        self.counters.fill(0);
    }

    /// `index` must already be within `0..=capacity`.
    fn prefix(&self, mut index: usize) -> i64 {
        let mut sum = 0;
        while index > 0 {
            sum += self.counters[index];
            index -= lowbit(index);
        }
        sum
    }

    fn out_of_range(&self, index: usize) -> FenwickError {
        #[cfg(feature = "tracing")]
        tracing::debug!(index, capacity = self.capacity, "fenwick index rejected");
        FenwickError::OutOfRange {
            index,
            capacity: self.capacity,
        }
    }
}

/// Lowest set bit of `i`.
#[inline]
fn lowbit(i: usize) -> usize {
    i & i.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::{FenwickError, FenwickTree, lowbit};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn lowbit_isolates_lowest_set_bit() {
        assert_eq!(lowbit(1), 1);
        assert_eq!(lowbit(6), 2);
        assert_eq!(lowbit(8), 8);
        assert_eq!(lowbit(12), 4);
        assert_eq!(lowbit(0), 0);
    }

    #[test]
    fn point_updates_and_prefix_queries() {
        let mut tree = FenwickTree::new(100).unwrap();
        tree.update(1, 20).unwrap();
        tree.update(4, 4).unwrap();
        assert_eq!(tree.query(1), Ok(20));
        assert_eq!(tree.query(3), Ok(20));
        assert_eq!(tree.query(4), Ok(24));

        tree.update(2, -5).unwrap();
        assert_eq!(tree.query(1), Ok(20));
        assert_eq!(tree.query(3), Ok(15));
        assert_eq!(tree.query(4), Ok(19));
        assert_eq!(tree.total(), 19);
    }

    #[test]
    fn query_zero_is_always_zero() {
        let mut tree = FenwickTree::new(8).unwrap();
        assert_eq!(tree.query(0), Ok(0));
        tree.update(1, 7).unwrap();
        tree.update(8, -3).unwrap();
        assert_eq!(tree.query(0), Ok(0));
    }

    #[test]
    fn last_position_is_reachable() {
        let mut tree = FenwickTree::new(5).unwrap();
        tree.update(5, 9).unwrap();
        assert_eq!(tree.query(4), Ok(0));
        assert_eq!(tree.query(5), Ok(9));
        assert_eq!(tree.value_at(5), Ok(9));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(FenwickTree::new(0), Err(FenwickError::ZeroCapacity));
        assert_eq!(FenwickTree::from_values(&[]), Err(FenwickError::ZeroCapacity));
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let mut tree = FenwickTree::new(4).unwrap();
        let out_of_range = |index| FenwickError::OutOfRange { index, capacity: 4 };

        assert_eq!(tree.update(0, 1), Err(out_of_range(0)));
        assert_eq!(tree.update(5, 1), Err(out_of_range(5)));
        assert_eq!(tree.query(5), Err(out_of_range(5)));
        assert_eq!(tree.range_sum(0, 2), Err(out_of_range(0)));
        assert_eq!(tree.range_sum(2, 5), Err(out_of_range(5)));
        assert_eq!(
            tree.range_sum(3, 2),
            Err(FenwickError::InvalidRange { start: 3, end: 2 })
        );
        assert_eq!(tree, FenwickTree::new(4).unwrap());
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            FenwickError::OutOfRange {
                index: 7,
                capacity: 4
            }
            .to_string(),
            "index 7 is out of range for capacity 4"
        );
        assert_eq!(
            FenwickError::ZeroCapacity.to_string(),
            "capacity must be at least 1"
        );
    }

    #[test]
    fn from_values_matches_repeated_updates() {
        let values = [3_i64, -1, 4, 1, -5, 9, 2, -6, 5, 3, 5];
        let built = FenwickTree::from_values(&values).unwrap();
        let mut updated = FenwickTree::new(values.len()).unwrap();
        for (k, &v) in values.iter().enumerate() {
            updated.update(k + 1, v).unwrap();
        }
        assert_eq!(built, updated);

        let mut running = 0;
        for (k, &v) in values.iter().enumerate() {
            running += v;
            assert_eq!(built.query(k + 1), Ok(running));
            assert_eq!(built.value_at(k + 1), Ok(v));
        }
    }

    #[test]
    fn clear_zeroes_every_position() {
        let mut tree = FenwickTree::from_values(&[1, 2, 3]).unwrap();
        tree.clear();
        assert_eq!(tree.total(), 0);
        assert_eq!(tree.capacity(), 3);
    }

    #[test]
    fn random_operations_match_vec() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for capacity in [1_usize, 2, 3, 7, 16, 33, 100] {
            let mut tree = FenwickTree::new(capacity).unwrap();
            let mut values = vec![0_i64; capacity + 1];
            for _ in 0..500 {
                if rng.random_bool(0.5) {
                    let index = rng.random_range(1..=capacity);
                    let delta = rng.random_range(-1000..=1000);
                    tree.update(index, delta).unwrap();
                    values[index] += delta;
                } else {
                    let end = rng.random_range(0..=capacity);
                    let expected: i64 = values[1..=end].iter().sum();
                    assert_eq!(tree.query(end), Ok(expected));
                    if end > 0 {
                        let start = rng.random_range(1..=end);
                        let expected: i64 = values[start..=end].iter().sum();
                        assert_eq!(tree.range_sum(start, end), Ok(expected));
                    }
                }
            }
        }
    }
}
