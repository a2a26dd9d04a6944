/// Every unordered pair `(i, j)` with `i < j < n`, in row-major order.
///
/// Gravity and sphere-sphere collision both walk pairs through this type, so
/// replacing it with a grid or BVH query leaves the per-pair math untouched.
#[derive(Debug, Clone)]
pub struct AllPairs {
    n: usize,
    i: usize,
    j: usize,
}

impl AllPairs {
    pub fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1 }
    }
}

impl Iterator for AllPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.j >= self.n {
            self.i += 1;
            self.j = self.i + 1;
            if self.j >= self.n {
                return None;
            }
        }
        let pair = (self.i, self.j);
        self.j += 1;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.i + 1 >= self.n {
            0
        } else {
            // rest of the current row, then full rows below it
            let row = self.n.saturating_sub(self.j);
            let below = self.n - self.i - 1;
            row + below * below.saturating_sub(1) / 2
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AllPairs {}

/// Number of unordered pairs among `n` items
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_counts() {
        assert_eq!(AllPairs::new(0).count(), 0);
        assert_eq!(AllPairs::new(1).count(), 0);
        assert_eq!(AllPairs::new(2).collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(
            AllPairs::new(4).collect::<Vec<_>>(),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let mut pairs = AllPairs::new(7);
        assert_eq!(pairs.len(), pair_count(7));
        for consumed in 1..=pair_count(7) {
            pairs.next();
            assert_eq!(pairs.len(), pair_count(7) - consumed);
        }
        assert_eq!(pairs.next(), None);
    }

    #[test]
    fn test_ordered_and_unique() {
        let pairs: Vec<_> = AllPairs::new(9).collect();
        assert!(pairs.iter().all(|&(i, j)| i < j && j < 9));
        let mut dedup = pairs.clone();
        dedup.dedup();
        assert_eq!(dedup.len(), pair_count(9));
    }
}
