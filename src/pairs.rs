use core::fmt;
use core::ops::Range;

use crate::Observation;

/// The partition a labeled pair falls into.
///
/// Pairs whose observations share a series identifier are matching; pairs with
/// two different identifiers are non-matching. Pairs touching an unlinked
/// observation carry no partition at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Both observations carry the same series identifier
    Matching,
    /// The observations carry different series identifiers
    NonMatching,
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Matching => f.write_str("matching"),
            Self::NonMatching => f.write_str("non-matching"),
        }
    }
}

/// A labeled pair of observation indices.
///
/// Pairs are derived entities: they exist only while streaming through the
/// aggregator, unless a caller collects them for inspection. The indices always
/// satisfy `i < j`, so each unordered pair appears exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair {
    /// Index of the first observation, always less than `j`
    i: usize,
    /// Index of the second observation
    j: usize,
    /// Partition of the pair, `None` when either side is unlinked
    partition: Option<Partition>,
    /// Whether both observations carry the feature
    both: bool,
}

impl Pair {
    /// Labels the pair of observations at indices `i` and `j`
    ///
    /// The indices are stored in ascending order; both labels are symmetric,
    /// so argument order does not affect them.
    ///
    /// # Arguments
    ///
    /// * `i` - Index of the first observation
    /// * `j` - Index of the second observation
    /// * `a` - The observation at `i`
    /// * `b` - The observation at `j`
    ///
    /// # Returns
    ///
    /// * `Self` - The labeled pair
    pub fn label<S: PartialEq>(i: usize, j: usize, a: &Observation<S>, b: &Observation<S>) -> Self {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        Self {
            i,
            j,
            partition: a.same_series(b).map(|same| {
                if same {
                    Partition::Matching
                } else {
                    Partition::NonMatching
                }
            }),
            both: a.coincident(b),
        }
    }

    /// Returns the index of the first observation
    pub const fn i(&self) -> usize {
        self.i
    }

    /// Returns the index of the second observation
    pub const fn j(&self) -> usize {
        self.j
    }

    /// Returns the partition of the pair, `None` when either side is unlinked
    pub const fn partition(&self) -> Option<Partition> {
        self.partition
    }

    /// Returns whether both observations carry the feature
    pub const fn both(&self) -> bool {
        self.both
    }
}

/// Streaming enumerator of all unique unordered observation pairs.
///
/// Walks the classic double index loop (outer `i`, inner `j` from `i + 1`) and
/// yields each pair labeled with its partition and coincidence flag, in
/// lexicographic `(i, j)` order. Exactly n(n-1)/2 pairs are produced for n
/// observations; fewer than two observations yield none.
///
/// The enumerator is lazy, so the memory footprint stays O(n) however many
/// pairs there are, and a consumer cancels a long enumeration simply by
/// ceasing to draw from it. Collecting it materializes the full labeling for
/// inspection:
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::{Observation, Pairs, Partition};
/// let observations = [
///     Observation::new("a", true),
///     Observation::new("a", true),
///     Observation::new("b", false),
/// ];
///
/// let mut labels = vec![];
/// Pairs::new(&observations).for_each(|p| labels.push((p.i(), p.j(), p.partition(), p.both())));
///
/// assert_eq!(
///     labels,
///     [
///         (0, 1, Some(Partition::Matching), true),
///         (0, 2, Some(Partition::NonMatching), false),
///         (1, 2, Some(Partition::NonMatching), false),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Pairs<'a, S> {
    /// Observations under enumeration
    observations: &'a [Observation<S>],
    /// Outer index of the next pair
    i: usize,
    /// Inner index of the next pair
    j: usize,
    /// Exclusive upper bound of the outer index
    end: usize,
}

impl<'a, S> Pairs<'a, S> {
    /// Creates an enumerator over every pair of the slice
    ///
    /// # Arguments
    ///
    /// * `observations` - The observations to enumerate
    ///
    /// # Returns
    ///
    /// * `Self` - The enumerator
    pub fn new(observations: &'a [Observation<S>]) -> Self {
        Self::outer(observations, 0..observations.len())
    }

    /// Creates an enumerator restricted to outer indices in `outer`
    ///
    /// The inner index still ranges over the whole tail (`i + 1..n`), so
    /// enumerators over disjoint outer ranges covering `0..n` partition the
    /// full pair set exactly. This is the split point for running independent
    /// tallies in parallel and merging them afterwards.
    ///
    /// # Arguments
    ///
    /// * `observations` - The observations to enumerate
    /// * `outer` - The range of outer indices to cover
    ///
    /// # Returns
    ///
    /// * `Self` - The restricted enumerator
    pub fn outer(observations: &'a [Observation<S>], outer: Range<usize>) -> Self {
        Self {
            observations,
            i: outer.start,
            j: outer.start.saturating_add(1),
            end: outer.end.min(observations.len()),
        }
    }
}

impl<S: PartialEq> Iterator for Pairs<'_, S> {
    type Item = Pair;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.observations.len();
        while self.i < self.end {
            if self.j < n {
                let pair = Pair::label(
                    self.i,
                    self.j,
                    &self.observations[self.i],
                    &self.observations[self.j],
                );
                self.j += 1;
                return Some(pair);
            }
            self.i += 1;
            self.j = self.i + 1;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec::Vec;

    fn unkeyed(n: usize) -> Vec<Observation<usize>> {
        (0..n).map(|k| Observation::new(k, false)).collect()
    }

    #[test]
    fn test_pair_count_matches_formula() {
        for n in 0..8 {
            let observations = unkeyed(n);
            assert_eq!(Pairs::new(&observations).count(), n * n.saturating_sub(1) / 2);
        }
    }

    #[test]
    fn test_no_duplicates_no_self_pairs() {
        let observations = unkeyed(6);
        let pairs: Vec<_> = Pairs::new(&observations).collect();

        for (k, p) in pairs.iter().enumerate() {
            assert!(p.i() < p.j());
            for q in &pairs[k + 1..] {
                assert!((p.i(), p.j()) != (q.i(), q.j()));
            }
        }
    }

    #[test]
    fn test_lexicographic_order() {
        let observations = unkeyed(5);
        let indices: Vec<_> = Pairs::new(&observations).map(|p| (p.i(), p.j())).collect();

        let mut sorted = indices.clone();
        sorted.sort_unstable();
        assert_eq!(indices, sorted);
    }

    #[test]
    fn test_degenerate_inputs_yield_no_pairs() {
        assert_eq!(Pairs::new(&unkeyed(0)).count(), 0);
        assert_eq!(Pairs::new(&unkeyed(1)).count(), 0);
    }

    #[test]
    fn test_labels() {
        let observations = [
            Observation::new('a', true),
            Observation::new('a', true),
            Observation::new('b', false),
        ];
        let pairs: Vec<_> = Pairs::new(&observations).collect();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0].partition(), Some(Partition::Matching));
        assert!(pairs[0].both());
        assert_eq!(pairs[1].partition(), Some(Partition::NonMatching));
        assert!(!pairs[1].both());
        assert_eq!(pairs[2].partition(), Some(Partition::NonMatching));
        assert!(!pairs[2].both());
    }

    #[test]
    fn test_label_orders_indices() {
        let a = Observation::new(1, true);
        let b = Observation::new(2, true);

        let pair = Pair::label(5, 2, &a, &b);
        assert_eq!((pair.i(), pair.j()), (2, 5));
        assert_eq!(pair.partition(), Some(Partition::NonMatching));
        assert!(pair.both());
    }

    #[test]
    fn test_unlinked_pairs_have_no_partition() {
        let observations = [
            Observation::new(1, true),
            Observation::unlinked(true),
            Observation::new(1, true),
        ];
        let pairs: Vec<_> = Pairs::new(&observations).collect();

        assert_eq!(pairs[0].partition(), None); // (0, 1)
        assert_eq!(pairs[1].partition(), Some(Partition::Matching)); // (0, 2)
        assert_eq!(pairs[2].partition(), None); // (1, 2)
        assert!(pairs.iter().all(Pair::both));
    }

    #[test]
    fn test_outer_ranges_partition_the_pair_set() {
        let observations = unkeyed(7);

        let full: Vec<_> = Pairs::new(&observations).map(|p| (p.i(), p.j())).collect();
        let mut split: Vec<_> = Pairs::outer(&observations, 0..3)
            .map(|p| (p.i(), p.j()))
            .collect();
        split.extend(Pairs::outer(&observations, 3..7).map(|p| (p.i(), p.j())));

        assert_eq!(split, full);
    }

    #[test]
    fn test_outer_range_clamped_to_len() {
        let observations = unkeyed(3);
        assert_eq!(Pairs::outer(&observations, 0..10).count(), 3);
        assert_eq!(Pairs::outer(&observations, 5..10).count(), 0);
    }

    #[test]
    fn test_partition_display() {
        assert_eq!(format!("{}", Partition::Matching), "matching");
        assert_eq!(format!("{}", Partition::NonMatching), "non-matching");
    }
}
