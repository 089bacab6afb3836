use core::ops::Range;

use num_traits::Float;

use crate::{CoincidenceError, Observation, Pair, Pairs, Partition};

/// Running pair and coincidence counts for one partition.
///
/// The counters are exact integers; the proportion is computed on demand by a
/// single division, so no floating-point error accumulates however many pairs
/// are folded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionTally {
    /// Number of pairs folded into the partition
    pairs: u64,
    /// Number of those pairs whose observations both carry the feature
    coincident: u64,
}

impl PartitionTally {
    /// Creates an empty tally
    ///
    /// # Returns
    ///
    /// * `Self` - The tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pairs in the partition
    pub const fn pairs(&self) -> u64 {
        self.pairs
    }

    /// Returns the number of coincident pairs in the partition
    pub const fn coincident(&self) -> u64 {
        self.coincident
    }

    /// Returns the proportion of coincident pairs
    ///
    /// # Returns
    ///
    /// * `Option<T>` - The proportion in [0, 1], or `None` if the partition
    ///   holds no pairs
    pub fn proportion<T: Float>(&self) -> Option<T> {
        if self.pairs == 0 {
            return None;
        }
        T::from(self.coincident)
            .zip(T::from(self.pairs))
            .map(|(coincident, pairs)| coincident / pairs)
    }

    /// Returns the counts and proportion as one record
    ///
    /// # Returns
    ///
    /// * `Option<PartitionSummary<T>>` - The summary, or `None` if the
    ///   partition holds no pairs
    pub fn summary<T: Float>(&self) -> Option<PartitionSummary<T>> {
        self.proportion().map(|proportion| PartitionSummary {
            pairs: self.pairs,
            coincident: self.coincident,
            proportion,
        })
    }

    fn record(&mut self, coincident: bool) {
        self.pairs += 1;
        if coincident {
            self.coincident += 1;
        }
    }

    fn absorb(&mut self, other: &Self) {
        self.pairs += other.pairs;
        self.coincident += other.coincident;
    }

    fn reset(&mut self) {
        self.pairs = 0;
        self.coincident = 0;
    }
}

/// Counts and proportion of one partition, as handed back to callers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartitionSummary<T> {
    /// Number of pairs in the partition
    pub pairs: u64,
    /// Number of coincident pairs in the partition
    pub coincident: u64,
    /// Proportion of coincident pairs, in [0, 1]
    pub proportion: T,
}

/// The complete result of a coincidence computation.
///
/// Carries both partition summaries plus the number of pairs excluded for
/// missing series identifiers. Built by [`CoincidenceTally::proportions`] once
/// both partitions are non-empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions<T> {
    /// Summary of the matching partition
    pub matching: PartitionSummary<T>,
    /// Summary of the non-matching partition
    pub non_matching: PartitionSummary<T>,
    /// Pairs excluded from both partitions for missing series identifiers
    pub unlinked: u64,
}

/// Single-pass aggregator of labeled pairs into per-partition counts.
///
/// This is the fused streaming form of the pipeline: pairs flow through
/// [`next`](Self::next) one at a time and only a handful of counters is kept,
/// so the memory footprint is constant however many pairs are enumerated.
/// Independent tallies over disjoint outer ranges combine with
/// [`merge`](Self::merge), which turns the whole computation into a sum of
/// local folds for callers that bring their own workers.
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::{CoincidenceTally, Observation, Pairs};
/// let observations = [
///     Observation::new("a", true),
///     Observation::new("a", true),
///     Observation::new("b", false),
/// ];
///
/// let mut tally = CoincidenceTally::new();
/// Pairs::new(&observations).for_each(|pair| {
///     tally.next(pair);
/// });
///
/// assert_eq!(tally.total_pairs(), 3);
/// assert_eq!(tally.matching().coincident(), 1);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoincidenceTally {
    /// Counters of the matching partition
    matching: PartitionTally,
    /// Counters of the non-matching partition
    non_matching: PartitionTally,
    /// Pairs excluded from both partitions for missing series identifiers
    unlinked: u64,
}

impl CoincidenceTally {
    /// Creates an empty tally
    ///
    /// # Returns
    ///
    /// * `Self` - The tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one labeled pair into the tally
    ///
    /// # Arguments
    ///
    /// * `pair` - The labeled pair
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The tally, for chaining
    pub fn next(&mut self, pair: Pair) -> &mut Self {
        match pair.partition() {
            Some(Partition::Matching) => self.matching.record(pair.both()),
            Some(Partition::NonMatching) => self.non_matching.record(pair.both()),
            None => self.unlinked += 1,
        }
        self
    }

    /// Adds the counts of another tally into this one
    ///
    /// Tallies built over disjoint outer ranges merge into exactly the
    /// sequential result, in any order.
    ///
    /// # Arguments
    ///
    /// * `other` - The tally to absorb
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The tally, for chaining
    pub fn merge(&mut self, other: &Self) -> &mut Self {
        self.matching.absorb(&other.matching);
        self.non_matching.absorb(&other.non_matching);
        self.unlinked += other.unlinked;
        self
    }

    /// Resets all counters to zero
    ///
    /// # Returns
    ///
    /// * `&mut Self` - The tally, for chaining
    pub fn reset(&mut self) -> &mut Self {
        self.matching.reset();
        self.non_matching.reset();
        self.unlinked = 0;
        self
    }

    /// Returns the counters of the matching partition
    pub const fn matching(&self) -> &PartitionTally {
        &self.matching
    }

    /// Returns the counters of the non-matching partition
    pub const fn non_matching(&self) -> &PartitionTally {
        &self.non_matching
    }

    /// Returns the counters of the given partition
    ///
    /// # Arguments
    ///
    /// * `partition` - The partition to look up
    ///
    /// # Returns
    ///
    /// * `&PartitionTally` - The counters
    pub const fn partition(&self, partition: Partition) -> &PartitionTally {
        match partition {
            Partition::Matching => &self.matching,
            Partition::NonMatching => &self.non_matching,
        }
    }

    /// Returns the number of pairs excluded for missing series identifiers
    pub const fn unlinked(&self) -> u64 {
        self.unlinked
    }

    /// Returns the total number of folded pairs, across both partitions and
    /// the unlinked remainder; n(n-1)/2 after a full enumeration
    pub const fn total_pairs(&self) -> u64 {
        self.matching.pairs() + self.non_matching.pairs() + self.unlinked
    }

    /// Returns the proportion of one partition, or an explicit error
    ///
    /// # Arguments
    ///
    /// * `partition` - The partition to query
    ///
    /// # Returns
    ///
    /// * `Result<T, CoincidenceError>` - The proportion in [0, 1], or
    ///   [`CoincidenceError::EmptyPartition`] naming the partition that holds
    ///   no pairs
    ///
    /// # Examples
    ///
    /// ```
    /// # use pairwise_coincidence::{tally, CoincidenceError, Observation, Partition};
    /// let observations = [Observation::new("s", true), Observation::new("s", true)];
    ///
    /// let t = tally(&observations);
    /// assert_eq!(t.proportion_of::<f64>(Partition::Matching), Ok(1.0));
    /// assert_eq!(
    ///     t.proportion_of::<f64>(Partition::NonMatching),
    ///     Err(CoincidenceError::EmptyPartition {
    ///         partition: Partition::NonMatching
    ///     })
    /// );
    /// ```
    pub fn proportion_of<T: Float>(&self, partition: Partition) -> Result<T, CoincidenceError> {
        self.partition(partition)
            .proportion()
            .ok_or(CoincidenceError::EmptyPartition { partition })
    }

    /// Returns both partition summaries as one result record
    ///
    /// # Returns
    ///
    /// * `Result<Proportions<T>, CoincidenceError>` - Both summaries, or the
    ///   first empty partition found (matching is checked first)
    pub fn proportions<T: Float>(&self) -> Result<Proportions<T>, CoincidenceError> {
        let matching = self
            .matching
            .summary()
            .ok_or(CoincidenceError::EmptyPartition {
                partition: Partition::Matching,
            })?;
        let non_matching = self
            .non_matching
            .summary()
            .ok_or(CoincidenceError::EmptyPartition {
                partition: Partition::NonMatching,
            })?;
        Ok(Proportions {
            matching,
            non_matching,
            unlinked: self.unlinked,
        })
    }
}

/// Tallies every pair of the observation slice in one fused streaming pass
///
/// The default way to run the computation: enumeration and aggregation in a
/// single loop, no pair ever materialized.
///
/// # Arguments
///
/// * `observations` - The observations to analyze
///
/// # Returns
///
/// * `CoincidenceTally` - The per-partition counts
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::{tally, Observation};
/// let observations = [
///     Observation::new("a", true),
///     Observation::new("a", true),
///     Observation::new("b", false),
/// ];
///
/// let t = tally(&observations);
/// assert_eq!(t.matching().pairs(), 1);
/// assert_eq!(t.non_matching().pairs(), 2);
/// assert_eq!(t.matching().proportion(), Some(1.0));
/// assert_eq!(t.non_matching().proportion(), Some(0.0));
/// ```
pub fn tally<S: PartialEq>(observations: &[Observation<S>]) -> CoincidenceTally {
    let mut tally = CoincidenceTally::new();
    for pair in Pairs::new(observations) {
        tally.next(pair);
    }
    tally
}

/// Tallies only the pairs whose outer index falls in `outer`
///
/// Disjoint outer ranges covering the whole slice yield tallies that
/// [`merge`](CoincidenceTally::merge) into exactly the sequential result, so a
/// caller can spread the ranges over workers and reduce at the end.
///
/// # Arguments
///
/// * `observations` - The observations to analyze
/// * `outer` - The range of outer indices to cover
///
/// # Returns
///
/// * `CoincidenceTally` - The partial counts
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::{tally, tally_outer, Observation};
/// let observations: Vec<_> = (0..6).map(|k| Observation::new(k % 2, k == 0)).collect();
///
/// let mut left = tally_outer(&observations, 0..3);
/// let right = tally_outer(&observations, 3..6);
/// left.merge(&right);
///
/// assert_eq!(left, tally(&observations));
/// ```
pub fn tally_outer<S: PartialEq>(
    observations: &[Observation<S>],
    outer: Range<usize>,
) -> CoincidenceTally {
    let mut tally = CoincidenceTally::new();
    for pair in Pairs::outer(observations, outer) {
        tally.next(pair);
    }
    tally
}

/// Computes both coincidence proportions of the observation slice
///
/// One-shot convenience over [`tally`] + [`CoincidenceTally::proportions`].
///
/// # Arguments
///
/// * `observations` - The observations to analyze
///
/// # Returns
///
/// * `Result<Proportions<T>, CoincidenceError>` - Both partition summaries,
///   or the first empty partition found
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::{proportions, Observation};
/// let observations = [
///     Observation::new(1, true),
///     Observation::new(1, true),
///     Observation::new(2, false),
/// ];
///
/// let p = proportions::<f64, _>(&observations);
/// assert!(p.is_ok());
/// if let Ok(p) = p {
///     assert_eq!(p.matching.proportion, 1.0);
///     assert_eq!(p.non_matching.proportion, 0.0);
///     assert_eq!(p.unlinked, 0);
/// }
/// ```
pub fn proportions<T: Float, S: PartialEq>(
    observations: &[Observation<S>],
) -> Result<Proportions<T>, CoincidenceError> {
    tally(observations).proportions()
}
