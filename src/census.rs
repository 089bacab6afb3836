use core::hash::Hash;

use ahash::RandomState;
use hashbrown::HashMap;

use crate::{Observation, helper::pair_count};

/// Observation counts for one series group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupCount {
    /// Number of observations in the group
    observations: u64,
    /// Number of those observations carrying the feature
    with_feature: u64,
}

impl GroupCount {
    /// Returns the number of observations in the group
    pub const fn observations(&self) -> u64 {
        self.observations
    }

    /// Returns the number of observations carrying the feature
    pub const fn with_feature(&self) -> u64 {
        self.with_feature
    }

    fn bump(&mut self, feature: bool) {
        self.observations += 1;
        if feature {
            self.with_feature += 1;
        }
    }
}

/// A by-series census of an observation slice.
///
/// Groups observations by series identifier and counts, per group, how many
/// observations there are and how many carry the feature; unlinked
/// observations are tallied separately. The census is the O(n) companion of
/// the O(n²) pair enumeration, useful for:
///
/// - Spotting lopsided group sizes that dominate the matching partition
/// - Checking how much input the missing-identifier exclusion removes
/// - Deriving the matching partition size in closed form (Σ k(k-1)/2)
/// - Summarizing feature prevalence before running the full computation
///
/// Requires `S: Eq + Hash`, a stronger bound than the enumeration's
/// `S: PartialEq`, so identifier types without a hash can still use the rest
/// of the crate.
#[derive(Debug, Clone)]
pub struct SeriesCensus<S> {
    /// Per-series counts keyed by identifier
    groups: HashMap<S, GroupCount, RandomState>,
    /// Counts of observations without a series identifier
    unlinked: GroupCount,
}

impl<S: Eq + Hash> SeriesCensus<S> {
    /// Builds the census of an observation slice
    ///
    /// # Arguments
    ///
    /// * `observations` - The observations to count
    ///
    /// # Returns
    ///
    /// * `Self` - The census
    ///
    /// # Examples
    ///
    /// ```
    /// # use pairwise_coincidence::{Observation, SeriesCensus};
    /// let observations = [
    ///     Observation::new("a", true),
    ///     Observation::new("a", false),
    ///     Observation::new("b", true),
    ///     Observation::unlinked(true),
    /// ];
    ///
    /// let census = SeriesCensus::of(&observations);
    /// assert_eq!(census.len(), 2);
    /// assert_eq!(census.group(&"a").map(|g| g.observations()), Some(2));
    /// assert_eq!(census.unlinked().observations(), 1);
    /// ```
    pub fn of(observations: &[Observation<S>]) -> Self
    where
        S: Clone,
    {
        let mut census = Self {
            groups: HashMap::with_hasher(RandomState::default()),
            unlinked: GroupCount::default(),
        };

        for observation in observations {
            match observation.series() {
                Some(id) => census
                    .groups
                    .entry(id.clone())
                    .or_default()
                    .bump(observation.feature()),
                None => census.unlinked.bump(observation.feature()),
            }
        }

        census
    }

    /// Returns the number of distinct series identifiers seen
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns the counts of one series group
    ///
    /// # Arguments
    ///
    /// * `id` - The series identifier
    ///
    /// # Returns
    ///
    /// * `Option<GroupCount>` - The counts, or `None` for an unseen identifier
    pub fn group(&self, id: &S) -> Option<GroupCount> {
        self.groups.get(id).copied()
    }

    /// Returns the counts of observations without a series identifier
    pub const fn unlinked(&self) -> GroupCount {
        self.unlinked
    }

    /// Returns the total number of observations counted
    pub fn observations(&self) -> u64 {
        self.groups
            .values()
            .map(GroupCount::observations)
            .sum::<u64>()
            + self.unlinked.observations()
    }

    /// Returns the total number of observations carrying the feature
    pub fn with_feature(&self) -> u64 {
        self.groups
            .values()
            .map(GroupCount::with_feature)
            .sum::<u64>()
            + self.unlinked.with_feature()
    }

    /// Returns the matching partition size implied by the group sizes
    ///
    /// Every group of k linked observations contributes k(k-1)/2 matching
    /// pairs, so this equals the enumerated matching pair count whenever every
    /// observation carries an identifier.
    ///
    /// # Returns
    ///
    /// * `u64` - Σ k(k-1)/2 over the group sizes
    pub fn matching_pairs(&self) -> u64 {
        self.groups
            .values()
            .map(|group| pair_count(group.observations()))
            .sum()
    }

    /// Iterates over the series groups in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&S, &GroupCount)> {
        self.groups.iter()
    }
}
