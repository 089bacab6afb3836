/// A single input record: an optional series identifier and a binary feature flag.
///
/// Observations are the immutable inputs of the coincidence computation. They are
/// created once from external data (table rows, register entries, linked cases)
/// and never mutated; every pair label is derived from them on the fly.
///
/// The series identifier can be any equality-comparable value. A missing
/// identifier (`None`) marks the record as unlinked: it still takes part in pair
/// enumeration, but every pair touching it belongs to neither partition and is
/// counted separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation<S> {
    /// Grouping key shared by records of the same series, `None` when unknown
    series: Option<S>,
    /// Whether the record carries the feature under study
    feature: bool,
}

impl<S> Observation<S> {
    /// Creates an observation linked to a series
    ///
    /// # Arguments
    ///
    /// * `series` - The series identifier
    /// * `feature` - Whether the record carries the feature
    ///
    /// # Returns
    ///
    /// * `Self` - The observation
    pub const fn new(series: S, feature: bool) -> Self {
        Self {
            series: Some(series),
            feature,
        }
    }

    /// Creates an observation without a series identifier
    ///
    /// # Arguments
    ///
    /// * `feature` - Whether the record carries the feature
    ///
    /// # Returns
    ///
    /// * `Self` - The observation
    pub const fn unlinked(feature: bool) -> Self {
        Self {
            series: None,
            feature,
        }
    }

    /// Returns the series identifier, if any
    ///
    /// # Returns
    ///
    /// * `Option<&S>` - The identifier, or `None` for an unlinked record
    pub const fn series(&self) -> Option<&S> {
        self.series.as_ref()
    }

    /// Returns whether the record carries the feature
    ///
    /// # Returns
    ///
    /// * `bool` - The feature flag
    pub const fn feature(&self) -> bool {
        self.feature
    }

    /// Checks whether two observations belong to the same series
    ///
    /// The check is a plain equality comparison of the identifiers and does not
    /// depend on argument order.
    ///
    /// # Arguments
    ///
    /// * `other` - The observation to compare against
    ///
    /// # Returns
    ///
    /// * `Option<bool>` - Whether the series match, or `None` if either
    ///   identifier is missing
    ///
    /// # Examples
    ///
    /// ```
    /// # use pairwise_coincidence::Observation;
    /// let a = Observation::new("s1", true);
    /// let b = Observation::new("s1", false);
    /// let c = Observation::new("s2", true);
    /// let u = Observation::unlinked(true);
    ///
    /// assert_eq!(a.same_series(&b), Some(true));
    /// assert_eq!(a.same_series(&c), Some(false));
    /// assert_eq!(a.same_series(&u), None);
    /// ```
    pub fn same_series(&self, other: &Self) -> Option<bool>
    where
        S: PartialEq,
    {
        match (self.series.as_ref(), other.series.as_ref()) {
            (Some(a), Some(b)) => Some(a == b),
            _ => None,
        }
    }

    /// Checks whether both observations carry the feature
    ///
    /// This is the coincidence label of a pair: true only for the 1/1
    /// combination, false for 0/0, 0/1 and 1/0.
    ///
    /// # Arguments
    ///
    /// * `other` - The second observation of the pair
    ///
    /// # Returns
    ///
    /// * `bool` - True iff both observations carry the feature
    pub const fn coincident(&self, other: &Self) -> bool {
        self.feature && other.feature
    }
}
