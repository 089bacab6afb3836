use alloc::vec::Vec;

use num_traits::Float;
use ordered_float::NotNan;

use crate::{CoincidenceError, Observation, Proportions, proportions};

/// Builds observations from two parallel numeric columns
///
/// This is the raw-table entry point: one column of series identifiers and one
/// of feature flags, equal in length, as they come out of a numeric table.
/// Feature values must be exactly 0.0 or 1.0; anything else (including NaN)
/// is rejected before any pair is processed. A NaN series identifier marks the
/// record as unlinked; every other value, infinities included, becomes a
/// [`NotNan`] identifier compared by equality.
///
/// # Arguments
///
/// * `series` - The series identifier column
/// * `features` - The feature flag column
///
/// # Returns
///
/// * `Result<Vec<Observation<NotNan<f64>>>, CoincidenceError>` - The
///   observations, or the first validation failure
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::observations_from_columns;
/// let observations = observations_from_columns(&[0.0, 1.0, f64::NAN], &[1.0, 0.0, 1.0]);
/// assert!(observations.is_ok());
/// if let Ok(observations) = observations {
///     assert!(observations[0].series().is_some());
///     assert!(observations[2].series().is_none());
/// }
/// ```
pub fn observations_from_columns(
    series: &[f64],
    features: &[f64],
) -> Result<Vec<Observation<NotNan<f64>>>, CoincidenceError> {
    if series.len() != features.len() {
        return Err(CoincidenceError::ColumnLengthMismatch {
            series: series.len(),
            features: features.len(),
        });
    }

    series
        .iter()
        .zip(features)
        .enumerate()
        .map(|(index, (&id, &flag))| {
            let feature = if flag == 0.0 {
                false
            } else if flag == 1.0 {
                true
            } else {
                return Err(CoincidenceError::FeatureNotBinary { index, value: flag });
            };

            Ok(match NotNan::new(id) {
                Ok(id) => Observation::new(id, feature),
                Err(_) => Observation::unlinked(feature),
            })
        })
        .collect()
}

/// Runs the whole pipeline on two parallel numeric columns
///
/// Validates and converts the columns, then streams every pair through the
/// aggregator and returns both partition summaries.
///
/// # Arguments
///
/// * `series` - The series identifier column
/// * `features` - The feature flag column
///
/// # Returns
///
/// * `Result<Proportions<T>, CoincidenceError>` - Both partition summaries,
///   or the first validation failure or empty partition
///
/// # Examples
///
/// ```
/// # use pairwise_coincidence::proportions_from_columns;
/// let p = proportions_from_columns::<f64>(&[0.0, 0.0, 1.0], &[1.0, 1.0, 0.0]);
/// assert!(p.is_ok());
/// if let Ok(p) = p {
///     assert_eq!(p.matching.proportion, 1.0);
///     assert_eq!(p.non_matching.proportion, 0.0);
/// }
/// ```
pub fn proportions_from_columns<T: Float>(
    series: &[f64],
    features: &[f64],
) -> Result<Proportions<T>, CoincidenceError> {
    let observations = observations_from_columns(series, features)?;
    proportions(&observations)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::tally;

    #[test]
    fn test_rejects_non_binary_features() {
        for bad in [2.0, 0.5, -1.0, f64::NAN] {
            let err = observations_from_columns(&[0.0, 1.0], &[0.0, bad]).unwrap_err();
            assert!(matches!(
                err,
                CoincidenceError::FeatureNotBinary { index: 1, .. }
            ));
        }

        let err = observations_from_columns(&[0.0], &[2.0]).unwrap_err();
        assert_eq!(
            err,
            CoincidenceError::FeatureNotBinary {
                index: 0,
                value: 2.0
            }
        );
    }

    #[test]
    fn test_negative_zero_feature_is_zero() {
        let observations = observations_from_columns(&[0.0, 1.0], &[-0.0, 1.0]).unwrap();
        assert!(!observations[0].feature());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let err = observations_from_columns(&[0.0, 1.0, 2.0], &[1.0]).unwrap_err();
        assert_eq!(
            err,
            CoincidenceError::ColumnLengthMismatch {
                series: 3,
                features: 1
            }
        );
    }

    #[test]
    fn test_nan_series_becomes_unlinked() {
        let observations = observations_from_columns(&[f64::NAN, 2.0], &[1.0, 1.0]).unwrap();
        assert_eq!(observations[0].series(), None);
        assert!(observations[1].series().is_some());
    }

    #[test]
    fn test_column_pipeline_matches_linked_case() {
        let series = [0.0, 1.0, 1.0, 2.0, 3.0, 3.0, 3.0, 4.0];
        let features = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0];

        let p = proportions_from_columns::<f64>(&series, &features).unwrap();
        assert_eq!(p.matching.pairs, 4);
        assert_eq!(p.non_matching.pairs, 24);
        assert_approx_eq!(p.matching.proportion, 0.75);
        assert_approx_eq!(p.non_matching.proportion, 0.125);
        assert_eq!(p.unlinked, 0);
    }

    #[test]
    fn test_column_pipeline_with_missing_ids() {
        let series = [0.0, 1.0, 1.0, 2.0, 3.0, f64::NAN, 3.0, 4.0];
        let features = [0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0];

        let p = proportions_from_columns::<f64>(&series, &features).unwrap();
        assert_eq!(p.unlinked, 7);
        assert_approx_eq!(p.matching.proportion, 0.5);
        assert_approx_eq!(p.non_matching.proportion, 2.0 / 19.0);
    }

    #[test]
    fn test_infinite_ids_compare_equal() {
        let observations =
            observations_from_columns(&[f64::INFINITY, f64::INFINITY], &[1.0, 1.0]).unwrap();
        let t = tally(&observations);

        assert_eq!(t.matching().pairs(), 1);
        assert_eq!(t.unlinked(), 0);
    }
}
