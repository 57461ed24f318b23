//! Internal duration of a job sequence.

use crate::distance::DistanceMatrix;

/// Sum of travel durations between consecutive locations of `sequence`.
///
/// Sequences of length 0 or 1 score 0. The leg from a vehicle's start to the
/// first location is not included.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::search::internal_duration;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 1.0, 9.0],
///     vec![4.0, 0.0, 2.0],
///     vec![9.0, 3.0, 0.0],
/// ]).unwrap();
/// assert_eq!(internal_duration(&dm, &[0, 1, 2]), 3.0);
/// assert_eq!(internal_duration(&dm, &[2, 1, 0]), 7.0);
/// assert_eq!(internal_duration(&dm, &[1]), 0.0);
/// ```
#[inline]
pub fn internal_duration(distances: &DistanceMatrix, sequence: &[usize]) -> f64 {
    sequence
        .windows(2)
        .map(|pair| distances.get(pair[0], pair[1]))
        .sum()
}
