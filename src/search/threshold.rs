//! Global lower bound on the first leg of any route.

use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Returns the shortest duration from any vehicle start to any job location.
///
/// Every non-empty route begins with such a leg, so this value is a lower
/// bound on the duration of any route that serves at least one job.
///
/// # Errors
///
/// [`RoutingError::EmptyInstance`] if either set is empty, and
/// [`RoutingError::MatrixIndexOutOfRange`] for an invalid index.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::search::min_start_leg;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 2.0, 9.0],
///     vec![5.0, 0.0, 9.0, 2.0],
///     vec![2.0, 9.0, 0.0, 7.0],
///     vec![9.0, 2.0, 7.0, 0.0],
/// ]).unwrap();
/// assert_eq!(min_start_leg(&dm, &[0, 1], &[2, 3]).unwrap(), 2.0);
/// ```
pub fn min_start_leg(
    distances: &DistanceMatrix,
    vehicle_starts: &[usize],
    job_locations: &[usize],
) -> Result<f64> {
    if vehicle_starts.is_empty() || job_locations.is_empty() {
        return Err(RoutingError::EmptyInstance {
            vehicles: vehicle_starts.len(),
            jobs: job_locations.len(),
        });
    }
    for &index in vehicle_starts.iter().chain(job_locations) {
        distances.check_index(index)?;
    }

    Ok(vehicle_starts
        .iter()
        .flat_map(|&v| job_locations.iter().map(move |&j| distances.get(v, j)))
        .fold(f64::INFINITY, f64::min))
}
