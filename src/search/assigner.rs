//! Vehicle-to-slot assignment for a surviving branch.

use super::permutation::{identity, next_permutation};
use super::stats::SearchStatistics;
use crate::distance::DistanceMatrix;
use crate::models::RouteSegment;

/// Best vehicle permutation found for one branch.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentCandidate {
    /// Makespan of this assignment.
    pub makespan: f64,
    /// Input positions of the vehicles serving each slot.
    pub vehicle_order: Vec<usize>,
    /// Start locations of the vehicles serving each slot.
    pub vehicle_starts: Vec<usize>,
}

/// Tries every permutation of vehicles over the slots of `segments`.
///
/// Vehicle `vehicle_starts[order[k]]` serves `segments[k]`. Idle slots do not
/// contribute to the makespan. Returns the best assignment whose makespan is
/// strictly below `bound`, or `None` if no assignment improves on it.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::models::RouteSegment;
/// use u_makespan::search::{assign_vehicles, SearchStatistics};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 2.0, 9.0],
///     vec![5.0, 0.0, 9.0, 2.0],
///     vec![2.0, 9.0, 0.0, 7.0],
///     vec![9.0, 2.0, 7.0, 0.0],
/// ]).unwrap();
/// let segments = [RouteSegment::new(vec![3], 0.0), RouteSegment::new(vec![2], 0.0)];
/// let mut stats = SearchStatistics::default();
///
/// let best = assign_vehicles(&dm, &[0, 1], &segments, f64::INFINITY, &mut stats).unwrap();
/// assert_eq!(best.makespan, 2.0);
/// assert_eq!(best.vehicle_starts, vec![1, 0]);
/// ```
pub fn assign_vehicles(
    distances: &DistanceMatrix,
    vehicle_starts: &[usize],
    segments: &[RouteSegment],
    bound: f64,
    stats: &mut SearchStatistics,
) -> Option<AssignmentCandidate> {
    debug_assert_eq!(vehicle_starts.len(), segments.len());

    let mut order = identity(vehicle_starts.len());
    let mut bound = bound;
    let mut best: Option<Vec<usize>> = None;

    loop {
        stats.on_assignment();
        if let Some(makespan) = makespan_below(distances, vehicle_starts, &order, segments, bound)
        {
            bound = makespan;
            best = Some(order.clone());
        }
        if !next_permutation(&mut order) {
            break;
        }
    }

    best.map(|vehicle_order| AssignmentCandidate {
        makespan: bound,
        vehicle_starts: vehicle_order.iter().map(|&v| vehicle_starts[v]).collect(),
        vehicle_order,
    })
}

/// Makespan of one permutation, or `None` as soon as it reaches `bound`.
#[inline]
fn makespan_below(
    distances: &DistanceMatrix,
    vehicle_starts: &[usize],
    order: &[usize],
    segments: &[RouteSegment],
    bound: f64,
) -> Option<f64> {
    let mut makespan = 0.0f64;
    for (&v, segment) in order.iter().zip(segments) {
        if let Some(duration) = segment.duration_from(distances, vehicle_starts[v]) {
            if duration >= bound {
                return None;
            }
            makespan = makespan.max(duration);
        }
    }
    (makespan < bound).then_some(makespan)
}
