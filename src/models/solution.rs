//! Solution type.

use super::{Assignment, RouteSegment};
use crate::distance::DistanceMatrix;

/// A complete assignment of jobs to vehicles with its makespan.
///
/// Routes are kept in slot order: `vehicle_starts()[k]` serves
/// `segments()[k]`. `vehicle_order()[k]` is the position of that vehicle in
/// the input vehicle list.
///
/// # Examples
///
/// ```
/// use u_makespan::models::{RouteSegment, Solution};
///
/// let sol = Solution::new(
///     vec![RouteSegment::new(vec![2], 0.0), RouteSegment::empty()],
///     vec![0, 1],
///     vec![0, 1],
///     2.0,
/// );
/// assert_eq!(sol.makespan(), 2.0);
/// assert_eq!(sol.num_served(), 1);
/// assert_eq!(sol.num_idle(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    segments: Vec<RouteSegment>,
    vehicle_order: Vec<usize>,
    vehicle_starts: Vec<usize>,
    makespan: f64,
}

impl Solution {
    /// Creates a solution from slot-ordered segments and vehicles.
    pub fn new(
        segments: Vec<RouteSegment>,
        vehicle_order: Vec<usize>,
        vehicle_starts: Vec<usize>,
        makespan: f64,
    ) -> Self {
        debug_assert_eq!(segments.len(), vehicle_order.len());
        debug_assert_eq!(segments.len(), vehicle_starts.len());
        Self {
            segments,
            vehicle_order,
            vehicle_starts,
            makespan,
        }
    }

    /// Route segments in slot order.
    pub fn segments(&self) -> &[RouteSegment] {
        &self.segments
    }

    /// Input positions of the vehicles serving each slot.
    pub fn vehicle_order(&self) -> &[usize] {
        &self.vehicle_order
    }

    /// Start locations of the vehicles serving each slot.
    pub fn vehicle_starts(&self) -> &[usize] {
        &self.vehicle_starts
    }

    /// Iterates `(vehicle start, segment)` pairs in slot order.
    pub fn routes(&self) -> impl Iterator<Item = (usize, &RouteSegment)> + '_ {
        self.vehicle_starts.iter().copied().zip(&self.segments)
    }

    /// The longest route duration over non-idle vehicles.
    pub fn makespan(&self) -> f64 {
        self.makespan
    }

    /// Recomputes the makespan from the routes, ignoring the stored value.
    pub fn recompute_makespan(&self, distances: &DistanceMatrix) -> f64 {
        Assignment::new(&self.vehicle_starts, &self.segments).makespan(distances)
    }

    /// Total number of jobs served.
    pub fn num_served(&self) -> usize {
        self.segments.iter().map(RouteSegment::len).sum()
    }

    /// Number of vehicles without jobs.
    pub fn num_idle(&self) -> usize {
        self.segments.iter().filter(|s| s.is_empty()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_routes() {
        let sol = Solution::new(
            vec![RouteSegment::new(vec![3, 2], 7.0), RouteSegment::empty()],
            vec![1, 0],
            vec![1, 0],
            9.0,
        );
        let routes: Vec<_> = sol.routes().map(|(s, seg)| (s, seg.len())).collect();
        assert_eq!(routes, vec![(1, 2), (0, 0)]);
        assert_eq!(sol.num_served(), 2);
        assert_eq!(sol.num_idle(), 1);
    }

    #[test]
    fn test_recompute_makespan() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 2.0, 9.0],
            vec![5.0, 0.0, 9.0, 2.0],
            vec![2.0, 9.0, 0.0, 7.0],
            vec![9.0, 2.0, 7.0, 0.0],
        ])
        .expect("valid");
        let sol = Solution::new(
            vec![RouteSegment::new(vec![3, 2], 7.0), RouteSegment::empty()],
            vec![1, 0],
            vec![1, 0],
            9.0,
        );
        assert_eq!(sol.recompute_makespan(&dm), 9.0);
    }
}
