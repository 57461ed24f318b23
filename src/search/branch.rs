//! Evaluation of a single (distribution, ordering) branch.

use super::assigner::assign_vehicles;
use super::distribution::Distribution;
use super::pruning::{BranchControl, PruningGuard};
use super::scorer::internal_duration;
use super::stats::SearchStatistics;
use crate::distance::DistanceMatrix;
use crate::models::{RouteSegment, Solution};

/// Scores one branch: cuts an ordering into segments, applies the pruning
/// guard to each, then assigns vehicles to the surviving segments.
///
/// Evaluation depends only on the read-only inputs and the bound passed in,
/// so branches can be evaluated in any order or on any thread.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::search::{
///     distributions, BranchEvaluator, DistributionOrder, PruningGuard, SearchStatistics,
/// };
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 2.0, 9.0],
///     vec![5.0, 0.0, 9.0, 2.0],
///     vec![2.0, 9.0, 0.0, 7.0],
///     vec![9.0, 2.0, 7.0, 0.0],
/// ]).unwrap();
/// let eval = BranchEvaluator::new(&dm, &[0, 1], &[2, 3], PruningGuard::new(2.0));
/// let balanced = &distributions(2, 2, DistributionOrder::BalancedFirst).unwrap()[0];
/// let mut stats = SearchStatistics::default();
///
/// let sol = eval.evaluate(balanced, &[0, 1], f64::INFINITY, &mut stats).unwrap();
/// assert_eq!(sol.makespan(), 2.0);
/// // Nothing beats a makespan of 2 on this instance.
/// assert!(eval.evaluate(balanced, &[1, 0], 2.0, &mut stats).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BranchEvaluator<'a> {
    distances: &'a DistanceMatrix,
    vehicle_starts: &'a [usize],
    job_locations: &'a [usize],
    guard: PruningGuard,
}

impl<'a> BranchEvaluator<'a> {
    /// Creates an evaluator over validated inputs.
    pub fn new(
        distances: &'a DistanceMatrix,
        vehicle_starts: &'a [usize],
        job_locations: &'a [usize],
        guard: PruningGuard,
    ) -> Self {
        Self {
            distances,
            vehicle_starts,
            job_locations,
            guard,
        }
    }

    /// Number of jobs.
    pub fn num_jobs(&self) -> usize {
        self.job_locations.len()
    }

    /// Evaluates one branch against `bound`.
    ///
    /// `ordering` is a permutation of job positions `0..J`. Returns the best
    /// solution of this branch with a makespan strictly below `bound`, or
    /// `None` if the branch was abandoned or cannot improve on the bound.
    pub fn evaluate(
        &self,
        distribution: &Distribution,
        ordering: &[usize],
        bound: f64,
        stats: &mut SearchStatistics,
    ) -> Option<Solution> {
        debug_assert_eq!(ordering.len(), self.job_locations.len());

        let mut segments = Vec::with_capacity(distribution.len());
        for range in distribution.slices() {
            let locations: Vec<usize> = ordering[range]
                .iter()
                .map(|&job| self.job_locations[job])
                .collect();
            let internal = internal_duration(self.distances, &locations);
            let segment = RouteSegment::new(locations, internal);
            if self.guard.check(&segment, bound) == BranchControl::Abandon {
                stats.on_pruned();
                return None;
            }
            segments.push(segment);
        }

        let best = assign_vehicles(
            self.distances,
            self.vehicle_starts,
            &segments,
            bound,
            stats,
        )?;
        Some(Solution::new(
            segments,
            best.vehicle_order,
            best.vehicle_starts,
            best.makespan,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::config::DistributionOrder;
    use crate::search::distribution::distributions;

    fn matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 2.0, 9.0],
            vec![5.0, 0.0, 9.0, 2.0],
            vec![2.0, 9.0, 0.0, 7.0],
            vec![9.0, 2.0, 7.0, 0.0],
        ])
        .expect("valid")
    }

    #[test]
    fn test_abandon_skips_assignment() {
        let dm = matrix();
        let eval = BranchEvaluator::new(&dm, &[0, 1], &[2, 3], PruningGuard::new(2.0));
        let skewed = distributions(2, 2, DistributionOrder::Generated).expect("valid");
        // Generated order puts (2, 0) first: internal 7 + threshold 2 >= 9.
        assert_eq!(skewed[0].counts(), &[2, 0]);
        let mut stats = SearchStatistics::default();
        assert!(eval.evaluate(&skewed[0], &[0, 1], 9.0, &mut stats).is_none());
        assert_eq!(stats.branches_pruned, 1);
        assert_eq!(stats.assignments_evaluated, 0);
    }

    #[test]
    fn test_disabled_guard_still_respects_bound() {
        let dm = matrix();
        let eval = BranchEvaluator::new(&dm, &[0, 1], &[2, 3], PruningGuard::disabled());
        let all = distributions(2, 2, DistributionOrder::Generated).expect("valid");
        let mut stats = SearchStatistics::default();
        assert!(eval.evaluate(&all[0], &[0, 1], 9.0, &mut stats).is_none());
        assert_eq!(stats.branches_pruned, 0);
        assert_eq!(stats.assignments_evaluated, 2);
    }

    #[test]
    fn test_segments_follow_slot_order() {
        let dm = matrix();
        let eval = BranchEvaluator::new(&dm, &[0, 1], &[2, 3], PruningGuard::disabled());
        let all = distributions(2, 2, DistributionOrder::Generated).expect("valid");
        let mut stats = SearchStatistics::default();
        let sol = eval
            .evaluate(&all[0], &[1, 0], f64::INFINITY, &mut stats)
            .expect("improves on infinity");
        assert_eq!(sol.segments()[0].locations(), &[3, 2]);
        assert!(sol.segments()[1].is_empty());
        // 1 -> 3 -> 2 = 2 + 7
        assert_eq!(sol.makespan(), 9.0);
        assert_eq!(sol.vehicle_starts(), &[1, 0]);
    }
}
