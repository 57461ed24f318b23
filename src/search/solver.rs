//! Exhaustive min-max search with pruning.
//!
//! # Algorithm
//!
//! 1. Compute the shortest vehicle-to-job leg as a global lower bound.
//! 2. For each job-count distribution (balanced ones first by default), for
//!    each ordering of the jobs, cut the ordering into one segment per slot.
//! 3. Abandon the branch as soon as a segment's internal duration plus the
//!    lower bound reaches the best makespan found so far.
//! 4. Otherwise try every vehicle permutation over the slots and keep the
//!    best strictly improving assignment.
//!
//! # Complexity
//!
//! O(P(J, V) · J! · V! · V) in the worst case, where P(J, V) is the number of
//! partitions of J into at most V parts. Pruning cuts most branches in
//! practice, which is what keeps a handful of vehicles and jobs tractable.

use rayon::prelude::*;
use tracing::{debug, info};

use super::branch::BranchEvaluator;
use super::config::SolverConfig;
use super::deadline::Deadline;
use super::distribution::{distributions, Distribution};
use super::permutation::{factorial, identity, next_permutation};
use super::pruning::PruningGuard;
use super::result::{SearchOutcome, SearchStatus};
use super::stats::SearchStatistics;
use super::threshold::min_start_leg;
use super::tracker::{BestTracker, IncumbentStore, NoSharedIncumbent, SharedBestTracker};
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};
use crate::models::{Instance, RouteSegment, Solution};

/// Exact solver for the min-max vehicle routing problem.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::models::{Instance, Job, Vehicle};
/// use u_makespan::search::{MinMaxSolver, SolverConfig};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0, 2.0, 9.0],
///     vec![5.0, 0.0, 9.0, 2.0],
///     vec![2.0, 9.0, 0.0, 7.0],
///     vec![9.0, 2.0, 7.0, 0.0],
/// ]).unwrap();
/// let instance = Instance::new(
///     vec![Vehicle::new("v0", 0), Vehicle::new("v1", 1)],
///     vec![Job::new("a", 2), Job::new("b", 3)],
///     dm,
/// ).unwrap();
///
/// let outcome = MinMaxSolver::new(SolverConfig::default()).solve(&instance).unwrap();
/// assert!(outcome.is_optimal());
/// assert_eq!(outcome.solution().unwrap().makespan(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MinMaxSolver {
    config: SolverConfig,
}

impl MinMaxSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves a validated instance.
    pub fn solve(&self, instance: &Instance) -> Result<SearchOutcome> {
        solve_indices(
            &instance.vehicle_starts(),
            &instance.job_locations(),
            instance.distances(),
            (instance.num_vehicles(), instance.num_jobs()),
            &self.config,
        )
    }
}

/// Solves the problem given as raw location indices.
///
/// `counts` is `(V, J)` and must match the lengths of `vehicle_starts` and
/// `job_locations`. In the returned solution, slot `k` is served by vehicle
/// `vehicle_order()[k]` (a position in `vehicle_starts`).
///
/// # Errors
///
/// [`RoutingError::CountMismatch`] if `counts` disagrees with the slices,
/// [`RoutingError::EmptyInstance`] without vehicles, and
/// [`RoutingError::MatrixIndexOutOfRange`] for an invalid index. All are
/// reported before the search starts. With vehicles but no jobs, the
/// result is an optimal solution with makespan 0 and every vehicle idle.
pub fn solve_indices(
    vehicle_starts: &[usize],
    job_locations: &[usize],
    distances: &DistanceMatrix,
    counts: (usize, usize),
    config: &SolverConfig,
) -> Result<SearchOutcome> {
    let (num_vehicles, num_jobs) = counts;
    check_count("vehicles", num_vehicles, vehicle_starts.len())?;
    check_count("jobs", num_jobs, job_locations.len())?;
    if num_vehicles == 0 {
        return Err(RoutingError::EmptyInstance {
            vehicles: 0,
            jobs: num_jobs,
        });
    }
    for &index in vehicle_starts.iter().chain(job_locations) {
        distances.check_index(index)?;
    }
    distances.check_durations()?;

    let mut deadline = Deadline::new(config.time_limit(), config.check_interval());

    if num_jobs == 0 {
        info!(vehicles = num_vehicles, "no jobs to route, every vehicle stays idle");
        let solution = Solution::new(
            vec![RouteSegment::empty(); num_vehicles],
            identity(num_vehicles),
            vehicle_starts.to_vec(),
            0.0,
        );
        let statistics = SearchStatistics {
            elapsed: deadline.elapsed(),
            ..SearchStatistics::default()
        };
        return Ok(SearchOutcome::optimal(solution, statistics));
    }

    let threshold = min_start_leg(distances, vehicle_starts, job_locations)?;
    let distributions = distributions(num_vehicles, num_jobs, config.distribution_order())?;
    let guard = if config.pruning() {
        PruningGuard::new(threshold)
    } else {
        PruningGuard::disabled()
    };

    info!(
        vehicles = num_vehicles,
        jobs = num_jobs,
        distributions = distributions.len(),
        orderings_per_distribution = factorial(num_jobs),
        threshold,
        pruning = config.pruning(),
        parallel = config.parallel(),
        "starting min-max search"
    );

    let evaluator = BranchEvaluator::new(distances, vehicle_starts, job_locations, guard);
    let (progress, solution, mut statistics) = if config.parallel() {
        run_parallel(&evaluator, &distributions, &deadline)
    } else {
        run_sequential(&evaluator, &distributions, &mut deadline)
    };
    statistics.distributions = distributions.len() as u64;
    statistics.elapsed = deadline.elapsed();

    let outcome = match (progress, solution) {
        (Progress::Exhausted, Some(solution)) => SearchOutcome::optimal(solution, statistics),
        (Progress::Stopped, solution) => SearchOutcome::truncated(solution, statistics),
        (Progress::Exhausted, None) => {
            unreachable!("an exhausted search over a non-empty instance always finds a solution")
        }
    };

    info!(
        status = %outcome.status(),
        makespan = outcome.solution().map(Solution::makespan),
        orderings = outcome.statistics().orderings_explored,
        pruned = outcome.statistics().branches_pruned,
        elapsed = ?outcome.statistics().elapsed,
        "min-max search finished"
    );
    if outcome.status() == SearchStatus::Truncated {
        info!("time limit reached; the reported makespan is not proven optimal");
    }
    Ok(outcome)
}

fn check_count(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(RoutingError::CountMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Whether an ordering loop visited all its orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Progress {
    Exhausted,
    Stopped,
}

/// Per-loop search state: the local best, the bound source and the clock.
struct Worker<'s, S: ?Sized> {
    tracker: BestTracker,
    store: &'s S,
    deadline: Deadline,
    stats: SearchStatistics,
}

impl<'s, S> Worker<'s, S>
where
    S: IncumbentStore + ?Sized,
{
    fn new(store: &'s S, deadline: Deadline) -> Self {
        Self {
            tracker: BestTracker::new(),
            store,
            deadline,
            stats: SearchStatistics::default(),
        }
    }

    /// Visits every permutation of `ordering[fixed..]` for one distribution.
    fn explore_orderings(
        &mut self,
        evaluator: &BranchEvaluator<'_>,
        distribution: &Distribution,
        ordering: &mut [usize],
        fixed: usize,
    ) -> Progress {
        loop {
            if self.deadline.expired() {
                return Progress::Stopped;
            }
            self.stats.on_ordering();

            let bound = self.store.tighten(self.tracker.makespan());
            let found = evaluator.evaluate(distribution, ordering, bound, &mut self.stats);
            if let Some(solution) = found {
                debug!(
                    makespan = solution.makespan(),
                    counts = ?distribution.counts(),
                    "improved makespan"
                );
                self.store.on_solution_found(&solution);
                if self.tracker.offer(solution) {
                    self.stats.on_improvement();
                }
            }

            if !next_permutation(&mut ordering[fixed..]) {
                return Progress::Exhausted;
            }
        }
    }
}

fn run_sequential(
    evaluator: &BranchEvaluator<'_>,
    distributions: &[Distribution],
    deadline: &mut Deadline,
) -> (Progress, Option<Solution>, SearchStatistics) {
    let mut worker = Worker::new(&NoSharedIncumbent, deadline.clone());
    let mut progress = Progress::Exhausted;

    for distribution in distributions {
        debug!(
            counts = ?distribution.counts(),
            best = worker.tracker.makespan(),
            "exploring distribution"
        );
        let mut ordering = identity(evaluator.num_jobs());
        progress = worker.explore_orderings(evaluator, distribution, &mut ordering, 0);
        if progress == Progress::Stopped {
            break;
        }
    }

    *deadline = worker.deadline;
    (progress, worker.tracker.into_solution(), worker.stats)
}

/// Shards the search by (distribution, first job) and runs shards on rayon.
fn run_parallel(
    evaluator: &BranchEvaluator<'_>,
    distributions: &[Distribution],
    deadline: &Deadline,
) -> (Progress, Option<Solution>, SearchStatistics) {
    let num_jobs = evaluator.num_jobs();
    let shards: Vec<(usize, usize)> = (0..distributions.len())
        .flat_map(|d| (0..num_jobs).map(move |first| (d, first)))
        .collect();
    debug!(shards = shards.len(), "running parallel search");

    let shared = SharedBestTracker::new();
    let results: Vec<(Progress, SearchStatistics)> = shards
        .par_iter()
        .map(|&(d, first)| {
            let mut worker = Worker::new(&shared, deadline.clone());
            if worker.deadline.expired_now() {
                return (Progress::Stopped, worker.stats);
            }
            let mut ordering = shard_ordering(num_jobs, first);
            let progress = worker.explore_orderings(evaluator, &distributions[d], &mut ordering, 1);
            (progress, worker.stats)
        })
        .collect();

    let mut statistics = SearchStatistics::default();
    let mut progress = Progress::Exhausted;
    for (shard_progress, shard_stats) in &results {
        statistics.merge(shard_stats);
        if *shard_progress == Progress::Stopped {
            progress = Progress::Stopped;
        }
    }
    (progress, shared.into_solution(), statistics)
}

/// `first` followed by the remaining job positions in ascending order.
fn shard_ordering(num_jobs: usize, first: usize) -> Vec<usize> {
    std::iter::once(first)
        .chain((0..num_jobs).filter(|&job| job != first))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Vehicle};
    use crate::search::config::DistributionOrder;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::time::Duration;

    fn scenario() -> (Vec<usize>, Vec<usize>, DistanceMatrix) {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 5.0, 2.0, 9.0],
            vec![5.0, 0.0, 9.0, 2.0],
            vec![2.0, 9.0, 0.0, 7.0],
            vec![9.0, 2.0, 7.0, 0.0],
        ])
        .expect("valid");
        (vec![0, 1], vec![2, 3], dm)
    }

    fn solve(instance: &Instance, config: SolverConfig) -> SearchOutcome {
        MinMaxSolver::new(config).solve(instance).expect("valid instance")
    }

    fn makespan(instance: &Instance, config: SolverConfig) -> f64 {
        solve(instance, config)
            .solution()
            .expect("complete search has a solution")
            .makespan()
    }

    /// Every job is served once and the stored makespan matches the routes.
    fn assert_valid(instance: &Instance, solution: &Solution) {
        let served: Vec<usize> = solution
            .segments()
            .iter()
            .flat_map(|s| s.locations().iter().copied())
            .collect();
        let unique: HashSet<usize> = served.iter().copied().collect();
        assert_eq!(served.len(), instance.num_jobs());
        assert_eq!(unique, instance.job_locations().into_iter().collect());

        let order: HashSet<usize> = solution.vehicle_order().iter().copied().collect();
        assert_eq!(order.len(), instance.num_vehicles());

        assert_eq!(
            solution.recompute_makespan(instance.distances()),
            solution.makespan()
        );
    }

    #[test]
    fn test_two_vehicles_two_jobs() {
        let (starts, jobs, dm) = scenario();
        let outcome = solve_indices(&starts, &jobs, &dm, (2, 2), &SolverConfig::default())
            .expect("valid input");
        assert!(outcome.is_optimal());
        let sol = outcome.solution().expect("has solution");
        assert_eq!(sol.makespan(), 2.0);

        let routes: Vec<(usize, Vec<usize>)> = sol
            .routes()
            .map(|(start, seg)| (start, seg.locations().to_vec()))
            .collect();
        assert!(routes.contains(&(0, vec![2])));
        assert!(routes.contains(&(1, vec![3])));
    }

    #[test]
    fn test_single_vehicle_three_jobs() {
        let dm = DistanceMatrix::from_rows(vec![
            vec![0.0, 4.0, 6.0, 3.0],
            vec![4.0, 0.0, 2.0, 8.0],
            vec![6.0, 2.0, 0.0, 5.0],
            vec![3.0, 8.0, 5.0, 0.0],
        ])
        .expect("valid");
        let jobs = [1, 2, 3];

        // Minimum over all orderings of start leg plus internal duration.
        let mut ordering = jobs.to_vec();
        ordering.sort_unstable();
        let mut expected = f64::INFINITY;
        loop {
            let d = dm.get(0, ordering[0])
                + crate::search::scorer::internal_duration(&dm, &ordering);
            expected = expected.min(d);
            if !next_permutation(&mut ordering) {
                break;
            }
        }

        let outcome =
            solve_indices(&[0], &jobs, &dm, (1, 3), &SolverConfig::default()).expect("valid");
        assert_eq!(outcome.statistics().distributions, 1);
        assert_eq!(outcome.solution().expect("solution").makespan(), expected);
        // 0 -> 3 -> 2 -> 1 = 3 + 5 + 2
        assert_eq!(expected, 10.0);
    }

    #[test]
    fn test_no_jobs() {
        let (starts, _, dm) = scenario();
        let outcome =
            solve_indices(&starts, &[], &dm, (2, 0), &SolverConfig::default()).expect("valid");
        assert!(outcome.is_optimal());
        let sol = outcome.solution().expect("solution");
        assert_eq!(sol.makespan(), 0.0);
        assert_eq!(sol.num_idle(), 2);
        assert_eq!(sol.segments().len(), 2);
    }

    #[test]
    fn test_no_vehicles() {
        let (_, jobs, dm) = scenario();
        let err = solve_indices(&[], &jobs, &dm, (0, 2), &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::EmptyInstance {
                vehicles: 0,
                jobs: 2
            }
        ));
    }

    #[test]
    fn test_count_mismatch() {
        let (starts, jobs, dm) = scenario();
        let err = solve_indices(&starts, &jobs, &dm, (2, 3), &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::CountMismatch {
                what: "jobs",
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_rejected_durations_keep_search_sound() {
        let mut dm = DistanceMatrix::new(3);
        dm.set(0, 1, 4.0).expect("valid");
        dm.set(0, 2, 6.0).expect("valid");
        dm.set(1, 2, 3.0).expect("valid");
        dm.set(2, 1, 3.0).expect("valid");
        assert!(dm.set(1, 2, f64::INFINITY).is_err());
        assert!(dm.set(2, 1, f64::INFINITY).is_err());
        assert!(dm.set(0, 1, f64::NAN).is_err());

        for config in [
            SolverConfig::default(),
            SolverConfig::default().with_pruning(false),
            SolverConfig::default().with_parallel(true),
        ] {
            let outcome = solve_indices(&[0], &[1, 2], &dm, (1, 2), &config).expect("valid");
            assert!(outcome.is_optimal());
            // 0 -> 1 -> 2 = 4 + 3
            assert_eq!(outcome.solution().expect("solution").makespan(), 7.0);
        }
    }

    #[test]
    fn test_index_out_of_range() {
        let (starts, _, dm) = scenario();
        let err =
            solve_indices(&starts, &[2, 4], &dm, (2, 2), &SolverConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::MatrixIndexOutOfRange { index: 4, size: 4 }
        ));
    }

    #[test]
    fn test_solution_is_valid() {
        for seed in 0..5 {
            let instance = Instance::random(3, 5, 100, seed);
            let outcome = solve(&instance, SolverConfig::default());
            assert_valid(&instance, outcome.solution().expect("solution"));
        }
    }

    #[test]
    fn test_pruning_equivalence() {
        for seed in 0..8 {
            let instance = Instance::random(3, 5, 60, seed);
            let pruned = solve(&instance, SolverConfig::default());
            let full = solve(&instance, SolverConfig::default().with_pruning(false));
            assert_eq!(
                pruned.solution().map(Solution::makespan),
                full.solution().map(Solution::makespan),
                "seed {seed}"
            );
            assert_valid(&instance, pruned.solution().expect("pruned solution"));
            assert_valid(&instance, full.solution().expect("unpruned solution"));
            assert_eq!(full.statistics().branches_pruned, 0);
            assert_eq!(
                pruned.statistics().orderings_explored,
                full.statistics().orderings_explored
            );
        }
    }

    #[test]
    fn test_pruning_cuts_branches() {
        let instance = Instance::random(3, 5, 60, 11);
        let pruned = solve(&instance, SolverConfig::default());
        let full = solve(&instance, SolverConfig::default().with_pruning(false));
        assert!(pruned.statistics().branches_pruned > 0);
        assert!(
            pruned.statistics().assignments_evaluated < full.statistics().assignments_evaluated
        );
    }

    #[test]
    fn test_distribution_order_invariance() {
        for seed in 0..5 {
            let instance = Instance::random(3, 4, 60, seed);
            let balanced = makespan(&instance, SolverConfig::default());
            let generated = makespan(
                &instance,
                SolverConfig::default().with_distribution_order(DistributionOrder::Generated),
            );
            assert_eq!(balanced, generated, "seed {seed}");
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        for seed in 0..5 {
            let instance = Instance::random(3, 5, 60, seed);
            let sequential = makespan(&instance, SolverConfig::default());
            let outcome = solve(&instance, SolverConfig::default().with_parallel(true));
            assert!(outcome.is_optimal());
            let sol = outcome.solution().expect("solution");
            assert_eq!(sol.makespan(), sequential, "seed {seed}");
            assert_valid(&instance, sol);
        }
    }

    #[test]
    fn test_parallel_explores_every_ordering_without_pruning() {
        let instance = Instance::random(2, 4, 60, 3);
        let outcome = solve(
            &instance,
            SolverConfig::default()
                .with_parallel(true)
                .with_pruning(false),
        );
        // 3 distributions of 4 jobs over 2 slots, 4! orderings each.
        assert_eq!(outcome.statistics().orderings_explored, 3 * 24);
    }

    #[test]
    fn test_time_limit_truncates() {
        let instance = Instance::random(3, 6, 60, 1);
        let outcome = solve(
            &instance,
            SolverConfig::default()
                .with_time_limit(Duration::ZERO)
                .with_check_interval(1),
        );
        assert_eq!(outcome.status(), SearchStatus::Truncated);
        assert!(outcome.solution().is_none());
        assert_eq!(outcome.statistics().orderings_explored, 0);
    }

    #[test]
    fn test_time_limit_truncates_parallel() {
        let instance = Instance::random(3, 6, 60, 1);
        let outcome = solve(
            &instance,
            SolverConfig::default()
                .with_parallel(true)
                .with_time_limit(Duration::ZERO),
        );
        assert!(!outcome.is_optimal());
    }

    #[test]
    fn test_generous_time_limit_is_optimal() {
        let instance = Instance::random(2, 4, 60, 5);
        let outcome = solve(
            &instance,
            SolverConfig::default().with_time_limit(Duration::from_secs(600)),
        );
        assert!(outcome.is_optimal());
    }

    #[test]
    fn test_more_vehicles_than_jobs() {
        let instance = Instance::new(
            vec![
                Vehicle::new("a", 0),
                Vehicle::new("b", 1),
                Vehicle::new("c", 2),
            ],
            vec![Job::new("x", 3)],
            DistanceMatrix::from_rows(vec![
                vec![0.0, 1.0, 1.0, 8.0],
                vec![1.0, 0.0, 1.0, 3.0],
                vec![1.0, 1.0, 0.0, 6.0],
                vec![8.0, 3.0, 6.0, 0.0],
            ])
            .expect("valid"),
        )
        .expect("valid");
        let outcome = solve(&instance, SolverConfig::default());
        let sol = outcome.solution().expect("solution");
        assert_eq!(sol.makespan(), 3.0);
        assert_eq!(sol.num_idle(), 2);
        assert_valid(&instance, sol);
    }

    #[test]
    fn test_shard_ordering() {
        assert_eq!(shard_ordering(4, 2), vec![2, 0, 1, 3]);
        assert_eq!(shard_ordering(1, 0), vec![0]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_pruning_never_changes_optimum(
            vehicles in 1usize..=3,
            jobs in 1usize..=4,
            seed in any::<u64>(),
        ) {
            let instance = Instance::random(vehicles, jobs, 50, seed);
            let pruned = makespan(&instance, SolverConfig::default());
            let full = makespan(&instance, SolverConfig::default().with_pruning(false));
            let parallel = makespan(&instance, SolverConfig::default().with_parallel(true));
            prop_assert_eq!(pruned, full);
            prop_assert_eq!(pruned, parallel);
        }

        #[test]
        fn prop_solution_covers_all_jobs(
            vehicles in 1usize..=3,
            jobs in 0usize..=4,
            seed in any::<u64>(),
        ) {
            let instance = Instance::random(vehicles, jobs, 50, seed);
            let outcome = solve(&instance, SolverConfig::default());
            prop_assert!(outcome.is_optimal());
            let sol = outcome.solution().expect("solution");
            prop_assert_eq!(sol.num_served(), jobs);
            prop_assert_eq!(sol.recompute_makespan(instance.distances()), sol.makespan());
        }
    }
}
