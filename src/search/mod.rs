//! Exact min-max search.
//!
//! - [`min_start_leg`] — Global lower bound on any route's first leg
//! - [`distributions`] — Job-count distributions over vehicle slots
//! - [`next_permutation`] — Job orderings and vehicle assignments
//! - [`internal_duration`] — Travel time within a segment
//! - [`PruningGuard`] — Early abandonment of dominated branches
//! - [`assign_vehicles`] — Best vehicle permutation for a branch
//! - [`BestTracker`] / [`SharedBestTracker`] — Best solution so far
//! - [`MinMaxSolver`] — The full search, sequential or parallel

mod assigner;
mod branch;
mod config;
mod deadline;
mod distribution;
mod permutation;
mod pruning;
mod result;
mod scorer;
mod solver;
mod stats;
mod threshold;
mod tracker;

pub use assigner::{assign_vehicles, AssignmentCandidate};
pub use branch::BranchEvaluator;
pub use config::{DistributionOrder, SolverConfig};
pub use deadline::Deadline;
pub use distribution::{distributions, Distribution};
pub use permutation::{factorial, identity, next_permutation};
pub use pruning::{BranchControl, PruningGuard};
pub use result::{SearchOutcome, SearchStatus};
pub use scorer::internal_duration;
pub use solver::{solve_indices, MinMaxSolver};
pub use stats::SearchStatistics;
pub use threshold::min_start_leg;
pub use tracker::{BestTracker, IncumbentStore, NoSharedIncumbent, SharedBestTracker};
