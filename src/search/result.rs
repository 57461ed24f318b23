//! Search outcome types.

use super::stats::SearchStatistics;
use crate::models::Solution;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// The whole search space was visited; the solution is optimal.
    Optimal,
    /// The time limit stopped the search; the solution is the best found so
    /// far and may not be optimal.
    Truncated,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Optimal => write!(f, "optimal"),
            Self::Truncated => write!(f, "truncated"),
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    status: SearchStatus,
    solution: Option<Solution>,
    statistics: SearchStatistics,
}

impl SearchOutcome {
    /// A completed search with its optimal solution.
    pub fn optimal(solution: Solution, statistics: SearchStatistics) -> Self {
        Self {
            status: SearchStatus::Optimal,
            solution: Some(solution),
            statistics,
        }
    }

    /// A search stopped by the time limit, with the best solution so far.
    pub fn truncated(solution: Option<Solution>, statistics: SearchStatistics) -> Self {
        Self {
            status: SearchStatus::Truncated,
            solution,
            statistics,
        }
    }

    /// How the search ended.
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Returns `true` if the solution is proven optimal.
    pub fn is_optimal(&self) -> bool {
        self.status == SearchStatus::Optimal
    }

    /// The best solution found. Always present for an optimal outcome.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Consumes the outcome, returning the solution.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }

    /// Search statistics.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }
}
