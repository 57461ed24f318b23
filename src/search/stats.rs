//! Counters collected while searching.

use std::time::Duration;

/// Statistics of one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStatistics {
    /// Distributions generated.
    pub distributions: u64,
    /// (distribution, ordering) branches visited.
    pub orderings_explored: u64,
    /// Branches abandoned by the pruning guard.
    pub branches_pruned: u64,
    /// Vehicle-to-slot assignments scored.
    pub assignments_evaluated: u64,
    /// Times the best makespan strictly improved.
    pub improvements: u64,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
}

impl SearchStatistics {
    #[inline]
    pub(crate) fn on_ordering(&mut self) {
        self.orderings_explored = self.orderings_explored.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_pruned(&mut self) {
        self.branches_pruned = self.branches_pruned.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_assignment(&mut self) {
        self.assignments_evaluated = self.assignments_evaluated.saturating_add(1);
    }

    #[inline]
    pub(crate) fn on_improvement(&mut self) {
        self.improvements = self.improvements.saturating_add(1);
    }

    /// Adds the counters of a parallel shard. Elapsed time is not summed.
    pub fn merge(&mut self, other: &SearchStatistics) {
        self.orderings_explored = self
            .orderings_explored
            .saturating_add(other.orderings_explored);
        self.branches_pruned = self.branches_pruned.saturating_add(other.branches_pruned);
        self.assignments_evaluated = self
            .assignments_evaluated
            .saturating_add(other.assignments_evaluated);
        self.improvements = self.improvements.saturating_add(other.improvements);
    }
}

impl std::fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Search statistics:")?;
        writeln!(f, "  Distributions:          {}", self.distributions)?;
        writeln!(f, "  Orderings explored:     {}", self.orderings_explored)?;
        writeln!(f, "  Branches pruned:        {}", self.branches_pruned)?;
        writeln!(f, "  Assignments evaluated:  {}", self.assignments_evaluated)?;
        writeln!(f, "  Improvements:           {}", self.improvements)?;
        writeln!(f, "  Total time:             {:.2?}", self.elapsed)?;
        Ok(())
    }
}
