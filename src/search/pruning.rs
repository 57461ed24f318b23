//! Bound check applied to each route segment of a branch.

use crate::models::RouteSegment;

/// Outcome of checking one segment against the current best makespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchControl {
    /// Keep scoring the branch.
    Continue,
    /// No assignment of this branch can beat the bound; move to the next ordering.
    Abandon,
}

/// Abandons branches containing a segment that cannot beat the best makespan.
///
/// A segment served by any vehicle takes at least its internal duration plus
/// the global shortest start leg. If that already reaches the best known
/// makespan, the whole branch is dominated.
///
/// # Examples
///
/// ```
/// use u_makespan::models::RouteSegment;
/// use u_makespan::search::{BranchControl, PruningGuard};
///
/// let guard = PruningGuard::new(2.0);
/// let seg = RouteSegment::new(vec![4, 5], 8.0);
/// assert_eq!(guard.check(&seg, 10.0), BranchControl::Abandon);
/// assert_eq!(guard.check(&seg, 10.5), BranchControl::Continue);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PruningGuard {
    threshold: f64,
    enabled: bool,
}

impl PruningGuard {
    /// Creates an active guard with the given start-leg lower bound.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            enabled: true,
        }
    }

    /// Creates a guard that never abandons a branch.
    pub fn disabled() -> Self {
        Self {
            threshold: 0.0,
            enabled: false,
        }
    }

    /// The start-leg lower bound.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether the guard may abandon branches.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Checks a freshly scored segment against `best`.
    ///
    /// Empty segments never abandon a branch.
    #[inline]
    pub fn check(&self, segment: &RouteSegment, best: f64) -> BranchControl {
        if !self.enabled || segment.is_empty() {
            return BranchControl::Continue;
        }
        if segment.internal_duration() + self.threshold >= best {
            BranchControl::Abandon
        } else {
            BranchControl::Continue
        }
    }
}
