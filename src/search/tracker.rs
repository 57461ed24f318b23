//! Best solution holders.
//!
//! [`BestTracker`] is the owned, single-threaded holder threaded through the
//! search loops. [`SharedBestTracker`] coordinates parallel shards: a lock-free
//! upper bound for pruning reads, and a mutex-guarded solution as the source
//! of truth.
//!
//! [`IncumbentStore`] abstracts over "no sharing" and "shared with other
//! shards" so the same ordering loop serves both modes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::models::Solution;

/// The best solution found so far and its makespan.
///
/// Starts at an infinite makespan with no solution. The makespan only ever
/// decreases: [`offer`](Self::offer) accepts strictly better solutions only.
///
/// # Examples
///
/// ```
/// use u_makespan::models::{RouteSegment, Solution};
/// use u_makespan::search::BestTracker;
///
/// let mut tracker = BestTracker::new();
/// assert!(tracker.makespan().is_infinite());
///
/// let sol = Solution::new(vec![RouteSegment::empty()], vec![0], vec![0], 0.0);
/// assert!(tracker.offer(sol.clone()));
/// assert!(!tracker.offer(sol));
/// assert_eq!(tracker.makespan(), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct BestTracker {
    makespan: f64,
    solution: Option<Solution>,
}

impl Default for BestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl BestTracker {
    /// Creates a tracker with an infinite makespan and no solution.
    pub fn new() -> Self {
        Self {
            makespan: f64::INFINITY,
            solution: None,
        }
    }

    /// Current best makespan.
    pub fn makespan(&self) -> f64 {
        self.makespan
    }

    /// Current best solution, if any.
    pub fn solution(&self) -> Option<&Solution> {
        self.solution.as_ref()
    }

    /// Installs `candidate` if its makespan is strictly below the current one.
    pub fn offer(&mut self, candidate: Solution) -> bool {
        if candidate.makespan() >= self.makespan {
            return false;
        }
        self.makespan = candidate.makespan();
        self.solution = Some(candidate);
        true
    }

    /// Consumes the tracker, returning the best solution.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
    }
}

/// A best solution holder shared by parallel shards.
///
/// The makespan is stored as `f64` bits in an atomic. Makespans are
/// non-negative, and for non-negative floats (including `+inf`) the ordering
/// of the bit patterns matches the numeric ordering.
#[derive(Debug)]
pub struct SharedBestTracker {
    upper_bound: AtomicU64,
    solution: Mutex<Option<Solution>>,
}

impl Default for SharedBestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedBestTracker {
    /// Creates a shared tracker with an infinite bound and no solution.
    pub fn new() -> Self {
        Self {
            upper_bound: AtomicU64::new(f64::INFINITY.to_bits()),
            solution: Mutex::new(None),
        }
    }

    /// Current best makespan. May briefly lag behind an install in progress.
    #[inline]
    pub fn upper_bound(&self) -> f64 {
        f64::from_bits(self.upper_bound.load(Ordering::Relaxed))
    }

    /// Installs `candidate` if it is strictly better than the stored solution.
    pub fn try_install(&self, candidate: &Solution) -> bool {
        if candidate.makespan() >= self.upper_bound() {
            return false;
        }

        let mut guard = self.solution.lock().unwrap_or_else(PoisonError::into_inner);
        // Another shard may have installed a better solution while we waited.
        if let Some(current) = guard.as_ref() {
            if candidate.makespan() >= current.makespan() {
                return false;
            }
        }
        *guard = Some(candidate.clone());
        self.upper_bound
            .store(candidate.makespan().to_bits(), Ordering::Relaxed);
        true
    }

    /// A copy of the current best solution, if any.
    pub fn snapshot(&self) -> Option<Solution> {
        self.solution
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Consumes the tracker, returning the best solution.
    pub fn into_solution(self) -> Option<Solution> {
        self.solution
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Source of the pruning bound and sink of improvements for one search loop.
pub trait IncumbentStore {
    /// Combines the loop's own best makespan with any externally known bound.
    fn tighten(&self, local_best: f64) -> f64;
    /// Called whenever the loop finds a strictly better solution.
    fn on_solution_found(&self, solution: &Solution);
}

/// Store for a single search loop that shares nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSharedIncumbent;

impl IncumbentStore for NoSharedIncumbent {
    #[inline(always)]
    fn tighten(&self, local_best: f64) -> f64 {
        local_best
    }

    #[inline(always)]
    fn on_solution_found(&self, _: &Solution) {}
}

impl IncumbentStore for SharedBestTracker {
    #[inline]
    fn tighten(&self, local_best: f64) -> f64 {
        self.upper_bound().min(local_best)
    }

    #[inline]
    fn on_solution_found(&self, solution: &Solution) {
        self.try_install(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RouteSegment;
    use std::sync::Arc;

    fn solution(makespan: f64) -> Solution {
        Solution::new(
            vec![RouteSegment::new(vec![1], 0.0)],
            vec![0],
            vec![0],
            makespan,
        )
    }

    #[test]
    fn test_tracker_monotone() {
        let mut t = BestTracker::new();
        let mut history = vec![t.makespan()];
        for m in [10.0, 12.0, 7.0, 7.0, 9.0, 3.0] {
            t.offer(solution(m));
            history.push(t.makespan());
        }
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(t.makespan(), 3.0);
        assert_eq!(t.into_solution().map(|s| s.makespan()), Some(3.0));
    }

    #[test]
    fn test_tracker_empty() {
        let t = BestTracker::default();
        assert!(t.solution().is_none());
    }

    #[test]
    fn test_shared_install() {
        let shared = SharedBestTracker::new();
        assert!(shared.upper_bound().is_infinite());
        assert!(shared.try_install(&solution(20.0)));
        assert!(!shared.try_install(&solution(20.0)));
        assert!(!shared.try_install(&solution(25.0)));
        assert!(shared.try_install(&solution(0.0)));
        assert_eq!(shared.upper_bound(), 0.0);
        assert_eq!(shared.snapshot().map(|s| s.makespan()), Some(0.0));
    }

    #[test]
    fn test_shared_concurrent_minimum() {
        let shared = Arc::new(SharedBestTracker::new());
        let handles: Vec<_> = (0..8)
            .map(|k| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    for m in (0..50).rev() {
                        shared.try_install(&solution(f64::from(k * 100 + m)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread panicked");
        }
        assert_eq!(shared.upper_bound(), 0.0);
        let shared = Arc::try_unwrap(shared).expect("sole owner");
        assert_eq!(shared.into_solution().map(|s| s.makespan()), Some(0.0));
    }

    #[test]
    fn test_store_tighten() {
        let shared = SharedBestTracker::new();
        shared.try_install(&solution(5.0));
        assert_eq!(shared.tighten(8.0), 5.0);
        assert_eq!(shared.tighten(4.0), 4.0);
        assert_eq!(NoSharedIncumbent.tighten(8.0), 8.0);
    }
}
