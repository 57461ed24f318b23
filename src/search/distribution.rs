//! Job-count distributions across vehicle slots.
//!
//! A distribution says how many jobs each slot receives before jobs or
//! vehicles are bound to slots. Since vehicles are permuted over slots later,
//! only distinct multisets matter: counts are kept non-increasing and every
//! multiset is generated exactly once.
//!
//! # Complexity
//!
//! The number of distributions is the number of partitions of `J` into at
//! most `V` parts, which is tiny next to the `J!` orderings explored per
//! distribution.

use std::ops::Range;

use super::config::DistributionOrder;
use crate::error::{Result, RoutingError};

/// Non-increasing job counts, one per vehicle slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Distribution {
    counts: Vec<usize>,
}

impl Distribution {
    /// Job counts in slot order.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if there are no slots.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of jobs.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Smallest count, i.e. the last slot.
    pub fn smallest(&self) -> usize {
        self.counts.last().copied().unwrap_or(0)
    }

    /// Contiguous ranges of an ordering that each slot receives.
    ///
    /// ```
    /// use u_makespan::search::distributions;
    /// use u_makespan::search::DistributionOrder;
    ///
    /// let all = distributions(2, 3, DistributionOrder::Generated).unwrap();
    /// let ranges: Vec<_> = all[0].slices().collect();
    /// assert_eq!(ranges, vec![0..3, 3..3]);
    /// ```
    pub fn slices(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.counts.iter().scan(0, |start, &count| {
            let range = *start..*start + count;
            *start += count;
            Some(range)
        })
    }
}

/// Generates every distribution of `num_jobs` over `num_vehicles` slots.
///
/// Each distinct non-increasing tuple appears exactly once. With
/// [`DistributionOrder::BalancedFirst`] the result is stably sorted so that
/// larger smallest counts come first.
///
/// # Errors
///
/// [`RoutingError::DistributionInvariantViolation`] if a generated tuple does
/// not have `num_vehicles` entries summing to `num_jobs`. This indicates a
/// defect and the search must not continue.
///
/// # Examples
///
/// ```
/// use u_makespan::search::{distributions, DistributionOrder};
///
/// let all = distributions(3, 4, DistributionOrder::BalancedFirst).unwrap();
/// let counts: Vec<&[usize]> = all.iter().map(|d| d.counts()).collect();
/// assert_eq!(counts[0], &[2, 1, 1]);
/// assert_eq!(all.len(), 4); // 4+0+0, 3+1+0, 2+2+0, 2+1+1
/// ```
pub fn distributions(
    num_vehicles: usize,
    num_jobs: usize,
    order: DistributionOrder,
) -> Result<Vec<Distribution>> {
    let mut out = Vec::new();
    let mut current = Vec::with_capacity(num_vehicles);
    partitions(num_jobs, num_vehicles, num_jobs, &mut current, &mut out);

    for d in &out {
        if d.len() != num_vehicles || d.total() != num_jobs {
            return Err(RoutingError::DistributionInvariantViolation {
                counts: d.counts.clone(),
                expected_sum: num_jobs,
            });
        }
    }

    if order == DistributionOrder::BalancedFirst {
        out.sort_by(|a, b| b.smallest().cmp(&a.smallest()));
    }
    Ok(out)
}

/// Appends every non-increasing tuple of `slots` parts, each at most
/// `max_part`, summing to `remaining`.
fn partitions(
    remaining: usize,
    slots: usize,
    max_part: usize,
    current: &mut Vec<usize>,
    out: &mut Vec<Distribution>,
) {
    if slots == 0 {
        if remaining == 0 {
            out.push(Distribution {
                counts: current.clone(),
            });
        }
        return;
    }
    // The remaining slots can absorb at most `slots * part` jobs.
    for part in (0..=max_part.min(remaining)).rev() {
        if part * slots < remaining {
            break;
        }
        current.push(part);
        partitions(remaining - part, slots - 1, part, current, out);
        current.pop();
    }
}
