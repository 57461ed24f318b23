//! Route segments and vehicle assignments.

use crate::distance::DistanceMatrix;

/// A contiguous run of job locations served by one vehicle, in visit order.
///
/// The internal duration covers travel between consecutive jobs only; the
/// leg from the vehicle's start to the first job depends on which vehicle
/// serves the segment and is added by [`Assignment`].
///
/// # Examples
///
/// ```
/// use u_makespan::models::RouteSegment;
///
/// let seg = RouteSegment::new(vec![3, 5], 12.0);
/// assert_eq!(seg.first(), Some(3));
/// assert_eq!(seg.len(), 2);
/// assert!(RouteSegment::empty().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    locations: Vec<usize>,
    internal_duration: f64,
}

impl RouteSegment {
    /// Creates a segment with a precomputed internal duration.
    pub fn new(locations: Vec<usize>, internal_duration: f64) -> Self {
        Self {
            locations,
            internal_duration,
        }
    }

    /// A segment without jobs, i.e. an idle vehicle.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Job locations in visit order.
    pub fn locations(&self) -> &[usize] {
        &self.locations
    }

    /// First job location, if any.
    pub fn first(&self) -> Option<usize> {
        self.locations.first().copied()
    }

    /// Number of jobs in this segment.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Returns `true` if no job is served.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Travel duration between consecutive jobs.
    pub fn internal_duration(&self) -> f64 {
        self.internal_duration
    }

    /// Total route duration when served from `start`.
    ///
    /// Returns `None` for an empty segment: an idle vehicle has no duration.
    #[inline]
    pub fn duration_from(&self, distances: &DistanceMatrix, start: usize) -> Option<f64> {
        self.first()
            .map(|first| distances.get(start, first) + self.internal_duration)
    }
}

/// Vehicles paired positionally with route segments.
///
/// `vehicle_starts[k]` serves `segments[k]`.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    vehicle_starts: &'a [usize],
    segments: &'a [RouteSegment],
}

impl<'a> Assignment<'a> {
    /// Pairs vehicle start locations with segments.
    ///
    /// Both slices must have the same length.
    pub fn new(vehicle_starts: &'a [usize], segments: &'a [RouteSegment]) -> Self {
        debug_assert_eq!(vehicle_starts.len(), segments.len());
        Self {
            vehicle_starts,
            segments,
        }
    }

    /// The longest route duration over vehicles with at least one job.
    ///
    /// Zero if every segment is empty.
    pub fn makespan(&self, distances: &DistanceMatrix) -> f64 {
        self.vehicle_starts
            .iter()
            .zip(self.segments)
            .filter_map(|(&start, seg)| seg.duration_from(distances, start))
            .fold(0.0, f64::max)
    }
}
