//! Location index to identifier lookup.

use std::collections::HashMap;

use crate::error::{Result, RoutingError};
use crate::models::{Identifier, Instance};

/// Maps vehicle start indices and job location indices back to identifiers.
///
/// A miss is reported as [`RoutingError::IdentifierNotFound`], never as a
/// placeholder value.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::io::IdentifierResolver;
/// use u_makespan::models::{Instance, Job, Vehicle};
///
/// let instance = Instance::new(
///     vec![Vehicle::new("v", 0)],
///     vec![Job::new("j", 1)],
///     DistanceMatrix::new(2),
/// ).unwrap();
/// let resolver = IdentifierResolver::new(&instance);
/// assert_eq!(resolver.vehicle(0).unwrap().as_str(), "v");
/// assert_eq!(resolver.job(1).unwrap().as_str(), "j");
/// assert!(resolver.job(0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct IdentifierResolver<'a> {
    vehicles: HashMap<usize, &'a Identifier>,
    jobs: HashMap<usize, &'a Identifier>,
}

impl<'a> IdentifierResolver<'a> {
    /// Indexes the identifiers of an instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            vehicles: instance
                .vehicles()
                .iter()
                .map(|v| (v.start_index(), v.id()))
                .collect(),
            jobs: instance
                .jobs()
                .iter()
                .map(|j| (j.location_index(), j.id()))
                .collect(),
        }
    }

    /// The vehicle starting at `start_index`.
    pub fn vehicle(&self, start_index: usize) -> Result<&'a Identifier> {
        self.vehicles
            .get(&start_index)
            .copied()
            .ok_or(RoutingError::IdentifierNotFound { index: start_index })
    }

    /// The job located at `location_index`.
    pub fn job(&self, location_index: usize) -> Result<&'a Identifier> {
        self.jobs
            .get(&location_index)
            .copied()
            .ok_or(RoutingError::IdentifierNotFound {
                index: location_index,
            })
    }
}
