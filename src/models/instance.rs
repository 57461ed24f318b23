//! Validated problem instance.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Identifier, Job, Vehicle};
use crate::distance::DistanceMatrix;
use crate::error::{Result, RoutingError};

/// Vehicles, jobs and the duration matrix they index into.
///
/// Construction checks that every location index is valid, that
/// identifiers are unique per kind and that no two vehicles (or no two jobs)
/// share a location, so every location maps back to one identifier.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
/// use u_makespan::models::{Instance, Job, Vehicle};
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 4.0],
///     vec![4.0, 0.0],
/// ]).unwrap();
/// let instance = Instance::new(vec![Vehicle::new("v", 0)], vec![Job::new("j", 1)], dm).unwrap();
/// assert_eq!(instance.num_vehicles(), 1);
/// assert_eq!(instance.job_locations(), vec![1]);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    vehicles: Vec<Vehicle>,
    jobs: Vec<Job>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Creates a validated instance.
    pub fn new(vehicles: Vec<Vehicle>, jobs: Vec<Job>, distances: DistanceMatrix) -> Result<Self> {
        check_unique(
            vehicles.iter().map(|v| (v.id(), v.start_index())),
            &distances,
            "vehicle start",
        )?;
        check_unique(
            jobs.iter().map(|j| (j.id(), j.location_index())),
            &distances,
            "job location",
        )?;
        Ok(Self {
            vehicles,
            jobs,
            distances,
        })
    }

    /// Generates a random instance with integral durations in `1..=max_duration`.
    ///
    /// Vehicles start at locations `0..num_vehicles`, jobs sit at the
    /// following `num_jobs` locations. Identifiers are `v{i}` and `j{k}`.
    pub fn random(num_vehicles: usize, num_jobs: usize, max_duration: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let size = num_vehicles + num_jobs;
        let distances = DistanceMatrix::from_fn(size, |i, j| {
            if i == j {
                0
            } else {
                rng.random_range(1..=max_duration.max(1))
            }
        });
        let vehicles = (0..num_vehicles)
            .map(|i| Vehicle::new(format!("v{i}"), i))
            .collect();
        let jobs = (0..num_jobs)
            .map(|k| Job::new(format!("j{k}"), num_vehicles + k))
            .collect();
        Self {
            vehicles,
            jobs,
            distances,
        }
    }

    /// The vehicles, in input order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// The jobs, in input order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// The duration matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.vehicles.len()
    }

    /// Number of jobs.
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Start location of every vehicle, in input order.
    pub fn vehicle_starts(&self) -> Vec<usize> {
        self.vehicles.iter().map(Vehicle::start_index).collect()
    }

    /// Location of every job, in input order.
    pub fn job_locations(&self) -> Vec<usize> {
        self.jobs.iter().map(Job::location_index).collect()
    }
}

fn check_unique<'a>(
    entries: impl Iterator<Item = (&'a Identifier, usize)>,
    distances: &DistanceMatrix,
    what: &'static str,
) -> Result<()> {
    let mut ids = HashSet::new();
    let mut locations = HashSet::new();
    for (id, index) in entries {
        distances.check_index(index)?;
        if !ids.insert(id) {
            return Err(RoutingError::DuplicateIdentifier(id.clone()));
        }
        if !locations.insert(index) {
            return Err(RoutingError::DuplicateLocation { what, index });
        }
    }
    Ok(())
}
