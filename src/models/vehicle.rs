//! Vehicle type with its start location.

use serde::{Deserialize, Serialize};

use super::Identifier;

/// A vehicle that starts at a fixed location and ends at its last job.
///
/// # Examples
///
/// ```
/// use u_makespan::models::Vehicle;
///
/// let v = Vehicle::new("van-1", 4);
/// assert_eq!(v.id().as_str(), "van-1");
/// assert_eq!(v.start_index(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: Identifier,
    start_index: usize,
}

impl Vehicle {
    /// Creates a vehicle with the given identifier and start location.
    pub fn new(id: impl Into<Identifier>, start_index: usize) -> Self {
        Self {
            id: id.into(),
            start_index,
        }
    }

    /// Vehicle identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Start location index into the duration matrix.
    pub fn start_index(&self) -> usize {
        self.start_index
    }
}
