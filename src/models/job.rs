//! Job type.

use serde::{Deserialize, Serialize};

use super::Identifier;

/// A job to be served at a single location.
///
/// # Examples
///
/// ```
/// use u_makespan::models::Job;
///
/// let j = Job::new("parcel-9", 12);
/// assert_eq!(j.location_index(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    id: Identifier,
    location_index: usize,
}

impl Job {
    /// Creates a job with the given identifier and location.
    pub fn new(id: impl Into<Identifier>, location_index: usize) -> Self {
        Self {
            id: id.into(),
            location_index,
        }
    }

    /// Job identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Location index into the duration matrix.
    pub fn location_index(&self) -> usize {
        self.location_index
    }
}
