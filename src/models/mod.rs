//! Domain model types for min-max routing.
//!
//! Vehicles with start locations, jobs with locations, route segments served
//! by one vehicle each, and the solution that binds them together.

mod identifier;
mod instance;
mod job;
mod route;
mod solution;
mod vehicle;

pub use identifier::Identifier;
pub use instance::Instance;
pub use job::Job;
pub use route::{Assignment, RouteSegment};
pub use solution::Solution;
pub use vehicle::Vehicle;
