//! # u-makespan
//!
//! Exact min-max vehicle routing for small instances: assign every job to one
//! vehicle and order each route so that the longest route is as short as
//! possible. Vehicles start at their own location and end at their last job.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Vehicle, Job, RouteSegment, Solution, Instance)
//! - [`distance`] — Travel duration matrix
//! - [`search`] — Pruned exhaustive search (distributions, orderings, assignments)
//! - [`io`] — JSON instance loader, identifier resolver and result writer
//! - [`error`] — Crate error type

pub mod distance;
pub mod error;
pub mod io;
pub mod models;
pub mod search;

pub use error::{Result, RoutingError};
