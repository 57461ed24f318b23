//! Travel duration matrices.
//!
//! Provides a dense, read-only duration matrix indexed by location.

mod matrix;

pub use matrix::DistanceMatrix;
