//! Instance loading, identifier resolution and result writing.
//!
//! - [`load_instance`] — JSON instance file to validated [`Instance`](crate::models::Instance)
//! - [`write_instance`] — Instance back to the same JSON layout
//! - [`IdentifierResolver`] — Location index to vehicle/job identifier
//! - [`RouteReport`] — Resolved solution serialized as JSON

mod loader;
mod resolver;
mod writer;

pub use loader::{load_instance, load_instance_reader, load_instance_str, write_instance};
pub use resolver::IdentifierResolver;
pub use writer::RouteReport;
