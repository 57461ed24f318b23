//! JSON instance loader.
//!
//! Expected layout:
//!
//! ```json
//! {
//!   "vehicles": [{ "id": 1, "start_index": 0 }],
//!   "jobs": [{ "id": "a", "location_index": 1 }],
//!   "matrix": [[0, 5], [5, 0]]
//! }
//! ```
//!
//! Identifiers may be strings or integers. Unknown fields are ignored.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::distance::DistanceMatrix;
use crate::error::Result;
use crate::models::{Instance, Job, Vehicle};

#[derive(Debug, Deserialize)]
struct RawInstance {
    vehicles: Vec<Vehicle>,
    jobs: Vec<Job>,
    matrix: Vec<Vec<f64>>,
}

/// Parses and validates an instance from a JSON string.
///
/// # Examples
///
/// ```
/// use u_makespan::io::load_instance_str;
///
/// let instance = load_instance_str(r#"{
///     "vehicles": [{"id": 1, "start_index": 0}],
///     "jobs": [{"id": 7, "location_index": 1}],
///     "matrix": [[0, 3], [3, 0]]
/// }"#).unwrap();
/// assert_eq!(instance.num_vehicles(), 1);
/// assert_eq!(instance.distances().get(0, 1), 3.0);
/// ```
pub fn load_instance_str(json: &str) -> Result<Instance> {
    build(serde_json::from_str(json)?)
}

/// Parses and validates an instance from a reader.
pub fn load_instance_reader<R: Read>(reader: R) -> Result<Instance> {
    build(serde_json::from_reader(reader)?)
}

/// Parses and validates an instance from a file.
pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let file = File::open(path)?;
    load_instance_reader(BufReader::new(file))
}

#[derive(Serialize)]
struct RawInstanceRef<'a> {
    vehicles: &'a [Vehicle],
    jobs: &'a [Job],
    matrix: Vec<Vec<f64>>,
}

/// Writes an instance in the layout accepted by [`load_instance`].
pub fn write_instance<W: Write>(instance: &Instance, writer: W) -> Result<()> {
    let mut writer = writer;
    let raw = RawInstanceRef {
        vehicles: instance.vehicles(),
        jobs: instance.jobs(),
        matrix: instance.distances().to_rows(),
    };
    serde_json::to_writer_pretty(&mut writer, &raw)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

fn build(raw: RawInstance) -> Result<Instance> {
    let distances = DistanceMatrix::from_rows(raw.matrix)?;
    if !distances.is_symmetric(0.0) {
        tracing::debug!("duration matrix is asymmetric");
    }
    Instance::new(raw.vehicles, raw.jobs, distances)
}
