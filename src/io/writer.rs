//! JSON result writer.
//!
//! Output layout:
//!
//! ```json
//! {
//!   "Total Delivery Duration": "2",
//!   "Search Status": "optimal",
//!   "Vehicle Routes": { "1": ["10"], "2": ["11"] }
//! }
//! ```
//!
//! Vehicles appear in slot order of the solution; idle vehicles map to an
//! empty list.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::resolver::IdentifierResolver;
use crate::error::Result;
use crate::models::{Identifier, Solution};
use crate::search::SearchStatus;

/// A solution with locations resolved to identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteReport {
    #[serde(rename = "Total Delivery Duration", serialize_with = "as_text")]
    total_duration: f64,
    #[serde(rename = "Search Status", serialize_with = "as_text")]
    status: SearchStatus,
    #[serde(rename = "Vehicle Routes", serialize_with = "ordered_map")]
    routes: Vec<(Identifier, Vec<Identifier>)>,
}

impl RouteReport {
    /// Resolves every vehicle and job of `solution`.
    ///
    /// Fails with [`IdentifierNotFound`] if any location has no identifier.
    ///
    /// [`IdentifierNotFound`]: crate::error::RoutingError::IdentifierNotFound
    pub fn new(
        solution: &Solution,
        status: SearchStatus,
        resolver: &IdentifierResolver<'_>,
    ) -> Result<Self> {
        let routes = solution
            .routes()
            .map(|(start, segment)| {
                let vehicle = resolver.vehicle(start)?.clone();
                let jobs = segment
                    .locations()
                    .iter()
                    .map(|&loc| resolver.job(loc).cloned())
                    .collect::<Result<Vec<_>>>()?;
                Ok((vehicle, jobs))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            total_duration: solution.makespan(),
            status,
            routes,
        })
    }

    /// The makespan.
    pub fn total_duration(&self) -> f64 {
        self.total_duration
    }

    /// `(vehicle, jobs in visit order)` pairs in slot order.
    pub fn routes(&self) -> &[(Identifier, Vec<Identifier>)] {
        &self.routes
    }

    /// Serializes the report as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the report as pretty JSON.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = writer;
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Writes the report to a file, replacing it if present.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.write_to(BufWriter::new(File::create(path)?))
    }
}

fn as_text<T, S>(value: &T, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    T: std::fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

fn ordered_map<S>(
    routes: &[(Identifier, Vec<Identifier>)],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(routes.len()))?;
    for (vehicle, jobs) in routes {
        map.serialize_entry(vehicle, jobs)?;
    }
    map.end()
}
