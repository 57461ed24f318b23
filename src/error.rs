//! Error type shared by the loader, the resolver and the search.

use crate::models::Identifier;

/// Errors raised while validating an instance or running the search.
///
/// Validation errors are always reported before the search starts, so a
/// caller never receives a partial solution together with an error.
#[derive(Debug)]
pub enum RoutingError {
    /// Zero vehicles or zero jobs where a minimum over both sets is required.
    EmptyInstance {
        /// Number of vehicles supplied.
        vehicles: usize,
        /// Number of jobs supplied.
        jobs: usize,
    },
    /// A vehicle start or job location does not index into the matrix.
    MatrixIndexOutOfRange {
        /// The offending location index.
        index: usize,
        /// Number of locations in the matrix.
        size: usize,
    },
    /// A matrix row does not have as many entries as there are rows.
    MatrixNotSquare {
        /// Number of rows.
        rows: usize,
        /// Index of the malformed row.
        row: usize,
        /// Length of the malformed row.
        len: usize,
    },
    /// Flat matrix data does not hold `size * size` entries.
    MatrixSizeMismatch {
        /// Declared number of locations.
        size: usize,
        /// Number of entries supplied.
        len: usize,
    },
    /// A travel duration is negative or not finite.
    InvalidDuration {
        /// Origin location.
        from: usize,
        /// Destination location.
        to: usize,
        /// The rejected value.
        value: f64,
    },
    /// Declared counts disagree with the supplied index lists.
    CountMismatch {
        /// What was counted ("vehicles" or "jobs").
        what: &'static str,
        /// Declared count.
        expected: usize,
        /// Length of the supplied list.
        actual: usize,
    },
    /// Two vehicles or two jobs share an identifier.
    DuplicateIdentifier(Identifier),
    /// Two entities of the same kind share a location index.
    DuplicateLocation {
        /// What was duplicated ("vehicle start" or "job location").
        what: &'static str,
        /// The shared location index.
        index: usize,
    },
    /// No vehicle or job is registered at the given location index.
    IdentifierNotFound {
        /// The location index that could not be resolved.
        index: usize,
    },
    /// A generated distribution does not partition the job count.
    ///
    /// This is a defect in the generator, never a user error.
    DistributionInvariantViolation {
        /// The faulty counts.
        counts: Vec<usize>,
        /// The job count they should sum to.
        expected_sum: usize,
    },
    /// Reading or writing a file failed.
    Io(std::io::Error),
    /// JSON (de)serialization failed.
    Json(serde_json::Error),
}

impl std::fmt::Display for RoutingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInstance { vehicles, jobs } => write!(
                f,
                "Instance needs at least one vehicle and one job (got {vehicles} vehicles, {jobs} jobs)"
            ),
            Self::MatrixIndexOutOfRange { index, size } => write!(
                f,
                "Location index {index} is out of range for a matrix of size {size}"
            ),
            Self::MatrixNotSquare { rows, row, len } => write!(
                f,
                "Matrix is not square: row {row} has {len} entries, expected {rows}"
            ),
            Self::MatrixSizeMismatch { size, len } => write!(
                f,
                "Matrix of size {size} needs {} entries, got {len}",
                size * size
            ),
            Self::InvalidDuration { from, to, value } => write!(
                f,
                "Invalid duration {value} from location {from} to location {to}"
            ),
            Self::CountMismatch {
                what,
                expected,
                actual,
            } => write!(f, "Expected {expected} {what}, got {actual}"),
            Self::DuplicateIdentifier(id) => write!(f, "Duplicate identifier '{id}'"),
            Self::DuplicateLocation { what, index } => {
                write!(f, "Duplicate {what} index {index}")
            }
            Self::IdentifierNotFound { index } => {
                write!(f, "No identifier registered for location index {index}")
            }
            Self::DistributionInvariantViolation {
                counts,
                expected_sum,
            } => write!(
                f,
                "Distribution {counts:?} does not sum to the job count {expected_sum}"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for RoutingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RoutingError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for RoutingError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RoutingError>;
