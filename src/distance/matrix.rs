//! Dense travel duration matrix.

use crate::error::{Result, RoutingError};

/// A dense n×n travel duration matrix stored in row-major order.
///
/// Entry `(i, j)` is the travel duration in seconds from location `i` to
/// location `j`. The matrix need not be symmetric. Once handed to the search
/// it is only ever read.
///
/// # Examples
///
/// ```
/// use u_makespan::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_rows(vec![
///     vec![0.0, 5.0],
///     vec![7.0, 0.0],
/// ]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.get(1, 0), 7.0);
/// assert_eq!(dm.size(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a duration matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit row-major n×n grid.
    ///
    /// Fails if the data length doesn't match `size * size` or if any entry
    /// is negative or not finite.
    pub fn from_data(size: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != size * size {
            return Err(RoutingError::MatrixSizeMismatch {
                size,
                len: data.len(),
            });
        }
        let dm = Self { data, size };
        dm.check_durations()?;
        Ok(dm)
    }

    /// Creates a matrix whose entry `(i, j)` is `duration(i, j)`.
    ///
    /// Integral durations are always valid, so this cannot fail.
    pub fn from_fn<F>(size: usize, mut duration: F) -> Self
    where
        F: FnMut(usize, usize) -> u32,
    {
        let data = (0..size * size)
            .map(|k| f64::from(duration(k / size, k % size)))
            .collect();
        Self { data, size }
    }

    /// Creates a matrix from nested rows, as found in JSON instances.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(RoutingError::MatrixNotSquare {
                    rows: size,
                    row,
                    len: values.len(),
                });
            }
            data.extend(values);
        }
        let dm = Self { data, size };
        dm.check_durations()?;
        Ok(dm)
    }

    /// Fails with [`RoutingError::InvalidDuration`] on the first entry that
    /// is negative or not finite.
    pub fn check_durations(&self) -> Result<()> {
        self.data
            .iter()
            .enumerate()
            .try_for_each(|(k, &value)| check_duration(k / self.size, k % self.size, value))
    }

    /// Returns the travel duration from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds. Indices are validated with
    /// [`check_index`](Self::check_index) before the search starts.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the travel duration from location `from` to location `to`.
    ///
    /// Negative or non-finite durations are rejected and leave the matrix
    /// unchanged.
    pub fn set(&mut self, from: usize, to: usize, duration: f64) -> Result<()> {
        check_duration(from, to, duration)?;
        self.data[from * self.size + to] = duration;
        Ok(())
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Fails with [`RoutingError::MatrixIndexOutOfRange`] unless `index` is a
    /// valid location.
    pub fn check_index(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(RoutingError::MatrixIndexOutOfRange {
                index,
                size: self.size,
            })
        }
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Returns the rows of this matrix as nested vectors.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.size.max(1)).map(<[f64]>::to_vec).collect()
    }
}

fn check_duration(from: usize, to: usize, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RoutingError::InvalidDuration { from, to, value })
    }
}
